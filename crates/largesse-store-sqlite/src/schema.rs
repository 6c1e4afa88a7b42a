//! SQL schema for the largesse SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- People are soft-deleted only: eliminated flips to 1 and the row stays,
-- so occasions and gifts keep resolving.
CREATE TABLE IF NOT EXISTS people (
    person_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    f_name       TEXT NOT NULL,
    l_name       TEXT NOT NULL,
    relationship TEXT NOT NULL,
    phone        TEXT NOT NULL,
    email        TEXT NOT NULL,
    eliminated   INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS occasions (
    occasion_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id     INTEGER NOT NULL REFERENCES people(person_id),
    occasion_name TEXT NOT NULL,
    occasion_date TEXT NOT NULL    -- YYYY-MM-DD
);

-- occasion_id carries no foreign key: a gift may reference an occasion
-- that was never created, and the detail join then yields no row.
CREATE TABLE IF NOT EXISTS gifts (
    gift_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    occasion_id       INTEGER NOT NULL,
    gift_name         TEXT NOT NULL,
    gift_description  TEXT,
    approx_gift_price REAL,
    status            TEXT NOT NULL,
    feedback          TEXT
);

CREATE INDEX IF NOT EXISTS people_name_idx      ON people(f_name, l_name);
CREATE INDEX IF NOT EXISTS people_active_idx    ON people(eliminated);
CREATE INDEX IF NOT EXISTS occasions_person_idx ON occasions(person_id);
CREATE INDEX IF NOT EXISTS gifts_occasion_idx   ON gifts(occasion_id);

PRAGMA user_version = 1;
";
