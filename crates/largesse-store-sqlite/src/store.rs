//! The SQLite implementation of [`GiftStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use largesse_core::{
  Error, Result,
  gift::{GiftDetail, GiftSummary, GiftUpdate, NewGift},
  occasion::{NewOccasion, Occasion, TimelineEntry},
  person::{
    ContactUpdate, NewPerson, PersonCriteria, PersonProfile, PersonRecord,
    PersonRef, PersonSummary,
  },
  store::GiftStore,
};

use crate::{
  encode::{RawGiftDetail, RawTimelineEntry, encode_date},
  schema::SCHEMA,
};

fn db_err(e: tokio_rusqlite::Error) -> Error {
  Error::Storage(Box::new(e))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A largesse gift store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(db_err)?;
    Ok(())
  }
}

// ─── Person resolution ───────────────────────────────────────────────────────

/// Outcome of resolving a [`PersonCriteria`] against the active rows.
///
/// Carried as an `Ok` value out of the write transaction so the closure
/// stays within the database error type; the caller turns `None` and
/// `Many` into domain errors.
enum Resolution {
  None,
  One(i64),
  Many(Vec<PersonRef>),
}

/// Case-insensitive natural-key lookup among active people, ordered by
/// `person_id` for a stable candidate list.
fn resolve_person(
  tx: &rusqlite::Transaction<'_>,
  criteria: &PersonCriteria,
) -> rusqlite::Result<Resolution> {
  let ids: Vec<i64> = if let Some(relationship) = &criteria.relationship {
    let mut stmt = tx.prepare(
      "SELECT person_id FROM people
       WHERE LOWER(f_name) = LOWER(?1)
         AND LOWER(l_name) = LOWER(?2)
         AND LOWER(relationship) = LOWER(?3)
         AND eliminated = 0
       ORDER BY person_id",
    )?;
    stmt
      .query_map(
        rusqlite::params![criteria.f_name, criteria.l_name, relationship],
        |row| row.get(0),
      )?
      .collect::<rusqlite::Result<Vec<_>>>()?
  } else {
    let mut stmt = tx.prepare(
      "SELECT person_id FROM people
       WHERE LOWER(f_name) = LOWER(?1)
         AND LOWER(l_name) = LOWER(?2)
         AND eliminated = 0
       ORDER BY person_id",
    )?;
    stmt
      .query_map(rusqlite::params![criteria.f_name, criteria.l_name], |row| {
        row.get(0)
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?
  };

  Ok(match ids.as_slice() {
    [] => Resolution::None,
    [id] => Resolution::One(*id),
    _ => Resolution::Many(
      ids.into_iter().map(|person_id| PersonRef { person_id }).collect(),
    ),
  })
}

/// Map a resolution to the single mutated id, or the matching domain error.
fn require_one(resolution: Resolution) -> Result<i64> {
  match resolution {
    Resolution::One(person_id) => Ok(person_id),
    Resolution::None => Err(Error::PersonNotFound),
    Resolution::Many(candidates) => Err(Error::AmbiguousPerson(candidates)),
  }
}

// ─── GiftStore impl ──────────────────────────────────────────────────────────

impl GiftStore for SqliteStore {
  // ── People — reads ────────────────────────────────────────────────────────

  async fn list_people(&self) -> Result<Vec<PersonSummary>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT f_name, l_name, relationship
           FROM people
           WHERE eliminated = 0
           ORDER BY person_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(PersonSummary {
              f_name:       row.get(0)?,
              l_name:       row.get(1)?,
              relationship: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;
    Ok(rows)
  }

  async fn search_people(&self, prefix: &str) -> Result<Vec<PersonProfile>> {
    let pattern = format!("{}%", prefix.to_lowercase());

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT f_name, l_name, relationship, phone, email
           FROM people
           WHERE eliminated = 0
             AND (LOWER(f_name) LIKE ?1 OR LOWER(l_name) LIKE ?1)
           ORDER BY f_name ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![pattern], |row| {
            Ok(PersonProfile {
              f_name:       row.get(0)?,
              l_name:       row.get(1)?,
              relationship: row.get(2)?,
              phone:        row.get(3)?,
              email:        row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;
    Ok(rows)
  }

  async fn get_person(&self, person_id: i64) -> Result<Option<PersonRecord>> {
    let record = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT person_id, f_name, l_name, relationship, phone, email
               FROM people
               WHERE person_id = ?1",
              rusqlite::params![person_id],
              |row| {
                Ok(PersonRecord {
                  person_id:    row.get(0)?,
                  f_name:       row.get(1)?,
                  l_name:       row.get(2)?,
                  relationship: row.get(3)?,
                  phone:        row.get(4)?,
                  email:        row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;
    Ok(record)
  }

  async fn people_by_relationship(
    &self,
    relationship: &str,
  ) -> Result<Vec<PersonProfile>> {
    let relationship = relationship.to_owned();

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT f_name, l_name, relationship, phone, email
           FROM people
           WHERE eliminated = 0
             AND relationship = ?1
           ORDER BY person_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![relationship], |row| {
            Ok(PersonProfile {
              f_name:       row.get(0)?,
              l_name:       row.get(1)?,
              relationship: row.get(2)?,
              phone:        row.get(3)?,
              email:        row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;
    Ok(rows)
  }

  // ── People — writes ───────────────────────────────────────────────────────

  async fn add_person(&self, input: NewPerson) -> Result<PersonRecord> {
    let NewPerson { f_name, l_name, relationship, phone, email } = input;

    let record = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (
             f_name, l_name, relationship, phone, email, eliminated
           ) VALUES (?1, ?2, ?3, ?4, ?5, 0)",
          rusqlite::params![f_name, l_name, relationship, phone, email],
        )?;
        let person_id = conn.last_insert_rowid();
        Ok(PersonRecord {
          person_id,
          f_name,
          l_name,
          relationship,
          phone,
          email,
        })
      })
      .await
      .map_err(db_err)?;
    Ok(record)
  }

  async fn update_contact(
    &self,
    criteria: &PersonCriteria,
    update: ContactUpdate,
  ) -> Result<i64> {
    let criteria = criteria.clone();

    let resolution = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let resolution = resolve_person(&tx, &criteria)?;
        if let Resolution::One(person_id) = resolution {
          tx.execute(
            "UPDATE people
             SET relationship = ?1, phone = ?2, email = ?3
             WHERE person_id = ?4",
            rusqlite::params![
              update.relationship,
              update.phone,
              update.email,
              person_id,
            ],
          )?;
        }
        tx.commit()?;
        Ok(resolution)
      })
      .await
      .map_err(db_err)?;

    require_one(resolution)
  }

  async fn replace_person(
    &self,
    criteria: &PersonCriteria,
    replacement: NewPerson,
  ) -> Result<i64> {
    let criteria = criteria.clone();

    let resolution = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let resolution = resolve_person(&tx, &criteria)?;
        if let Resolution::One(person_id) = resolution {
          tx.execute(
            "UPDATE people
             SET f_name = ?1, l_name = ?2, relationship = ?3, phone = ?4,
                 email = ?5
             WHERE person_id = ?6",
            rusqlite::params![
              replacement.f_name,
              replacement.l_name,
              replacement.relationship,
              replacement.phone,
              replacement.email,
              person_id,
            ],
          )?;
        }
        tx.commit()?;
        Ok(resolution)
      })
      .await
      .map_err(db_err)?;

    require_one(resolution)
  }

  async fn eliminate_person(&self, criteria: &PersonCriteria) -> Result<i64> {
    let criteria = criteria.clone();

    let resolution = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let resolution = resolve_person(&tx, &criteria)?;
        if let Resolution::One(person_id) = resolution {
          tx.execute(
            "UPDATE people SET eliminated = 1 WHERE person_id = ?1",
            rusqlite::params![person_id],
          )?;
        }
        tx.commit()?;
        Ok(resolution)
      })
      .await
      .map_err(db_err)?;

    require_one(resolution)
  }

  // ── Gifts ─────────────────────────────────────────────────────────────────

  async fn list_gifts(&self) -> Result<Vec<GiftSummary>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT gift_name, gift_description
           FROM gifts
           ORDER BY gift_id DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(GiftSummary {
              gift_name:        row.get(0)?,
              gift_description: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;
    Ok(rows)
  }

  async fn gift_detail(&self, gift_id: i64) -> Result<Option<GiftDetail>> {
    let raw: Option<RawGiftDetail> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT
                 g.gift_id, g.gift_name, g.gift_description,
                 g.approx_gift_price, g.status, g.feedback,
                 o.occasion_date, o.occasion_name,
                 p.f_name, p.l_name
               FROM gifts g
               JOIN occasions o ON o.occasion_id = g.occasion_id
               JOIN people    p ON p.person_id   = o.person_id
               WHERE g.gift_id = ?1",
              rusqlite::params![gift_id],
              |row| {
                Ok(RawGiftDetail {
                  gift_id:           row.get(0)?,
                  gift_name:         row.get(1)?,
                  gift_description:  row.get(2)?,
                  approx_gift_price: row.get(3)?,
                  status:            row.get(4)?,
                  feedback:          row.get(5)?,
                  occasion_date:     row.get(6)?,
                  occasion_name:     row.get(7)?,
                  first_name:        row.get(8)?,
                  last_name:         row.get(9)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw.map(RawGiftDetail::into_detail).transpose()
  }

  async fn add_gift(&self, input: NewGift) -> Result<i64> {
    let gift_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO gifts (
             occasion_id, gift_name, gift_description, approx_gift_price,
             status, feedback
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            input.occasion_id,
            input.gift_name,
            input.gift_description,
            input.approx_gift_price,
            input.status,
            input.feedback,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;
    Ok(gift_id)
  }

  async fn update_gift(&self, gift_id: i64, update: GiftUpdate) -> Result<()> {
    let affected = self
      .conn
      .call(move |conn| {
        let affected = conn.execute(
          "UPDATE gifts
           SET gift_name = ?1, gift_description = ?2, approx_gift_price = ?3,
               status = ?4, feedback = ?5
           WHERE gift_id = ?6",
          rusqlite::params![
            update.gift_name,
            update.gift_description,
            update.approx_gift_price,
            update.status,
            update.feedback,
            gift_id,
          ],
        )?;
        Ok(affected)
      })
      .await
      .map_err(db_err)?;

    if affected == 0 {
      return Err(Error::GiftNotFound(gift_id));
    }
    Ok(())
  }

  // ── Occasions ─────────────────────────────────────────────────────────────

  async fn occasion_names(&self) -> Result<Vec<String>> {
    let names = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT occasion_name
           FROM occasions
           ORDER BY occasion_name ASC",
        )?;
        let names = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
      })
      .await
      .map_err(db_err)?;
    Ok(names)
  }

  async fn occasion_timeline(&self) -> Result<Vec<TimelineEntry>> {
    let raws: Vec<RawTimelineEntry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT
             o.occasion_date, o.occasion_name,
             p.f_name || ' ' || p.l_name AS person_name
           FROM occasions o
           JOIN people p ON p.person_id = o.person_id
           WHERE p.eliminated = 0
           ORDER BY o.occasion_date ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawTimelineEntry {
              occasion_date: row.get(0)?,
              occasion_name: row.get(1)?,
              person_name:   row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawTimelineEntry::into_entry).collect()
  }

  async fn add_occasion(&self, input: NewOccasion) -> Result<Occasion> {
    let NewOccasion { person_id, occasion_name, occasion_date } = input;
    let date_str = encode_date(occasion_date);
    let name = occasion_name.clone();

    let occasion_id: Option<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let active: bool = tx
          .query_row(
            "SELECT 1 FROM people WHERE person_id = ?1 AND eliminated = 0",
            rusqlite::params![person_id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !active {
          return Ok(None);
        }

        tx.execute(
          "INSERT INTO occasions (person_id, occasion_name, occasion_date)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![person_id, name, date_str],
        )?;
        let occasion_id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Some(occasion_id))
      })
      .await
      .map_err(db_err)?;

    match occasion_id {
      Some(occasion_id) => {
        Ok(Occasion { occasion_id, person_id, occasion_name, occasion_date })
      }
      None => Err(Error::PersonInactive(person_id)),
    }
  }
}
