//! Person — the recipient side of the gift ledger.
//!
//! People are soft-deleted, never removed: `eliminated` is flipped to keep
//! referential history for their occasions and gifts. Each read endpoint
//! exposes its own column subset, so the read models here are distinct
//! structs rather than one struct with optional fields.

use serde::{Deserialize, Serialize};

// ─── Read models ─────────────────────────────────────────────────────────────

/// The row shape returned by the default listing: name and relationship
/// only, active people only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
  pub f_name:       String,
  pub l_name:       String,
  pub relationship: String,
}

/// The row shape returned by search and relationship filtering: full
/// contact card without the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonProfile {
  pub f_name:       String,
  pub l_name:       String,
  pub relationship: String,
  pub phone:        String,
  pub email:        String,
}

/// A full person record as returned by id lookup and creation.
/// The `eliminated` flag is storage-internal and never serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
  pub person_id:    i64,
  pub f_name:       String,
  pub l_name:       String,
  pub relationship: String,
  pub phone:        String,
  pub email:        String,
}

/// A bare reference to a person, used as an ambiguity candidate when
/// natural-key resolution matches more than one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
  pub person_id: i64,
}

// ─── Write models ────────────────────────────────────────────────────────────

/// Input to [`crate::store::GiftStore::add_person`]. The identifier and the
/// `eliminated` flag are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPerson {
  pub f_name:       String,
  pub l_name:       String,
  pub relationship: String,
  pub phone:        String,
  pub email:        String,
}

/// The contact fields rewritten by a targeted update; the name fields act
/// purely as selectors and are never touched.
#[derive(Debug, Clone, Serialize)]
pub struct ContactUpdate {
  pub relationship: String,
  pub phone:        String,
  pub email:        String,
}

// ─── Resolution criteria ─────────────────────────────────────────────────────

/// Natural-key criteria for resolving exactly one active person.
///
/// Matching is case-insensitive and always scoped to `eliminated = 0`.
/// When `relationship` is set the match is tightened to all three fields,
/// which is how the eliminate and full-update operations disambiguate
/// people sharing a name.
#[derive(Debug, Clone)]
pub struct PersonCriteria {
  pub f_name:       String,
  pub l_name:       String,
  pub relationship: Option<String>,
}

impl PersonCriteria {
  /// Criteria matching on first and last name only.
  pub fn by_name(f_name: impl Into<String>, l_name: impl Into<String>) -> Self {
    Self {
      f_name:       f_name.into(),
      l_name:       l_name.into(),
      relationship: None,
    }
  }

  /// Criteria matching on first name, last name, and relationship.
  pub fn by_info(
    f_name: impl Into<String>,
    l_name: impl Into<String>,
    relationship: impl Into<String>,
  ) -> Self {
    Self {
      f_name:       f_name.into(),
      l_name:       l_name.into(),
      relationship: Some(relationship.into()),
    }
  }
}
