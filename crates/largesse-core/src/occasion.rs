//! Occasion — a dated event belonging to one person.
//!
//! Occasions are created only after the store verifies the owning person is
//! active; they are never updated or deleted. Dates are calendar dates with
//! no time component, serialised as `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored occasion row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occasion {
  pub occasion_id:   i64,
  pub person_id:     i64,
  pub occasion_name: String,
  pub occasion_date: NaiveDate,
}

/// Input to [`crate::store::GiftStore::add_occasion`].
#[derive(Debug, Clone)]
pub struct NewOccasion {
  pub person_id:     i64,
  pub occasion_name: String,
  pub occasion_date: NaiveDate,
}

/// One entry of the upcoming-occasions view: the date, the occasion, and
/// the owning person's display name ("first last"). Only occasions owned
/// by active people appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
  pub occasion_date: NaiveDate,
  pub occasion_name: String,
  pub person_name:   String,
}
