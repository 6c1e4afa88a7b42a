//! Gift — an item given (or planned) for an occasion.
//!
//! Gifts are created and updated independently of the rest of the schema:
//! creation performs no existence check on `occasion_id`, so a gift may
//! reference an occasion that never resolves. The detail view surfaces that
//! as an empty join, not an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Read models ─────────────────────────────────────────────────────────────

/// The row shape returned by the gift listing, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftSummary {
  pub gift_name:        String,
  pub gift_description: Option<String>,
}

/// The occasion half of a gift detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccasionInfo {
  pub date: NaiveDate,
  pub name: String,
}

/// The person half of a gift detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
  pub first_name: String,
  pub last_name:  String,
}

/// A fully-joined gift: the gift row plus its occasion and the occasion's
/// owner. Only materialised when the gift → occasion → person join yields a
/// row; a dangling `occasion_id` produces no detail at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftDetail {
  pub gift_id:           i64,
  pub gift_name:         String,
  pub gift_description:  Option<String>,
  pub approx_gift_price: Option<f64>,
  pub status:            String,
  pub occasion:          OccasionInfo,
  pub recipient:         Recipient,
  pub feedback:          Option<String>,
}

// ─── Write models ────────────────────────────────────────────────────────────

/// Input to [`crate::store::GiftStore::add_gift`]. `occasion_id` is stored
/// verbatim; see the module docs.
#[derive(Debug, Clone)]
pub struct NewGift {
  pub occasion_id:       i64,
  pub gift_name:         String,
  pub gift_description:  Option<String>,
  pub approx_gift_price: Option<f64>,
  pub status:            String,
  pub feedback:          Option<String>,
}

/// A full-row overwrite for an existing gift. Optional fields left unset
/// are written as NULL rather than preserved.
#[derive(Debug, Clone)]
pub struct GiftUpdate {
  pub gift_name:         String,
  pub gift_description:  Option<String>,
  pub approx_gift_price: Option<f64>,
  pub status:            String,
  pub feedback:          Option<String>,
}
