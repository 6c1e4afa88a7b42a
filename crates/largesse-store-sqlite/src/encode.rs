//! Encoding helpers between Rust domain types and the plain-text values
//! stored in SQLite columns.
//!
//! Calendar dates are stored as `YYYY-MM-DD` strings, which also makes
//! lexicographic `ORDER BY` chronological.

use chrono::NaiveDate;
use largesse_core::{
  Error, Result,
  gift::{GiftDetail, OccasionInfo, Recipient},
  occasion::TimelineEntry,
};

// ─── Dates ───────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String {
  d.format(DATE_FORMAT).to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw columns of the gift detail join, with the date still text.
pub struct RawGiftDetail {
  pub gift_id:           i64,
  pub gift_name:         String,
  pub gift_description:  Option<String>,
  pub approx_gift_price: Option<f64>,
  pub status:            String,
  pub feedback:          Option<String>,
  pub occasion_date:     String,
  pub occasion_name:     String,
  pub first_name:        String,
  pub last_name:         String,
}

impl RawGiftDetail {
  pub fn into_detail(self) -> Result<GiftDetail> {
    Ok(GiftDetail {
      gift_id:           self.gift_id,
      gift_name:         self.gift_name,
      gift_description:  self.gift_description,
      approx_gift_price: self.approx_gift_price,
      status:            self.status,
      occasion:          OccasionInfo {
        date: decode_date(&self.occasion_date)?,
        name: self.occasion_name,
      },
      recipient:         Recipient {
        first_name: self.first_name,
        last_name:  self.last_name,
      },
      feedback:          self.feedback,
    })
  }
}

/// Raw columns of one timeline row.
pub struct RawTimelineEntry {
  pub occasion_date: String,
  pub occasion_name: String,
  pub person_name:   String,
}

impl RawTimelineEntry {
  pub fn into_entry(self) -> Result<TimelineEntry> {
    Ok(TimelineEntry {
      occasion_date: decode_date(&self.occasion_date)?,
      occasion_name: self.occasion_name,
      person_name:   self.person_name,
    })
  }
}
