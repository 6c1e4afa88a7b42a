//! Handlers for `/v1/occasions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/v1/occasions/names` | Distinct names, alphabetical |
//! | `GET`  | `/v1/occasions/timeline` | Active people's occasions, soonest first |
//! | `POST` | `/v1/occasions` | Body: [`NewOccasionBody`]; person must be active |

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::NaiveDate;
use largesse_core::{
  occasion::{NewOccasion, Occasion, TimelineEntry},
  store::GiftStore,
};
use serde::Deserialize;

use crate::{
  envelope::Envelope,
  error::{ApiError, is_filled, require_fields},
};

// ─── Names ────────────────────────────────────────────────────────────────────

/// `GET /v1/occasions/names` — distinct names, alphabetical.
pub async fn names<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Envelope<Vec<String>>>, ApiError>
where
  S: GiftStore,
{
  let names = store.occasion_names().await?;
  Ok(Json(Envelope::data(names)))
}

// ─── Timeline ─────────────────────────────────────────────────────────────────

/// `GET /v1/occasions/timeline` — every occasion of every active person,
/// soonest date first.
pub async fn timeline<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Envelope<Vec<TimelineEntry>>>, ApiError>
where
  S: GiftStore,
{
  let entries = store.occasion_timeline().await?;
  Ok(Json(Envelope::data(entries)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewOccasionBody {
  pub person_id:     Option<i64>,
  pub occasion_name: Option<String>,
  pub occasion_date: Option<String>,
}

/// `POST /v1/occasions` — the referenced person must exist and still be
/// active; the check and the insert share one transaction.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewOccasionBody>,
) -> Result<Json<Envelope<Occasion>>, ApiError>
where
  S: GiftStore,
{
  require_fields(&[
    ("person_id", body.person_id.is_some()),
    ("occasion_name", is_filled(&body.occasion_name)),
    ("occasion_date", is_filled(&body.occasion_date)),
  ])?;

  let raw_date = body.occasion_date.unwrap_or_default();
  let occasion_date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
    .map_err(|_| {
      ApiError::BadRequest(
        "Invalid 'occasion_date'; expected YYYY-MM-DD".into(),
      )
    })?;

  let input = NewOccasion {
    person_id:     body.person_id.unwrap_or_default(),
    occasion_name: body.occasion_name.unwrap_or_default(),
    occasion_date,
  };

  let occasion = store.add_occasion(input).await?;
  Ok(Json(Envelope::with_message(occasion, "New occasion added!")))
}
