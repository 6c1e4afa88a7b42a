//! Handlers for `/v1/gifts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/v1/gifts` | Flat summaries, newest first |
//! | `GET`  | `/v1/gifts/:id` | Gift joined with occasion and recipient |
//! | `POST` | `/v1/gifts` | Body: [`GiftBody`]; `occasion_id` is not checked |
//! | `PUT`  | `/v1/gifts/:id` | Whole-row overwrite |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use largesse_core::{
  gift::{GiftDetail, GiftSummary, GiftUpdate, NewGift},
  store::GiftStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  envelope::Envelope,
  error::{ApiError, is_filled, require_fields},
};

/// Body shared by `POST /v1/gifts` and `PUT /v1/gifts/:id`. Updates
/// ignore `occasion_id`; a gift never moves between occasions.
#[derive(Debug, Deserialize)]
pub struct GiftBody {
  pub occasion_id:       Option<i64>,
  pub gift_name:         Option<String>,
  pub gift_description:  Option<String>,
  pub approx_gift_price: Option<f64>,
  pub status:            Option<String>,
  pub feedback:          Option<String>,
}

fn parse_gift_id(raw: &str) -> Result<i64, ApiError> {
  raw.parse().map_err(|_| ApiError::BadRequest("Invalid gift ID".into()))
}

/// Blank optional strings store as NULL, same as absent ones.
fn normalize(value: Option<String>) -> Option<String> {
  value.filter(|s| !s.trim().is_empty())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /v1/gifts` — flat summaries, newest first.
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Envelope<Vec<GiftSummary>>>, ApiError>
where
  S: GiftStore,
{
  let gifts = store.list_gifts().await?;
  Ok(Json(Envelope::data(gifts)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /v1/gifts/:id` — the gift joined with its occasion and
/// recipient. A gift whose occasion was never created yields 404.
pub async fn detail<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<GiftDetail>>, ApiError>
where
  S: GiftStore,
{
  let gift_id = parse_gift_id(&id)?;
  let detail = store
    .gift_detail(gift_id)
    .await?
    .ok_or_else(|| ApiError::NotFound("Gift not found".into()))?;
  Ok(Json(Envelope::data(detail)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /v1/gifts` — `occasion_id` is taken as given, dangling or not;
/// a bad reference only surfaces later as an empty detail join.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<GiftBody>,
) -> Result<Json<Envelope<Value>>, ApiError>
where
  S: GiftStore,
{
  require_fields(&[
    ("occasion_id", body.occasion_id.is_some()),
    ("gift_name", is_filled(&body.gift_name)),
    ("status", is_filled(&body.status)),
  ])?;

  let input = NewGift {
    occasion_id:       body.occasion_id.unwrap_or_default(),
    gift_name:         body.gift_name.unwrap_or_default(),
    gift_description:  normalize(body.gift_description),
    approx_gift_price: body.approx_gift_price,
    status:            body.status.unwrap_or_default(),
    feedback:          normalize(body.feedback),
  };

  let gift_id = store.add_gift(input).await?;
  Ok(Json(Envelope::with_message(
    json!({ "gift_id": gift_id }),
    "Gift added!",
  )))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /v1/gifts/:id` — whole-row overwrite; optional fields omitted
/// from the body become NULL.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<GiftBody>,
) -> Result<Json<Envelope<()>>, ApiError>
where
  S: GiftStore,
{
  let gift_id = parse_gift_id(&id)?;
  require_fields(&[
    ("gift_name", is_filled(&body.gift_name)),
    ("status", is_filled(&body.status)),
  ])?;

  let update = GiftUpdate {
    gift_name:         body.gift_name.unwrap_or_default(),
    gift_description:  normalize(body.gift_description),
    approx_gift_price: body.approx_gift_price,
    status:            body.status.unwrap_or_default(),
    feedback:          normalize(body.feedback),
  };

  store.update_gift(gift_id, update).await?;
  Ok(Json(Envelope::message("Gift updated successfully!")))
}
