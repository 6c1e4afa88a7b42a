//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Errors render as the envelope's error side:
//! `{"status": "error", "message": ...}`, with an `error` object carrying
//! structured detail where one exists (ambiguity candidates, storage
//! failure detail).

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use largesse_core::person::PersonRef;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// A natural-key lookup matched more than one active person.
  #[error("ambiguous person ({} candidates)", .0.len())]
  Ambiguous(Vec<PersonRef>),

  #[error("store error: {0}")]
  Store(#[source] largesse_core::Error),
}

impl From<largesse_core::Error> for ApiError {
  fn from(err: largesse_core::Error) -> Self {
    use largesse_core::Error;
    match err {
      Error::PersonNotFound => {
        ApiError::NotFound("No matching active person found".into())
      }
      Error::AmbiguousPerson(candidates) => ApiError::Ambiguous(candidates),
      Error::PersonInactive(_) => {
        ApiError::BadRequest("Person not found or has been eliminated".into())
      }
      Error::GiftNotFound(_) => ApiError::NotFound("Gift not found".into()),
      other => ApiError::Store(other),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      ApiError::NotFound(m) => (
        StatusCode::NOT_FOUND,
        json!({ "status": "error", "message": m }),
      ),
      ApiError::BadRequest(m) => (
        StatusCode::BAD_REQUEST,
        json!({ "status": "error", "message": m }),
      ),
      ApiError::Ambiguous(candidates) => (
        StatusCode::BAD_REQUEST,
        json!({
          "status": "error",
          "message": "Multiple people matched; please be more specific",
          "error": { "matches": candidates },
        }),
      ),
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
          "status": "error",
          "message": "Database error",
          "error": { "detail": e.to_string() },
        }),
      ),
    };
    (status, Json(body)).into_response()
  }
}

// ─── Validation ───────────────────────────────────────────────────────────────

/// Rejects a request whose body omits (or blanks) any of the named
/// required fields, listing every offender in one message.
pub(crate) fn require_fields(fields: &[(&str, bool)]) -> Result<(), ApiError> {
  let missing: Vec<&str> = fields
    .iter()
    .filter(|(_, present)| !present)
    .map(|(name, _)| *name)
    .collect();

  if missing.is_empty() {
    Ok(())
  } else {
    Err(ApiError::BadRequest(format!(
      "Missing required field(s): {}",
      missing.join(", ")
    )))
  }
}

/// A string field counts as present only when it has non-whitespace
/// content.
pub(crate) fn is_filled(value: &Option<String>) -> bool {
  value.as_deref().is_some_and(|s| !s.trim().is_empty())
}
