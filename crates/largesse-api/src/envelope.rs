//! The uniform success envelope.
//!
//! Every resource endpoint wraps its reply as
//! `{"status": "success", ...}` with optional `data` and `message` keys;
//! the error side of the envelope is rendered by [`crate::ApiError`].

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub status:  &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

impl<T> Envelope<T> {
  /// `{"status": "success", "data": ...}`
  pub fn data(data: T) -> Self {
    Self {
      status:  "success",
      data:    Some(data),
      message: None,
    }
  }

  /// `{"status": "success", "message": ...}`
  pub fn message(message: impl Into<String>) -> Self {
    Self {
      status:  "success",
      data:    None,
      message: Some(message.into()),
    }
  }

  /// `{"status": "success", "message": ..., "data": ...}`
  pub fn with_message(data: T, message: impl Into<String>) -> Self {
    Self {
      status:  "success",
      data:    Some(data),
      message: Some(message.into()),
    }
  }
}
