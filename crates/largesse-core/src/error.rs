//! Error types for `largesse-core`.

use thiserror::Error;

use crate::person::PersonRef;

#[derive(Debug, Error)]
pub enum Error {
  /// Natural-key resolution found no active person.
  #[error("no matching active person found")]
  PersonNotFound,

  /// Natural-key resolution found more than one active person.
  /// Nothing is mutated; the candidates are returned to the caller.
  #[error("multiple active people matched ({} candidates)", .0.len())]
  AmbiguousPerson(Vec<PersonRef>),

  /// The person referenced by an occasion is absent or eliminated.
  #[error("person {0} not found or eliminated")]
  PersonInactive(i64),

  #[error("gift not found: {0}")]
  GiftNotFound(i64),

  #[error("date parse error: {0}")]
  DateParse(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
