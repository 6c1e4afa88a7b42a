//! Core types and trait definitions for the largesse gift tracker.
//!
//! Domain models for people, occasions, and gifts live here, together
//! with the [`store::GiftStore`] abstraction and the error type shared
//! by every backend. The crate knows nothing about HTTP or SQL; those
//! concerns belong to `largesse-api` and `largesse-store-sqlite`.

pub mod error;
pub mod gift;
pub mod occasion;
pub mod person;
pub mod store;

pub use error::{Error, Result};
