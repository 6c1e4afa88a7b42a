//! JSON REST API for largesse.
//!
//! Exposes an axum [`Router`] backed by any
//! [`largesse_core::store::GiftStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! Every resource endpoint replies with the envelope from
//! [`envelope::Envelope`]; the two info routes (`/` and `/v1/`) are bare
//! pointers for people poking the server by hand.
//!
//! # Serving
//!
//! ```rust,ignore
//! axum::serve(listener, largesse_api::api_router(store)).await?;
//! ```

pub mod envelope;
pub mod error;
pub mod gifts;
pub mod occasions;
pub mod people;

use std::sync::Arc;

use axum::{
  Json,
  Router,
  routing::{get, post, put},
};
use largesse_core::store::GiftStore;
use serde_json::{Value, json};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be served directly or nested into any
/// parent router regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: GiftStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Info
    .route("/", get(root_info))
    .route("/v1/", get(v1_info))
    // People
    .route("/v1/people", get(people::list::<S>).post(people::create::<S>))
    .route("/v1/people/search", get(people::search::<S>))
    .route("/v1/people/update", put(people::update::<S>))
    .route("/v1/people/update-by-info", put(people::update_by_info::<S>))
    .route("/v1/people/eliminate-by-info", put(people::eliminate::<S>))
    .route(
      "/v1/people/relationship/{type}",
      get(people::by_relationship::<S>),
    )
    .route("/v1/people/{id}", get(people::get_one::<S>))
    // Gifts
    .route("/v1/gifts", get(gifts::list::<S>).post(gifts::create::<S>))
    .route("/v1/gifts/{id}", get(gifts::detail::<S>).put(gifts::update::<S>))
    // Occasions
    .route("/v1/occasions", post(occasions::create::<S>))
    .route("/v1/occasions/names", get(occasions::names::<S>))
    .route("/v1/occasions/timeline", get(occasions::timeline::<S>))
    .with_state(store)
}

async fn root_info() -> Json<Value> {
  Json(json!({ "info": "Try /v1/" }))
}

async fn v1_info() -> Json<Value> {
  Json(json!({ "info": "largesse gift tracker API" }))
}

#[cfg(test)]
mod tests;
