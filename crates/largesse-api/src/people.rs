//! Handlers for `/v1/people` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/v1/people` | Active people only, insertion order |
//! | `GET`  | `/v1/people/search` | `?name` required; prefix match on either name |
//! | `GET`  | `/v1/people/:id` | Full record, eliminated included |
//! | `POST` | `/v1/people` | Body: [`PersonBody`], all fields; returns 201 + stored record |
//! | `GET`  | `/v1/people/relationship/:type` | Exact relationship match |
//! | `PUT`  | `/v1/people/update` | Resolve by names, rewrite contact fields |
//! | `PUT`  | `/v1/people/update-by-info` | Resolve by names + relationship, overwrite row |
//! | `PUT`  | `/v1/people/eliminate-by-info` | Resolve by names + relationship, soft delete |
//!
//! The three `PUT` routes select their target by natural key instead of
//! id; resolution is case-insensitive and only ever considers active
//! people. An ambiguous key is a 400 carrying the candidate ids.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use largesse_core::{
  person::{
    ContactUpdate, NewPerson, PersonCriteria, PersonProfile, PersonRecord,
    PersonSummary,
  },
  store::GiftStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  envelope::Envelope,
  error::{ApiError, is_filled, require_fields},
};

/// Body shared by `POST /v1/people` and both `PUT` update routes. Every
/// field is optional at the serde layer so that missing ones can be
/// reported together.
#[derive(Debug, Deserialize)]
pub struct PersonBody {
  pub f_name:       Option<String>,
  pub l_name:       Option<String>,
  pub relationship: Option<String>,
  pub phone:        Option<String>,
  pub email:        Option<String>,
}

impl PersonBody {
  fn require_all(&self) -> Result<(), ApiError> {
    require_fields(&[
      ("f_name", is_filled(&self.f_name)),
      ("l_name", is_filled(&self.l_name)),
      ("relationship", is_filled(&self.relationship)),
      ("phone", is_filled(&self.phone)),
      ("email", is_filled(&self.email)),
    ])
  }

  fn into_new_person(self) -> NewPerson {
    NewPerson {
      f_name:       self.f_name.unwrap_or_default(),
      l_name:       self.l_name.unwrap_or_default(),
      relationship: self.relationship.unwrap_or_default(),
      phone:        self.phone.unwrap_or_default(),
      email:        self.email.unwrap_or_default(),
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /v1/people` — active people only, in insertion order.
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Envelope<Vec<PersonSummary>>>, ApiError>
where
  S: GiftStore,
{
  let people = store.list_people().await?;
  Ok(Json(Envelope::data(people)))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub name: Option<String>,
}

/// `GET /v1/people/search?name=<prefix>` — case-insensitive prefix match
/// on either name; an empty result is a 404, not an empty list.
pub async fn search<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Envelope<Vec<PersonProfile>>>, ApiError>
where
  S: GiftStore,
{
  let name = match params.name {
    Some(n) if !n.trim().is_empty() => n,
    _ => {
      return Err(ApiError::BadRequest(
        "Missing or empty 'name' query parameter".into(),
      ));
    }
  };

  let people = store.search_people(&name).await?;
  if people.is_empty() {
    return Err(ApiError::NotFound(
      "No matching non-eliminated people found".into(),
    ));
  }
  Ok(Json(Envelope::data(people)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /v1/people/:id` — full record, eliminated or not. A non-numeric
/// id behaves like an absent row.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<PersonRecord>>, ApiError>
where
  S: GiftStore,
{
  let not_found = || ApiError::NotFound("Person not found".into());
  let person_id: i64 = id.parse().map_err(|_| not_found())?;
  let person = store.get_person(person_id).await?.ok_or_else(not_found)?;
  Ok(Json(Envelope::data(person)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /v1/people` — all five fields required; replies 201 with the
/// stored record.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<PersonBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GiftStore,
{
  body.require_all()?;
  let record = store.add_person(body.into_new_person()).await?;
  Ok((
    StatusCode::CREATED,
    Json(Envelope::with_message(record, "Person added successfully")),
  ))
}

// ─── By relationship ──────────────────────────────────────────────────────────

/// `GET /v1/people/relationship/:type` — exact match, active people
/// only. No match is an empty list, not an error.
pub async fn by_relationship<S>(
  State(store): State<Arc<S>>,
  Path(relationship): Path<String>,
) -> Result<Json<Envelope<Vec<PersonProfile>>>, ApiError>
where
  S: GiftStore,
{
  let people = store.people_by_relationship(&relationship).await?;
  Ok(Json(Envelope::data(people)))
}

// ─── Update contact ───────────────────────────────────────────────────────────

/// `PUT /v1/people/update` — names select the person; only the
/// relationship, phone, and email fields are rewritten.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<PersonBody>,
) -> Result<Json<Envelope<Value>>, ApiError>
where
  S: GiftStore,
{
  body.require_all()?;
  let f_name = body.f_name.unwrap_or_default();
  let l_name = body.l_name.unwrap_or_default();
  let update = ContactUpdate {
    relationship: body.relationship.unwrap_or_default(),
    phone:        body.phone.unwrap_or_default(),
    email:        body.email.unwrap_or_default(),
  };

  let criteria = PersonCriteria::by_name(&f_name, &l_name);
  let person_id = store.update_contact(&criteria, update.clone()).await?;

  Ok(Json(Envelope::with_message(
    json!({ "person_id": person_id, "updated": update }),
    format!("Person {f_name} {l_name} updated successfully"),
  )))
}

// ─── Update by info ───────────────────────────────────────────────────────────

/// `PUT /v1/people/update-by-info` — names plus relationship select the
/// person; the whole row is overwritten with the body's values.
pub async fn update_by_info<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<PersonBody>,
) -> Result<Json<Envelope<Value>>, ApiError>
where
  S: GiftStore,
{
  body.require_all()?;
  let criteria = PersonCriteria::by_info(
    body.f_name.as_deref().unwrap_or_default(),
    body.l_name.as_deref().unwrap_or_default(),
    body.relationship.as_deref().unwrap_or_default(),
  );
  let replacement = body.into_new_person();
  let message = format!(
    "Person {} {} ({}) updated successfully",
    replacement.f_name, replacement.l_name, replacement.relationship
  );

  let person_id = store.replace_person(&criteria, replacement).await?;

  Ok(Json(Envelope::with_message(
    json!({ "person_id": person_id }),
    message,
  )))
}

// ─── Eliminate ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EliminateBody {
  pub f_name:       Option<String>,
  pub l_name:       Option<String>,
  pub relationship: Option<String>,
}

/// `PUT /v1/people/eliminate-by-info` — soft delete. The row survives
/// for gift history but leaves every active-only view.
pub async fn eliminate<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<EliminateBody>,
) -> Result<Json<Envelope<Value>>, ApiError>
where
  S: GiftStore,
{
  require_fields(&[
    ("f_name", is_filled(&body.f_name)),
    ("l_name", is_filled(&body.l_name)),
    ("relationship", is_filled(&body.relationship)),
  ])?;
  let f_name = body.f_name.unwrap_or_default();
  let l_name = body.l_name.unwrap_or_default();
  let relationship = body.relationship.unwrap_or_default();

  let criteria = PersonCriteria::by_info(&f_name, &l_name, &relationship);
  let person_id = store.eliminate_person(&criteria).await?;

  Ok(Json(Envelope::with_message(
    json!({ "person_id": person_id }),
    format!("Person {f_name} {l_name} ({relationship}) marked as eliminated"),
  )))
}
