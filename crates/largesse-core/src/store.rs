//! The `GiftStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `largesse-store-sqlite`). The API layer depends on this abstraction, not
//! on any concrete backend.
//!
//! The three mutating person operations (`update_contact`,
//! `replace_person`, `eliminate_person`) all follow the same
//! resolve-then-mutate contract: the backend resolves exactly one active
//! person from the given [`PersonCriteria`], then applies the write to that
//! row's primary key atomically with the resolution. Zero candidates yield
//! [`crate::Error::PersonNotFound`]; more than one yields
//! [`crate::Error::AmbiguousPerson`] and mutates nothing.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use crate::{
  Result,
  gift::{GiftDetail, GiftSummary, GiftUpdate, NewGift},
  occasion::{NewOccasion, Occasion, TimelineEntry},
  person::{
    ContactUpdate, NewPerson, PersonCriteria, PersonProfile, PersonRecord,
    PersonSummary,
  },
};

/// Abstraction over a largesse storage backend.
///
/// The backing relational store is the sole owner of entity state; no
/// implementation may cache rows across calls.
pub trait GiftStore: Send + Sync {
  // ── People — reads ────────────────────────────────────────────────────

  /// List all active people, ordered by `person_id` ascending.
  /// Eliminated people never appear here.
  fn list_people(
    &self,
  ) -> impl Future<Output = Result<Vec<PersonSummary>>> + Send + '_;

  /// Case-insensitive prefix search over first or last name among active
  /// people, ordered by first name ascending. `prefix` is matched as
  /// `LIKE 'prefix%'`; blank-input rejection is the caller's concern.
  fn search_people<'a>(
    &'a self,
    prefix: &'a str,
  ) -> impl Future<Output = Result<Vec<PersonProfile>>> + Send + 'a;

  /// Retrieve one person by id. Returns `None` if no such row exists.
  /// Eliminated people are still returned — the id is a stable handle and
  /// history stays addressable; only list and search views hide them.
  fn get_person(
    &self,
    person_id: i64,
  ) -> impl Future<Output = Result<Option<PersonRecord>>> + Send + '_;

  /// List active people whose `relationship` exactly matches `relationship`,
  /// ordered by `person_id` ascending.
  fn people_by_relationship<'a>(
    &'a self,
    relationship: &'a str,
  ) -> impl Future<Output = Result<Vec<PersonProfile>>> + Send + 'a;

  // ── People — writes ───────────────────────────────────────────────────

  /// Insert a new active person and return the stored record with its
  /// generated id.
  fn add_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<PersonRecord>> + Send + '_;

  /// Resolve one active person by `criteria`, then rewrite only the
  /// contact fields (relationship, phone, email). Names are selectors and
  /// stay untouched. Returns the mutated row's id.
  fn update_contact<'a>(
    &'a self,
    criteria: &'a PersonCriteria,
    update: ContactUpdate,
  ) -> impl Future<Output = Result<i64>> + Send + 'a;

  /// Resolve one active person by `criteria`, then overwrite all five
  /// mutable fields with `replacement`. Returns the mutated row's id.
  fn replace_person<'a>(
    &'a self,
    criteria: &'a PersonCriteria,
    replacement: NewPerson,
  ) -> impl Future<Output = Result<i64>> + Send + 'a;

  /// Resolve one active person by `criteria`, then set `eliminated = 1`.
  /// The row itself is never deleted, preserving referential history for
  /// occasions and gifts. An already-eliminated person is not a candidate,
  /// so a second elimination resolves to [`crate::Error::PersonNotFound`].
  fn eliminate_person<'a>(
    &'a self,
    criteria: &'a PersonCriteria,
  ) -> impl Future<Output = Result<i64>> + Send + 'a;

  // ── Gifts ─────────────────────────────────────────────────────────────

  /// List all gifts, newest id first.
  fn list_gifts(
    &self,
  ) -> impl Future<Output = Result<Vec<GiftSummary>>> + Send + '_;

  /// Materialise the joined detail view for one gift. Returns `None` when
  /// the gift is absent or its occasion/person join yields no row.
  fn gift_detail(
    &self,
    gift_id: i64,
  ) -> impl Future<Output = Result<Option<GiftDetail>>> + Send + '_;

  /// Insert a gift verbatim and return its generated id. No existence
  /// check is performed on `occasion_id`.
  fn add_gift(
    &self,
    input: NewGift,
  ) -> impl Future<Output = Result<i64>> + Send + '_;

  /// Overwrite all mutable fields of one gift by primary key.
  /// Returns [`crate::Error::GiftNotFound`] when no row was affected.
  fn update_gift(
    &self,
    gift_id: i64,
    update: GiftUpdate,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Occasions ─────────────────────────────────────────────────────────

  /// All distinct occasion names, sorted ascending. Deliberately not
  /// scoped to active people.
  fn occasion_names(
    &self,
  ) -> impl Future<Output = Result<Vec<String>>> + Send + '_;

  /// Date-ascending list of occasions joined to their (active) owners.
  fn occasion_timeline(
    &self,
  ) -> impl Future<Output = Result<Vec<TimelineEntry>>> + Send + '_;

  /// Verify the referenced person exists and is active, then insert the
  /// occasion — both inside one transaction. An absent or eliminated
  /// person yields [`crate::Error::PersonInactive`].
  fn add_occasion(
    &self,
    input: NewOccasion,
  ) -> impl Future<Output = Result<Occasion>> + Send + '_;
}
