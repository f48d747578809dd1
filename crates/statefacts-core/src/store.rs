//! The `FunFactStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `statefacts-store-sqlite`). The HTTP layer depends on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::funfact::{Edit, FunFactRecord, Insert};

/// Abstraction over the persistent collection of per-state fun-fact records.
///
/// Every method persists immediately. The list mutations (`append`,
/// `replace_at`, `remove_at`) are single atomic operations at the storage
/// layer: callers never read a record, change it, and write it back
/// themselves, so concurrent edits of the same state cannot lose updates.
///
/// State codes passed in are expected to be normalised already (see
/// [`normalize_code`](crate::reference::normalize_code)).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FunFactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every record in the collection.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<FunFactRecord>, Self::Error>> + Send + '_;

  /// Every record whose state code is not in `codes`.
  fn find_excluding(
    &self,
    codes: &'static [&'static str],
  ) -> impl Future<Output = Result<Vec<FunFactRecord>, Self::Error>> + Send + '_;

  /// The record for `state_code`, or `None`.
  fn find_one<'a>(
    &'a self,
    state_code: &'a str,
  ) -> impl Future<Output = Result<Option<FunFactRecord>, Self::Error>> + Send + 'a;

  // ── Whole-record writes ───────────────────────────────────────────────

  /// Insert a new record. Returns [`Insert::AlreadyExists`] without writing
  /// anything if a record for the same state code is present.
  fn create(
    &self,
    record: FunFactRecord,
  ) -> impl Future<Output = Result<Insert, Self::Error>> + Send + '_;

  /// Insert or overwrite the record for `record.state_code`.
  fn save(
    &self,
    record: FunFactRecord,
  ) -> impl Future<Output = Result<FunFactRecord, Self::Error>> + Send + '_;

  // ── Atomic list mutations ─────────────────────────────────────────────

  /// Append `funfacts` to the record for `state_code`, creating the record
  /// if it does not exist. Returns the updated record.
  fn append(
    &self,
    state_code: String,
    funfacts: Vec<String>,
  ) -> impl Future<Output = Result<FunFactRecord, Self::Error>> + Send + '_;

  /// Replace the entry at 1-based `index`.
  fn replace_at(
    &self,
    state_code: String,
    index: i64,
    funfact: String,
  ) -> impl Future<Output = Result<Edit, Self::Error>> + Send + '_;

  /// Remove the entry at 1-based `index`.
  fn remove_at(
    &self,
    state_code: String,
    index: i64,
  ) -> impl Future<Output = Result<Edit, Self::Error>> + Send + '_;
}
