//! JSON REST API for statefacts.
//!
//! Exposes an axum [`Router`] backed by any
//! [`statefacts_core::store::FunFactStore`] plus a [`ReferenceSource`]
//! snapshot of the static state dataset. TLS and transport concerns are the
//! caller's responsibility.

pub mod error;
pub mod fields;
pub mod funfacts;
pub mod reference;
pub mod states;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, post},
};
use serde_json::{Value, json};
use statefacts_core::store::FunFactStore;

pub use error::ApiError;
pub use reference::ReferenceSource;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:     Arc<S>,
  pub reference: Arc<ReferenceSource>,
}

// Manual impl: cloning only bumps the `Arc`s, so `S` itself need not be
// `Clone`.
impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:     self.store.clone(),
      reference: self.reference.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into or merged with any parent
/// router regardless of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: FunFactStore + 'static,
{
  Router::new()
    // Collection
    .route("/states", get(states::list::<S>))
    .route("/states/contig", get(states::contiguous::<S>))
    .route("/states/add", post(states::add::<S>))
    .route("/states/{state}", get(states::get_one::<S>))
    // Fun facts
    .route(
      "/states/{state}/funfact",
      get(funfacts::random::<S>)
        .post(funfacts::add::<S>)
        .patch(funfacts::update::<S>)
        .delete(funfacts::remove::<S>),
    )
    // Reference projections
    .route("/states/{state}/capital", get(fields::capital::<S>))
    .route("/states/{state}/nickname", get(fields::nickname::<S>))
    .route("/states/{state}/population", get(fields::population::<S>))
    .route("/states/{state}/admission", get(fields::admission::<S>))
    .route("/health", get(health))
    .fallback(not_found)
    .with_state(state)
}

/// `GET /health`
async fn health() -> Json<Value> {
  Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn not_found() -> ApiError { ApiError::NotFound("Not found".into()) }

// ─── Integration tests ────────────────────────────────────────────────────────
