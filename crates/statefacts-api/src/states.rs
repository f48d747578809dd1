//! Handlers for the `/states` collection.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/states` | Optional `?contig=true\|false`; merged views |
//! | `GET`  | `/states/contig` | Raw fun-fact records for every code but AK/HI |
//! | `GET`  | `/states/{state}` | Merged view; 404 if neither source knows the code |
//! | `POST` | `/states/add` | Body: [`AddStateBody`]; 201 + record, 400 if it exists |

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use statefacts_core::{
  funfact::{FunFactRecord, Insert},
  merge::{Contiguity, MergedStateView, merge, merge_all},
  reference::{NON_CONTIGUOUS, StateReference, normalize_code},
  store::FunFactStore,
};

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// `true` keeps the contiguous states, `false` keeps only AK and HI.
  /// Any other value (or none) applies no filter.
  pub contig: Option<String>,
}

/// `GET /states[?contig=true|false]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<MergedStateView>>, ApiError>
where
  S: FunFactStore,
{
  let filter = Contiguity::from_param(params.contig.as_deref());
  let table = state.reference.snapshot();

  let records = state
    .store
    .find_all()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let selected: Vec<StateReference> = table
    .all()
    .iter()
    .filter(|s| filter.admits(&s.code))
    .cloned()
    .collect();

  Ok(Json(merge_all(&selected, &records)))
}

// ─── Contiguous (store only) ──────────────────────────────────────────────────

/// `GET /states/contig`
///
/// Unlike `GET /states?contig=true`, this returns the stored fun-fact
/// documents as they are, without reference data.
pub async fn contiguous<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<FunFactRecord>>, ApiError>
where
  S: FunFactStore,
{
  let records = state
    .store
    .find_excluding(NON_CONTIGUOUS)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /states/{state}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<MergedStateView>, ApiError>
where
  S: FunFactStore,
{
  let code = normalize_code(&code);
  let table = state.reference.snapshot();

  let record = state
    .store
    .find_one(&code)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let reference = table.lookup(&code);

  if reference.is_none() && record.is_none() {
    return Err(ApiError::NotFound("State not found".into()));
  }
  Ok(Json(merge(reference, record.as_ref())))
}

// ─── Add ──────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /states/add`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStateBody {
  pub state_code: String,
  #[serde(default)]
  pub funfacts:   Vec<String>,
}

/// `POST /states/add` — returns 201 + the stored record.
pub async fn add<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<AddStateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FunFactStore,
{
  let Json(body) = body?;
  let code = normalize_code(&body.state_code);
  let duplicate = || ApiError::BadRequest("State with the same stateCode already exists".into());

  let existing = state
    .store
    .find_one(&code)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if existing.is_some() {
    return Err(duplicate());
  }

  match state
    .store
    .create(FunFactRecord::new(code, body.funfacts))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
  {
    Insert::Inserted(record) => Ok((StatusCode::CREATED, Json(record))),
    // Lost a race with a concurrent add for the same code.
    Insert::AlreadyExists => Err(duplicate()),
  }
}
