//! Single-field projections of the reference data.
//!
//! These read only the reference snapshot; fun facts are not consulted.

use axum::{
  Json,
  extract::{Path, State},
};
use serde_json::{Value, json};
use statefacts_core::{reference::StateReference, store::FunFactStore};

use crate::{AppState, error::ApiError};

fn project<S>(
  state: &AppState<S>,
  code: &str,
  field: fn(&StateReference) -> (&'static str, Value),
) -> Result<Json<Value>, ApiError> {
  let table = state.reference.snapshot();
  let reference = table
    .lookup(code)
    .ok_or_else(|| ApiError::NotFound("State not found".into()))?;
  let (key, value) = field(reference);

  let mut body = json!({ "state": reference.state });
  body[key] = value;
  Ok(Json(body))
}

/// `GET /states/{state}/capital` → `{"state":..., "capital":...}`
pub async fn capital<S: FunFactStore>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
  project(&state, &code, |s| ("capital", json!(s.capital_city)))
}

/// `GET /states/{state}/nickname` → `{"state":..., "nickname":...}`
pub async fn nickname<S: FunFactStore>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
  project(&state, &code, |s| ("nickname", json!(s.nickname)))
}

/// `GET /states/{state}/population` → `{"state":..., "population":...}`
pub async fn population<S: FunFactStore>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
  project(&state, &code, |s| ("population", json!(s.population)))
}

/// `GET /states/{state}/admission` → `{"state":..., "admitted":...}`
pub async fn admission<S: FunFactStore>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
  project(&state, &code, |s| ("admitted", json!(s.admission_date)))
}
