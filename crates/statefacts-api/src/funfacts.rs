//! Handlers for `/states/{state}/funfact`.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/states/{state}/funfact` | One fact chosen uniformly at random |
//! | `POST`   | `/states/{state}/funfact` | Body: [`AddFactsBody`]; appends, creating the record if needed |
//! | `PATCH`  | `/states/{state}/funfact` | Body: [`UpdateFactBody`]; 1-based `index` |
//! | `DELETE` | `/states/{state}/funfact` | Body: [`DeleteFactBody`]; 1-based `index` |
//!
//! PATCH and DELETE answer 404 when the state has no facts at all, and 400
//! when the index is outside `1..=len`. An absent or non-numeric index counts
//! as outside, and an empty body counts as an absent index.

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State, rejection::JsonRejection},
};
use rand::{rngs::OsRng, seq::SliceRandom};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use statefacts_core::{
  funfact::{Edit, FunFactRecord, Rejection},
  reference::normalize_code,
  store::FunFactStore,
};

use crate::{AppState, error::ApiError};

const NO_FACTS: &str = "No fun facts found for the state";

fn edit_response(edit: Edit) -> Result<Json<FunFactRecord>, ApiError> {
  match edit {
    Edit::Applied(record) => Ok(Json(record)),
    Edit::Rejected(Rejection::NoFunFacts) => Err(ApiError::NotFound(NO_FACTS.into())),
    Edit::Rejected(Rejection::InvalidIndex { .. }) => {
      Err(ApiError::BadRequest("Invalid fun fact index".into()))
    }
  }
}

// ─── Random ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RandomFact {
  /// The state's name, or its code if the reference data lacks it.
  pub state:   String,
  pub funfact: String,
}

/// `GET /states/{state}/funfact`
pub async fn random<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
) -> Result<Json<RandomFact>, ApiError>
where
  S: FunFactStore,
{
  let code = normalize_code(&code);

  let record = state
    .store
    .find_one(&code)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(NO_FACTS.into()))?;

  let funfact = record
    .funfacts
    .choose(&mut OsRng)
    .cloned()
    .ok_or_else(|| ApiError::NotFound(NO_FACTS.into()))?;

  let name = state
    .reference
    .snapshot()
    .lookup(&code)
    .map(|s| s.state.clone())
    .unwrap_or(code);

  Ok(Json(RandomFact { state: name, funfact }))
}

// ─── Append ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /states/{state}/funfact`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFactsBody {
  /// Takes precedence over the path segment when present.
  pub state_code: Option<String>,
  pub funfacts:   Vec<String>,
}

/// `POST /states/{state}/funfact` — returns the updated record.
pub async fn add<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
  body: Result<Json<AddFactsBody>, JsonRejection>,
) -> Result<Json<FunFactRecord>, ApiError>
where
  S: FunFactStore,
{
  let Json(body) = body?;
  let code = normalize_code(body.state_code.as_deref().unwrap_or(&code));

  let record = state
    .store
    .append(code, body.funfacts)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(record))
}

// ─── Edit bodies ──────────────────────────────────────────────────────────────

/// Parse a PATCH/DELETE body. An empty body reads as `T::default()`, so a
/// request without one still reaches the store and gets its 404 or 400.
fn edit_body<T>(bytes: &Bytes) -> Result<T, ApiError>
where
  T: DeserializeOwned + Default,
{
  if bytes.iter().all(u8::is_ascii_whitespace) {
    return Ok(T::default());
  }
  serde_json::from_slice(bytes).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Accept an integer, an integral float, or a numeric string. Anything else
/// reads as absent, which the store then rejects as out of range.
fn lenient_index<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  let index = match Option::<Value>::deserialize(deserializer)? {
    Some(Value::Number(n)) => n
      .as_i64()
      .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
    Some(Value::String(s)) => s.trim().parse().ok(),
    _ => None,
  };
  Ok(index)
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFactBody {
  #[serde(default, deserialize_with = "lenient_index")]
  pub index:   Option<i64>,
  pub funfact: Option<String>,
}

/// `PATCH /states/{state}/funfact` — body: `{"index":1,"funfact":"..."}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
  bytes: Bytes,
) -> Result<Json<FunFactRecord>, ApiError>
where
  S: FunFactStore,
{
  let body: UpdateFactBody = edit_body(&bytes)?;

  // Without replacement text the edit can never apply; index 0 still lets
  // the store report a state with no facts as 404.
  let (index, funfact, missing_text) = match body.funfact {
    Some(text) => (body.index.unwrap_or(0), text, false),
    None => (0, String::new(), true),
  };

  let edit = state
    .store
    .replace_at(normalize_code(&code), index, funfact)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  match edit {
    Edit::Rejected(Rejection::InvalidIndex { .. }) if missing_text => {
      Err(ApiError::BadRequest("Fun fact value required".into()))
    }
    edit => edit_response(edit),
  }
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct DeleteFactBody {
  #[serde(default, deserialize_with = "lenient_index")]
  pub index: Option<i64>,
}

/// `DELETE /states/{state}/funfact` — body: `{"index":1}`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(code): Path<String>,
  bytes: Bytes,
) -> Result<Json<FunFactRecord>, ApiError>
where
  S: FunFactStore,
{
  let body: DeleteFactBody = edit_body(&bytes)?;

  let edit = state
    .store
    .remove_at(normalize_code(&code), body.index.unwrap_or(0))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  edit_response(edit)
}
