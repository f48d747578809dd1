//! Static per-state reference data.
//!
//! The dataset is a single JSON array of state objects keyed by their
//! two-letter `code`. It is read-only: the service never writes it back.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Codes of the two states that do not border the others.
pub const NON_CONTIGUOUS: &[&str] = &["AK", "HI"];

/// Canonical form of a state code: trimmed and upper-cased.
pub fn normalize_code(code: &str) -> String { code.trim().to_ascii_uppercase() }

/// Whether `code` names one of the 48 contiguous states (or anything that is
/// not AK/HI).
pub fn is_contiguous(code: &str) -> bool { !NON_CONTIGUOUS.contains(&code) }

// ─── Record ───────────────────────────────────────────────────────────────────

/// One entry of the reference dataset.
///
/// Keys beyond the ones the API projects (slug, admission number, URLs, ...)
/// are kept in `extra` and serialised back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateReference {
  pub code:           String,
  /// Full state name, e.g. `"California"`.
  pub state:          String,
  pub capital_city:   String,
  pub population:     u64,
  pub nickname:       String,
  pub admission_date: String,
  #[serde(flatten)]
  pub extra:          Map<String, Value>,
}

// ─── Table ────────────────────────────────────────────────────────────────────

/// The parsed dataset, in file order, with a by-code index.
#[derive(Debug, Clone, Default)]
pub struct StateTable {
  states: Vec<StateReference>,
  index:  HashMap<String, usize>,
}

impl StateTable {
  /// Build a table from already-parsed records.
  ///
  /// Fails if two records share a code.
  pub fn new(states: Vec<StateReference>) -> Result<Self> {
    let mut index = HashMap::with_capacity(states.len());
    for (i, s) in states.iter().enumerate() {
      if index.insert(normalize_code(&s.code), i).is_some() {
        return Err(Error::DuplicateCode(s.code.clone()));
      }
    }
    Ok(Self { states, index })
  }

  /// Parse the JSON array form of the dataset.
  pub fn from_json(json: &str) -> Result<Self> {
    let states: Vec<StateReference> = serde_json::from_str(json)?;
    Self::new(states)
  }

  /// Read and parse the dataset at `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| Error::ReferenceIo {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(&json)
  }

  /// All records, in dataset order.
  pub fn all(&self) -> &[StateReference] { &self.states }

  /// Look up a state by code. The code is normalised first.
  pub fn lookup(&self, code: &str) -> Option<&StateReference> {
    self
      .index
      .get(&normalize_code(code))
      .map(|&i| &self.states[i])
  }

  pub fn len(&self) -> usize { self.states.len() }

  pub fn is_empty(&self) -> bool { self.states.is_empty() }
}
