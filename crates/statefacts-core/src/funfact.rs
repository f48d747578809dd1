//! Fun-fact records — the only mutable data in the service.
//!
//! A record is a per-state document holding an ordered list of free-text
//! trivia. Clients address list entries with 1-based indices; storage is
//! 0-based. [`offset`] is the single place where one becomes the other.

use serde::{Deserialize, Serialize};

/// The persisted document for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunFactRecord {
  pub state_code: String,
  #[serde(default)]
  pub funfacts:   Vec<String>,
}

impl FunFactRecord {
  pub fn new(state_code: impl Into<String>, funfacts: Vec<String>) -> Self {
    Self { state_code: state_code.into(), funfacts }
  }

  /// Replace the entry at 1-based `index`.
  pub fn replace_at(&mut self, index: i64, funfact: String) -> Result<(), Rejection> {
    let i = self.checked_offset(index)?;
    self.funfacts[i] = funfact;
    Ok(())
  }

  /// Remove the entry at 1-based `index`, shifting later entries down.
  pub fn remove_at(&mut self, index: i64) -> Result<String, Rejection> {
    let i = self.checked_offset(index)?;
    Ok(self.funfacts.remove(i))
  }

  fn checked_offset(&self, index: i64) -> Result<usize, Rejection> {
    if self.funfacts.is_empty() {
      return Err(Rejection::NoFunFacts);
    }
    offset(index, self.funfacts.len()).ok_or(Rejection::InvalidIndex {
      index,
      len: self.funfacts.len(),
    })
  }
}

/// Convert a 1-based client index into a 0-based offset into a list of
/// length `len`. Returns `None` unless `1 <= index <= len`.
pub fn offset(index: i64, len: usize) -> Option<usize> {
  let i = usize::try_from(index).ok()?;
  (1..=len).contains(&i).then(|| i - 1)
}

// ─── Outcomes ─────────────────────────────────────────────────────────────────

/// Why an index-based edit was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
  /// The record is missing or its list is empty.
  NoFunFacts,
  /// The index is outside `1..=len`.
  InvalidIndex { index: i64, len: usize },
}

/// Result of an index-based edit performed by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
  Applied(FunFactRecord),
  Rejected(Rejection),
}

/// Result of [`FunFactStore::create`](crate::store::FunFactStore::create).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insert {
  Inserted(FunFactRecord),
  /// A record for this state code already exists; nothing was written.
  AlreadyExists,
}
