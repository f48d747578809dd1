//! The merged read model: reference data overlaid with fun facts.
//!
//! Never stored, always derived per request.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
  funfact::FunFactRecord,
  reference::{StateReference, is_contiguous},
};

/// A reference record combined with its fun-fact list.
///
/// `reference` is `None` only when a fun-fact record exists for a code that
/// the reference dataset does not know; the view then carries just
/// `funfacts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedStateView {
  #[serde(flatten)]
  pub reference: Option<StateReference>,
  pub funfacts:  Vec<String>,
}

/// Overlay `record`'s list (or an empty list) onto `reference`.
pub fn merge(
  reference: Option<&StateReference>,
  record: Option<&FunFactRecord>,
) -> MergedStateView {
  MergedStateView {
    reference: reference.cloned(),
    funfacts:  record.map(|r| r.funfacts.clone()).unwrap_or_default(),
  }
}

/// Merge every reference with its matching record, keeping reference order.
/// Records with no matching reference are dropped.
pub fn merge_all(
  references: &[StateReference],
  records: &[FunFactRecord],
) -> Vec<MergedStateView> {
  let by_code: HashMap<&str, &FunFactRecord> = records
    .iter()
    .map(|r| (r.state_code.as_str(), r))
    .collect();

  references
    .iter()
    .map(|s| merge(Some(s), by_code.get(s.code.as_str()).copied()))
    .collect()
}

// ─── Contiguity filter ────────────────────────────────────────────────────────

/// The `contig` query filter on the state listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Contiguity {
  /// No filter.
  #[default]
  Any,
  /// Everything except AK and HI.
  Contiguous,
  /// Only AK and HI.
  NonContiguous,
}

impl Contiguity {
  /// Interpret a raw `contig` query value. Anything other than `"true"` or
  /// `"false"` means no filter.
  pub fn from_param(value: Option<&str>) -> Self {
    match value {
      Some("true") => Self::Contiguous,
      Some("false") => Self::NonContiguous,
      _ => Self::Any,
    }
  }

  pub fn admits(self, code: &str) -> bool {
    match self {
      Self::Any => true,
      Self::Contiguous => is_contiguous(code),
      Self::NonContiguous => !is_contiguous(code),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::Map;

  use super::*;

  fn state(code: &str, name: &str) -> StateReference {
    StateReference {
      code:           code.into(),
      state:          name.into(),
      capital_city:   "Capital".into(),
      population:     1,
      nickname:       "Nick".into(),
      admission_date: "January 1, 1900".into(),
      extra:          Map::new(),
    }
  }

  #[test]
  fn merge_defaults_to_empty_list() {
    let ca = state("CA", "California");
    let view = merge(Some(&ca), None);
    assert_eq!(view.reference.as_ref(), Some(&ca));
    assert!(view.funfacts.is_empty());
  }

  #[test]
  fn merge_without_reference_serialises_only_funfacts() {
    let record = FunFactRecord::new("ZZ", vec!["fact".into()]);
    let json = serde_json::to_value(merge(None, Some(&record))).unwrap();
    assert_eq!(json, serde_json::json!({ "funfacts": ["fact"] }));
  }

  #[test]
  fn merged_view_flattens_reference_fields() {
    let ca = state("CA", "California");
    let record = FunFactRecord::new("CA", vec!["gold".into()]);
    let json = serde_json::to_value(merge(Some(&ca), Some(&record))).unwrap();
    assert_eq!(json["code"], "CA");
    assert_eq!(json["state"], "California");
    assert_eq!(json["funfacts"][0], "gold");
  }

  #[test]
  fn merge_all_matches_by_code_in_reference_order() {
    let refs = vec![state("CA", "California"), state("TX", "Texas")];
    let records = vec![
      FunFactRecord::new("TX", vec!["big".into()]),
      FunFactRecord::new("ZZ", vec!["orphan".into()]),
    ];
    let views = merge_all(&refs, &records);
    assert_eq!(views.len(), 2);
    assert!(views[0].funfacts.is_empty());
    assert_eq!(views[1].funfacts, ["big"]);
  }

  #[test]
  fn contiguity_param() {
    assert_eq!(Contiguity::from_param(Some("true")), Contiguity::Contiguous);
    assert_eq!(Contiguity::from_param(Some("false")), Contiguity::NonContiguous);
    assert_eq!(Contiguity::from_param(Some("maybe")), Contiguity::Any);
    assert_eq!(Contiguity::from_param(None), Contiguity::Any);

    assert!(Contiguity::Contiguous.admits("CA"));
    assert!(!Contiguity::Contiguous.admits("HI"));
    assert!(Contiguity::NonContiguous.admits("AK"));
    assert!(!Contiguity::NonContiguous.admits("CA"));
  }
}
