//! Conversions between [`FunFactRecord`] and its SQLite row.

use statefacts_core::funfact::FunFactRecord;

/// Encode a fun-fact list as the JSON text stored in `fun_facts.funfacts`.
pub(crate) fn encode_funfacts(funfacts: &[String]) -> serde_json::Result<String> {
  serde_json::to_string(funfacts)
}

/// Decode the stored JSON text back into a list.
pub(crate) fn decode_funfacts(json: &str) -> serde_json::Result<Vec<String>> {
  serde_json::from_str(json)
}

/// Decode inside a `Connection::call` closure, where errors must be
/// [`tokio_rusqlite::Error`].
pub(crate) fn decode_in_call(json: &str) -> tokio_rusqlite::Result<Vec<String>> {
  decode_funfacts(json).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
}

/// Encode inside a `Connection::call` closure.
pub(crate) fn encode_in_call(funfacts: &[String]) -> tokio_rusqlite::Result<String> {
  encode_funfacts(funfacts).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
}

/// A `fun_facts` row as read from SQLite, before JSON decoding.
pub(crate) struct RawRecord {
  pub state_code: String,
  pub funfacts:   String,
}

impl RawRecord {
  pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      state_code: row.get(0)?,
      funfacts:   row.get(1)?,
    })
  }

  pub(crate) fn into_record(self) -> serde_json::Result<FunFactRecord> {
    Ok(FunFactRecord {
      state_code: self.state_code,
      funfacts:   decode_funfacts(&self.funfacts)?,
    })
  }
}
