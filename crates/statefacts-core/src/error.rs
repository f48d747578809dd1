//! Error types for `statefacts-core`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read reference data at {path:?}: {source}")]
  ReferenceIo {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed reference data: {0}")]
  ReferenceParse(#[from] serde_json::Error),

  #[error("duplicate state code in reference data: {0}")]
  DuplicateCode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
