//! The in-memory reference snapshot shared by all handlers.
//!
//! The dataset is parsed once when the source is opened. Handlers clone the
//! current `Arc<StateTable>` and never touch the file. [`ReferenceSource::reload`]
//! swaps in a freshly parsed table; a failed reload keeps the old one.

use std::{
  path::PathBuf,
  sync::{Arc, PoisonError, RwLock},
};

use statefacts_core::{Error, Result, reference::StateTable};

pub struct ReferenceSource {
  /// `None` for tables supplied directly (tests); those never reload.
  path:    Option<PathBuf>,
  current: RwLock<Arc<StateTable>>,
}

impl ReferenceSource {
  /// Read and parse the dataset at `path`.
  pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let path = path.into();
    let table = read_table(path.clone()).await?;
    tracing::info!(path = %path.display(), states = table.len(), "loaded reference data");
    Ok(Self {
      path:    Some(path),
      current: RwLock::new(Arc::new(table)),
    })
  }

  /// Wrap an already-built table.
  pub fn fixed(table: StateTable) -> Self {
    Self {
      path:    None,
      current: RwLock::new(Arc::new(table)),
    }
  }

  /// The current snapshot.
  pub fn snapshot(&self) -> Arc<StateTable> {
    self
      .current
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  /// Re-read the dataset and swap it in. Returns the number of states now
  /// loaded. On error the previous snapshot stays in place.
  pub async fn reload(&self) -> Result<usize> {
    let Some(path) = &self.path else {
      return Ok(self.snapshot().len());
    };

    let table = Arc::new(read_table(path.clone()).await?);
    let count = table.len();
    *self
      .current
      .write()
      .unwrap_or_else(PoisonError::into_inner) = table;

    tracing::info!(path = %path.display(), states = count, "reloaded reference data");
    Ok(count)
  }
}

async fn read_table(path: PathBuf) -> Result<StateTable> {
  let task_path = path.clone();
  tokio::task::spawn_blocking(move || StateTable::load(task_path))
    .await
    .map_err(|e| Error::ReferenceIo {
      path,
      source: std::io::Error::other(e),
    })?
}
