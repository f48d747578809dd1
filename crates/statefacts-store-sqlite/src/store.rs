//! [`SqliteStore`] — the SQLite implementation of [`FunFactStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, TransactionBehavior};
use statefacts_core::{
  funfact::{Edit, FunFactRecord, Insert, Rejection},
  store::FunFactStore,
};

use crate::{
  Result,
  encode::{RawRecord, decode_in_call, encode_funfacts, encode_in_call},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fun-fact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// are serialised on the connection's worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run an index-based edit against the stored list inside one
  /// `IMMEDIATE` transaction, so no other writer can interleave between the
  /// read and the write.
  async fn edit<F>(&self, state_code: String, op: F) -> Result<Edit>
  where
    F: FnOnce(&mut FunFactRecord) -> Result<(), Rejection> + Send + 'static,
  {
    let edit = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stored: Option<String> = tx
          .query_row(
            "SELECT funfacts FROM fun_facts WHERE state_code = ?1",
            rusqlite::params![state_code],
            |row| row.get(0),
          )
          .optional()?;

        let Some(stored) = stored else {
          return Ok(Edit::Rejected(Rejection::NoFunFacts));
        };

        let mut record = FunFactRecord::new(state_code, decode_in_call(&stored)?);
        if let Err(rejection) = op(&mut record) {
          return Ok(Edit::Rejected(rejection));
        }

        tx.execute(
          "UPDATE fun_facts SET funfacts = ?2 WHERE state_code = ?1",
          rusqlite::params![record.state_code, encode_in_call(&record.funfacts)?],
        )?;
        tx.commit()?;
        Ok(Edit::Applied(record))
      })
      .await?;
    Ok(edit)
  }
}

// ─── FunFactStore impl ───────────────────────────────────────────────────────

impl FunFactStore for SqliteStore {
  type Error = crate::Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_all(&self) -> Result<Vec<FunFactRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT state_code, funfacts FROM fun_facts ORDER BY rowid")?;
        let rows = stmt
          .query_map([], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      raws
        .into_iter()
        .map(RawRecord::into_record)
        .collect::<serde_json::Result<_>>()?,
    )
  }

  async fn find_excluding(
    &self,
    codes: &'static [&'static str],
  ) -> Result<Vec<FunFactRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; codes.len()].join(", ");
        let sql = if codes.is_empty() {
          "SELECT state_code, funfacts FROM fun_facts ORDER BY rowid".to_owned()
        } else {
          format!(
            "SELECT state_code, funfacts FROM fun_facts
             WHERE state_code NOT IN ({placeholders})
             ORDER BY rowid"
          )
        };

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(codes.iter()), RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      raws
        .into_iter()
        .map(RawRecord::into_record)
        .collect::<serde_json::Result<_>>()?,
    )
  }

  async fn find_one(&self, state_code: &str) -> Result<Option<FunFactRecord>> {
    let code = state_code.to_owned();

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT state_code, funfacts FROM fun_facts WHERE state_code = ?1",
              rusqlite::params![code],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawRecord::into_record).transpose()?)
  }

  // ── Whole-record writes ───────────────────────────────────────────────────

  async fn create(&self, record: FunFactRecord) -> Result<Insert> {
    let code = record.state_code.clone();
    let json = encode_funfacts(&record.funfacts)?;

    let inserted = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "INSERT INTO fun_facts (state_code, funfacts) VALUES (?1, ?2)
           ON CONFLICT (state_code) DO NOTHING",
          rusqlite::params![code, json],
        )?;
        Ok(changed == 1)
      })
      .await?;

    if inserted {
      tracing::debug!(state_code = %record.state_code, "created fun-fact record");
      Ok(Insert::Inserted(record))
    } else {
      Ok(Insert::AlreadyExists)
    }
  }

  async fn save(&self, record: FunFactRecord) -> Result<FunFactRecord> {
    let code = record.state_code.clone();
    let json = encode_funfacts(&record.funfacts)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO fun_facts (state_code, funfacts) VALUES (?1, ?2)
           ON CONFLICT (state_code) DO UPDATE SET funfacts = excluded.funfacts",
          rusqlite::params![code, json],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  // ── Atomic list mutations ─────────────────────────────────────────────────

  async fn append(
    &self,
    state_code: String,
    funfacts: Vec<String>,
  ) -> Result<FunFactRecord> {
    let record = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stored: Option<String> = tx
          .query_row(
            "SELECT funfacts FROM fun_facts WHERE state_code = ?1",
            rusqlite::params![state_code],
            |row| row.get(0),
          )
          .optional()?;

        let mut list = match stored {
          Some(json) => decode_in_call(&json)?,
          None => Vec::new(),
        };
        list.extend(funfacts);

        tx.execute(
          "INSERT INTO fun_facts (state_code, funfacts) VALUES (?1, ?2)
           ON CONFLICT (state_code) DO UPDATE SET funfacts = excluded.funfacts",
          rusqlite::params![state_code, encode_in_call(&list)?],
        )?;
        tx.commit()?;
        Ok(FunFactRecord::new(state_code, list))
      })
      .await?;

    tracing::debug!(
      state_code = %record.state_code,
      total = record.funfacts.len(),
      "appended fun facts"
    );
    Ok(record)
  }

  async fn replace_at(
    &self,
    state_code: String,
    index: i64,
    funfact: String,
  ) -> Result<Edit> {
    self
      .edit(state_code, move |record| record.replace_at(index, funfact))
      .await
  }

  async fn remove_at(&self, state_code: String, index: i64) -> Result<Edit> {
    self
      .edit(state_code, move |record| record.remove_at(index).map(drop))
      .await
  }
}
