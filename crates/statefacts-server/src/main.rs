//! statefacts server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), loads the
//! reference dataset, opens the SQLite fun-fact store, and serves the JSON
//! API over HTTP.
//!
//! Sending `SIGHUP` re-reads the reference dataset without a restart.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use statefacts_api::{AppState, ReferenceSource};
use statefacts_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{ServerConfig, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "U.S. states reference and fun-fact API")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let reference_path = expand_tilde(&server_cfg.reference_path);
  let reference = ReferenceSource::open(&reference_path)
    .await
    .with_context(|| format!("failed to load reference data from {reference_path:?}"))?;
  let reference = Arc::new(reference);

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  #[cfg(unix)]
  spawn_reload_on_hangup(reference.clone())?;

  let state = AppState {
    store: Arc::new(store),
    reference,
  };

  let app = statefacts_api::api_router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

/// Reload the reference dataset every time the process receives `SIGHUP`.
#[cfg(unix)]
fn spawn_reload_on_hangup(reference: Arc<ReferenceSource>) -> anyhow::Result<()> {
  use tokio::signal::unix::{SignalKind, signal};

  let mut hangups =
    signal(SignalKind::hangup()).context("failed to install SIGHUP handler")?;

  tokio::spawn(async move {
    while hangups.recv().await.is_some() {
      if let Err(e) = reference.reload().await {
        tracing::error!(error = %e, "reference reload failed; keeping previous data");
      }
    }
  });
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
