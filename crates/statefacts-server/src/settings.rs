//! Runtime server configuration.
//!
//! Layered with the `config` crate: built-in defaults, then the optional TOML
//! file, then `STATEFACTS_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Prefix for environment overrides, e.g. `STATEFACTS_PORT=8080`.
pub const ENV_PREFIX: &str = "STATEFACTS";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  pub reference_path: PathBuf,
}

impl ServerConfig {
  /// Read configuration from `file` (if it exists) and the environment.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3500)?
      .set_default("store_path", "statefacts.db")?
      .set_default("reference_path", "data/states.json")?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_without_a_file() {
    let cfg = ServerConfig::load(Path::new("/no/such/statefacts.toml")).unwrap();
    assert_eq!(cfg.port, 3500);
    assert_eq!(cfg.reference_path, PathBuf::from("data/states.json"));
  }

  #[test]
  fn file_values_override_defaults() {
    let path = std::env::temp_dir()
      .join(format!("statefacts-config-{}.toml", std::process::id()));
    std::fs::write(&path, "port = 8080\nstore_path = \"/tmp/facts.db\"\n").unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/facts.db"));
    assert_eq!(cfg.host, "127.0.0.1");

    let _ = std::fs::remove_file(&path);
  }

  #[test]
  fn tilde_is_expanded_only_at_the_start() {
    let plain = Path::new("data/~/states.json");
    assert_eq!(expand_tilde(plain), plain);
  }
}
