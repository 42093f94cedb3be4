//! Configuration Module - TOML-based Service Configuration
//!
//! Loads configuration from an optional `config.toml`, then applies
//! environment overrides (`PORT`). Every field has a default, so the
//! service starts without a config file.

pub mod loader;

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Listener and logging.
  #[serde(default)]
  pub server: ServerConfig,
  /// Quote file location.
  #[serde(default)]
  pub persistence: PersistenceConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Bind host.
  #[serde(default = "default_host")]
  pub host: String,
  /// Listening port. `PORT` overrides it.
  #[serde(default = "default_port")]
  pub port: u16,
  /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
  /// JSON file holding the quote collection.
  #[serde(default = "default_data_file")]
  pub data_file: PathBuf,
  /// Loaded when `data_file` does not exist yet.
  #[serde(default)]
  pub seed_file: Option<PathBuf>,
}

impl ServerConfig {
  /// `host:port` for the listener.
  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: default_port(),
      log_level: default_log_level(),
    }
  }
}

impl Default for PersistenceConfig {
  fn default() -> Self {
    Self {
      data_file: default_data_file(),
      seed_file: None,
    }
  }
}

// Default value functions for serde

fn default_host() -> String {
  "0.0.0.0".to_string()
}

fn default_port() -> u16 {
  3000
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_data_file() -> PathBuf {
  PathBuf::from("data/quotes.json")
}
