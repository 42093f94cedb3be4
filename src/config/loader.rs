//! Configuration Loader - File Loading, Overrides and Validation
//!
//! A missing config file is not an error: defaults apply. A present
//! but unparsable one is.

use std::path::Path;

use anyhow::{Context, Result};

use super::AppConfig;

/// Environment variable selecting the listening port.
pub const PORT_ENV: &str = "PORT";

/// Load configuration from `path`, apply `PORT`, and validate.
///
/// # Errors
/// Returns detailed error if:
/// - The file exists but can't be read or parsed
/// - `PORT` is set but not a valid port number
/// - Validation rules are violated
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
  let path = path.as_ref();

  let mut config = if path.exists() {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
      .with_context(|| format!("Failed to parse {}", path.display()))?
  } else {
    AppConfig::default()
  };

  apply_port_override(&mut config, std::env::var(PORT_ENV).ok().as_deref())?;
  validate_config(&config)?;

  Ok(config)
}

/// Parse a TOML document into a config, defaults filling the gaps.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  Ok(toml::from_str(content)?)
}

/// Apply a `PORT` value, if any, over the configured port.
pub fn apply_port_override(config: &mut AppConfig, port: Option<&str>) -> Result<()> {
  if let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) {
    config.server.port = port
      .parse()
      .with_context(|| format!("{PORT_ENV} must be a port number, got {port:?}"))?;
  }
  Ok(())
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.server.host.trim().is_empty(),
    "server.host must not be empty"
  );
  anyhow::ensure!(
    !config.persistence.data_file.as_os_str().is_empty(),
    "persistence.data_file must not be empty"
  );
  anyhow::ensure!(
    config.persistence.seed_file.as_ref() != Some(&config.persistence.data_file),
    "persistence.seed_file must differ from persistence.data_file"
  );
  Ok(())
}
