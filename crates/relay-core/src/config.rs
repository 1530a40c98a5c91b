//! Relay configuration
//!
//! Configuration is a small TOML file; every field has a default so an
//! absent file yields a working relay on `0.0.0.0:3000`.
//!
//! Resolution order:
//! 1. Explicit `--config PATH` (must exist and parse)
//! 2. `{home}/.config/turtle-relay/config.toml` (optional)
//! 3. Built-in defaults

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Settings for the relay daemon
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl RelayConfig {
    /// The socket address string the daemon binds.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Default config file location under the resolved home directory.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(crate::home::get_home_dir()?.join(".config/turtle-relay/config.toml"))
}

/// Resolve the effective configuration.
///
/// # Errors
///
/// An explicit path that is missing or malformed is an error; a missing
/// default-location file is not.
pub fn resolve_config(explicit: Option<&Path>) -> Result<RelayConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let default_path = default_config_path()?;
    if default_path.exists() {
        return load_config_file(&default_path);
    }

    Ok(RelayConfig::default())
}

fn load_config_file(path: &Path) -> Result<RelayConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_file() {
        let config = RelayConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn parses_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "host = \"127.0.0.1\"\nport = 8080").unwrap();

        let config = resolve_config(Some(&path)).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "port = 9000\n").unwrap();

        let config = resolve_config(Some(&path)).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");
        assert!(resolve_config(Some(&path)).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "port = \"not a number\"\n").unwrap();
        assert!(resolve_config(Some(&path)).is_err());
    }
}
