//! Canonical home directory resolution
//!
//! Single source of truth for home resolution across the relay crates.
//! Supports custom deployments and testing via the `TURTLE_RELAY_HOME`
//! environment variable.
//!
//! # Precedence
//!
//! 1. `TURTLE_RELAY_HOME` environment variable (if set and non-empty)
//! 2. `dirs::home_dir()` platform default

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the home directory for relay operations
///
/// # Errors
///
/// Returns an error when no home directory can be determined (no override
/// set and the platform lookup fails).
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("TURTLE_RELAY_HOME")
        && !home.trim().is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir().context("Could not determine home directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn env_override_wins() {
        unsafe { std::env::set_var("TURTLE_RELAY_HOME", "/tmp/relay-home") };
        let home = get_home_dir().unwrap();
        unsafe { std::env::remove_var("TURTLE_RELAY_HOME") };
        assert_eq!(home, PathBuf::from("/tmp/relay-home"));
    }

    #[test]
    #[serial]
    fn empty_override_falls_through() {
        unsafe { std::env::set_var("TURTLE_RELAY_HOME", "  ") };
        let result = get_home_dir();
        unsafe { std::env::remove_var("TURTLE_RELAY_HOME") };
        // Platform default still resolves on any normal system.
        assert!(result.is_ok());
        assert_ne!(result.unwrap(), PathBuf::from("  "));
    }
}
