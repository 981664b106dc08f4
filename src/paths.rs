//! XDG-style path utilities for configuration and credentials.
//!
//! This module provides consistent path resolution across platforms,
//! preferring XDG Base Directory Specification conventions over
//! OS-specific locations.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "autotrans";

/// Default file the `write` output mode appends to.
pub const DEFAULT_OUTPUT: &str = "~/paper_translated/tmp/tmp.md";

/// Returns the configuration directory for autotrans.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/autotrans` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/autotrans` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".config").join(APP_DIR)),
    }
}

/// Returns the directory holding one key file per backend.
pub fn credentials_dir() -> Result<PathBuf> {
    Ok(config_dir()?.join("credentials"))
}

/// Expands a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => Ok(home_dir()?.join(rest)),
        None => Ok(PathBuf::from(path)),
    }
}

/// Returns the user's home directory.
fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_default() {
        // Clear XDG_CONFIG_HOME to test default behavior
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        let dir = config_dir().unwrap();
        assert!(dir.ends_with(".config/autotrans"));

        // Restore
        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", "/custom/config") };

        assert_eq!(config_dir().unwrap(), PathBuf::from("/custom/config/autotrans"));
        assert_eq!(
            credentials_dir().unwrap(),
            PathBuf::from("/custom/config/autotrans/credentials")
        );

        // Restore
        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        } else {
            unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
        }
    }

    #[test]
    fn test_expand_tilde() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_tilde("~/notes/out.md").unwrap(), home.join("notes/out.md"));
        assert_eq!(expand_tilde("~").unwrap(), home);
        assert_eq!(expand_tilde("/tmp/out.md").unwrap(), PathBuf::from("/tmp/out.md"));
        assert_eq!(expand_tilde("rel/~/x").unwrap(), PathBuf::from("rel/~/x"));
    }
}
