//! XDG-style path resolution for the settings directory.
//!
//! XDG Base Directory conventions are preferred over OS-specific locations,
//! so macOS users also get `~/.config`.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "llm-translate";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/llm-translate` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/llm-translate` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".config").join(APP_DIR)),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
