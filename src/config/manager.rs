use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::Settings;
use crate::paths;

pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Locates and loads the settings file.
pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    /// Creates a manager for the default settings location.
    ///
    /// Settings are read from `$XDG_CONFIG_HOME/llm-translate/settings.toml`
    /// or `~/.config/llm-translate/settings.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            settings_path: paths::config_dir()?.join(SETTINGS_FILE_NAME),
        })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: path.into(),
        }
    }

    /// Uses `path` when given, the default location otherwise.
    pub fn from_override(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(Self::new, |path| Ok(Self::with_path(path)))
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn load(&self) -> Result<Settings> {
        let contents = fs::read_to_string(&self.settings_path).with_context(|| {
            format!(
                "Failed to read settings file: {}",
                self.settings_path.display()
            )
        })?;

        Settings::from_toml(&contents)
            .with_context(|| format!("Invalid settings file: {}", self.settings_path.display()))
    }
}
