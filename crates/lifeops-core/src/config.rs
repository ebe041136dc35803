//! TOML-based application configuration.
//!
//! Tuning knobs for the neurons and the tick cadence. Stored at
//! `~/.config/lifeops/config.toml`; a missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::neurons::{FocusConfig, OpenLoopConfig};

fn default_tick_seconds() -> u64 {
    5
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/lifeops/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub loop_sweep: OpenLoopConfig,
    /// Seconds between ticks in the run loop.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            focus: FocusConfig::default(),
            loop_sweep: OpenLoopConfig::default(),
            tick_seconds: default_tick_seconds(),
        }
    }
}

/// `~/.config/lifeops/config.toml`, if a config dir exists.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lifeops").join("config.toml"))
}

impl Config {
    /// Load from the default path. Missing file (or no config dir at
    /// all) falls back to defaults; a present-but-broken file is an
    /// error.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path, defaulting when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Write to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        std::fs::write(path, text).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
