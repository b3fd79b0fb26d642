//! Configuration file management.
//!
//! Reads the optional `.envault.toml` from a project or root directory.
//! A missing file means defaults; a malformed one is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.envault.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key lookup settings
    pub keys: Keys,
    /// Directory walk settings shared by `audit` and `scan`
    pub audit: Audit,
}

/// `[keys]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keys {
    /// Key file name, relative to the project directory
    pub file: String,
}

impl Default for Keys {
    fn default() -> Self {
        Self {
            file: constants::KEY_FILE.to_string(),
        }
    }
}

/// `[audit]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Audit {
    /// Subdirectory names to skip
    pub exclude: Vec<String>,
}

impl Config {
    /// Load configuration from `dir/.envault.toml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file exists but cannot be read,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(constants::CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            key_file = %config.keys.file,
            excluded = config.audit.exclude.len(),
            "config loaded"
        );

        Ok(config)
    }

    /// Load configuration from the current directory.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Path of the key file for a project directory.
    pub fn key_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.keys.file)
    }

    /// Whether a subdirectory name is excluded from directory walks.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.audit.exclude.iter().any(|e| e == name)
    }
}
