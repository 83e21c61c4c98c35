//! Settings file handling
//!
//! Settings are read from `config.json` in an XDG-compliant config directory
//! (`~/.config/ukforecast/` on Linux). A missing file means defaults; command
//! line flags override whatever the file says.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the settings file inside the config directory
const CONFIG_FILE: &str = "config.json";

/// Errors that can occur when loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings file is not valid JSON for `Settings`
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// User settings for the forecast cache and the upstream service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Maximum number of cached forecasts; `None` means unbounded
    pub max_size: Option<usize>,
    /// Simulated upstream latency per request, in milliseconds
    pub latency_ms: u64,
}

impl Settings {
    /// Returns the default settings path, or `None` if no home directory can
    /// be determined.
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "ukforecast")?;
        Some(project_dirs.config_dir().join(CONFIG_FILE))
    }

    /// Loads settings from `path`
    ///
    /// # Returns
    /// * `Ok(Settings::default())` if the file does not exist
    /// * `Ok(Settings)` parsed from the file otherwise
    /// * `Err(ConfigError)` if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads settings from the default location, falling back to defaults
    /// when there is no home directory.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}
