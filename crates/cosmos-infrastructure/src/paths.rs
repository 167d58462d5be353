//! Unified path management for COSMOS files.
//!
//! ```text
//! ~/.config/cosmos/          # Config directory
//! ├── config.toml            # Application configuration
//! └── logs/                  # Rolling log files
//!     └── cosmos.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

use cosmos_core::CosmosError;
use thiserror::Error;

const APP_DIR: &str = "cosmos";
const CONFIG_FILE: &str = "config.toml";
const LOG_DIR: &str = "logs";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// The platform config directory could not be determined.
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

impl From<PathError> for CosmosError {
    fn from(err: PathError) -> Self {
        CosmosError::config(err.to_string())
    }
}

/// Resolves where COSMOS keeps its files.
///
/// The root is the platform config directory (XDG on Linux) unless an
/// explicit config file is given, in which case everything lives next to it.
#[derive(Debug, Clone)]
pub struct CosmosPaths {
    config_file: PathBuf,
}

impl CosmosPaths {
    /// Paths under the platform config directory.
    pub fn platform() -> Result<Self, PathError> {
        let root = dirs::config_dir()
            .ok_or(PathError::ConfigDirNotFound)?
            .join(APP_DIR);
        Ok(Self {
            config_file: root.join(CONFIG_FILE),
        })
    }

    /// Paths anchored at an explicit config file.
    pub fn with_config_file(config_file: impl Into<PathBuf>) -> Self {
        Self {
            config_file: config_file.into(),
        }
    }

    /// `--config` wins over the platform location.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self, PathError> {
        match config_override {
            Some(path) => Ok(Self::with_config_file(path)),
            None => Self::platform(),
        }
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn config_dir(&self) -> PathBuf {
        self.config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Default log directory, `logs/` next to the config file.
    pub fn log_dir(&self) -> PathBuf {
        self.config_dir().join(LOG_DIR)
    }
}
