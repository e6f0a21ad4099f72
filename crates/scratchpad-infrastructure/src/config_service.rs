//! Configuration service.
//!
//! Loads [`AppConfig`] from `config.toml`. A missing file yields the
//! defaults; a present but invalid file is an error, so that typos are not
//! silently ignored.

use crate::paths::ScratchpadPaths;
use scratchpad_core::config::AppConfig;
use scratchpad_core::error::{BridgeError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the platform default location.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: ScratchpadPaths::config_file()?,
        })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AppConfig> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[Config] No config at {:?}, using defaults", self.path);
                return Ok(AppConfig::default());
            }
            Err(e) => {
                return Err(BridgeError::config(format!(
                    "Failed to read {:?}: {}",
                    self.path, e
                )));
            }
        };

        toml::from_str(&content).map_err(|e| {
            BridgeError::config(format!("Invalid config {:?}: {}", self.path, e))
        })
    }

    /// Resolves the key/value store location: explicit config override first,
    /// then the platform data directory.
    pub fn storage_path(config: &AppConfig) -> Result<PathBuf> {
        match &config.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(ScratchpadPaths::storage_file()?),
        }
    }
}
