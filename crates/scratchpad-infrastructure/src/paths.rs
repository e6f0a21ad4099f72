//! Unified path management for scratchpad configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/scratchpad/          # Config directory
//! └── config.toml                # Application configuration
//!
//! ~/.local/share/scratchpad/     # Data directory
//! └── storage.json               # Key/value store (persisted file set)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "scratchpad";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform configuration directory could not be determined.
    ConfigDirNotFound,
    /// Platform data directory could not be determined.
    DataDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
            PathError::DataDirNotFound => write!(f, "Cannot find data directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for scratchpad_core::BridgeError {
    fn from(err: PathError) -> Self {
        scratchpad_core::BridgeError::config(err.to_string())
    }
}

pub struct ScratchpadPaths;

impl ScratchpadPaths {
    /// Returns the scratchpad configuration directory (e.g. `~/.config/scratchpad/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the scratchpad data directory (e.g. `~/.local/share/scratchpad/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DataDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage.json"))
    }
}
