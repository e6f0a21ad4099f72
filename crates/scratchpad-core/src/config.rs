//! Configuration models.
//!
//! Every field carries a serde default so that a partial (or empty)
//! `config.toml` always deserializes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage key under which the virtual file set is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "scratchpad_files";

/// Name of the single record seeded when no prior file set exists.
pub const DEFAULT_FILE_NAME: &str = "main.rhai";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Settings consumed by [`crate::Bridge::initialize`].
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Key of the persisted file-set snapshot.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Name of the seed record (`main.<ext>`).
    #[serde(default = "default_file_name")]
    pub default_file: String,
    /// Whether front-ends should persist the file set after each run.
    #[serde(default = "default_true")]
    pub autosave: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            default_file: default_file_name(),
            autosave: true,
        }
    }
}

/// Resource limits handed to the embedded engine.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Maximum number of engine operations per run (0 = unlimited).
    #[serde(default)]
    pub max_operations: u64,
    #[serde(default = "default_max_call_levels")]
    pub max_call_levels: usize,
    /// Maximum string length in bytes (0 = unlimited).
    #[serde(default)]
    pub max_string_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_operations: 0,
            max_call_levels: default_max_call_levels(),
            max_string_size: 0,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StorageConfig {
    /// Overrides the platform default location of the key/value store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_call_levels() -> usize {
    48
}
