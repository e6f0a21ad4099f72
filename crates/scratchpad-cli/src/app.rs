//! Application bootstrap: configuration, storage and bridge wiring.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use scratchpad_core::config::AppConfig;
use scratchpad_core::{Bridge, KeyValueStore, MemoryStore};
use scratchpad_infrastructure::{ConfigService, JsonFileStore};
use scratchpad_rhai::RhaiFactory;

pub struct AppOptions {
    pub config_path: Option<PathBuf>,
    pub store_path: Option<PathBuf>,
    pub ephemeral: bool,
}

pub struct App {
    pub bridge: Bridge<RhaiFactory>,
    /// Whether the file set is written back after each run.
    pub autosave: bool,
}

impl App {
    pub async fn bootstrap(options: AppOptions) -> Result<Self> {
        let config_service = match options.config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new().context("Failed to locate config directory")?,
        };
        let config: AppConfig = config_service
            .load()
            .with_context(|| format!("Failed to load {:?}", config_service.path()))?;

        let store: Arc<dyn KeyValueStore> = if options.ephemeral {
            tracing::info!("[Bootstrap] Ephemeral mode, files are kept in memory");
            Arc::new(MemoryStore::new())
        } else {
            let path = match options.store_path {
                Some(path) => path,
                None => ConfigService::storage_path(&config)
                    .context("Failed to locate data directory")?,
            };
            tracing::info!("[Bootstrap] Using store at {:?}", path);
            Arc::new(JsonFileStore::new(path))
        };

        let autosave = config.bridge.autosave && !options.ephemeral;
        let bridge = Bridge::initialize(RhaiFactory::new(config.engine), store, config.bridge)
            .await
            .context("Failed to initialize bridge")?;

        Ok(Self { bridge, autosave })
    }

    /// Writes the file set back to storage when autosave is on.
    ///
    /// A failed save is logged and otherwise ignored: the in-memory set is
    /// still intact and the next save will retry.
    pub async fn autosave(&self) {
        if !self.autosave {
            return;
        }
        if let Err(e) = self.bridge.save_files().await {
            tracing::warn!("[Bootstrap] Autosave failed: {}", e);
        }
    }
}
