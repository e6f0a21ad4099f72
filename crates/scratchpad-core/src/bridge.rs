//! The bridge object: explicit two-phase lifecycle around the session manager.

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::files::{self, VirtualFileSet};
use crate::host::HostCallbacks;
use crate::output::OutputChannel;
use crate::session::{RunOutcome, RuntimeFactory, SessionManager, SessionMode};
use crate::storage::KeyValueStore;
use std::sync::Arc;

/// Host-side bridge to the embedded runtime.
///
/// Produced once by [`Bridge::initialize`]; every other operation is
/// synchronous. The output channel and file set are shared handles: clones
/// obtained from [`Bridge::output`] and [`Bridge::files`] observe every
/// callback-driven mutation as it happens.
pub struct Bridge<F: RuntimeFactory> {
    sessions: SessionManager<F>,
    output: OutputChannel,
    files: VirtualFileSet,
    store: Arc<dyn KeyValueStore>,
    config: BridgeConfig,
}

impl<F: RuntimeFactory> Bridge<F> {
    /// Restores the file set from `store` and constructs both sessions.
    ///
    /// A missing or unparsable snapshot leaves the default seed in place.
    pub async fn initialize(
        factory: F,
        store: Arc<dyn KeyValueStore>,
        config: BridgeConfig,
    ) -> Result<Self> {
        let files = match files::load_files(store.as_ref(), &config.storage_key).await {
            Some(records) => {
                tracing::info!("[Bridge] Restored {} file(s) from storage", records.len());
                VirtualFileSet::new(records)
            }
            None => {
                tracing::info!("[Bridge] Starting with default file '{}'", config.default_file);
                VirtualFileSet::seeded(config.default_file.clone())
            }
        };

        let output = OutputChannel::new();
        let host = HostCallbacks::new(output.clone(), files.clone());
        let sessions = SessionManager::new(factory, host);

        Ok(Self {
            sessions,
            output,
            files,
            store,
            config,
        })
    }

    /// Runs `code` in the interactive session when `interactive` is true,
    /// otherwise in the batch session.
    pub fn run_code(&mut self, code: &str, interactive: bool) -> RunOutcome {
        self.sessions.run_code(code, interactive)
    }

    /// Runs the content of the virtual file `name` in the batch session.
    ///
    /// A missing file runs as empty code, matching `readfile`.
    pub fn run_file(&mut self, name: &str) -> RunOutcome {
        let code = self.files.read(name);
        self.sessions.run_in(SessionMode::Batch, &code)
    }

    /// Persists the current file set under the configured storage key.
    pub async fn save_files(&self) -> Result<()> {
        files::save_files(
            self.store.as_ref(),
            &self.config.storage_key,
            &self.files.records(),
        )
        .await
    }

    pub fn output(&self) -> &OutputChannel {
        &self.output
    }

    pub fn files(&self) -> &VirtualFileSet {
        &self.files
    }

    pub fn host(&self) -> HostCallbacks {
        self.sessions.host().clone()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn generation(&self, mode: SessionMode) -> u64 {
        self.sessions.generation(mode)
    }
}
