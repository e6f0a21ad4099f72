//! Output channel: an append-only, observable log of runtime messages.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc;

/// Severity of a single output entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Print,
    Warn,
    Err,
}

/// One message emitted by the runtime. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEntry {
    pub text: String,
    pub severity: Severity,
}

impl OutputEntry {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

#[derive(Default)]
struct OutputLog {
    entries: Vec<OutputEntry>,
    subscribers: Vec<mpsc::UnboundedSender<OutputEntry>>,
}

/// Shared handle to the output log.
///
/// Cloning yields another handle onto the same log, so entries emitted
/// through the host callbacks are visible to every holder immediately.
#[derive(Clone, Default)]
pub struct OutputChannel {
    inner: Arc<RwLock<OutputLog>>,
}

impl OutputChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and forwards it to every live subscriber.
    ///
    /// Cannot fail: a poisoned lock is recovered and closed subscribers
    /// are dropped.
    pub fn emit(&self, text: impl Into<String>, severity: Severity) {
        let entry = OutputEntry::new(text, severity);
        let mut log = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        log.subscribers
            .retain(|subscriber| subscriber.send(entry.clone()).is_ok());
        log.entries.push(entry);
    }

    /// Subscribes to entries emitted after this call.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<OutputEntry> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribers
            .push(sender);
        receiver
    }

    /// Snapshot of the whole log in emission order.
    pub fn entries(&self) -> Vec<OutputEntry> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for OutputChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputChannel")
            .field("len", &self.len())
            .finish()
    }
}
