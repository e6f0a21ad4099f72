//! Host-side bridge for an embedded scripting runtime.
//!
//! The bridge keeps two independently-lived sessions (a persistent
//! `interactive` one for a REPL and a disposable `batch` one for scripts),
//! routes the runtime's output and file callbacks into shared host state,
//! and replaces a session's runtime handle whenever it signals failure.
//!
//! ```ignore
//! let mut bridge = Bridge::initialize(factory, store, config.bridge).await?;
//! bridge.run_code("let x = 1;", true);
//! for entry in bridge.output().entries() { /* render */ }
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod files;
pub mod host;
pub mod output;
pub mod session;
pub mod storage;

pub use bridge::Bridge;
pub use error::{BridgeError, Result};
pub use files::{FileRecord, VirtualFileSet};
pub use host::HostCallbacks;
pub use output::{OutputChannel, OutputEntry, Severity};
pub use session::{
    RunOutcome, Runtime, RuntimeFactory, RuntimeFailure, SessionManager, SessionMode,
};
pub use storage::{KeyValueStore, MemoryStore};
