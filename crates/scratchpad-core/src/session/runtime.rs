//! Contract consumed from the embedded scripting engine.

use crate::host::HostCallbacks;
use thiserror::Error;

/// Signal raised by a runtime when a run ends in an uncaught error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RuntimeFailure {
    pub message: String,
}

impl RuntimeFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One live engine instance.
pub trait Runtime {
    /// Executes `code`. The runtime may call back into the host any number
    /// of times before returning.
    fn run(&mut self, code: &str, interactive: bool) -> Result<(), RuntimeFailure>;

    /// Clears accumulated interpreter state while keeping the handle usable.
    fn reset(&mut self);
}

/// Produces fresh runtime handles bound to the host callback surface.
pub trait RuntimeFactory {
    type Runtime: Runtime;

    /// Builds a new, stateless handle.
    fn construct(&self, host: HostCallbacks) -> Self::Runtime;
}
