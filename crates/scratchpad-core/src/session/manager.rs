use super::mode::SessionMode;
use super::runtime::{Runtime, RuntimeFactory};
use crate::host::HostCallbacks;

/// Prefix of the output entry emitted when a run signals failure.
pub const UNCAUGHT_ERROR_PREFIX: &str = "Uncaught runtime error: ";

/// How a single `run_code` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The runtime returned normally.
    Completed,
    /// The runtime signalled failure and its slot was replaced.
    Recovered,
}

/// A slot's live handle plus the number of times it has been replaced.
struct Slot<R> {
    runtime: R,
    generation: u64,
}

/// Owns the `interactive` and `batch` runtime handles.
///
/// `SessionManager` is responsible for:
/// - Constructing both handles eagerly
/// - Routing each run to the handle of the requested mode
/// - Resetting the batch handle after every completed run
/// - Replacing a handle that signalled failure, leaving the other slot untouched
pub struct SessionManager<F: RuntimeFactory> {
    factory: F,
    host: HostCallbacks,
    interactive: Slot<F::Runtime>,
    batch: Slot<F::Runtime>,
}

impl<F: RuntimeFactory> SessionManager<F> {
    /// Creates a manager with both slots already live.
    pub fn new(factory: F, host: HostCallbacks) -> Self {
        let interactive = Slot {
            runtime: factory.construct(host.clone()),
            generation: 0,
        };
        let batch = Slot {
            runtime: factory.construct(host.clone()),
            generation: 0,
        };

        Self {
            factory,
            host,
            interactive,
            batch,
        }
    }

    /// Runs `code` in the session selected by `interactive`.
    ///
    /// Never fails: a runtime failure is written to the output channel as an
    /// `Err` entry and the slot gets a brand-new handle.
    pub fn run_code(&mut self, code: &str, interactive: bool) -> RunOutcome {
        self.run_in(SessionMode::from_interactive(interactive), code)
    }

    /// Same as [`Self::run_code`] with an explicit mode tag.
    pub fn run_in(&mut self, mode: SessionMode, code: &str) -> RunOutcome {
        let slot = self.slot_mut(mode);

        match slot.runtime.run(code, mode.is_interactive()) {
            Ok(()) => {
                if mode == SessionMode::Batch {
                    slot.runtime.reset();
                }
                tracing::debug!("[Session] {} run completed", mode);
                RunOutcome::Completed
            }
            Err(failure) => {
                tracing::warn!(
                    "[Session] {} runtime failed, replacing handle: {}",
                    mode,
                    failure.message
                );
                self.host
                    .error(&format!("{}{}", UNCAUGHT_ERROR_PREFIX, failure.message));
                self.replace(mode);
                RunOutcome::Recovered
            }
        }
    }

    /// Number of times the handle in `mode`'s slot has been replaced.
    pub fn generation(&self, mode: SessionMode) -> u64 {
        match mode {
            SessionMode::Interactive => self.interactive.generation,
            SessionMode::Batch => self.batch.generation,
        }
    }

    pub fn host(&self) -> &HostCallbacks {
        &self.host
    }

    /// Discards the handle in `mode`'s slot and installs a fresh one.
    fn replace(&mut self, mode: SessionMode) {
        let fresh = self.factory.construct(self.host.clone());
        let slot = self.slot_mut(mode);
        let discarded = std::mem::replace(&mut slot.runtime, fresh);
        slot.generation += 1;
        drop(discarded);
    }

    fn slot_mut(&mut self, mode: SessionMode) -> &mut Slot<F::Runtime> {
        match mode {
            SessionMode::Interactive => &mut self.interactive,
            SessionMode::Batch => &mut self.batch,
        }
    }
}
