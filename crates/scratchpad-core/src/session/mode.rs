use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two execution sessions a run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Persistent REPL session; state survives between runs.
    Interactive,
    /// Disposable script session; reset after every run.
    Batch,
}

impl SessionMode {
    pub fn from_interactive(interactive: bool) -> Self {
        if interactive {
            Self::Interactive
        } else {
            Self::Batch
        }
    }

    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Interactive)
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interactive => write!(f, "interactive"),
            Self::Batch => write!(f, "batch"),
        }
    }
}
