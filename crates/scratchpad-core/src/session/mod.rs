//! Execution session domain module.
//!
//! # Module Structure
//!
//! - `mode`: the two-valued session tag (`SessionMode`)
//! - `runtime`: traits the embedded engine implements (`Runtime`, `RuntimeFactory`)
//! - `manager`: slot ownership, dispatch and recovery (`SessionManager`)

mod manager;
mod mode;
mod runtime;

#[cfg(test)]
mod manager_test;

pub use manager::{RunOutcome, SessionManager, UNCAUGHT_ERROR_PREFIX};
pub use mode::SessionMode;
pub use runtime::{Runtime, RuntimeFactory, RuntimeFailure};
