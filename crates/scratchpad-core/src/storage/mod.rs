//! Persistent key/value storage abstraction.
//!
//! The bridge only ever needs string values under string keys; concrete
//! backends live in `scratchpad-infrastructure`.

mod memory;
mod repository;

pub use memory::MemoryStore;
pub use repository::KeyValueStore;
