//! Virtual file set domain module.
//!
//! - `model`: the persisted record type (`FileRecord`)
//! - `set`: the shared, append-only collection (`VirtualFileSet`)
//! - `persistence`: snapshot load/save through a [`crate::storage::KeyValueStore`]

mod model;
mod persistence;
mod set;

pub use model::FileRecord;
pub use persistence::{load_files, save_files};
pub use set::VirtualFileSet;
