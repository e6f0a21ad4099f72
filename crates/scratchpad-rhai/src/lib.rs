//! Embedded runtime backed by the `rhai` scripting engine.
//!
//! Scripts see the host callback surface as plain functions:
//!
//! ```text
//! print(x)                     // Print entry
//! debug(x)                     // Warn entry, tagged with the line
//! warn(text) / error(text)     // Warn / Err entries
//! readfile(name) -> string     // first matching virtual file, "" if none
//! writefile(name, content)     // appends a virtual file
//! ```

mod engine;
mod runtime;

pub use runtime::{RhaiFactory, RhaiRuntime};
