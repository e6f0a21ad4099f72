pub mod config_service;
pub mod json_file_store;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::json_file_store::JsonFileStore;
pub use crate::paths::ScratchpadPaths;
