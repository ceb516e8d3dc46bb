//! Infrastructure layer for promptlog
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod completion;
pub mod config;
pub mod storage;

// Re-export commonly used types
pub use completion::{CompletionSettings, HttpCompletionGateway};
pub use config::{
    ConfigLoader, ConfigValidationError, FileCompletionConfig, FileConfig, FileLogConfig,
    FileReplConfig,
};
pub use storage::{DEFAULT_LOG_FILE, JsonFileStorage};
