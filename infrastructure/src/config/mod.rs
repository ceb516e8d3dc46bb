//! Configuration loading for promptlog
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `OPENAI_URL`, `OPENAI_API_KEY`, `PROMPTLOG_*`
//! 2. `--config <path>` specified file
//! 3. Project root: `./promptlog.toml` or `./.promptlog.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/promptlog/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCompletionConfig, FileConfig, FileLogConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
