//! Raw configuration data types
//!
//! These structs mirror the TOML config file (and the environment keys
//! mapped onto it). They are validated into runtime settings before use.

use crate::completion::CompletionSettings;
use crate::storage::DEFAULT_LOG_FILE;
use promptlog_domain::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("No API key found (set OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Raw completion endpoint configuration
///
/// Model and temperature are fixed and not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompletionConfig {
    /// Chat completions URL (`OPENAI_URL`)
    pub endpoint: String,
    /// Bearer credential (`OPENAI_API_KEY`)
    pub api_key: Option<String>,
    /// Overall request timeout; unset means the HTTP client default
    pub timeout_seconds: Option<u64>,
}

impl Default for FileCompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

/// Raw interaction log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Path of the JSON log file
    pub file: PathBuf,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Raw REPL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show the spinner while a request is in flight
    pub show_progress: bool,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
        }
    }
}

/// Root of the configuration tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub completion: FileCompletionConfig,
    pub log: FileLogConfig,
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Check the values that would otherwise fail later at request time.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let completion = &self.completion;

        if completion
            .api_key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
        {
            return Err(ConfigValidationError::MissingApiKey);
        }

        if completion.endpoint.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint);
        }

        if let Some(0) = completion.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        Ok(())
    }

    /// Validate and convert into gateway settings.
    pub fn completion_settings(&self) -> Result<CompletionSettings, ConfigValidationError> {
        self.validate()?;

        let completion = &self.completion;
        Ok(CompletionSettings {
            endpoint: completion.endpoint.trim().to_string(),
            api_key: completion.api_key.clone().unwrap_or_default(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: completion.timeout_seconds.map(Duration::from_secs),
        })
    }
}
