//! Validated settings for the HTTP completion gateway

use promptlog_domain::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use std::fmt;
use std::time::Duration;

/// Everything needed to talk to the completion endpoint.
#[derive(Clone, PartialEq)]
pub struct CompletionSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    /// `None` keeps the HTTP client's default (no overall timeout).
    pub timeout: Option<Duration>,
}

impl CompletionSettings {
    /// Settings with the built-in endpoint, model and temperature.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

// The credential never ends up in debug output or tracing.
impl fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}
