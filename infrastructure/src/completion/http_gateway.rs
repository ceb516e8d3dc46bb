//! reqwest-based adapter for the chat completions endpoint.
//!
//! One POST per prompt, no retries. Any failure before a JSON body is in
//! hand is a transport error; a JSON body with a non-2xx status is a
//! service error.

use super::settings::CompletionSettings;
use async_trait::async_trait;
use promptlog_application::{CompletionError, CompletionGateway};
use promptlog_domain::{CompletionRequest, Prompt};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// [`CompletionGateway`] that talks HTTP to an OpenAI-compatible endpoint.
#[derive(Debug)]
pub struct HttpCompletionGateway {
    http: Client,
    settings: CompletionSettings,
}

impl HttpCompletionGateway {
    pub fn new(settings: CompletionSettings) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, settings })
    }

    /// Use a preconfigured client (proxy settings, TLS roots, ...).
    pub fn with_client(http: Client, settings: CompletionSettings) -> Self {
        Self { http, settings }
    }

    /// Request body for a prompt.
    pub fn build_request(&self, prompt: &Prompt) -> CompletionRequest {
        CompletionRequest::single(&self.settings.model, self.settings.temperature, prompt)
    }
}

#[async_trait]
impl CompletionGateway for HttpCompletionGateway {
    async fn complete(&self, prompt: &Prompt) -> Result<Value, CompletionError> {
        let body = self.build_request(prompt);
        debug!(
            "POST {} (model {}, {} chars)",
            self.settings.endpoint,
            body.model,
            prompt.as_str().chars().count()
        );

        let response = self
            .http
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        let payload: Value = response.json().await.map_err(|e| {
            CompletionError::Transport(format!(
                "Could not decode response body (status {}): {}",
                status.as_u16(),
                e
            ))
        })?;

        if status.is_success() {
            Ok(payload)
        } else {
            debug!("Service returned {}", status);
            Err(CompletionError::Service {
                status: status.as_u16(),
                payload,
            })
        }
    }
}
