//! Completion gateway port
//!
//! Defines the interface for sending one prompt to the remote
//! text-completion service.

use async_trait::async_trait;
use promptlog_domain::{Prompt, error_marker};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during a completion request
///
/// There is no retry policy: the user decides whether to resend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompletionError {
    /// The service answered, but with a non-ok status.
    #[error("Service returned status {status}")]
    Service { status: u16, payload: Value },

    /// The request could not be completed (network failure, undecodable body).
    #[error("Transport error: {0}")]
    Transport(String),
}

impl CompletionError {
    /// Payload recorded in the log for this failure.
    ///
    /// Service errors keep the body the service sent; transport errors have
    /// nothing to keep and record the generic error marker.
    pub fn log_payload(&self) -> Value {
        match self {
            CompletionError::Service { payload, .. } => payload.clone(),
            CompletionError::Transport(_) => error_marker(),
        }
    }
}

/// Gateway to the completion service
///
/// Stateless: every call sends a single user message with no prior context.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send the prompt and return the decoded response body on an ok status.
    async fn complete(&self, prompt: &Prompt) -> Result<Value, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_error_keeps_payload() {
        let error = CompletionError::Service {
            status: 429,
            payload: json!({"error": {"message": "rate limited"}}),
        };
        assert_eq!(
            error.log_payload(),
            json!({"error": {"message": "rate limited"}})
        );
    }

    #[test]
    fn test_transport_error_logs_marker() {
        let error = CompletionError::Transport("connection refused".to_string());
        assert_eq!(error.log_payload(), error_marker());
    }
}
