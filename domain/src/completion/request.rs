//! Chat completion request body

use crate::core::prompt::Prompt;
use crate::core::role::Role;
use serde::{Deserialize, Serialize};

/// Endpoint used when `OPENAI_URL` is not set.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Model identifier sent with every request.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature sent with every request.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// A single message in the request's `messages` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// JSON body POSTed to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

impl CompletionRequest {
    /// A request carrying exactly one user message; no prior context is sent.
    pub fn single(model: impl Into<String>, temperature: f64, prompt: &Prompt) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: Role::User,
                content: prompt.as_str().to_string(),
            }],
            temperature,
        }
    }
}
