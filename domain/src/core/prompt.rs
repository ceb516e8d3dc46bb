//! Prompt value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated user prompt.
///
/// Length is counted in Unicode scalar values. The text is kept exactly as
/// typed (no trimming), since it is what ends up in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    /// Longest accepted prompt, in characters.
    pub const MAX_CHARS: usize = 999;

    /// Validate raw input text.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let length = text.chars().count();

        if length == 0 {
            return Err(DomainError::EmptyPrompt);
        }
        if length > Self::MAX_CHARS {
            return Err(DomainError::PromptTooLong {
                length,
                max: Self::MAX_CHARS,
            });
        }

        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
