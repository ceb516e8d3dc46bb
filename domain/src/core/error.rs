//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Please enter a prompt")]
    EmptyPrompt,

    #[error("The prompt is too long ({length} characters, maximum is {max})")]
    PromptTooLong { length: usize, max: usize },
}

impl DomainError {
    /// Empty input is a no-op for the session, not something to report.
    pub fn is_silent(&self) -> bool {
        matches!(self, DomainError::EmptyPrompt)
    }
}
