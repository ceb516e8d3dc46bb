//! Domain layer for promptlog
//!
//! This crate contains the core entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Prompt**: validated user input (1 to 999 characters)
//! - **LogRecord**: one attempted exchange, as persisted in the log file
//! - **CompletionRequest**: the single-message body sent to the service

pub mod completion;
pub mod core;
pub mod log;

// Re-export commonly used types
pub use completion::{
    payload::{REQUEST_ERROR_MESSAGE, choice_texts, error_marker},
    request::{
        ChatMessage, CompletionRequest, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    },
};
pub use core::{error::DomainError, prompt::Prompt, role::Role};
pub use log::{EMPTY_LOG, parse_log, record::LogRecord, render_log, timestamp::Timestamp};
