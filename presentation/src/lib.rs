//! Presentation layer for promptlog
//!
//! This crate contains the CLI definition, the chat REPL, console output
//! formatting, the progress spinner and the log repair prompt.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;
pub mod repair;

// Re-export commonly used types
pub use chat::{ChatRepl, EditorInput, PromptInput, ReadOutcome, SessionEnd};
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::spinner::ThinkingSpinner;
pub use repair::InteractiveRepairPrompt;
