//! Interactive chat module
//!
//! Provides the readline-based session loop around [`ChatSession`].
//!
//! [`ChatSession`]: promptlog_application::ChatSession

mod input;
mod repl;

pub use input::{EditorInput, PromptInput, ReadOutcome};
pub use repl::{ChatRepl, SessionEnd};
