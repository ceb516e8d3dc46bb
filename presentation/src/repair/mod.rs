//! Operator prompt for clearing a corrupted log

mod prompt;

pub use prompt::InteractiveRepairPrompt;
