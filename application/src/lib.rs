//! Application layer for promptlog
//!
//! This crate contains the use cases (log store, chat session) and the port
//! definitions they depend on. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    completion_gateway::{CompletionError, CompletionGateway},
    log_storage::{LogStorage, MemoryLogStorage},
    progress::{NoProgress, TurnProgress},
    repair_confirmation::{
        AlwaysClear, ConfirmationError, LogCorruption, NeverClear, RepairConfirmation,
    },
};
pub use use_cases::chat_session::{ChatSession, Reply, TurnOutcome, TurnReport};
pub use use_cases::log_store::{LogAppendError, LogLoadError, LogOrigin, LogStore};
