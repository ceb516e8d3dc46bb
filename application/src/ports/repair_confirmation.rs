//! Repair confirmation port for corrupted log files.
//!
//! When the log file cannot be parsed, [`LogStore::load`] asks the operator
//! whether the file may be cleared. Nothing is deleted without a "yes".
//!
//! # Built-in Implementations
//!
//! - [`AlwaysClear`] - Always answers "yes"
//! - [`NeverClear`] - Always answers "no"
//!
//! For interactive use, see `InteractiveRepairPrompt` in the presentation layer.
//!
//! [`LogStore::load`]: crate::use_cases::log_store::LogStore::load

use thiserror::Error;

/// Description of a log file that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCorruption {
    /// Where the log lives (usually a file path).
    pub location: String,
    /// Why the contents were rejected.
    pub reason: String,
}

/// Failure to obtain an answer at all (not a "no").
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationError {
    #[error("Input closed before an answer was given")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(String),
}

/// Synchronous yes/no decision on clearing a corrupted log.
pub trait RepairConfirmation: Send + Sync {
    /// Return `Ok(true)` to clear the log, `Ok(false)` to abort.
    fn confirm_clear(&self, corruption: &LogCorruption) -> Result<bool, ConfirmationError>;
}

/// Confirmation that always allows clearing.
pub struct AlwaysClear;

impl RepairConfirmation for AlwaysClear {
    fn confirm_clear(&self, _corruption: &LogCorruption) -> Result<bool, ConfirmationError> {
        Ok(true)
    }
}

/// Confirmation that always refuses clearing.
pub struct NeverClear;

impl RepairConfirmation for NeverClear {
    fn confirm_clear(&self, _corruption: &LogCorruption) -> Result<bool, ConfirmationError> {
        Ok(false)
    }
}
