//! LogStore - owner of the interaction log
//!
//! Loads the log once at startup and appends records by rewriting the
//! whole file. The on-disk format is always a complete JSON array, so a
//! reader never sees a half-written record.
//!
//! # Flow
//!
//! ```text
//! load()
//!   ├─ missing  → write "[]"                      → empty log
//!   ├─ valid    → parse records                   → loaded log
//!   └─ corrupt  → RepairConfirmation::confirm_clear
//!                   ├─ yes → write "[]"           → empty log
//!                   │         └─ write fails      → RepairFailed
//!                   └─ no  → RepairDeclined (file untouched)
//! ```

use crate::ports::log_storage::LogStorage;
use crate::ports::repair_confirmation::{LogCorruption, RepairConfirmation};
use promptlog_domain::{EMPTY_LOG, LogRecord, parse_log, render_log};
use std::io;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Startup failures of [`LogStore::load`]. All of them are fatal.
#[derive(Error, Debug)]
pub enum LogLoadError {
    #[error("Could not read log file {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("Could not create log file {location}: {source}")]
    Create {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("Log file {location} is corrupted ({reason}) and was left untouched")]
    RepairDeclined { location: String, reason: String },

    #[error("Could not clear corrupted log file {location}: {source}")]
    RepairFailed {
        location: String,
        #[source]
        source: io::Error,
    },
}

impl LogLoadError {
    /// The operator agreed to clear the log but the rewrite failed.
    pub fn is_repair_failure(&self) -> bool {
        matches!(self, LogLoadError::RepairFailed { .. })
    }
}

/// Failure to persist the log after an append.
///
/// The record is kept in memory either way; the next successful append
/// writes the full history.
#[derive(Error, Debug)]
pub enum LogAppendError {
    #[error("Could not serialize log: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not write log file {location}: {source}")]
    Write {
        location: String,
        #[source]
        source: io::Error,
    },
}

/// How the log was obtained at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOrigin {
    /// No log existed; an empty one was created.
    Created,
    /// An existing log was read.
    Loaded,
    /// A corrupted log was cleared with the operator's consent.
    Repaired,
}

/// In-memory mirror of the log file plus the storage it is persisted to.
pub struct LogStore<S: LogStorage> {
    storage: S,
    records: Vec<LogRecord>,
    persisted: usize,
    origin: LogOrigin,
}

impl<S: LogStorage> LogStore<S> {
    /// Load the log, creating or repairing it as needed.
    pub async fn load(
        storage: S,
        confirmation: &dyn RepairConfirmation,
    ) -> Result<Self, LogLoadError> {
        let location = storage.location();

        let bytes = match storage.read().await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                storage
                    .replace(EMPTY_LOG.as_bytes())
                    .await
                    .map_err(|source| LogLoadError::Create {
                        location: location.clone(),
                        source,
                    })?;
                info!("Created empty log file {}", location);
                return Ok(Self::from_parts(storage, Vec::new(), LogOrigin::Created));
            }
            Err(source) => return Err(LogLoadError::Read { location, source }),
        };

        let reason = match decode(&bytes) {
            Ok(records) => {
                debug!("Loaded {} log records from {}", records.len(), location);
                return Ok(Self::from_parts(storage, records, LogOrigin::Loaded));
            }
            Err(reason) => reason,
        };

        warn!("Log file {} is corrupted: {}", location, reason);
        let corruption = LogCorruption {
            location: location.clone(),
            reason,
        };

        let approved = confirmation
            .confirm_clear(&corruption)
            .unwrap_or_else(|e| {
                warn!("No answer to the repair prompt, keeping the log: {}", e);
                false
            });

        if !approved {
            return Err(LogLoadError::RepairDeclined {
                location,
                reason: corruption.reason,
            });
        }

        storage
            .replace(EMPTY_LOG.as_bytes())
            .await
            .map_err(|source| LogLoadError::RepairFailed {
                location: location.clone(),
                source,
            })?;
        info!("Cleared corrupted log file {}", location);

        Ok(Self::from_parts(storage, Vec::new(), LogOrigin::Repaired))
    }

    fn from_parts(storage: S, records: Vec<LogRecord>, origin: LogOrigin) -> Self {
        let persisted = records.len();
        Self {
            storage,
            records,
            persisted,
            origin,
        }
    }

    /// Add a record and rewrite the whole log.
    pub async fn append(&mut self, record: LogRecord) -> Result<(), LogAppendError> {
        self.records.push(record);

        let body = render_log(&self.records)?;
        self.storage
            .replace(body.as_bytes())
            .await
            .map_err(|source| LogAppendError::Write {
                location: self.storage.location(),
                source,
            })?;

        self.persisted = self.records.len();
        debug!("Persisted {} log records", self.persisted);
        Ok(())
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records held in memory that the last write did not include.
    pub fn unpersisted(&self) -> usize {
        self.records.len() - self.persisted
    }

    pub fn origin(&self) -> LogOrigin {
        self.origin
    }

    pub fn location(&self) -> String {
        self.storage.location()
    }
}

fn decode(bytes: &[u8]) -> Result<Vec<LogRecord>, String> {
    let text = std::str::from_utf8(bytes).map_err(|e| format!("not valid UTF-8: {}", e))?;
    parse_log(text).map_err(|e| format!("not a valid log array: {}", e))
}
