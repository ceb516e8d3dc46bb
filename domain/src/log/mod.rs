//! Interaction log model
//!
//! The log file is a single JSON array of [`LogRecord`]s.

pub mod record;
pub mod timestamp;

use record::LogRecord;

/// Parse the full contents of a log file.
pub fn parse_log(text: &str) -> Result<Vec<LogRecord>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Serialize a whole record sequence as a log file body.
pub fn render_log(records: &[LogRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Body of a freshly created or cleared log file.
pub const EMPTY_LOG: &str = "[]";
