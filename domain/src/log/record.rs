//! Log record entity

use super::timestamp::Timestamp;
use crate::core::prompt::Prompt;
use crate::core::role::Role;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One attempted exchange with the completion service.
///
/// `response` holds either the decoded service body or the error marker
/// produced by [`error_marker`](crate::completion::payload::error_marker).
/// Fields this version does not know about are kept in `extra` so that a
/// rewrite of the log file does not drop them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub role: Role,
    pub content: String,
    pub response: Value,
    pub created_at: Timestamp,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogRecord {
    /// Build the record for a user prompt whose outcome is known.
    pub fn user(prompt: &Prompt, response: Value, created_at: impl Into<Timestamp>) -> Self {
        Self {
            role: Role::User,
            content: prompt.as_str().to_string(),
            response,
            created_at: created_at.into(),
            extra: Map::new(),
        }
    }

    /// Whether the response is the transport error marker.
    pub fn is_error_marker(&self) -> bool {
        self.response
            .as_object()
            .is_some_and(|map| map.len() == 1 && map.get("error").is_some_and(Value::is_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::payload::error_marker;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_serialized_shape() {
        let prompt = Prompt::new("hello").unwrap();
        let record = LogRecord::user(&prompt, json!({"choices": []}), at());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "role": "user",
                "content": "hello",
                "response": {"choices": []},
                "created_at": "2026-10-15T09:30:00.000Z",
            })
        );
    }

    #[test]
    fn test_unknown_fields_survive_rewrite() {
        let raw = r#"{"role":"user","content":"hi","response":{},"created_at":"2026-10-15T09:30:00.000Z","session":"abc"}"#;
        let record: LogRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.extra.get("session"), Some(&json!("abc")));

        let rewritten: Value = serde_json::to_value(&record).unwrap();
        let original: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(rewritten, original);
    }

    #[test]
    fn test_non_rfc3339_created_at_is_accepted() {
        let raw = r#"{"role":"user","content":"hi","response":{},"created_at":"Tue Oct 15 2026"}"#;
        let record: LogRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.created_at.as_str(), "Tue Oct 15 2026");
        assert_eq!(serde_json::to_string(&record).unwrap(), raw);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let raw = r#"{"role":"user","content":"hi","created_at":"2026-10-15T09:30:00.000Z"}"#;
        assert!(serde_json::from_str::<LogRecord>(raw).is_err());
    }

    #[test]
    fn test_error_marker_detection() {
        let prompt = Prompt::new("hello").unwrap();
        let failed = LogRecord::user(&prompt, error_marker(), at());
        assert!(failed.is_error_marker());

        let answered = LogRecord::user(&prompt, json!({"error": {"code": 401}}), at());
        assert!(!answered.is_error_marker());
    }
}
