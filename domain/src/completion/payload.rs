//! Reading the opaque completion response payload
//!
//! The service body is stored in the log as-is, so it stays a
//! [`serde_json::Value`]; this module only extracts what gets displayed.

use serde_json::{Value, json};

/// Message stored in place of a response when the request failed outright.
pub const REQUEST_ERROR_MESSAGE: &str = "Error with the request";

/// The `{"error": ...}` payload logged for transport failures.
pub fn error_marker() -> Value {
    json!({ "error": REQUEST_ERROR_MESSAGE })
}

/// Text of every `choices[].message.content` entry, in order.
///
/// A payload without a `choices` array yields nothing. Entries whose
/// content is not a string are skipped.
pub fn choice_texts(payload: &Value) -> Vec<String> {
    let Some(choices) = payload.get("choices").and_then(Value::as_array) else {
        return Vec::new();
    };

    choices
        .iter()
        .filter_map(|choice| {
            choice
                .pointer("/message/content")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .collect()
}
