//! JSON presentation helpers

use serde_json::Value;

/// Reformat a JSON string with two-space indentation. Input that is not
/// valid JSON is returned unchanged.
pub fn prettify(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

/// Check whether a string parses as JSON
pub fn is_valid_json(raw: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(raw).is_ok()
}
