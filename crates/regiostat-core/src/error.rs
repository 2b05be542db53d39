use serde_json::Value;
use thiserror::Error;

/// A raw feed that violates its structural contract.
///
/// Ordinary data messiness (bad numbers, missing regions, odd statuses) is
/// never an error; only a feed whose shape is impossible to walk is.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{feed} feed must be a JSON array, found {found}")]
    NotAnArray {
        feed: &'static str,
        found: &'static str,
    },

    #[error("invalid JSON in {feed} feed: {source}")]
    Json {
        feed: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FeedError {
    /// Check that a feed's top level is an array and return its elements.
    pub fn expect_array<'a>(feed: &'static str, value: &'a Value) -> Result<&'a [Value], Self> {
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| Self::NotAnArray {
                feed,
                found: json_kind(value),
            })
    }
}

/// JSON type name of a value, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
