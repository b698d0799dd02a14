//! Lenient accessors over untrusted pipeline JSON.
//!
//! A field of the wrong type reads the same as a missing one, and empty
//! strings count as missing.

use serde_json::Value;

/// Non-empty string field.
pub(crate) fn text(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

pub(crate) fn owned_text(value: &Value) -> Option<String> {
    text(value).map(str::to_string)
}

/// String array field; non-string entries are dropped.
pub(crate) fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Integer field, accepting whole floats such as `45.0`.
pub(crate) fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

/// Numeric field, accepting numeric strings such as `"7.9"`.
pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok().filter(|f: &f64| f.is_finite()),
        _ => None,
    }
}

/// Text form of a scalar for URL templates; empty for anything else.
pub(crate) fn scalar(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}
