//! Single-line value rendering for failure messages.
//!
//! Output is only ever used for message text, never for comparison.

use serde_json::{Map, Value};

/// Render a value on one line, truncated to `max_len` characters
#[must_use]
pub fn stringify(value: &Value, max_len: usize) -> String {
    truncate(value.to_string(), max_len)
}

/// Quote a name for use in a message
#[must_use]
pub fn quote(name: &str) -> String {
    format!("{name:?}")
}

/// Type name of a value as used by the `is_a` matcher on plain values
#[must_use]
pub const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Short description of a plain value, e.g. `string "abc"`
#[must_use]
pub fn describe(value: &Value, max_len: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        other => format!("{} {}", type_name(other), stringify(other, max_len)),
    }
}

/// One-key object `{name: value}`, or `{}` when the value is absent
#[must_use]
pub fn keyed(name: &str, value: Option<&Value>) -> Value {
    let mut map = Map::new();
    if let Some(v) = value {
        map.insert(name.to_string(), v.clone());
    }
    Value::Object(map)
}

/// Cut `text` to `max_len` characters, marking the cut with `…`
#[must_use]
pub fn truncate(text: String, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text;
    }
    let mut out: String = text.chars().take(max_len.saturating_sub(1)).collect();
    out.push('…');
    out
}
