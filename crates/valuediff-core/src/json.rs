//! JSON fixture decoder.
//!
//! Turns JSON text into generic [`Value`]s the way a dynamically typed
//! decoder would: every number is a `Float`, arrays become fresh `List`s,
//! objects become fresh `Map`s keyed by string, `null` becomes
//! `Scalar::Null`.

use crate::errors::{ExError, ExErrorKind};
use crate::value::{Key, Scalar, Value};

/// Decode JSON text.
///
/// # Errors
///
/// - `InvalidJson`: the text is not a single valid JSON document
pub fn parse(text: &str) -> Result<Value, ExError> {
    let raw: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        ExError::new(ExErrorKind::InvalidJson)
            .with_op("json::parse")
            .with_message(format!("input is not valid JSON: {}", e))
    })?;
    Ok(from_json(&raw))
}

/// Decode JSON bytes.
///
/// # Errors
///
/// - `InvalidJson`: the bytes are not valid UTF-8 or not valid JSON
pub fn parse_slice(bytes: &[u8]) -> Result<Value, ExError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ExError::new(ExErrorKind::InvalidJson)
            .with_op("json::parse_slice")
            .with_message(format!("input is not valid UTF-8: {}", e))
    })?;
    parse(text)
}

/// Convert an already-parsed JSON document.
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Scalar(Scalar::Null),
        serde_json::Value::Bool(b) => Value::from(*b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(x) => Value::from(x),
            None => Value::from(n.to_string()),
        },
        serde_json::Value::String(s) => Value::from(s.as_str()),
        serde_json::Value::Array(items) => Value::list(items.iter().map(from_json)),
        serde_json::Value::Object(fields) => Value::map(
            fields
                .iter()
                .map(|(k, v)| (Key::from(k.as_str()), from_json(v))),
        ),
    }
}
