//! Outgoing record sanitization.

use serde::Serialize;
use serde_json::Value;

/// Serialize `record` for transmission, dropping empty-string attributes.
///
/// Only top-level attributes are inspected; structured references pass
/// through unchanged.
pub fn sanitize_record<T: Serialize>(record: &T) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(record)?;
    strip_empty_strings(&mut value);
    Ok(value)
}

/// Remove every top-level attribute whose value is `""`.
pub fn strip_empty_strings(value: &mut Value) {
    if let Value::Object(map) = value {
        map.retain(|_, field| !matches!(field, Value::String(s) if s.is_empty()));
    }
}
