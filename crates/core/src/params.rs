//! Helpers for reading simulation controls out of a `serde_json::Value` object.
//!
//! A missing key or a value of the wrong type yields the supplied default, so
//! a partial params object only touches the controls it names.

use serde_json::Value;

use crate::field::FieldType;

/// Extracts a finite `f64` from `params[name]`, returning `default` if the key
/// is missing, not a number, or not finite.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a [`FieldType`] name from `params[name]`, returning `default` if
/// the key is missing, not a string, or not a known field.
pub fn param_field_type(params: &Value, name: &str, default: FieldType) -> FieldType {
    params
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
