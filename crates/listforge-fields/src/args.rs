//! Typed readers for list-query arguments. Absent and `null` both read
//! as "not given"; anything else of the wrong shape is a bad argument.

use listforge_core::error::RequestError;
use serde_json::{Map, Value as JsonValue};

fn given<'a>(args: &'a Map<String, JsonValue>, name: &str) -> Option<&'a JsonValue> {
    args.get(name).filter(|v| !v.is_null())
}

fn mismatch(name: &str, expected: &str, got: &JsonValue) -> RequestError {
    RequestError::invalid_argument(name, format!("expected {expected}, got {got}"))
}

pub(crate) fn string(
    args: &Map<String, JsonValue>,
    name: &str,
) -> Result<Option<JsonValue>, RequestError> {
    match given(args, name) {
        None => Ok(None),
        Some(v @ JsonValue::String(_)) => Ok(Some(v.clone())),
        Some(v) => Err(mismatch(name, "a string", v)),
    }
}

pub(crate) fn boolean(args: &Map<String, JsonValue>, name: &str) -> Result<Option<bool>, RequestError> {
    match given(args, name) {
        None => Ok(None),
        Some(JsonValue::Bool(b)) => Ok(Some(*b)),
        Some(v) => Err(mismatch(name, "a boolean", v)),
    }
}

pub(crate) fn int(
    args: &Map<String, JsonValue>,
    name: &str,
) -> Result<Option<JsonValue>, RequestError> {
    match given(args, name) {
        None => Ok(None),
        Some(v) if v.is_i64() || v.is_u64() => Ok(Some(v.clone())),
        Some(v) => Err(mismatch(name, "an integer", v)),
    }
}

pub(crate) fn int_list(
    args: &Map<String, JsonValue>,
    name: &str,
) -> Result<Option<JsonValue>, RequestError> {
    match given(args, name) {
        None => Ok(None),
        Some(JsonValue::Array(items)) if items.iter().all(|v| v.is_i64() || v.is_u64()) => {
            Ok(Some(JsonValue::Array(items.clone())))
        }
        Some(v) => Err(mismatch(name, "a list of integers", v)),
    }
}
