//! Conversions between native document values and JSON.
//!
//! Documents are represented natively as [`rbs::Value`]s, produced by serializing them with serde.
//! Fields receive these native values when dumping, and produce them when loading.

use rbs::Value;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;

/// The attributes of a native document, keyed by name.
pub type Entries = BTreeMap<String, Value>;

/// Serialize a document (or any value) into its native representation.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_native<T: Serialize + ?Sized>(value: &T) -> Result<Value, rbs::Error> {
    rbs::to_value(value)
}

/// Deserialize a typed value from its native representation.
///
/// # Errors
///
/// Returns an error if the native value does not match the type.
pub fn from_native<T: DeserializeOwned>(value: Value) -> Result<T, rbs::Error> {
    rbs::from_value(value)
}

/// Break a native document into its attributes. Returns `None` if the value is not a map.
///
/// # Errors
///
/// Returns an error if the map has keys that are not strings.
pub fn entries(value: &Value) -> Result<Option<Entries>, rbs::Error> {
    if !matches!(value, Value::Map(_)) {
        return Ok(None);
    }

    rbs::from_value(value.clone()).map(Some)
}

/// Build a native document from its attributes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn from_entries(entries: Entries) -> Result<Value, rbs::Error> {
    rbs::to_value(entries)
}

/// Convert a native value into JSON, as-is.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as JSON.
pub fn to_json(value: &Value) -> Result<Json, serde_json::Error> {
    serde_json::to_value(value)
}

/// Convert JSON into a native value, as-is.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn from_json(value: &Json) -> Result<Value, rbs::Error> {
    rbs::to_value(value)
}

/// Render a JSON key the way it appears in error messages.
pub(crate) fn display_key(key: &Json) -> String {
    match key {
        Json::String(key) => key.clone(),
        other => other.to_string(),
    }
}
