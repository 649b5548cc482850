pub mod book;
pub mod manifest;
pub mod verse;

pub use book::*;
pub use manifest::*;
pub use verse::*;

use serde_json::Value;

/// Read the first non-blank string stored under any of `keys`.
///
/// Producers write either snake_case or camelCase field names, so callers
/// pass the canonical key first and the alternate spelling after it.
pub(crate) fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
