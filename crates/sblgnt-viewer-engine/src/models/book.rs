use serde_json::Value;

use super::{Verse, string_field, verses_from_value};

/// A book document as fetched from a data URL.
///
/// Every field is optional on the wire; an absent or malformed `verses`
/// array yields an empty verse list, which renders as the empty state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDocument {
    pub book_id: Option<String>,
    pub display_name: Option<String>,
    pub header: Option<String>,
    pub source_path: Option<String>,
    pub verses: Vec<Verse>,
}

impl BookDocument {
    pub fn from_value(value: &Value) -> Self {
        Self {
            book_id: string_field(value, &["book_id", "bookId"]),
            display_name: string_field(value, &["display_name", "displayName"]),
            header: value
                .get("header")
                .and_then(Value::as_str)
                .map(str::to_string),
            source_path: string_field(value, &["source_path", "sourcePath"]),
            verses: verses_from_value(value.get("verses")),
        }
    }
}
