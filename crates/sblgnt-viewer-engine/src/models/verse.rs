use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single verse as delivered by a book document.
///
/// `text` is addressed by Unicode scalar value (codepoint) everywhere in the
/// engine, never by byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub reference: String,
    #[serde(default)]
    pub text: String,
}

impl Verse {
    pub fn new(reference: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            text: text.into(),
        }
    }

    /// Length of the verse text in codepoints
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Collect the verses from a `verses` array, skipping entries without a
/// string reference.
pub fn verses_from_value(value: Option<&Value>) -> Vec<Verse> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let reference = item.get("reference")?.as_str()?;
            let text = item.get("text").and_then(Value::as_str).unwrap_or_default();
            Some(Verse::new(reference, text))
        })
        .collect()
}
