use serde_json::Value;

use super::string_field;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("Manifest does not contain a books array")]
    MissingBooks,
    #[error("Manifest does not contain any usable book entries")]
    NoUsableEntries,
}

/// A selectable book listed in the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub book_id: String,
    pub data_url: String,
    pub display_name: String,
    pub header: Option<String>,
    pub source_path: Option<String>,
    pub clause_data_url: Option<String>,
}

impl BookEntry {
    /// Normalize one manifest entry.
    ///
    /// Returns `None` when the entry has no non-blank id or data URL. The
    /// display name falls back to the book id.
    pub fn from_value(value: &Value) -> Option<Self> {
        let book_id = string_field(value, &["book_id", "bookId"])?;
        let data_url = string_field(value, &["data_url", "dataUrl"])?;
        let display_name =
            string_field(value, &["display_name", "displayName"]).unwrap_or_else(|| book_id.clone());

        Some(Self {
            book_id,
            data_url,
            display_name,
            header: value
                .get("header")
                .and_then(Value::as_str)
                .map(str::to_string),
            source_path: string_field(value, &["source_path", "sourcePath"]),
            clause_data_url: string_field(value, &["clause_data_url", "clauseDataUrl"]),
        })
    }
}

/// Normalized manifest, books kept in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub books: Vec<BookEntry>,
}

impl Manifest {
    pub fn from_value(value: &Value) -> Result<Self, ManifestError> {
        let entries = value
            .get("books")
            .and_then(Value::as_array)
            .ok_or(ManifestError::MissingBooks)?;

        let books: Vec<BookEntry> = entries.iter().filter_map(BookEntry::from_value).collect();
        if books.is_empty() {
            return Err(ManifestError::NoUsableEntries);
        }

        Ok(Self { books })
    }

    pub fn get(&self, book_id: &str) -> Option<&BookEntry> {
        self.books.iter().find(|book| book.book_id == book_id)
    }

    /// The entry whose data URL matches `data_url`, or the first entry
    pub fn preferred(&self, data_url: &str) -> Option<&BookEntry> {
        self.books
            .iter()
            .find(|book| book.data_url == data_url)
            .or_else(|| self.books.first())
    }
}
