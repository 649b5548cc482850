//! Book payload and manifest generation from SBLGNT plain-text files.
//!
//! Input files have a header on the first line, then one verse per line as
//! `<Book> <chapter>:<verse> <text>`. Lines that do not start a verse
//! continue the previous verse.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::models::Verse;

pub mod inspect;

static VERSE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([1-3]?\s?[A-Za-z]+)\s+(\d+):(\d+)\s+(\S.*)$")
        .expect("verse line pattern is a valid regex")
});

#[derive(Debug, thiserror::Error)]
pub enum DataBuildError {
    #[error("Input file is empty")]
    EmptyInput,
    #[error("Unexpected line before any verse content: {0}")]
    UnexpectedLine(String),
    #[error("No verses were parsed from the file")]
    NoVerses,
    #[error("Manifest file '{path}' {reason}")]
    InvalidManifest { path: PathBuf, reason: String },
    #[error("Unknown book '{book}' for source '{kind}'. Available options: {}", available.join(", "))]
    UnknownBook {
        book: String,
        kind: String,
        available: Vec<String>,
    },
    #[error("SBLGNT {kind} corpus not found at {}", path.display())]
    CorpusMissing { kind: String, path: PathBuf },
    #[error("{} does not contain any .{extension} files", path.display())]
    CorpusEmpty {
        path: PathBuf,
        extension: &'static str,
    },
    #[error("Start reference '{0}' not found in selection")]
    StartNotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// The document served at a book's data URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPayload {
    pub book_id: String,
    pub display_name: String,
    pub header: String,
    pub source_path: String,
    pub verses: Vec<Verse>,
}

/// Split plain text into its header line and verses
pub fn parse_plain_text<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<(String, Vec<Verse>), DataBuildError> {
    let mut lines = lines.into_iter();
    let header = lines.next().ok_or(DataBuildError::EmptyInput)?.trim().to_string();

    let mut verses: Vec<Verse> = Vec::new();
    for raw in lines {
        let line = raw.trim_end();
        if line.trim().is_empty() {
            continue;
        }

        if let Some(captures) = VERSE_LINE.captures(line) {
            let reference = format!("{} {}:{}", &captures[1], &captures[2], &captures[3]);
            verses.push(Verse::new(reference, captures[4].trim()));
        } else {
            let current = verses
                .last_mut()
                .ok_or_else(|| DataBuildError::UnexpectedLine(line.to_string()))?;
            current.text = format!("{} {}", current.text, line.trim());
        }
    }

    if verses.is_empty() {
        return Err(DataBuildError::NoVerses);
    }
    Ok((header, verses))
}

/// Read and parse `input`, naming the book after the file unless overridden.
///
/// The book id defaults to the lower-cased file stem and the display name
/// to the stem as written.
pub fn build_book_payload(
    input: &Path,
    book_id: Option<&str>,
    display_name: Option<&str>,
) -> Result<BookPayload, DataBuildError> {
    let content = fs::read_to_string(input)?;
    let (header, verses) = parse_plain_text(content.lines())?;

    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(BookPayload {
        book_id: book_id
            .map(str::to_string)
            .unwrap_or_else(|| stem.to_lowercase()),
        display_name: display_name.map(str::to_string).unwrap_or(stem),
        header,
        source_path: input.display().to_string(),
        verses,
    })
}

pub fn write_json(path: &Path, value: &impl Serialize) -> Result<(), DataBuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ManifestRecord {
    book_id: String,
    display_name: String,
    data_path: String,
    data_url: String,
    header: String,
    source_path: String,
}

/// Insert or refresh the manifest entry for `payload`, stamped with the current time
pub fn update_manifest(
    manifest_path: &Path,
    payload_path: &Path,
    payload: &BookPayload,
) -> Result<(), DataBuildError> {
    update_manifest_at(manifest_path, payload_path, payload, Utc::now())
}

pub fn update_manifest_at(
    manifest_path: &Path,
    payload_path: &Path,
    payload: &BookPayload,
    generated_at: DateTime<Utc>,
) -> Result<(), DataBuildError> {
    let invalid = |reason: &str| DataBuildError::InvalidManifest {
        path: manifest_path.to_path_buf(),
        reason: reason.to_string(),
    };

    let mut manifest: Map<String, Value> = if manifest_path.exists() {
        let text = fs::read_to_string(manifest_path)?;
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(invalid("must contain a JSON object")),
            Err(_) => return Err(invalid("contains invalid JSON")),
        }
    } else {
        Map::new()
    };

    let manifest_dir = manifest_path.parent().unwrap_or(Path::new(""));
    let data_path = payload_path
        .strip_prefix(manifest_dir)
        .ok()
        .and_then(|relative| RelativePathBuf::from_path(relative).ok())
        .map(|relative| relative.to_string())
        .unwrap_or_else(|| {
            payload_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
    let data_url = match manifest_dir.file_name() {
        Some(dir) => format!("{}/{data_path}", dir.to_string_lossy()),
        None => data_path.clone(),
    };

    let record = serde_json::to_value(ManifestRecord {
        book_id: payload.book_id.clone(),
        display_name: payload.display_name.clone(),
        data_path,
        data_url,
        header: payload.header.clone(),
        source_path: payload.source_path.clone(),
    })?;

    let clashes = |entry: &Value| {
        ["book_id", "data_path", "data_url"]
            .iter()
            .any(|key| entry.get(*key).is_some() && entry.get(*key) == record.get(*key))
    };
    let mut books: Vec<Value> = manifest
        .get("books")
        .and_then(Value::as_array)
        .map(|books| {
            books
                .iter()
                .filter(|entry| entry.is_object() && !clashes(entry))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    books.push(record);
    books.sort_by_key(|entry| (folded(entry, "display_name"), folded(entry, "book_id")));

    log::info!(
        "Manifest {} now lists {} books",
        manifest_path.display(),
        books.len()
    );
    manifest.insert("books".to_string(), Value::Array(books));
    manifest.entry("version").or_insert(Value::from(1));
    manifest.insert(
        "generated_at".to_string(),
        Value::String(generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );

    write_json(manifest_path, &Value::Object(manifest))
}

fn folded(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .unwrap_or_default()
}
