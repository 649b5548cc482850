//! Spot-check helpers for the SBLGNT corpus.
//!
//! A corpus root holds one directory per source format, `text/<Book>.txt`
//! and `xml/<Book>.xml`, the same layout as the upstream SBLGNT data.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::{DataBuildError, parse_plain_text};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorpusSource {
    #[default]
    Xml,
    Text,
}

impl CorpusSource {
    pub fn extension(self) -> &'static str {
        match self {
            CorpusSource::Xml => "xml",
            CorpusSource::Text => "txt",
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            CorpusSource::Xml => "xml",
            CorpusSource::Text => "text",
        }
    }
}

impl fmt::Display for CorpusSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A verse as the inspector shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectedVerse {
    pub reference: String,
    pub text: String,
    /// Zero-based `<p>` index for XML verses; `None` for plain text
    pub paragraph_index: Option<usize>,
}

impl InspectedVerse {
    pub fn new(reference: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            text: text.into(),
            paragraph_index: None,
        }
    }
}

/// The directory under `root` holding `source` files; it must exist and be non-empty
pub fn resolve_source_dir(root: &Path, source: CorpusSource) -> Result<PathBuf, DataBuildError> {
    let dir = root.join(source.dir_name());
    if !dir.is_dir() {
        return Err(DataBuildError::CorpusMissing {
            kind: source.to_string(),
            path: dir,
        });
    }
    if list_books(&dir, source)?.is_empty() {
        return Err(DataBuildError::CorpusEmpty {
            path: dir,
            extension: source.extension(),
        });
    }
    Ok(dir)
}

/// Book identifiers (file stems) of the `source` files in `dir`, sorted
pub fn list_books(dir: &Path, source: CorpusSource) -> Result<Vec<String>, DataBuildError> {
    let mut books: Vec<String> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == source.extension()))
        .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .collect();
    books.sort();
    Ok(books)
}

/// Read `<dir>/<book>.<ext>` into its header and verses.
///
/// XML books have no header line, so the header is empty.
pub fn read_book(
    dir: &Path,
    book: &str,
    source: CorpusSource,
) -> Result<(String, Vec<InspectedVerse>), DataBuildError> {
    let path = dir.join(format!("{book}.{}", source.extension()));
    if !path.is_file() {
        return Err(DataBuildError::UnknownBook {
            book: book.to_string(),
            kind: source.to_string(),
            available: list_books(dir, source)?,
        });
    }
    let content = fs::read_to_string(&path)?;
    match source {
        CorpusSource::Text => {
            let (header, verses) = parse_plain_text(content.lines())?;
            let verses = verses
                .into_iter()
                .map(|verse| InspectedVerse::new(verse.reference, verse.text))
                .collect();
            Ok((header, verses))
        }
        CorpusSource::Xml => Ok((String::new(), parse_xml_verses(&content)?)),
    }
}

/// Collect verses from SBLGNT XML.
///
/// A `<verse-number>` opens a verse that runs until the next one. `<w>` words
/// are space-separated unless a `<prefix>` is pending, in which case the
/// prefix is glued to the word. `<suffix>` text is appended as-is.
pub fn parse_xml_verses(content: &str) -> Result<Vec<InspectedVerse>, DataBuildError> {
    let doc = roxmltree::Document::parse(content)?;

    let mut verses = Vec::new();
    let mut current: Option<(String, Option<usize>)> = None;
    let mut parts: Vec<String> = Vec::new();
    let mut prefix = String::new();
    let mut paragraph: Option<usize> = None;

    for node in doc.descendants().filter(|node| node.is_element()) {
        let text = node.text().unwrap_or_default();
        match node.tag_name().name() {
            "p" => paragraph = Some(paragraph.map_or(0, |index| index + 1)),
            "verse-number" => {
                if let Some((reference, paragraph_index)) = current.take() {
                    verses.push(finish_verse(reference, paragraph_index, &mut parts));
                }
                let reference = node.attribute("id").unwrap_or(text).to_string();
                current = Some((reference, paragraph));
                prefix.clear();
            }
            "prefix" => prefix.push_str(text),
            "w" if !text.is_empty() => {
                let token = if !prefix.is_empty() {
                    format!("{}{text}", std::mem::take(&mut prefix))
                } else if parts.last().is_some_and(|last| !last.ends_with(' ')) {
                    format!(" {text}")
                } else {
                    text.to_string()
                };
                parts.push(token);
            }
            "suffix" if !text.is_empty() => parts.push(text.to_string()),
            _ => {}
        }
    }

    if let Some((reference, paragraph_index)) = current {
        verses.push(finish_verse(reference, paragraph_index, &mut parts));
    }
    log::debug!("Parsed {} verses from XML", verses.len());
    Ok(verses)
}

fn finish_verse(reference: String, paragraph_index: Option<usize>, parts: &mut Vec<String>) -> InspectedVerse {
    let text = parts.concat().trim().to_string();
    parts.clear();
    InspectedVerse {
        reference,
        text,
        paragraph_index,
    }
}

/// Narrow a verse list for display.
///
/// `start` drops everything before the first reference beginning with it
/// (case-insensitive). `contains` keeps verses whose text includes it exactly.
pub fn filter_verses(
    verses: Vec<InspectedVerse>,
    start: Option<&str>,
    contains: Option<&str>,
) -> Result<Vec<InspectedVerse>, DataBuildError> {
    let mut verses = verses;
    if let Some(start) = start {
        let start_lower = start.to_lowercase();
        let index = verses
            .iter()
            .position(|verse| verse.reference.to_lowercase().starts_with(&start_lower))
            .ok_or_else(|| DataBuildError::StartNotFound(start.to_string()))?;
        verses.drain(..index);
    }
    if let Some(needle) = contains {
        verses.retain(|verse| verse.text.contains(needle));
    }
    Ok(verses)
}
