use serde::Serialize;

use crate::clauses::ClauseRange;

/// A piece of verse text, either plain or belonging to one clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRun {
    Plain(String),
    /// Activatable highlight; front ends render it as a button carrying the clause id
    Clause {
        clause_id: String,
        category_tags: Vec<String>,
        description: String,
        text: String,
        active: bool,
    },
}

impl TextRun {
    pub fn text(&self) -> &str {
        match self {
            TextRun::Plain(text) => text,
            TextRun::Clause { text, .. } => text,
        }
    }

    pub fn clause_id(&self) -> Option<&str> {
        match self {
            TextRun::Plain(_) => None,
            TextRun::Clause { clause_id, .. } => Some(clause_id),
        }
    }
}

/// Split `text` into runs at the codepoint offsets of `ranges`.
///
/// `ranges` must already be sorted by start. Bounds are clamped into the
/// text. A range starting before the end of the previous one is trimmed to
/// start where that one ended; a range with nothing left after trimming is
/// dropped.
pub fn split_runs(text: &str, ranges: &[ClauseRange], active_clause: Option<&str>) -> Vec<TextRun> {
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(at, _)| at)
        .chain(std::iter::once(text.len()))
        .collect();
    let length = bounds.len() - 1;
    let slice = |from: usize, to: usize| text[bounds[from]..bounds[to]].to_string();

    let mut runs = Vec::new();
    let mut cursor = 0;

    for range in ranges {
        let start = range.start_offset.min(length).max(cursor);
        let end = range.end_offset.min(length);
        if end <= start {
            continue;
        }
        if start > cursor {
            runs.push(TextRun::Plain(slice(cursor, start)));
        }
        runs.push(TextRun::Clause {
            clause_id: range.clause_id.clone(),
            category_tags: range.category_tags.clone(),
            description: range.description.clone(),
            text: slice(start, end),
            active: active_clause == Some(range.clause_id.as_str()),
        });
        cursor = end;
    }

    if cursor < length || runs.is_empty() {
        runs.push(TextRun::Plain(slice(cursor, length)));
    }

    runs
}
