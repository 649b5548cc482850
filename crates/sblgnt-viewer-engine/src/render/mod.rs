//! Text renderer: verses plus clause ranges in, verse views out.
//!
//! The renderer produces a render model rather than touching any UI. The
//! Dioxus and terminal front ends draw [`VerseView`]s; the viewer keeps the
//! active reference and active clause flags consistent across re-renders.

pub mod runs;

pub use runs::{TextRun, split_runs};

use serde::Serialize;

use crate::clauses::ClauseLookup;
use crate::models::Verse;

/// One rendered verse: a reference label and its text runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseView {
    pub reference: String,
    pub runs: Vec<TextRun>,
    pub active: bool,
}

impl VerseView {
    pub fn has_highlights(&self) -> bool {
        self.runs.iter().any(|run| run.clause_id().is_some())
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(TextRun::text).collect()
    }
}

/// Render every verse. `clauses` is `None` when the overlay is off.
pub fn render_verses(
    verses: &[Verse],
    clauses: Option<&ClauseLookup>,
    active_clause: Option<&str>,
) -> Vec<VerseView> {
    verses
        .iter()
        .map(|verse| {
            let ranges = clauses
                .map(|lookup| lookup.ranges_for(&verse.reference))
                .unwrap_or_default();
            VerseView {
                reference: verse.reference.clone(),
                runs: split_runs(&verse.text, ranges, active_clause),
                active: false,
            }
        })
        .collect()
}

/// Mark `reference` active and clear every other verse
pub fn mark_active_reference(views: &mut [VerseView], reference: Option<&str>) -> bool {
    let mut found = false;
    for view in views.iter_mut() {
        view.active = reference == Some(view.reference.as_str());
        found |= view.active;
    }
    found
}

/// Flag runs belonging to `clause_id` as active and clear the rest
pub fn mark_active_clause(views: &mut [VerseView], clause_id: Option<&str>) {
    for run in views.iter_mut().flat_map(|view| view.runs.iter_mut()) {
        if let TextRun::Clause {
            clause_id: id,
            active,
            ..
        } = run
        {
            *active = clause_id == Some(id.as_str());
        }
    }
}
