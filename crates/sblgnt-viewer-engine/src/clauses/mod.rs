//! Clause annotation indexing.
//!
//! A clause document is parsed once ([`ClausePayload`]) and then indexed two
//! ways: per-reference highlight ranges for the renderer ([`ClauseLookup`])
//! and per-clause inspection records for the details panel ([`ClauseDetails`]).

pub mod details;
pub mod lookup;
pub mod payload;

pub use details::{ChildClause, ClauseDetail, ClauseDetails, source_summary};
pub use lookup::{ClauseLookup, ClauseRange};
pub use payload::{ClausePayload, ClauseRecord, SubClause};

/// Both indexes built from one clause document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseIndex {
    pub lookup: ClauseLookup,
    pub details: ClauseDetails,
}

impl ClauseIndex {
    pub fn from_value(value: &serde_json::Value) -> Self {
        let payload = ClausePayload::from_value(value);
        Self {
            lookup: ClauseLookup::build(&payload),
            details: ClauseDetails::build(&payload),
        }
    }

    /// True when at least one clause can be highlighted
    pub fn has_highlights(&self) -> bool {
        !self.lookup.is_empty()
    }
}
