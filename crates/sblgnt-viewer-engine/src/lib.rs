pub mod clauses;
pub mod data;
pub mod io;
pub mod models;
pub mod navigation;
pub mod render;
pub mod viewer;

// Re-export key types for easier usage
pub use clauses::{ClauseDetail, ClauseDetails, ClauseIndex, ClauseLookup, ClauseRange};
pub use io::*;
pub use models::{BookDocument, BookEntry, Manifest, ManifestError, Verse};
pub use navigation::{NavigationIndex, parse_reference};
pub use render::{TextRun, VerseView};
pub use viewer::*;
