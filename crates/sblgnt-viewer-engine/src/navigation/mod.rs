//! Chapter/verse navigation over a loaded verse list.
//!
//! - **`index`**: builds the lookups (by chapter, by reference, by position)
//! - **`controller`**: resolves jump and next/previous requests to targets
//!
//! Both are pure; the viewer applies resolved targets to its surface.

pub mod controller;
pub mod index;

pub use controller::*;
pub use index::*;
