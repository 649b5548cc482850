use crate::clauses::ClauseIndex;
use crate::models::{Manifest, Verse};
use crate::navigation::NavigationIndex;

use super::surface::ContainerState;

/// Mutable state of one viewer instance. Lives as long as the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    pub manifest: Option<Manifest>,
    pub selected_book_id: Option<String>,
    pub active_book_id: Option<String>,
    pub active_book_display_name: Option<String>,
    pub navigation: NavigationIndex,
    pub current_verses: Vec<Verse>,
    pub active_reference: Option<String>,
    pub clauses: ClauseIndex,
    pub clauses_available: bool,
    pub clause_overlay_enabled: bool,
    pub active_clause_id: Option<String>,
    pub container_state: ContainerState,
    pub reference_controls_enabled: bool,
    pub clause_panel_collapsed: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            manifest: None,
            selected_book_id: None,
            active_book_id: None,
            active_book_display_name: None,
            navigation: NavigationIndex::default(),
            current_verses: Vec::new(),
            active_reference: None,
            clauses: ClauseIndex::default(),
            clauses_available: false,
            clause_overlay_enabled: true,
            active_clause_id: None,
            container_state: ContainerState::Idle,
            reference_controls_enabled: false,
            clause_panel_collapsed: false,
        }
    }
}

impl ViewerState {
    /// Drop everything derived from the previous book's clause document
    pub fn reset_clauses(&mut self) {
        self.clauses = ClauseIndex::default();
        self.clauses_available = false;
        self.active_clause_id = None;
    }

    /// True when rendering should split verses into clause runs
    pub fn overlay_active(&self) -> bool {
        self.clauses_available && self.clause_overlay_enabled
    }
}
