//! Render model of the host page.
//!
//! The viewer never draws anything itself. It keeps this snapshot current and
//! front ends (Dioxus, terminal) present it. Each optional element mirrors a
//! piece of host markup; `None` means the host does not provide it and the
//! matching feature stays inert.

use serde::Serialize;

use crate::clauses::ClauseDetail;
use crate::render::VerseView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Display {
    Block,
    Hidden,
}

/// Status message panel.
///
/// `display` stays `None` until the first status write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusPanel {
    pub text: String,
    pub display: Option<Display>,
    pub is_error: bool,
}

impl StatusPanel {
    pub fn is_visible(&self) -> bool {
        self.display == Some(Display::Block)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ContainerState {
    #[default]
    Idle,
    Loading,
    Ready,
    Empty,
    Error,
}

impl ContainerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerState::Idle => "idle",
            ContainerState::Loading => "loading",
            ContainerState::Ready => "ready",
            ContainerState::Empty => "empty",
            ContainerState::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerseContainer {
    pub verses: Vec<VerseView>,
    pub state: ContainerState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextDisplay {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSelector {
    pub options: Vec<SelectorOption>,
    pub value: String,
    pub disabled: bool,
}

impl Default for BookSelector {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            value: String::new(),
            disabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormField {
    Chapter,
    Verse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceForm {
    pub chapter_input: String,
    pub verse_input: String,
    pub disabled: bool,
    pub hint: String,
    pub focused: Option<FormField>,
}

impl Default for ReferenceForm {
    fn default() -> Self {
        Self {
            chapter_input: String::new(),
            verse_input: String::new(),
            disabled: true,
            hint: String::new(),
            focused: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseControls {
    pub toggle_checked: bool,
    pub toggle_disabled: bool,
    pub status_text: String,
    pub details: Option<ClauseDetail>,
    pub collapsed: bool,
}

impl Default for ClauseControls {
    fn default() -> Self {
        Self {
            toggle_checked: false,
            toggle_disabled: true,
            status_text: String::new(),
            details: None,
            collapsed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ReadyState {
    Loading,
    #[default]
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Surface {
    pub status: Option<StatusPanel>,
    pub container: Option<VerseContainer>,
    pub title: Option<TextDisplay>,
    pub header: Option<TextDisplay>,
    pub selector: Option<BookSelector>,
    pub source_path: Option<TextDisplay>,
    pub reference_form: Option<ReferenceForm>,
    pub clause_controls: Option<ClauseControls>,
    pub document_title: String,
    pub ready_state: ReadyState,
    /// Reference most recently scrolled into view
    pub scrolled_to: Option<String>,
}

impl Surface {
    /// A page providing every element
    pub fn complete() -> Self {
        Self {
            status: Some(StatusPanel::default()),
            selector: Some(BookSelector::default()),
            source_path: Some(TextDisplay::default()),
            reference_form: Some(ReferenceForm::default()),
            clause_controls: Some(ClauseControls::default()),
            ..Self::required_only()
        }
    }

    /// A page providing only the verse container, title and header
    pub fn required_only() -> Self {
        Self {
            container: Some(VerseContainer::default()),
            title: Some(TextDisplay::default()),
            header: Some(TextDisplay::default()),
            ..Self::default()
        }
    }

    pub fn with_ready_state(mut self, ready_state: ReadyState) -> Self {
        self.ready_state = ready_state;
        self
    }

    pub fn has_required(&self) -> bool {
        self.container.is_some() && self.title.is_some() && self.header.is_some()
    }

    pub fn verses(&self) -> &[VerseView] {
        self.container
            .as_ref()
            .map(|container| container.verses.as_slice())
            .unwrap_or_default()
    }

    pub fn container_state(&self) -> Option<ContainerState> {
        self.container.as_ref().map(|container| container.state)
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    pub fn active_verse(&self) -> Option<&VerseView> {
        self.verses().iter().find(|verse| verse.active)
    }
}
