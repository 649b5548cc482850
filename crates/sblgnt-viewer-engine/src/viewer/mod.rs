//! Viewer orchestrator.
//!
//! [`Viewer`] owns configuration, the manifest, the current book, navigation
//! and clause state, and the [`Surface`] render model. Load sequencing is
//! manifest, then book, then clause payload. Every public operation fails
//! soft: the result is `None`/`false` and the status panel says why.

pub mod bootstrap;
pub mod config;
pub mod state;
pub mod surface;

pub use bootstrap::*;
pub use config::*;
pub use state::*;
pub use surface::*;

use serde_json::Value;

use crate::clauses::ClauseIndex;
use crate::io::{CacheMode, Console, Fetch, FetchError, FetchOptions, LogConsole, NoopConsole};
use crate::models::{BookDocument, BookEntry, Manifest, ManifestError, Verse};
use crate::navigation::{
    Direction, JumpTarget, NavigationError, NavigationIndex, resolve_jump, resolve_step,
};
use crate::render::{self, VerseView, mark_active_clause, mark_active_reference};

pub const TITLE_SUFFIX: &str = "SBLGNT Viewer";
pub const FALLBACK_DISPLAY_NAME: &str = "Gospel of Mark";

pub const HINT_DISABLED: &str = "Load a book to enable reference navigation.";
pub const HINT_ENABLED: &str = "Jump to a chapter and optional verse.";
pub const CHAPTER_REQUIRED: &str = "Enter a chapter number to jump.";
pub const INVALID_VERSE: &str = "Enter a valid verse number.";

pub const CLAUSES_AVAILABLE: &str = "Clause overlay available.";
pub const CLAUSES_UNAVAILABLE: &str = "Clause overlay unavailable for this book.";

#[derive(Debug, thiserror::Error)]
pub enum BookLoadError {
    #[error("Required viewer elements are missing")]
    MissingElements,
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestLoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Invalid(#[from] ManifestError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadBookOptions {
    pub data_url: Option<String>,
    pub clause_data_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOptions {
    pub skip_load: bool,
}

/// Capabilities the host hands to a viewer
pub struct ViewerHost {
    pub surface: Surface,
    pub fetch: Option<Box<dyn Fetch>>,
    pub console: Option<Box<dyn Console>>,
}

impl ViewerHost {
    /// Host with the given surface, no fetch capability and a logging console
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            fetch: None,
            console: Some(Box::new(LogConsole)),
        }
    }

    pub fn with_fetch(mut self, fetch: impl Fetch + 'static) -> Self {
        self.fetch = Some(Box::new(fetch));
        self
    }

    pub fn with_console(mut self, console: impl Console + 'static) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    pub fn without_console(mut self) -> Self {
        self.console = None;
        self
    }
}

pub struct Viewer {
    surface: Surface,
    fetch: Option<Box<dyn Fetch>>,
    console: Box<dyn Console>,
    config: ViewerConfig,
    state: ViewerState,
    pending_start: bool,
}

impl Viewer {
    pub fn new(host: ViewerHost) -> Self {
        let mut viewer = Self {
            surface: host.surface,
            fetch: host.fetch,
            console: host.console.unwrap_or_else(|| Box::new(NoopConsole)),
            config: ViewerConfig::default(),
            state: ViewerState::default(),
            pending_start: false,
        };
        viewer.set_reference_controls(false);
        viewer
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn active_reference(&self) -> Option<&str> {
        self.state.active_reference.as_deref()
    }

    pub fn navigation(&self) -> &NavigationIndex {
        &self.state.navigation
    }

    pub fn books(&self) -> &[BookEntry] {
        self.state
            .manifest
            .as_ref()
            .map(|manifest| manifest.books.as_slice())
            .unwrap_or_default()
    }

    /// Merge `patch` into the configuration and return the result
    pub fn configure(&mut self, patch: &ConfigPatch) -> ViewerConfig {
        self.config.apply(patch);
        self.config.clone()
    }

    /// [`Self::configure`] for loosely-typed input
    pub fn configure_value(&mut self, patch: &Value) -> ViewerConfig {
        self.configure(&ConfigPatch::from_value(patch))
    }

    /// Start the viewer, now or once the document is ready.
    ///
    /// Returns false when the page lacks the verse container, title or header.
    pub fn init(&mut self) -> bool {
        if !self.surface.has_required() {
            log::warn!("Viewer elements are missing; not starting");
            return false;
        }

        match self.surface.ready_state {
            ReadyState::Loading => {
                log::debug!("Document still loading; deferring start");
                self.pending_start = true;
            }
            ReadyState::Complete => self.start(),
        }
        true
    }

    /// Host signal that the document finished loading. Runs a deferred start once.
    pub fn document_ready(&mut self) {
        self.surface.ready_state = ReadyState::Complete;
        if std::mem::take(&mut self.pending_start) {
            self.start();
        }
    }

    fn start(&mut self) {
        if self.surface.selector.is_some() {
            match self.try_load_manifest() {
                Ok(_) => return,
                Err(error) => self.manifest_failed(&error),
            }
        }
        self.load_book(LoadBookOptions::default());
    }

    /// Load the manifest, fill the selector and select the preferred book.
    ///
    /// Without a selector this does nothing. On failure the selector stays
    /// disabled.
    pub fn load_manifest(&mut self) -> Option<BookDocument> {
        if self.surface.selector.is_none() {
            return None;
        }
        match self.try_load_manifest() {
            Ok(book) => book,
            Err(error) => {
                self.manifest_failed(&error);
                None
            }
        }
    }

    fn try_load_manifest(&mut self) -> Result<Option<BookDocument>, ManifestLoadError> {
        let url = self.config.manifest_url.clone();
        log::info!("Loading manifest from {url}");

        let payload = self.fetch_json(&url)?;
        let manifest = Manifest::from_value(&payload)?;
        log::info!("Manifest lists {} books", manifest.books.len());

        let preferred = manifest
            .preferred(&self.config.data_url)
            .map(|book| book.book_id.clone());
        if let Some(selector) = self.surface.selector.as_mut() {
            selector.options = manifest
                .books
                .iter()
                .map(|book| SelectorOption {
                    value: book.book_id.clone(),
                    label: book.display_name.clone(),
                })
                .collect();
            selector.disabled = false;
        }
        self.state.manifest = Some(manifest);

        Ok(preferred.and_then(|book_id| self.select_book(&book_id, SelectOptions::default())))
    }

    fn manifest_failed(&mut self, error: &ManifestLoadError) {
        self.report(&format!("Unable to load manifest: {error}"));
        if let Some(selector) = self.surface.selector.as_mut() {
            selector.disabled = true;
        }
    }

    /// Make `book_id` the selected book and load it.
    ///
    /// Title, header and source path update before the fetch. Unknown ids
    /// return `None` without fetching; so does `skip_load`.
    pub fn select_book(&mut self, book_id: &str, options: SelectOptions) -> Option<BookDocument> {
        let Some(entry) = self
            .state
            .manifest
            .as_ref()
            .and_then(|manifest| manifest.get(book_id))
            .cloned()
        else {
            log::debug!("Ignoring selection of unknown book {book_id:?}");
            return None;
        };

        self.state.selected_book_id = Some(entry.book_id.clone());
        if let Some(selector) = self.surface.selector.as_mut() {
            selector.value = entry.book_id.clone();
        }
        self.show_book_metadata(
            &entry.display_name,
            entry.header.as_deref().unwrap_or_default(),
            entry.source_path.as_deref(),
        );

        if options.skip_load {
            return None;
        }
        self.load_book(LoadBookOptions {
            data_url: Some(entry.data_url),
            clause_data_url: entry.clause_data_url,
        })
    }

    /// Host signal that the user picked `value` in the book selector
    pub fn on_selector_change(&mut self, value: &str) -> Option<BookDocument> {
        if let Some(selector) = self.surface.selector.as_mut() {
            selector.value = value.to_string();
        }
        self.select_book(value, SelectOptions::default())
    }

    /// Fetch and render a book, plus its clause document when one is configured.
    pub fn load_book(&mut self, options: LoadBookOptions) -> Option<BookDocument> {
        match self.try_load_book(options) {
            Ok(book) => Some(book),
            Err(BookLoadError::MissingElements) => {
                log::warn!("Viewer elements are missing; not loading");
                None
            }
            Err(error) => {
                self.report(&format!("Unable to load book: {error}"));
                let message = self.config.status_messages.error.clone();
                self.set_status(&message, true);
                self.set_container(Vec::new(), ContainerState::Error);
                None
            }
        }
    }

    fn try_load_book(&mut self, options: LoadBookOptions) -> Result<BookDocument, BookLoadError> {
        if !self.surface.has_required() {
            return Err(BookLoadError::MissingElements);
        }

        let data_url = options
            .data_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.config.data_url.clone());
        let entry = self
            .selected_entry()
            .filter(|entry| entry.data_url == data_url)
            .cloned();
        let clause_url = options
            .clause_data_url
            .or_else(|| entry.as_ref().and_then(|entry| entry.clause_data_url.clone()));

        log::info!("Loading book from {data_url}");
        let loading = self.config.status_messages.loading.clone();
        self.set_status(&loading, false);
        self.set_container(Vec::new(), ContainerState::Loading);
        self.set_reference_controls(false);
        self.state.reset_clauses();
        self.sync_clause_controls("");
        self.state.active_reference = None;

        let payload = self.fetch_json(&data_url)?;
        let book = BookDocument::from_value(&payload);

        // Index clauses before the first render so highlights show immediately
        self.load_clauses(clause_url.as_deref());

        let display_name = book
            .display_name
            .clone()
            .or_else(|| entry.as_ref().map(|entry| entry.display_name.clone()))
            .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string());
        let header = book
            .header
            .clone()
            .or_else(|| entry.as_ref().and_then(|entry| entry.header.clone()))
            .unwrap_or_default();
        let source_path = book
            .source_path
            .clone()
            .or_else(|| entry.as_ref().and_then(|entry| entry.source_path.clone()));
        self.show_book_metadata(&display_name, &header, source_path.as_deref());

        self.set_status("", false);
        self.render(book.verses.clone(), false);

        self.state.active_book_id = book
            .book_id
            .clone()
            .or_else(|| entry.map(|entry| entry.book_id));
        self.state.active_book_display_name = Some(display_name);
        log::info!(
            "Rendered {} verses from {data_url}",
            self.state.current_verses.len()
        );

        Ok(book)
    }

    fn load_clauses(&mut self, url: Option<&str>) {
        let status = match url {
            None => "",
            Some(url) => {
                match self.fetch_json(url) {
                    Ok(payload) => {
                        self.state.clauses = ClauseIndex::from_value(&payload);
                        self.state.clauses_available = self.state.clauses.has_highlights();
                    }
                    Err(error) => log::warn!("Clause data unavailable from {url}: {error}"),
                }
                if self.state.clauses_available {
                    CLAUSES_AVAILABLE
                } else {
                    CLAUSES_UNAVAILABLE
                }
            }
        };
        self.sync_clause_controls(status);
    }

    /// Mirror clause state into the overlay controls and drop any shown details
    fn sync_clause_controls(&mut self, status: &str) {
        let collapsed = self.state.clause_panel_collapsed;
        let available = self.state.clauses_available;
        let checked = self.state.overlay_active();
        if let Some(controls) = self.surface.clause_controls.as_mut() {
            controls.status_text = status.to_string();
            controls.toggle_disabled = !available;
            controls.toggle_checked = checked;
            controls.details = None;
            controls.collapsed = collapsed;
        }
    }

    /// Replace the rendered verses. An empty list shows the empty state.
    pub fn render_verses(&mut self, verses: Vec<Verse>) {
        self.render(verses, false);
    }

    fn render(&mut self, verses: Vec<Verse>, preserve_active_reference: bool) {
        if self.surface.container.is_none() {
            log::debug!("No verse container; skipping render");
            return;
        }

        if verses.is_empty() {
            self.state.current_verses.clear();
            self.state.navigation = NavigationIndex::default();
            self.state.active_reference = None;
            self.surface.scrolled_to = None;
            self.set_container(Vec::new(), ContainerState::Empty);
            let message = self.config.status_messages.empty.clone();
            self.set_status(&message, true);
            self.set_reference_controls(false);
            return;
        }

        self.state.navigation = NavigationIndex::build(&verses);
        let lookup = self
            .state
            .overlay_active()
            .then_some(&self.state.clauses.lookup);
        let mut views = render::render_verses(&verses, lookup, self.state.active_clause_id.as_deref());
        self.state.current_verses = verses;

        let kept = if preserve_active_reference {
            self.state
                .active_reference
                .clone()
                .filter(|reference| mark_active_reference(&mut views, Some(reference.as_str())))
        } else {
            None
        };
        self.surface.scrolled_to = kept.clone();
        self.state.active_reference = kept;

        self.set_container(views, ContainerState::Ready);
        self.set_reference_controls(true);
    }

    /// Show `message` in the status panel, or hide the panel when it is empty
    pub fn set_status(&mut self, message: &str, is_error: bool) {
        let Some(status) = self.surface.status.as_mut() else {
            return;
        };
        if message.is_empty() {
            status.text.clear();
            status.display = Some(Display::Hidden);
            status.is_error = false;
        } else {
            status.text = message.to_string();
            status.display = Some(Display::Block);
            status.is_error = is_error;
        }
    }

    pub fn jump_to_reference(&mut self, chapter: u32, verse: Option<u32>) -> bool {
        if !self.state.reference_controls_enabled {
            return self.navigation_failed(NavigationError::NothingLoaded);
        }
        match resolve_jump(&self.state.navigation, chapter, verse) {
            Ok(target) => self.apply_target(target),
            Err(error) => self.navigation_failed(error),
        }
    }

    pub fn jump_to_next_reference(&mut self) -> bool {
        self.step(Direction::Next)
    }

    pub fn jump_to_previous_reference(&mut self) -> bool {
        self.step(Direction::Previous)
    }

    fn step(&mut self, direction: Direction) -> bool {
        if !self.state.reference_controls_enabled {
            return self.navigation_failed(NavigationError::NothingLoaded);
        }
        match resolve_step(
            &self.state.navigation,
            self.state.active_reference.as_deref(),
            direction,
        ) {
            Ok(target) => self.apply_target(target),
            Err(error) => self.navigation_failed(error),
        }
    }

    /// Validate the jump form's raw input, then jump.
    ///
    /// The chapter must be a positive integer; the verse may be blank.
    pub fn submit_reference_form(&mut self, chapter_text: &str, verse_text: &str) -> bool {
        let Some(form) = self.surface.reference_form.as_mut() else {
            return false;
        };
        form.chapter_input = chapter_text.to_string();
        form.verse_input = verse_text.to_string();
        if form.disabled {
            return false;
        }

        let Some(chapter) = parse_positive(chapter_text) else {
            return self.reject_input(CHAPTER_REQUIRED, FormField::Chapter);
        };
        let verse = match verse_text.trim() {
            "" => None,
            text => match parse_positive(text) {
                Some(verse) => Some(verse),
                None => return self.reject_input(INVALID_VERSE, FormField::Verse),
            },
        };

        self.jump_to_reference(chapter, verse)
    }

    fn reject_input(&mut self, message: &str, field: FormField) -> bool {
        self.set_status(message, true);
        if let Some(form) = self.surface.reference_form.as_mut() {
            form.focused = Some(field);
        }
        false
    }

    fn apply_target(&mut self, target: JumpTarget) -> bool {
        log::debug!("Navigating to {}", target.reference);
        if let Some(container) = self.surface.container.as_mut() {
            mark_active_reference(&mut container.verses, Some(target.reference.as_str()));
        }
        if let Some(form) = self.surface.reference_form.as_mut() {
            form.chapter_input = target.chapter.to_string();
            form.verse_input = target.verse.to_string();
            form.focused = None;
        }
        self.surface.scrolled_to = Some(target.reference.clone());
        self.state.active_reference = Some(target.reference);
        self.set_status("", false);
        true
    }

    fn navigation_failed(&mut self, error: NavigationError) -> bool {
        log::debug!("Navigation failed: {error}");
        self.set_status(&error.to_string(), true);
        false
    }

    /// Turn clause highlighting on or off, keeping the reading position.
    ///
    /// Ignored when the current book has no clause data.
    pub fn set_clause_overlay(&mut self, enabled: bool) -> bool {
        if !self.state.clauses_available {
            return false;
        }
        self.state.clause_overlay_enabled = enabled;
        if let Some(controls) = self.surface.clause_controls.as_mut() {
            controls.toggle_checked = enabled;
        }

        let verses = self.state.current_verses.clone();
        if !verses.is_empty() {
            self.render(verses, true);
        }
        true
    }

    /// Make `clause_id` the active clause and show its details
    pub fn activate_clause(&mut self, clause_id: &str) -> bool {
        let Some(detail) = self.state.clauses.details.get(clause_id).cloned() else {
            log::debug!("Unknown clause {clause_id:?}");
            return false;
        };

        self.state.active_clause_id = Some(detail.clause_id.clone());
        if let Some(container) = self.surface.container.as_mut() {
            mark_active_clause(&mut container.verses, Some(clause_id));
        }
        if let Some(controls) = self.surface.clause_controls.as_mut() {
            controls.details = Some(detail);
        }
        true
    }

    /// Collapse or expand the clause details panel; returns the new collapsed state
    pub fn toggle_clause_panel(&mut self) -> bool {
        self.state.clause_panel_collapsed = !self.state.clause_panel_collapsed;
        let collapsed = self.state.clause_panel_collapsed;
        if let Some(controls) = self.surface.clause_controls.as_mut() {
            controls.collapsed = collapsed;
        }
        collapsed
    }

    fn selected_entry(&self) -> Option<&BookEntry> {
        let book_id = self.state.selected_book_id.as_deref()?;
        self.state.manifest.as_ref()?.get(book_id)
    }

    fn show_book_metadata(&mut self, display_name: &str, header: &str, source_path: Option<&str>) {
        if let Some(title) = self.surface.title.as_mut() {
            title.text = display_name.to_string();
        }
        if let Some(display) = self.surface.header.as_mut() {
            display.text = header.to_string();
        }
        if let Some(display) = self.surface.source_path.as_mut() {
            display.text = source_path.unwrap_or_default().to_string();
        }
        self.surface.document_title = format!("{display_name} · {TITLE_SUFFIX}");
    }

    fn set_container(&mut self, verses: Vec<VerseView>, state: ContainerState) {
        self.state.container_state = state;
        if let Some(container) = self.surface.container.as_mut() {
            container.verses = verses;
            container.state = state;
        }
    }

    fn set_reference_controls(&mut self, enabled: bool) {
        self.state.reference_controls_enabled = enabled;
        if let Some(form) = self.surface.reference_form.as_mut() {
            form.disabled = !enabled;
            form.hint = if enabled { HINT_ENABLED } else { HINT_DISABLED }.to_string();
        }
    }

    fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let fetch = self.fetch.as_deref().ok_or(FetchError::MissingCapability)?;
        let response = fetch.fetch(
            url,
            FetchOptions {
                cache: CacheMode::NoCache,
            },
        )?;
        if !response.ok {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        response.json()
    }

    fn report(&self, message: &str) {
        log::error!("{message}");
        self.console.error(message);
    }
}

fn parse_positive(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok().filter(|n| *n > 0)
}
