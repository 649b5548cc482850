use dioxus::prelude::*;
use sblgnt_viewer_engine::{ConfigPatch, FileFetcher, Surface, Viewer, ViewerHost};
use std::path::PathBuf;

use super::components::{
    BookHeader, BookSelectorView, ClausePanel, ReferenceFormView, StatusPanelView, VerseList,
    verse_dom_id,
};

const VIEWER_CSS: &str = include_str!("../assets/viewer.css");

#[component]
pub fn App(data_root: PathBuf, patch: ConfigPatch) -> Element {
    let mut viewer = use_signal(|| {
        let host = ViewerHost::new(Surface::complete()).with_fetch(FileFetcher::new(data_root.clone()));
        let mut viewer = Viewer::new(host);
        viewer.configure(&patch);
        viewer.init();
        viewer
    });

    let surface = viewer.read().surface().clone();
    let form = surface.reference_form.clone().unwrap_or_default();
    let mut chapter_text = use_signal(|| form.chapter_input.clone());
    let mut verse_text = use_signal(|| form.verse_input.clone());

    // Copy the landed-on reference back into the form inputs and bring it into view
    let mut sync_form = move || {
        let surface = viewer.read().surface().clone();
        if let Some(form) = surface.reference_form.as_ref() {
            chapter_text.set(form.chapter_input.clone());
            verse_text.set(form.verse_input.clone());
        }
        if let Some(reference) = surface.scrolled_to.as_deref() {
            let id = verse_dom_id(reference);
            document::eval(&format!(
                "document.getElementById('{id}')?.scrollIntoView({{ block: 'center' }});"
            ));
        }
    };

    let title = surface.title.clone().unwrap_or_default().text;
    let header = surface.header.clone().unwrap_or_default().text;
    let source_path = surface.source_path.clone().map(|display| display.text);
    let on_activate_clause = move |clause_id: String| {
        viewer.write().activate_clause(&clause_id);
    };

    rsx! {
        document::Title { "{surface.document_title}" }
        style { {VIEWER_CSS} }
        div {
            class: "viewer",
            BookHeader { title, header, source_path }
            div {
                class: "viewer-toolbar",
                if let Some(selector) = surface.selector.clone() {
                    BookSelectorView {
                        selector,
                        on_change: move |book_id: String| {
                            viewer.write().on_selector_change(&book_id);
                            sync_form();
                        }
                    }
                }
                if let Some(form) = surface.reference_form.clone() {
                    ReferenceFormView {
                        form,
                        chapter_text: chapter_text(),
                        verse_text: verse_text(),
                        on_chapter_input: move |text: String| chapter_text.set(text),
                        on_verse_input: move |text: String| verse_text.set(text),
                        on_submit: move |_| {
                            let (chapter, verse) = (chapter_text(), verse_text());
                            viewer.write().submit_reference_form(&chapter, &verse);
                            sync_form();
                        },
                        on_previous: move |_| {
                            viewer.write().jump_to_previous_reference();
                            sync_form();
                        },
                        on_next: move |_| {
                            viewer.write().jump_to_next_reference();
                            sync_form();
                        },
                    }
                }
            }
            if let Some(status) = surface.status.clone() {
                StatusPanelView { status }
            }
            div {
                class: "viewer-body",
                if let Some(container) = surface.container.clone() {
                    VerseList { container, on_activate_clause }
                }
                if let Some(controls) = surface.clause_controls.clone() {
                    ClausePanel {
                        controls,
                        on_toggle_overlay: move |enabled: bool| {
                            viewer.write().set_clause_overlay(enabled);
                        },
                        on_toggle_collapsed: move |_| {
                            viewer.write().toggle_clause_panel();
                        },
                        on_activate_clause,
                    }
                }
            }
        }
    }
}
