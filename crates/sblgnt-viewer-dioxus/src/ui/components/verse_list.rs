use dioxus::prelude::*;
use sblgnt_viewer_engine::VerseContainer;

use super::VerseArticle;

/// The verse container. Its `data-state` attribute mirrors the load state.
#[component]
pub fn VerseList(container: VerseContainer, on_activate_clause: Callback<String>) -> Element {
    let state = container.state.as_str();

    rsx! {
        section {
            id: "verses",
            class: "verse-container",
            "data-state": "{state}",
            for verse in container.verses.iter() {
                VerseArticle {
                    key: "{verse.reference}",
                    verse: verse.clone(),
                    on_activate_clause
                }
            }
        }
    }
}
