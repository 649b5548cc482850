use dioxus::prelude::*;
use sblgnt_viewer_engine::{FormField, ReferenceForm};

/// Jump form with previous/next buttons.
///
/// Input text lives in the parent so it can be re-synced after the viewer
/// fills in the landed-on reference.
#[component]
pub fn ReferenceFormView(
    form: ReferenceForm,
    chapter_text: String,
    verse_text: String,
    on_chapter_input: Callback<String>,
    on_verse_input: Callback<String>,
    on_submit: Callback<()>,
    on_previous: Callback<()>,
    on_next: Callback<()>,
) -> Element {
    let disabled = form.disabled;

    rsx! {
        form {
            id: "reference-form",
            class: "reference-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },
            button {
                r#type: "button",
                class: "reference-step",
                disabled,
                onclick: move |_| on_previous.call(()),
                "‹ Previous"
            }
            label {
                "Chapter "
                input {
                    id: "chapter-input",
                    r#type: "text",
                    inputmode: "numeric",
                    disabled,
                    autofocus: form.focused == Some(FormField::Chapter),
                    value: "{chapter_text}",
                    oninput: move |evt: FormEvent| on_chapter_input.call(evt.value()),
                }
            }
            label {
                "Verse "
                input {
                    id: "verse-input",
                    r#type: "text",
                    inputmode: "numeric",
                    disabled,
                    autofocus: form.focused == Some(FormField::Verse),
                    value: "{verse_text}",
                    oninput: move |evt: FormEvent| on_verse_input.call(evt.value()),
                }
            }
            button { r#type: "submit", disabled, "Go" }
            button {
                r#type: "button",
                class: "reference-step",
                disabled,
                onclick: move |_| on_next.call(()),
                "Next ›"
            }
            p { class: "reference-hint", "{form.hint}" }
        }
    }
}
