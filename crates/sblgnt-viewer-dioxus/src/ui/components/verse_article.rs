use dioxus::prelude::*;
use sblgnt_viewer_engine::{TextRun, VerseView};

/// Element id for a verse, usable as a scroll target
pub fn verse_dom_id(reference: &str) -> String {
    let slug: String = reference
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    format!("verse-{slug}")
}

#[component]
pub fn VerseArticle(verse: VerseView, on_activate_clause: Callback<String>) -> Element {
    let class = if verse.active { "verse active" } else { "verse" };
    let id = verse_dom_id(&verse.reference);

    rsx! {
        article {
            class: "{class}",
            id: "{id}",
            "data-reference": "{verse.reference}",
            span { class: "verse-ref", "{verse.reference}" }
            " "
            span {
                class: "verse-text",
                for run in verse.runs.iter() {
                    {render_run(run, on_activate_clause)}
                }
            }
        }
    }
}

fn render_run(run: &TextRun, on_activate_clause: Callback<String>) -> Element {
    match run {
        TextRun::Plain(text) => rsx! { "{text}" },
        TextRun::Clause {
            clause_id,
            category_tags,
            description,
            text,
            active,
        } => {
            let class = if *active {
                "clause-highlight active"
            } else {
                "clause-highlight"
            };
            let tags = category_tags.join(" ");
            let id = clause_id.clone();
            rsx! {
                button {
                    r#type: "button",
                    class: "{class}",
                    title: "{description}",
                    "data-clause-id": "{clause_id}",
                    "data-category-tags": "{tags}",
                    onclick: move |_| on_activate_clause.call(id.clone()),
                    "{text}"
                }
            }
        }
    }
}
