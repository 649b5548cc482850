use dioxus::prelude::*;
use sblgnt_viewer_engine::{ClauseControls, ClauseDetail};

/// Overlay toggle, availability text and the details of the active clause
#[component]
pub fn ClausePanel(
    controls: ClauseControls,
    on_toggle_overlay: Callback<bool>,
    on_toggle_collapsed: Callback<()>,
    on_activate_clause: Callback<String>,
) -> Element {
    let class = if controls.collapsed {
        "clause-panel collapsed"
    } else {
        "clause-panel"
    };
    let toggle_label = if controls.collapsed { "Show" } else { "Hide" };
    let expanded = !controls.collapsed;

    rsx! {
        aside {
            id: "clause-panel",
            class: "{class}",
            div {
                class: "clause-panel-controls",
                label {
                    input {
                        id: "clause-overlay-toggle",
                        r#type: "checkbox",
                        checked: controls.toggle_checked,
                        disabled: controls.toggle_disabled,
                        onchange: move |evt: FormEvent| on_toggle_overlay.call(evt.checked()),
                    }
                    " Clause overlay"
                }
                span { class: "clause-status", "{controls.status_text}" }
                button {
                    r#type: "button",
                    class: "clause-panel-toggle",
                    "aria-expanded": "{expanded}",
                    onclick: move |_| on_toggle_collapsed.call(()),
                    "{toggle_label}"
                }
            }
            if !controls.collapsed {
                if let Some(detail) = controls.details.clone() {
                    ClauseDetails { detail, on_activate_clause }
                } else {
                    p { class: "clause-empty", "Select a highlighted clause to inspect it." }
                }
            }
        }
    }
}

#[component]
fn ClauseDetails(detail: ClauseDetail, on_activate_clause: Callback<String>) -> Element {
    let references = detail.references.join(", ");
    let parent_id = detail.parent_clause_id.clone();

    rsx! {
        dl {
            class: "clause-details",
            "data-clause-id": "{detail.clause_id}",
            dt { "Function" }
            dd { class: "clause-function", "{detail.function_text}" }
            dt { "References" }
            dd { "{references}" }
            if !detail.category_tags.is_empty() {
                dt { "Categories" }
                dd {
                    for tag in detail.category_tags.iter() {
                        span { class: "clause-tag", "{tag}" }
                    }
                }
            }
            if !detail.source_summary.is_empty() {
                dt { "Source" }
                dd { class: "clause-source", "{detail.source_summary}" }
            }
            if let Some(parent_id) = parent_id.filter(|_| !detail.parent_summary.is_empty()) {
                dt { "Part of" }
                dd {
                    button {
                        r#type: "button",
                        class: "clause-link",
                        onclick: move |_| on_activate_clause.call(parent_id.clone()),
                        "{detail.parent_summary}"
                    }
                }
            }
            if !detail.child_clauses.is_empty() {
                dt { "Contains" }
                dd {
                    ul {
                        for child in detail.child_clauses.iter() {
                            li {
                                key: "{child.clause_id}",
                                button {
                                    r#type: "button",
                                    class: "clause-link",
                                    onclick: {
                                        let id = child.clause_id.clone();
                                        move |_| on_activate_clause.call(id.clone())
                                    },
                                    "{child.label}"
                                }
                                if let Some(role) = &child.role {
                                    span { class: "clause-role", " ({role})" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
