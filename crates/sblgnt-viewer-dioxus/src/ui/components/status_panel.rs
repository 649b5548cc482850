use dioxus::prelude::*;
use sblgnt_viewer_engine::{Display, StatusPanel};

#[component]
pub fn StatusPanelView(status: StatusPanel) -> Element {
    let class = if status.is_error {
        "status error"
    } else {
        "status"
    };
    let style = match status.display {
        Some(Display::Hidden) => "display: none;",
        Some(Display::Block) => "display: block;",
        None => "",
    };

    rsx! {
        div {
            id: "status",
            class: "{class}",
            style: "{style}",
            role: "status",
            "{status.text}"
        }
    }
}
