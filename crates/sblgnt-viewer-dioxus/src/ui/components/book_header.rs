use dioxus::prelude::*;

#[component]
pub fn BookHeader(title: String, header: String, source_path: Option<String>) -> Element {
    rsx! {
        header {
            class: "book-header",
            h1 { id: "book-title", "{title}" }
            p { id: "book-header", class: "book-header-text", "{header}" }
            if let Some(path) = source_path.filter(|path| !path.is_empty()) {
                p {
                    class: "source-path",
                    "Source: "
                    code { "{path}" }
                }
            }
        }
    }
}
