use dioxus::prelude::*;
use sblgnt_viewer_engine::BookSelector;

#[component]
pub fn BookSelectorView(selector: BookSelector, on_change: Callback<String>) -> Element {
    rsx! {
        label {
            class: "book-selector",
            "Book "
            select {
                id: "book-select",
                disabled: selector.disabled,
                value: "{selector.value}",
                onchange: move |evt: FormEvent| on_change.call(evt.value()),
                for option in selector.options.iter() {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        selected: option.value == selector.value,
                        "{option.label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;
    use sblgnt_viewer_engine::SelectorOption;

    #[component]
    fn Harness(selector: BookSelector) -> Element {
        rsx! {
            BookSelectorView { selector, on_change: move |_: String| {} }
        }
    }

    #[test]
    fn test_options_follow_manifest_order_and_mark_selection() {
        let selector = BookSelector {
            options: vec![
                SelectorOption {
                    value: "mark".to_string(),
                    label: "Gospel of Mark".to_string(),
                },
                SelectorOption {
                    value: "john".to_string(),
                    label: "Gospel of John".to_string(),
                },
            ],
            value: "john".to_string(),
            disabled: false,
        };
        let mut dom = VirtualDom::new_with_props(Harness, HarnessProps { selector });
        dom.rebuild_in_place();
        let html = render(&dom);

        let mark = html.find("Gospel of Mark").unwrap();
        let john = html.find("Gospel of John").unwrap();
        assert!(mark < john);
        assert!(html.contains(r#"value="john""#));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_selector_starts_disabled() {
        let mut dom = VirtualDom::new_with_props(
            Harness,
            HarnessProps {
                selector: BookSelector::default(),
            },
        );
        dom.rebuild_in_place();

        assert!(render(&dom).contains("disabled"));
    }
}
