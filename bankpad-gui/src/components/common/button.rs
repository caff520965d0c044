//! Clickable button used by the load panel and the session controls.

use dioxus::prelude::*;

/// Extra classes go after the shared `btn` class. An empty `id` is not
/// rendered.
#[component]
pub fn Button(
    label: String,
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default = false)] disabled: bool,
    onclick: EventHandler<()>,
) -> Element {
    let class = button_class(&class);
    let id = (!id.is_empty()).then_some(id);
    rsx! {
        button {
            id: id,
            class: "{class}",
            disabled: disabled,
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}

fn button_class(extra: &str) -> String {
    if extra.is_empty() {
        "btn".to_string()
    } else {
        format!("btn {extra}")
    }
}
