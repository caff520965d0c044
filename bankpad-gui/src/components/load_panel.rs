//! The not-loaded view: pick a bank file, then start.

use dioxus::prelude::*;

use crate::components::common::Button;
use crate::dispatch::{start_load, use_shared_state};
use crate::file_ops;

#[component]
pub fn LoadPanel(extensions: Vec<String>) -> Element {
    let mut state = use_shared_state();

    let (selected, loading) = {
        let s = state.read();
        (s.selection_name(), s.session.is_loading())
    };
    let selected = selected.unwrap_or_else(|| "No file selected".to_string());

    rsx! {
        div { class: "load-panel",
            Button {
                label: "Choose sound bank…",
                disabled: loading,
                onclick: move |_| {
                    let extensions = extensions.clone();
                    spawn(async move {
                        if let Some(path) = file_ops::open_bank_dialog(&extensions).await {
                            log::info!(target: "gui", "selected {}", path.display());
                            state.write().selection = Some(path);
                        }
                    });
                },
            }
            span { id: "soundfont-file", class: "selected-file", "{selected}" }
            Button {
                label: "Start",
                id: "start",
                class: "start-btn",
                disabled: loading,
                onclick: move |_| start_load(state),
            }
            if loading {
                span { class: "loading", "Loading…" }
                Button {
                    label: "Cancel",
                    onclick: move |_| {
                        state.write().session.cancel_load();
                    },
                }
            }
        }
    }
}
