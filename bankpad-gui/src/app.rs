//! Root application component and state initialization.

use dioxus::prelude::*;

use bankpad_core::config::Config;
use bankpad_core::engine::SharedEngine;
use bankpad_types::View;

use crate::components::{Keyboard, LoadPanel};
use crate::state::SharedState;

const MAIN_CSS: &str = include_str!("styles/main.css");

/// `display` styles for the `not-loaded` and `loaded` containers.
fn container_styles(view: View) -> (&'static str, &'static str) {
    match view {
        View::NotLoaded => ("display: block;", "display: none;"),
        View::Loaded => ("display: none;", "display: block;"),
    }
}

/// Root application component.
#[component]
pub fn App() -> Element {
    let engine = use_context::<SharedEngine>();
    let config = use_context::<Config>();
    let settings = config.engine_settings();

    let state = use_context_provider(|| Signal::new(SharedState::new(engine, settings)));

    let (not_loaded_style, loaded_style) = container_styles(state.read().session.view());
    let extensions = config.bank_extensions().to_vec();

    rsx! {
        style { {MAIN_CSS} }
        div { class: "app",
            div {
                id: "not-loaded",
                style: not_loaded_style,
                LoadPanel { extensions }
            }
            div {
                id: "loaded",
                style: loaded_style,
                Keyboard {}
            }
        }
    }
}
