//! bankpad GUI - load a sound bank and play one octave from on-screen buttons.
//!
//! A Dioxus front end over bankpad-core.

mod app;
mod components;
mod dispatch;
mod file_ops;
mod state;

use std::sync::Arc;

use bankpad_core::config::Config;
use bankpad_core::engine::{SharedEngine, SynthEngine};

fn main() {
    env_logger::init();
    log::info!("Starting bankpad");

    let config = Config::load();
    // Without an engine nothing on screen could do anything, so don't open a window.
    let engine: SharedEngine = match SynthEngine::new(config.engine_settings()) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            log::error!(target: "gui", "sound engine unavailable: {}", e);
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::new()
        .with_context(engine)
        .with_context(config)
        .launch(app::App);
}
