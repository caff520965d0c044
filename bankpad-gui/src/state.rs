//! State management for the GUI.
//!
//! Wraps the session controller and the current file choice for use with
//! Dioxus signals.

use std::path::PathBuf;

use bankpad_core::bank::BankSelection;
use bankpad_core::engine::{EngineSettings, SharedEngine};
use bankpad_core::session::SessionController;

/// Shared state wrapper for the GUI. Wrapped in a Dioxus Signal for reactivity.
pub struct SharedState {
    pub session: SessionController,
    /// File picked in the dialog; read only when start is pressed.
    pub selection: Option<PathBuf>,
}

impl SharedState {
    pub fn new(engine: SharedEngine, settings: EngineSettings) -> Self {
        Self {
            session: SessionController::new(engine, settings),
            selection: None,
        }
    }

    pub fn selection_name(&self) -> Option<String> {
        self.selection
            .as_ref()
            .map(|path| BankSelection::Path(path.clone()).display_name())
    }
}
