//! Dispatch helpers for components.

use dioxus::prelude::*;

use bankpad_core::bank::BankSelection;

use crate::state::SharedState;

/// Hook to get the shared state signal.
pub fn use_shared_state() -> Signal<SharedState> {
    use_context::<Signal<SharedState>>()
}

/// Run the start action: validate the selection, then read and load the bank
/// in a spawned task. Failures are logged by the session controller and leave
/// the not-loaded view in place.
pub fn start_load(mut state: Signal<SharedState>) {
    let selection = state.read().selection.clone().map(BankSelection::Path);
    let pending = state.write().session.begin_load(selection);
    let Ok(pending) = pending else {
        return;
    };

    log::debug!(target: "gui", "load #{} running", pending.attempt());
    spawn(async move {
        let completed = pending.run().await;
        let _ = state.write().session.finish_load(completed);
    });
}
