//! The on-screen form of a `Control`.

use dioxus::prelude::*;

use bankpad_core::control::Control;

/// One note button. Mouse down presses the control, mouse up releases it.
///
/// Mouse up is delivered even when the press started outside the button, so a
/// release can arrive without a press.
#[component]
pub fn NoteButton(control: Control) -> Element {
    let label = control.label();
    let pressed = control.clone();
    let released = control;

    rsx! {
        button {
            class: "btn note-btn",
            id: "{label}",
            onmousedown: move |_| pressed.press(),
            onmouseup: move |_| released.release(),
            "{label}"
        }
    }
}
