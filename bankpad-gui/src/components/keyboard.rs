//! The loaded view: the `note-btns` container plus session controls.
//!
//! `note-btns` is always rendered and stays empty until a bank is loaded.

use dioxus::prelude::*;

use bankpad_core::control::Control;

use crate::components::common::Button;
use crate::components::NoteButton;
use crate::dispatch::use_shared_state;

const PROGRAMS: std::ops::RangeInclusive<u8> = 0..=127;

#[component]
pub fn Keyboard() -> Element {
    let state = use_shared_state();

    let controls: Vec<Control> = state.read().session.controls().to_vec();
    let loaded = !controls.is_empty();

    rsx! {
        div { id: "note-btns", class: "note-btns",
            for control in controls {
                NoteButton { key: "{control.label()}", control: control.clone() }
            }
        }
        if loaded {
            SessionControls {}
        }
    }
}

#[component]
fn SessionControls() -> Element {
    let mut state = use_shared_state();
    let mut program = use_signal(|| 0u8);

    rsx! {
        div { class: "session-controls",
            label { class: "program-label", "Program" }
            select {
                class: "dropdown program-select",
                value: "{program}",
                onchange: move |evt| {
                    let Ok(value) = evt.value().parse::<u8>() else {
                        return;
                    };
                    program.set(value);
                    if let Err(e) = state.read().session.program_change(value) {
                        log::warn!(target: "gui", "program change failed: {}", e);
                    }
                },
                for p in PROGRAMS {
                    option { key: "{p}", value: "{p}", selected: p == program(), "{p:03}" }
                }
            }
            Button {
                label: "All notes off",
                onclick: move |_| {
                    if let Err(e) = state.read().session.all_notes_off() {
                        log::warn!(target: "gui", "all notes off failed: {}", e);
                    }
                },
            }
            Button {
                label: "Unload",
                onclick: move |_| {
                    if let Err(e) = state.write().session.unload() {
                        log::warn!(target: "gui", "unload failed: {}", e);
                    }
                },
            }
        }
    }
}
