//! UI components for the bankpad GUI.

mod keyboard;
mod load_panel;
mod note_button;

pub mod common;

pub use keyboard::Keyboard;
pub use load_panel::LoadPanel;
pub use note_button::NoteButton;
