//! Common reusable UI components.

mod button;

pub use button::Button;
