//! # bankpad-types
//!
//! Shared type definitions for bankpad.
//! Used by bankpad-core (engine binding, session controller) and bankpad-gui.

mod event;
mod pitch;
mod session;

pub use event::EngineEvent;
pub use pitch::{Pitch, PitchEntry, BASE_PITCH, PITCH_COUNT, PITCH_TABLE};
pub use session::{LoadState, View};

/// Opaque identifier for one loaded sound bank inside an engine.
///
/// Only engines mint handles. The value carries no meaning outside the engine
/// that returned it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SessionHandle(u32);

impl SessionHandle {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "h{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_display_is_prefixed() {
        assert_eq!(SessionHandle::new(1).to_string(), "h1");
    }

    #[test]
    fn handle_serializes_transparently() {
        let json = serde_json::to_string(&SessionHandle::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
