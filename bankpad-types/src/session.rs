//! Load state of the single sound-bank session.

use serde::{Deserialize, Serialize};

use crate::SessionHandle;

/// Where the session controller is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadState {
    #[default]
    NotLoaded,
    /// A load is in flight. `attempt` identifies it so late completions
    /// from superseded attempts can be told apart.
    Loading { attempt: u64 },
    Loaded { handle: SessionHandle },
}

impl LoadState {
    pub fn handle(&self) -> Option<SessionHandle> {
        match self {
            LoadState::Loaded { handle } => Some(*handle),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading { .. })
    }

    pub fn view(&self) -> View {
        match self {
            LoadState::Loaded { .. } => View::Loaded,
            LoadState::NotLoaded | LoadState::Loading { .. } => View::NotLoaded,
        }
    }
}

/// Which of the two top-level containers is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum View {
    #[default]
    NotLoaded,
    Loaded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_still_shows_not_loaded_view() {
        assert_eq!(LoadState::Loading { attempt: 1 }.view(), View::NotLoaded);
        assert_eq!(LoadState::NotLoaded.view(), View::NotLoaded);
    }

    #[test]
    fn loaded_exposes_handle() {
        let state = LoadState::Loaded {
            handle: SessionHandle::new(3),
        };
        assert_eq!(state.view(), View::Loaded);
        assert_eq!(state.handle(), Some(SessionHandle::new(3)));
        assert_eq!(LoadState::NotLoaded.handle(), None);
    }
}
