use std::fmt;
use std::path::PathBuf;

use crate::engine::EngineError;

/// Why a session operation did not happen.
#[derive(Debug)]
pub enum SessionError {
    /// Start was triggered with no bank file chosen.
    NoFileSelected,
    /// The chosen file could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The chosen file was empty.
    EmptyBank,
    /// A load is already in flight.
    LoadInProgress,
    /// A load completed after it had been superseded.
    StaleLoad,
    /// The operation needs a loaded bank.
    NotLoaded,
    /// The engine rejected the call.
    Engine(EngineError),
}

impl SessionError {
    /// File-read failures: nothing reached the engine.
    pub fn is_read_failure(&self) -> bool {
        matches!(
            self,
            SessionError::NoFileSelected | SessionError::Read { .. } | SessionError::EmptyBank
        )
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFileSelected => write!(f, "no sound bank file selected"),
            Self::Read { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
            Self::EmptyBank => write!(f, "sound bank file is empty"),
            Self::LoadInProgress => write!(f, "a sound bank is already loading"),
            Self::StaleLoad => write!(f, "load finished after being superseded"),
            Self::NotLoaded => write!(f, "no sound bank loaded"),
            Self::Engine(e) => write!(f, "engine error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EngineError> for SessionError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}
