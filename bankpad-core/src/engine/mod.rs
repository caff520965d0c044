//! Engine binding: a thin seam over the external sound engine.
//!
//! `SoundEngine` captures the three entry points the front end needs (load a
//! bank, start a note, stop a note) plus the rest of the channel-message set.
//! Implementations forward calls and own whatever the engine needs to keep a
//! session alive; callers only ever hold the opaque `SessionHandle`.
//! This enables unit testing of the session flow without an audio device.

use std::fmt;
use std::sync::Arc;

use bankpad_types::{EngineEvent, Pitch, SessionHandle};

#[cfg(feature = "synth")]
mod synth;
mod testing;

#[cfg(feature = "synth")]
pub use synth::SynthEngine;
pub use testing::{EngineOp, NullEngine, TestEngine};

/// Result type for engine operations.
pub type EngineResult<T = ()> = Result<T, EngineError>;

/// Error reported by the engine. The message is engine-defined.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineError(pub String);

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError(e.to_string())
    }
}

impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError(s)
    }
}

impl From<&str> for EngineError {
    fn from(s: &str) -> Self {
        EngineError(s.to_string())
    }
}

/// Engine shared between the session controller, its controls and the
/// blocking load task.
pub type SharedEngine = Arc<dyn SoundEngine>;

/// The external sound engine, as seen by the front end.
///
/// None of these methods inspect or validate their arguments; invalid handles,
/// out-of-range pitches and malformed banks are the engine's to reject.
pub trait SoundEngine: Send + Sync {
    /// Hand a sound-bank file to the engine. May take a long time for large banks.
    fn load(&self, bank: Vec<u8>) -> EngineResult<SessionHandle>;

    /// Start sounding `pitch` in the session.
    fn note_on(&self, handle: SessionHandle, pitch: Pitch) -> EngineResult;

    /// Stop sounding `pitch`. Must tolerate a release with no matching press.
    fn note_off(&self, handle: SessionHandle, pitch: Pitch) -> EngineResult;

    /// Forward an arbitrary channel message.
    fn send_event(&self, handle: SessionHandle, event: EngineEvent) -> EngineResult;

    /// Release everything the engine holds for this session.
    fn unload(&self, handle: SessionHandle) -> EngineResult;
}

/// Channel-message defaults applied by engines that produce sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// MIDI channel for note and program messages (0..=15).
    pub channel: u8,
    /// Fixed note-on velocity (1..=127).
    pub velocity: u8,
    pub gain: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            channel: 0,
            velocity: 100,
            gain: 1.0,
        }
    }
}
