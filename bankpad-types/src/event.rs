//! Channel messages understood by the sound engine.

use serde::{Deserialize, Serialize};

/// A single channel message forwarded to a loaded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8 },
    ProgramChange { channel: u8, program: u8 },
    ControlChange { channel: u8, control: u8, value: u8 },
    AllNotesOff { channel: u8 },
    AllSoundOff { channel: u8 },
    /// 14-bit bend, 8192 is centre.
    PitchBend { channel: u8, value: u16 },
}
