//! The fixed one-octave pitch table.

use serde::{Deserialize, Serialize};

/// MIDI key of the first entry in the table (middle C).
pub const BASE_PITCH: u8 = 60;

/// Number of entries in [`PITCH_TABLE`].
pub const PITCH_COUNT: usize = 12;

/// A MIDI key number passed to note-on / note-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pitch(u8);

impl Pitch {
    pub const fn new(key: u8) -> Self {
        Self(key)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the pitch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchEntry {
    pub pitch: Pitch,
    pub label: &'static str,
}

const fn entry(offset: u8, label: &'static str) -> PitchEntry {
    PitchEntry {
        pitch: Pitch::new(BASE_PITCH + offset),
        label,
    }
}

/// Chromatic octave starting at [`BASE_PITCH`], in ascending order.
/// Uses German naming, so B natural is "H".
pub const PITCH_TABLE: [PitchEntry; PITCH_COUNT] = [
    entry(0, "C"),
    entry(1, "C#"),
    entry(2, "D"),
    entry(3, "D#"),
    entry(4, "E"),
    entry(5, "F"),
    entry(6, "F#"),
    entry(7, "G"),
    entry(8, "G#"),
    entry(9, "A"),
    entry(10, "A#"),
    entry(11, "H"),
];
