//! Engines without audio output: a recorder for tests and a silent no-op.

use std::sync::Mutex;

use bankpad_types::{EngineEvent, Pitch, SessionHandle};

use super::{EngineError, EngineResult, SoundEngine};

/// An operation recorded by `TestEngine` for assertion in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOp {
    Load { len: usize },
    NoteOn { handle: SessionHandle, pitch: Pitch },
    NoteOff { handle: SessionHandle, pitch: Pitch },
    Event { handle: SessionHandle, event: EngineEvent },
    Unload(SessionHandle),
}

/// A test engine that records all operations into a vector for assertions.
///
/// Loads succeed with sequential handles starting at 1 unless a rejection is
/// queued with [`TestEngine::reject_next_load`]. Uses `Mutex` for interior
/// mutability so the engine is `Send + Sync` (needed for `Arc` sharing).
pub struct TestEngine {
    ops: Mutex<Vec<EngineOp>>,
    next_handle: Mutex<u32>,
    rejection: Mutex<Option<String>>,
}

impl TestEngine {
    pub fn new() -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
            next_handle: Mutex::new(1),
            rejection: Mutex::new(None),
        }
    }

    /// Make the next `load` fail with `message`. Later loads succeed again.
    pub fn reject_next_load(&self, message: &str) {
        *self.rejection.lock().unwrap() = Some(message.to_string());
    }

    /// Return all recorded operations.
    pub fn operations(&self) -> Vec<EngineOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Clear recorded operations.
    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Count operations matching a predicate.
    pub fn count<F: Fn(&EngineOp) -> bool>(&self, f: F) -> usize {
        self.ops.lock().unwrap().iter().filter(|op| f(op)).count()
    }

    /// Return the pitches of all NoteOn operations, in call order.
    pub fn notes_started(&self) -> Vec<(SessionHandle, Pitch)> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| match op {
                EngineOp::NoteOn { handle, pitch } => Some((*handle, *pitch)),
                _ => None,
            })
            .collect()
    }

    /// Return the pitches of all NoteOff operations, in call order.
    pub fn notes_stopped(&self) -> Vec<(SessionHandle, Pitch)> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| match op {
                EngineOp::NoteOff { handle, pitch } => Some((*handle, *pitch)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: EngineOp) {
        self.ops.lock().unwrap().push(op);
    }
}

impl Default for TestEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundEngine for TestEngine {
    fn load(&self, bank: Vec<u8>) -> EngineResult<SessionHandle> {
        self.record(EngineOp::Load { len: bank.len() });
        if let Some(message) = self.rejection.lock().unwrap().take() {
            return Err(EngineError(message));
        }
        let mut next = self.next_handle.lock().unwrap();
        let handle = SessionHandle::new(*next);
        *next += 1;
        Ok(handle)
    }

    fn note_on(&self, handle: SessionHandle, pitch: Pitch) -> EngineResult {
        self.record(EngineOp::NoteOn { handle, pitch });
        Ok(())
    }

    fn note_off(&self, handle: SessionHandle, pitch: Pitch) -> EngineResult {
        self.record(EngineOp::NoteOff { handle, pitch });
        Ok(())
    }

    fn send_event(&self, handle: SessionHandle, event: EngineEvent) -> EngineResult {
        self.record(EngineOp::Event { handle, event });
        Ok(())
    }

    fn unload(&self, handle: SessionHandle) -> EngineResult {
        self.record(EngineOp::Unload(handle));
        Ok(())
    }
}

// ─── NullEngine ─────────────────────────────────────────────────────

/// A no-op engine that silently succeeds. Every load returns handle 0.
pub struct NullEngine;

impl SoundEngine for NullEngine {
    fn load(&self, _: Vec<u8>) -> EngineResult<SessionHandle> { Ok(SessionHandle::new(0)) }
    fn note_on(&self, _: SessionHandle, _: Pitch) -> EngineResult { Ok(()) }
    fn note_off(&self, _: SessionHandle, _: Pitch) -> EngineResult { Ok(()) }
    fn send_event(&self, _: SessionHandle, _: EngineEvent) -> EngineResult { Ok(()) }
    fn unload(&self, _: SessionHandle) -> EngineResult { Ok(()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_sequential() {
        let engine = TestEngine::new();
        assert_eq!(engine.load(vec![1]).unwrap(), SessionHandle::new(1));
        assert_eq!(engine.load(vec![2]).unwrap(), SessionHandle::new(2));
    }

    #[test]
    fn rejection_applies_once() {
        let engine = TestEngine::new();
        engine.reject_next_load("bad bank");
        assert_eq!(engine.load(vec![0; 4]), Err(EngineError("bad bank".into())));
        assert_eq!(engine.load(vec![0; 4]).unwrap(), SessionHandle::new(1));
        assert_eq!(engine.count(|op| matches!(op, EngineOp::Load { len: 4 })), 2);
    }

    #[test]
    fn release_without_press_is_recorded() {
        let engine = TestEngine::new();
        let h = SessionHandle::new(1);
        engine.note_off(h, Pitch::new(64)).unwrap();
        assert!(engine.notes_started().is_empty());
        assert_eq!(engine.notes_stopped(), vec![(h, Pitch::new(64))]);
    }
}
