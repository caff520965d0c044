//! Session controller: the NotLoaded → Loading → Loaded state machine.
//!
//! The controller holds the only copy of the session handle and the controls
//! built for it. Loading is split in three so the slow part can run off the
//! UI thread without holding the controller:
//!
//! 1. [`SessionController::begin_load`] validates the selection, rejects a
//!    concurrent start and moves to `Loading`.
//! 2. [`PendingLoad::run`] reads the file and calls the engine on a blocking
//!    thread.
//! 3. [`SessionController::finish_load`] stores the handle and builds the
//!    twelve controls, or falls back to `NotLoaded` on failure.
//!
//! A reload keeps the current bank aside until the new one is in. It is
//! released on success and restored on failure or cancel.

use std::sync::Arc;

use bankpad_types::{EngineEvent, LoadState, SessionHandle, View, PITCH_TABLE};

use crate::bank::BankSelection;
use crate::control::{create_control, Control};
use crate::engine::{EngineSettings, SharedEngine};
use crate::error::SessionError;

pub struct SessionController {
    engine: SharedEngine,
    settings: EngineSettings,
    state: LoadState,
    controls: Vec<Control>,
    /// Bank that was loaded when the current load started.
    retained: Option<(SessionHandle, Vec<Control>)>,
    next_attempt: u64,
}

/// A started load that has not touched the file or the engine yet.
#[must_use = "a pending load does nothing until run"]
pub struct PendingLoad {
    attempt: u64,
    selection: BankSelection,
    engine: SharedEngine,
}

/// Outcome of [`PendingLoad::run`], to be handed back to the controller.
#[derive(Debug)]
pub struct CompletedLoad {
    attempt: u64,
    bank_name: String,
    result: Result<SessionHandle, SessionError>,
}

impl PendingLoad {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Read the bank and hand it to the engine. The engine call runs on the
    /// blocking pool; the caller's executor keeps running meanwhile.
    pub async fn run(self) -> CompletedLoad {
        let bank_name = self.selection.display_name();
        let engine = self.engine;
        let result = match self.selection.read().await {
            Ok(bank) => {
                log::debug!(target: "session", "read {} ({} bytes)", bank.name(), bank.len());
                async_std::task::spawn_blocking(move || engine.load(bank.into_bytes()))
                    .await
                    .map_err(SessionError::Engine)
            }
            Err(e) => Err(e),
        };
        CompletedLoad {
            attempt: self.attempt,
            bank_name,
            result,
        }
    }
}

impl CompletedLoad {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl SessionController {
    pub fn new(engine: SharedEngine, settings: EngineSettings) -> Self {
        Self {
            engine,
            settings,
            state: LoadState::NotLoaded,
            controls: Vec::new(),
            retained: None,
            next_attempt: 0,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn view(&self) -> View {
        self.state.view()
    }

    pub fn handle(&self) -> Option<SessionHandle> {
        self.state.handle()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Controls in ascending pitch order. Empty unless loaded.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Start a load. A loaded bank stays in the engine until the new one
    /// succeeds; a load already in flight makes this fail with `LoadInProgress`.
    pub fn begin_load(
        &mut self,
        selection: Option<BankSelection>,
    ) -> Result<PendingLoad, SessionError> {
        let Some(selection) = selection else {
            log::warn!(target: "session", "start ignored: no sound bank selected");
            return Err(SessionError::NoFileSelected);
        };
        if let LoadState::Loading { attempt } = self.state {
            log::warn!(target: "session", "start ignored: load #{} still running", attempt);
            return Err(SessionError::LoadInProgress);
        }
        if let LoadState::Loaded { handle } = self.state {
            log::debug!(target: "session", "keeping {} until the new bank is in", handle);
            self.retained = Some((handle, std::mem::take(&mut self.controls)));
        }

        self.next_attempt += 1;
        let attempt = self.next_attempt;
        self.state = LoadState::Loading { attempt };
        log::info!(
            target: "session",
            "load #{} started for {}",
            attempt,
            selection.display_name()
        );
        Ok(PendingLoad {
            attempt,
            selection,
            engine: Arc::clone(&self.engine),
        })
    }

    /// Abandon the load in flight. Its result will be discarded as stale.
    pub fn cancel_load(&mut self) -> bool {
        match self.state {
            LoadState::Loading { attempt } => {
                log::info!(target: "session", "load #{} cancelled", attempt);
                self.restore_retained();
                true
            }
            _ => false,
        }
    }

    /// Back to the bank set aside by `begin_load`, or to `NotLoaded`.
    fn restore_retained(&mut self) {
        match self.retained.take() {
            Some((handle, controls)) => {
                self.controls = controls;
                self.state = LoadState::Loaded { handle };
                log::info!(target: "session", "kept {}", handle);
            }
            None => {
                self.controls.clear();
                self.state = LoadState::NotLoaded;
            }
        }
    }

    /// Apply the outcome of a load. On success the session is `Loaded` with
    /// twelve controls; on failure it is back to `NotLoaded` with none, or to
    /// the bank it was reloading over.
    pub fn finish_load(&mut self, completed: CompletedLoad) -> Result<SessionHandle, SessionError> {
        let CompletedLoad {
            attempt,
            bank_name,
            result,
        } = completed;

        if self.state != (LoadState::Loading { attempt }) {
            log::warn!(target: "session", "discarding result of superseded load #{}", attempt);
            if let Ok(handle) = result {
                if let Err(e) = self.engine.unload(handle) {
                    log::warn!(target: "session", "releasing stale {} failed: {}", handle, e);
                }
            }
            return Err(SessionError::StaleLoad);
        }

        match result {
            Ok(handle) => {
                if let Some((previous, _)) = self.retained.take() {
                    if let Err(e) = self.release(previous) {
                        log::warn!(target: "session", "releasing {} failed: {}", previous, e);
                    }
                }
                self.controls = build_controls(&self.engine, handle);
                self.state = LoadState::Loaded { handle };
                log::info!(
                    target: "session",
                    "{} loaded as {} ({} controls)",
                    bank_name,
                    handle,
                    self.controls.len()
                );
                Ok(handle)
            }
            Err(e) => {
                self.restore_retained();
                log::error!(target: "session", "load #{} of {} failed: {}", attempt, bank_name, e);
                Err(e)
            }
        }
    }

    /// Silence and release the loaded bank and drop its controls.
    /// The state is `NotLoaded` afterwards even if the engine reports an error.
    pub fn unload(&mut self) -> Result<(), SessionError> {
        let handle = self.handle().ok_or(SessionError::NotLoaded)?;
        self.controls.clear();
        self.state = LoadState::NotLoaded;
        self.release(handle)
    }

    fn release(&self, handle: SessionHandle) -> Result<(), SessionError> {
        let silence = EngineEvent::AllNotesOff {
            channel: self.settings.channel,
        };
        if let Err(e) = self.engine.send_event(handle, silence) {
            log::warn!(target: "session", "all-notes-off for {} failed: {}", handle, e);
        }
        self.engine.unload(handle)?;
        log::info!(target: "session", "unloaded {}", handle);
        Ok(())
    }

    pub fn send_event(&self, event: EngineEvent) -> Result<(), SessionError> {
        let handle = self.handle().ok_or(SessionError::NotLoaded)?;
        self.engine.send_event(handle, event)?;
        Ok(())
    }

    /// Select a preset on the configured channel (clamped to 0..=127).
    pub fn program_change(&self, program: u8) -> Result<(), SessionError> {
        self.send_event(EngineEvent::ProgramChange {
            channel: self.settings.channel,
            program: program.min(127),
        })
    }

    pub fn all_notes_off(&self) -> Result<(), SessionError> {
        self.send_event(EngineEvent::AllNotesOff {
            channel: self.settings.channel,
        })
    }
}

/// One control per pitch-table entry, each with its (handle, pitch) pair
/// captured in the callbacks.
fn build_controls(engine: &SharedEngine, handle: SessionHandle) -> Vec<Control> {
    PITCH_TABLE
        .iter()
        .map(|entry| {
            let pitch = entry.pitch;
            let on_engine = Arc::clone(engine);
            let off_engine = Arc::clone(engine);
            create_control(
                entry.label,
                move || {
                    if let Err(e) = on_engine.note_on(handle, pitch) {
                        log::warn!(target: "session", "note on {} failed: {}", pitch, e);
                    }
                },
                move || {
                    if let Err(e) = off_engine.note_off(handle, pitch) {
                        log::warn!(target: "session", "note off {} failed: {}", pitch, e);
                    }
                },
            )
        })
        .collect()
}
