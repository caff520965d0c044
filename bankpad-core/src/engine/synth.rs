//! `SoundEngine` backed by the oxisynth SoundFont synthesizer.
//!
//! Every loaded bank gets its own audio thread. The thread parses the bank,
//! builds a synth at the device sample rate and owns the cpal output stream
//! until the session is unloaded. Channel messages reach the audio callback
//! over a crossbeam channel and are drained once per buffer.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use bankpad_types::{EngineEvent, Pitch, SessionHandle};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};
use oxisynth::MidiEvent;

use super::{EngineError, EngineResult, EngineSettings, SoundEngine};

/// Live state for one loaded bank.
struct Session {
    events: Sender<EngineEvent>,
    /// Dropping this sender wakes the audio thread and ends the session.
    shutdown: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!(target: "engine", "audio thread panicked during shutdown");
            }
        }
    }
}

pub struct SynthEngine {
    settings: EngineSettings,
    sessions: Mutex<HashMap<SessionHandle, Session>>,
    next_handle: AtomicU32,
}

impl SynthEngine {
    /// Fails when the host has no default output device, in which case no
    /// session could ever produce sound.
    pub fn new(settings: EngineSettings) -> EngineResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| EngineError::from("no default audio output device"))?;
        let name = device.name().unwrap_or_else(|_| "<unnamed>".to_string());
        log::info!(target: "engine", "output device: {} (host {:?})", name, host.id());

        Ok(Self {
            settings,
            sessions: Mutex::new(HashMap::new()),
            next_handle: AtomicU32::new(1),
        })
    }

    fn send(&self, handle: SessionHandle, event: EngineEvent) -> EngineResult {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| EngineError::from("session table poisoned"))?;
        let session = sessions
            .get(&handle)
            .ok_or_else(|| EngineError(format!("unknown session {}", handle)))?;
        session
            .events
            .send(event)
            .map_err(|_| EngineError(format!("audio thread for {} has stopped", handle)))
    }
}

impl SoundEngine for SynthEngine {
    fn load(&self, bank: Vec<u8>) -> EngineResult<SessionHandle> {
        let size = bank.len();
        let gain = self.settings.gain;
        let (events_tx, events_rx) = crossbeam_channel::unbounded::<EngineEvent>();
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
        let (ready_tx, ready_rx) = crossbeam_channel::bounded::<EngineResult<u32>>(1);

        let thread = thread::Builder::new()
            .name("bankpad-audio".to_string())
            .spawn(move || {
                let stream = match start_stream(bank, gain, events_rx) {
                    Ok((stream, sample_rate)) => {
                        let _ = ready_tx.send(Ok(sample_rate));
                        stream
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                // Parks until the session's shutdown sender is dropped.
                let _ = shutdown_rx.recv();
                drop(stream);
            })?;

        let sample_rate = match ready_rx.recv() {
            Ok(Ok(rate)) => rate,
            Ok(Err(e)) => {
                let _ = thread.join();
                return Err(e);
            }
            Err(_) => {
                let _ = thread.join();
                return Err(EngineError::from(
                    "audio thread exited before the stream started",
                ));
            }
        };

        let handle = SessionHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed));
        log::info!(
            target: "engine",
            "loaded {} byte bank as {} at {} Hz",
            size,
            handle,
            sample_rate
        );
        let session = Session {
            events: events_tx,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        };
        self.sessions
            .lock()
            .map_err(|_| EngineError::from("session table poisoned"))?
            .insert(handle, session);
        Ok(handle)
    }

    fn note_on(&self, handle: SessionHandle, pitch: Pitch) -> EngineResult {
        self.send(
            handle,
            EngineEvent::NoteOn {
                channel: self.settings.channel,
                key: pitch.get(),
                velocity: self.settings.velocity,
            },
        )
    }

    fn note_off(&self, handle: SessionHandle, pitch: Pitch) -> EngineResult {
        self.send(
            handle,
            EngineEvent::NoteOff {
                channel: self.settings.channel,
                key: pitch.get(),
            },
        )
    }

    fn send_event(&self, handle: SessionHandle, event: EngineEvent) -> EngineResult {
        self.send(handle, event)
    }

    fn unload(&self, handle: SessionHandle) -> EngineResult {
        // Take the session out before dropping it so the join happens
        // without the table locked.
        let session = self
            .sessions
            .lock()
            .map_err(|_| EngineError::from("session table poisoned"))?
            .remove(&handle)
            .ok_or_else(|| EngineError(format!("unknown session {}", handle)))?;
        drop(session);
        log::info!(target: "engine", "unloaded {}", handle);
        Ok(())
    }
}

/// Runs on the session's audio thread. Returns the playing stream and its sample rate.
fn start_stream(
    bank: Vec<u8>,
    gain: f32,
    events: Receiver<EngineEvent>,
) -> EngineResult<(cpal::Stream, u32)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| EngineError::from("no default audio output device"))?;
    let supported = device
        .default_output_config()
        .map_err(|e| EngineError(format!("no usable output config: {}", e)))?;
    let sample_format = supported.sample_format();
    let config: cpal::StreamConfig = supported.into();
    let sample_rate = config.sample_rate.0;

    let synth = build_synth(bank, sample_rate as f32, gain)?;

    let stream = match sample_format {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, synth, events)?,
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, synth, events)?,
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, synth, events)?,
        other => {
            return Err(EngineError(format!(
                "unsupported sample format {:?}",
                other
            )))
        }
    };
    stream
        .play()
        .map_err(|e| EngineError(format!("failed to start output stream: {}", e)))?;
    Ok((stream, sample_rate))
}

fn build_synth(bank: Vec<u8>, sample_rate: f32, gain: f32) -> EngineResult<oxisynth::Synth> {
    let descriptor = oxisynth::SynthDescriptor {
        sample_rate,
        gain,
        ..Default::default()
    };
    let mut synth = oxisynth::Synth::new(descriptor)
        .map_err(|e| EngineError(format!("synth init failed: {:?}", e)))?;

    let mut cursor = Cursor::new(bank);
    let font = oxisynth::SoundFont::load(&mut cursor)
        .map_err(|e| EngineError(format!("sound bank rejected: {:?}", e)))?;
    synth.add_font(font, true);
    Ok(synth)
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut synth: oxisynth::Synth,
    events: Receiver<EngineEvent>,
) -> EngineResult<cpal::Stream>
where
    T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;
    let err_fn = |err: cpal::StreamError| {
        log::error!(target: "engine", "output stream error: {}", err);
    };

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                while let Ok(event) = events.try_recv() {
                    synth.send_event(to_midi(event)).ok();
                }
                write_frames(data, channels, || synth.read_next());
            },
            err_fn,
            None,
        )
        .map_err(|e| EngineError(format!("failed to build output stream: {}", e)))
}

/// Fill interleaved output one frame per `next_frame` call; channels beyond
/// two repeat the stereo pair.
fn write_frames<T, F>(output: &mut [T], channels: usize, mut next_frame: F)
where
    T: cpal::Sample + cpal::FromSample<f32>,
    F: FnMut() -> (f32, f32),
{
    for frame in output.chunks_mut(channels) {
        let (l, r) = next_frame();
        let stereo = [T::from_sample::<f32>(l), T::from_sample::<f32>(r)];
        for (i, sample) in frame.iter_mut().enumerate() {
            *sample = stereo[i % 2];
        }
    }
}

fn to_midi(event: EngineEvent) -> MidiEvent {
    match event {
        EngineEvent::NoteOn {
            channel,
            key,
            velocity,
        } => MidiEvent::NoteOn {
            channel,
            key,
            vel: velocity,
        },
        EngineEvent::NoteOff { channel, key } => MidiEvent::NoteOff { channel, key },
        EngineEvent::ProgramChange { channel, program } => MidiEvent::ProgramChange {
            channel,
            program_id: program,
        },
        EngineEvent::ControlChange {
            channel,
            control,
            value,
        } => MidiEvent::ControlChange {
            channel,
            ctrl: control,
            value,
        },
        EngineEvent::AllNotesOff { channel } => MidiEvent::AllNotesOff { channel },
        EngineEvent::AllSoundOff { channel } => MidiEvent::AllSoundOff { channel },
        EngineEvent::PitchBend { channel, value } => MidiEvent::PitchBend { channel, value },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_messages_map_field_for_field() {
        let on = to_midi(EngineEvent::NoteOn { channel: 2, key: 63, velocity: 100 });
        assert!(matches!(on, MidiEvent::NoteOn { channel: 2, key: 63, vel: 100 }));

        let off = to_midi(EngineEvent::NoteOff { channel: 2, key: 63 });
        assert!(matches!(off, MidiEvent::NoteOff { channel: 2, key: 63 }));
    }

    #[test]
    fn program_and_controller_messages_keep_their_values() {
        let program = to_midi(EngineEvent::ProgramChange { channel: 1, program: 42 });
        assert!(matches!(program, MidiEvent::ProgramChange { channel: 1, program_id: 42 }));

        let cc = to_midi(EngineEvent::ControlChange { channel: 1, control: 7, value: 90 });
        assert!(matches!(cc, MidiEvent::ControlChange { channel: 1, ctrl: 7, value: 90 }));
    }

    #[test]
    fn channel_wide_messages_map_to_same_kind() {
        assert!(matches!(
            to_midi(EngineEvent::AllNotesOff { channel: 9 }),
            MidiEvent::AllNotesOff { channel: 9 }
        ));
        assert!(matches!(
            to_midi(EngineEvent::AllSoundOff { channel: 9 }),
            MidiEvent::AllSoundOff { channel: 9 }
        ));
        assert!(matches!(
            to_midi(EngineEvent::PitchBend { channel: 9, value: 12000 }),
            MidiEvent::PitchBend { channel: 9, value: 12000 }
        ));
    }

    #[test]
    fn stereo_output_interleaves_left_then_right() {
        let mut n = 0.0;
        let mut out = [0.0f32; 6];
        write_frames(&mut out, 2, || {
            n += 1.0;
            (n, -n)
        });
        assert_eq!(out, [1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
    }

    #[test]
    fn extra_channels_repeat_the_stereo_pair() {
        let mut n = 0.0;
        let mut out = [0.0f32; 8];
        write_frames(&mut out, 4, || {
            n += 1.0;
            (n, -n)
        });
        assert_eq!(out, [1.0, -1.0, 1.0, -1.0, 2.0, -2.0, 2.0, -2.0]);
    }

    #[test]
    fn integer_output_converts_samples() {
        let mut out = [0i16; 4];
        write_frames(&mut out, 2, || (0.0, 0.0));
        assert_eq!(out, [0, 0, 0, 0]);
    }

    #[test]
    fn fontless_synth_fills_pairs_per_frame() {
        let mut synth = oxisynth::Synth::new(oxisynth::SynthDescriptor::default()).unwrap();
        let mut out = [1.0f32; 16];
        write_frames(&mut out, 4, || synth.read_next());
        for frame in out.chunks(4) {
            assert_eq!(frame[0], frame[2]);
            assert_eq!(frame[1], frame[3]);
        }
    }
}
