//! The playback engine: device stream, scheduling, rendering, monitoring.
//!
//! Three threads share the work. A control thread runs the lookahead
//! scheduler and builds voice graphs; the audio callback mixes them at
//! sample precision; the caller's thread edits the session and polls. The
//! only shared mutable state behind a lock is the [`Session`]; everything
//! that crosses into the callback rides an SPSC ring or an atomic.

pub mod clock;
pub mod monitor;
pub mod renderer;
pub mod scheduler;

pub use clock::AudioClock;
pub use monitor::SignalMonitor;
pub use renderer::{Renderer, ScheduledVoice};
pub use scheduler::{NoteEvent, ScheduleSink, Scheduler, CONTROL_TICK, LOOKAHEAD};

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer};

use crate::pattern::PatternGrid;
use crate::session::Session;
use crate::MAX_BLOCK_SIZE;

const VOICE_RING_CAPACITY: usize = 1024;
const STEP_RING_CAPACITY: usize = 1024;
const MONITOR_RING_CAPACITY: usize = 16_384;

/// `f32` in an atomic shell, for the master gain. Bit-cast through `u32`;
/// ordering is relaxed because nothing synchronizes through it.
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Preferred device sample rate; the device default when `None`.
    pub sample_rate_hint: Option<u32>,
    pub master_gain: f32,
    pub max_voices: usize,
    pub bpm: u32,
    pub swing: f32,
    pub step_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate_hint: None,
            master_gain: 0.8,
            max_voices: 64,
            bpm: 120,
            swing: 0.0,
            step_count: 32,
        }
    }
}

#[derive(Debug)]
pub enum EngineError {
    NoOutputDevice,
    DefaultConfig(cpal::DefaultStreamConfigError),
    BuildStream(cpal::BuildStreamError),
    PlayStream(cpal::PlayStreamError),
    UnsupportedSampleFormat(cpal::SampleFormat),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoOutputDevice => write!(f, "no audio output device available"),
            EngineError::DefaultConfig(e) => {
                write!(f, "could not query the output device config: {e}")
            }
            EngineError::BuildStream(e) => write!(f, "could not open the output stream: {e}"),
            EngineError::PlayStream(e) => write!(f, "could not start the output stream: {e}"),
            EngineError::UnsupportedSampleFormat(format) => {
                write!(f, "device wants {format} samples; only f32 is supported")
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EngineError::DefaultConfig(e) => Some(e),
            EngineError::BuildStream(e) => Some(e),
            EngineError::PlayStream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<cpal::DefaultStreamConfigError> for EngineError {
    fn from(e: cpal::DefaultStreamConfigError) -> Self {
        EngineError::DefaultConfig(e)
    }
}

impl From<cpal::BuildStreamError> for EngineError {
    fn from(e: cpal::BuildStreamError) -> Self {
        EngineError::BuildStream(e)
    }
}

impl From<cpal::PlayStreamError> for EngineError {
    fn from(e: cpal::PlayStreamError) -> Self {
        EngineError::PlayStream(e)
    }
}

struct AudioStack {
    clock: Arc<AudioClock>,
    // Held for its Drop; the callback dies with it.
    _stream: cpal::Stream,
}

type RingProducers = (Producer<ScheduledVoice>, Producer<usize>);

/// Owns the whole instrument. Create, `init()`, then `start()`/`stop()`
/// around edits through `session()`.
pub struct Engine {
    config: EngineConfig,
    session: Arc<Mutex<Session>>,
    playing: Arc<AtomicBool>,
    master_gain: Arc<AtomicF32>,
    audio: Option<AudioStack>,
    /// Ring producers parked between runs.
    idle: Option<RingProducers>,
    control: Option<JoinHandle<RingProducers>>,
    monitor: Option<SignalMonitor>,
    step_rx: Option<Consumer<usize>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let mut session = Session::default();
        session.set_bpm(config.bpm);
        session.set_swing(config.swing);
        if config.step_count != session.pattern.step_count() {
            session.pattern = PatternGrid::with_default_pattern(config.step_count);
        }
        Self {
            master_gain: Arc::new(AtomicF32::new(config.master_gain.clamp(0.0, 1.0))),
            config,
            session: Arc::new(Mutex::new(session)),
            playing: Arc::new(AtomicBool::new(false)),
            audio: None,
            idle: None,
            control: None,
            monitor: None,
            step_rx: None,
        }
    }

    /// Open the output device and start the (silent) stream. Idempotent;
    /// everything after this point is a live audio path.
    pub fn init(&mut self) -> Result<(), EngineError> {
        if self.audio.is_some() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(EngineError::NoOutputDevice)?;
        let supported = device.default_output_config()?;
        let sample_format = supported.sample_format();
        let mut stream_config: cpal::StreamConfig = supported.into();
        if let Some(rate) = self.config.sample_rate_hint {
            stream_config.sample_rate = cpal::SampleRate(rate);
        }
        let sample_rate = stream_config.sample_rate.0 as f32;
        let channels = stream_config.channels as usize;

        let clock = Arc::new(AudioClock::new(sample_rate));
        let (voice_tx, voice_rx) = rtrb::RingBuffer::new(VOICE_RING_CAPACITY);
        let (step_tx, step_rx) = rtrb::RingBuffer::new(STEP_RING_CAPACITY);
        let (monitor_tx, monitor_rx) = rtrb::RingBuffer::new(MONITOR_RING_CAPACITY);

        let mut renderer = Renderer::new(
            voice_rx,
            monitor_tx,
            Arc::clone(&clock),
            Arc::clone(&self.master_gain),
            self.config.max_voices,
        );
        let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = match sample_format {
            cpal::SampleFormat::F32 => device.build_output_stream(
                &stream_config,
                move |data: &mut [f32], _| {
                    for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                        let frames = chunk.len() / channels;
                        let block = &mut mono[..frames];
                        renderer.render(block);
                        for (frame, &sample) in chunk.chunks_mut(channels).zip(block.iter()) {
                            frame.fill(sample);
                        }
                    }
                },
                |err| log::warn!("audio stream error: {err}"),
                None,
            )?,
            other => return Err(EngineError::UnsupportedSampleFormat(other)),
        };
        stream.play()?;

        log::debug!("audio stream open at {sample_rate} Hz, {channels} channel(s)");
        self.monitor = Some(SignalMonitor::new(monitor_rx));
        self.step_rx = Some(step_rx);
        self.idle = Some((voice_tx, step_tx));
        self.audio = Some(AudioStack {
            clock,
            _stream: stream,
        });
        Ok(())
    }

    /// Spawn the control thread and begin playback from step zero.
    pub fn start(&mut self) {
        if self.playing.load(Ordering::Relaxed) {
            return;
        }
        let Some(audio) = &self.audio else {
            log::debug!("start() before init(): ignored");
            return;
        };
        let Some((voice_tx, step_tx)) = self.idle.take() else {
            log::warn!("control channel unavailable; cannot start");
            return;
        };

        self.playing.store(true, Ordering::Relaxed);
        let clock = Arc::clone(&audio.clock);
        let session = Arc::clone(&self.session);
        let playing = Arc::clone(&self.playing);
        let spawned = thread::Builder::new()
            .name("bandbox-control".into())
            .spawn(move || scheduler::run_control_loop(clock, session, playing, voice_tx, step_tx));
        match spawned {
            Ok(handle) => self.control = Some(handle),
            Err(e) => {
                log::warn!("could not spawn the control thread: {e}");
                self.playing.store(false, Ordering::Relaxed);
            }
        }
    }

    /// Stop scheduling and join the control thread. Sound already committed
    /// (up to the lookahead horizon) plays out. Idempotent.
    pub fn stop(&mut self) {
        self.playing.store(false, Ordering::Relaxed);
        if let Some(handle) = self.control.take() {
            match handle.join() {
                Ok(producers) => self.idle = Some(producers),
                Err(_) => log::warn!("control thread panicked; playback disabled"),
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    /// Shared musical state. The guard blocks only the control thread's
    /// next tick, never the audio callback.
    pub fn session(&self) -> MutexGuard<'_, Session> {
        match self.session.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn set_bpm(&self, bpm: u32) {
        self.session().set_bpm(bpm);
    }

    pub fn set_swing(&self, swing: f32) {
        self.session().set_swing(swing);
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain.load()
    }

    pub fn set_master_gain(&self, gain: f32) {
        self.master_gain.store(gain.clamp(0.0, 1.0));
    }

    /// Drain step notifications in commit order.
    pub fn poll_steps(&mut self, mut on_step: impl FnMut(usize)) {
        if let Some(rx) = &mut self.step_rx {
            while let Ok(step) = rx.pop() {
                on_step(step);
            }
        }
    }

    /// The output tap, present once `init()` has succeeded.
    pub fn monitor_mut(&mut self) -> Option<&mut SignalMonitor> {
        self.monitor.as_mut()
    }

    pub fn monitor(&self) -> Option<&SignalMonitor> {
        self.monitor.as_ref()
    }

    pub fn sample_rate(&self) -> Option<f32> {
        self.audio.as_ref().map(|audio| audio.clock.sample_rate())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_f32_round_trips() {
        let gain = AtomicF32::new(0.8);
        assert_eq!(gain.load(), 0.8);
        gain.store(0.25);
        assert_eq!(gain.load(), 0.25);
    }

    #[test]
    fn test_engine_without_device_is_inert() {
        // No init(): every control mutates state without touching audio.
        let mut engine = Engine::new(EngineConfig::default());
        assert!(!engine.is_playing());
        engine.start();
        assert!(!engine.is_playing(), "start before init is a no-op");
        engine.stop();
        engine.set_bpm(97);
        assert_eq!(engine.session().bpm(), 97);
        engine.set_master_gain(2.0);
        assert_eq!(engine.master_gain(), 1.0, "gain clamps");
        engine.poll_steps(|_| panic!("no steps without a control thread"));
        assert!(engine.monitor_mut().is_none());
        assert!(engine.sample_rate().is_none());
    }

    #[test]
    fn test_config_shapes_the_session() {
        let config = EngineConfig {
            bpm: 300,
            swing: 0.4,
            step_count: 16,
            ..EngineConfig::default()
        };
        let engine = Engine::new(config);
        let session = engine.session();
        assert_eq!(session.bpm(), 220, "bpm clamps into range");
        assert_eq!(session.swing(), 0.4);
        assert_eq!(session.pattern.step_count(), 16);
    }
}
