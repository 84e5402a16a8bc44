use std::sync::atomic::{AtomicU64, Ordering};

/// Time as the audio device sees it: frames rendered so far.
///
/// The renderer advances the counter once per block; everyone else converts
/// to seconds by dividing by the sample rate. Scheduling against this clock
/// rather than the wall clock is what keeps the sequencer drift-free: if the
/// device stalls, musical time stalls with it.
pub struct AudioClock {
    frames: AtomicU64,
    sample_rate: f32,
}

impl AudioClock {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            frames: AtomicU64::new(0),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn frames(&self) -> u64 {
        // Plain counter; nothing synchronizes through it.
        self.frames.load(Ordering::Relaxed)
    }

    /// Seconds of audio rendered since the stream opened.
    pub fn now(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub fn advance(&self, frames: usize) {
        self.frames.fetch_add(frames as u64, Ordering::Relaxed);
    }

    /// The frame on which a scheduled time lands.
    pub fn frame_at(&self, time: f64) -> u64 {
        (time.max(0.0) * self.sample_rate as f64).round() as u64
    }
}
