//! Shared musical state: pattern, mixer, tempo, feel.
//!
//! One `Session` sits behind a mutex shared by the front end (edits) and the
//! control thread (reads during scheduling). The audio callback never sees
//! it; everything the callback needs crosses over lock-free.

use crate::mixer::Mixer;
use crate::pattern::{PatternGrid, DEFAULT_STEP_COUNT};

pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 220;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    pub pattern: PatternGrid,
    pub mixer: Mixer,
    bpm: u32,
    swing: f32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            pattern: PatternGrid::with_default_pattern(DEFAULT_STEP_COUNT),
            mixer: Mixer::default(),
            bpm: 120,
            swing: 0.0,
        }
    }
}

impl Session {
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn set_bpm(&mut self, bpm: u32) {
        self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
    }

    /// Swing amount: 0 is straight time, 1 delays every off-beat step by
    /// half a step.
    pub fn swing(&self) -> f32 {
        self.swing
    }

    pub fn set_swing(&mut self, swing: f32) {
        self.swing = swing.clamp(0.0, 1.0);
    }

    /// Seconds per sixteenth-note step at the current tempo.
    pub fn seconds_per_step(&self) -> f64 {
        (60.0 / self.bpm as f64) / 4.0
    }
}
