use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Oscillators and Noise
=====================

Phase-accumulator oscillator: `phase` runs [0, 1) and advances by
freq / sample_rate each sample. Frequency is passed per sample rather than
stored, because pitched voices automate it (kick drops, tom drops) and the
owning node reads the value off a ParamCurve anyway.

Waveform start phases are not aligned to zero crossings; every voice opens
with an amplitude ramp from zero, which is what actually prevents onset
clicks.

Noise is not an oscillator here. Percussive voices want a private buffer of
randomness per trigger (two overlapping snares must not correlate), so noise
is materialized into a Vec by the control thread at build time and played
back by a NoiseNode. The generator is a 32-bit xorshift: deterministic under
seed, no dependency, plenty random for percussion.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

/// Free-running single-waveform oscillator.
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    /// Produce one sample at `frequency` Hz, then advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let phase = self.phase;
        let sample = match self.waveform {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        };

        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }

        sample
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// 32-bit xorshift PRNG for noise generation.
#[derive(Debug, Clone)]
pub struct XorShift {
    state: u32,
}

impl XorShift {
    pub fn new(seed: u32) -> Self {
        // Xorshift has a single fixed point at zero.
        let state = if seed == 0 { 0x9E37_79B9 } else { seed };
        Self { state }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform sample in [-1, 1].
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

/// Fill a fresh buffer with white noise.
pub fn noise_buffer(len: usize, rng: &mut XorShift) -> Vec<f32> {
    (0..len).map(|_| rng.next_f32()).collect()
}

/// White noise shaped by a per-sample exponential decay.
///
/// `decay_samples` is the time constant: amplitude falls to 1/e of its
/// starting value after that many samples.
pub fn decaying_noise(len: usize, decay_samples: f32, rng: &mut XorShift) -> Vec<f32> {
    let decay = decay_samples.max(1.0);
    (0..len)
        .map(|i| rng.next_f32() * (-(i as f32) / decay).exp())
        .collect()
}
