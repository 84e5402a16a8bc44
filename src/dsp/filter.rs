use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type              | passes          | rejects       | used by                  |
| ----------------- | --------------- | ------------- | ------------------------ |
| low-pass          | below cutoff    | above cutoff  | bass, synth-keys sweeps  |
| high-pass         | above cutoff    | below cutoff  | cymbals                  |
| band-pass         | around cutoff   | outside       | snare, clap, guitar body |
| notch / band-stop | outside         | around        | (available)              |
| peaking           | all             | cuts one band | electric-guitar cabinet  |

The state-variable filter is a TPT (topology-preserving transform)
discretization: two integrator memories, cutoff prewarped through tan so the
response stays correct near Nyquist. One pass computes all four responses;
callers pick the one they need.

Resonance here is a 0..1 damping control (k = 2 - 2*resonance). Musically
minded callers think in Q, so `resonance_from_q` converts: k = 1/Q, i.e.
r = 1 - 1/(2Q). High-Q resonators (the guitar body bank runs Q up to 40)
approach but never reach the self-oscillation limit.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

/// Map a musical Q factor onto the 0..1 resonance control.
pub fn resonance_from_q(q: f32) -> f32 {
    let q = q.max(0.5);
    (1.0 - 1.0 / (2.0 * q)).clamp(0.0, 0.99)
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    pub cutoff_hz: f32,
    pub resonance: f32,
    mode: FilterMode,
}

impl SVFilter {
    pub fn new(mode: FilterMode, cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            resonance: 0.0,
            mode,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterMode::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterMode::HighPass, cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterMode::BandPass, cutoff_hz)
    }

    pub fn notch(cutoff_hz: f32) -> Self {
        Self::new(FilterMode::Notch, cutoff_hz)
    }

    pub fn with_q(mut self, q: f32) -> Self {
        self.resonance = resonance_from_q(q);
        self
    }

    #[inline]
    fn compute_g(&self, sample_rate: f32) -> f32 {
        let wd = TAU * self.cutoff_hz;
        let wa = (2.0 * sample_rate) * (wd / (2.0 * sample_rate)).tan();
        wa / (2.0 * sample_rate)
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    /// Filter `buffer` in place at the current cutoff and resonance.
    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        let g = self.compute_g(sample_rate);
        let k = 2.0 - (2.0 * self.resonance);

        for sample in buffer.iter_mut() {
            let outputs = self.next_sample(*sample, k, g);

            *sample = match self.mode {
                FilterMode::LowPass => outputs.lowpass,
                FilterMode::HighPass => outputs.highpass,
                FilterMode::BandPass => outputs.bandpass,
                FilterMode::Notch => outputs.notch,
            }
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.0, 0.99);
    }
}

/// RBJ peaking EQ section (Audio EQ Cookbook), direct form 1.
///
/// Boosts or cuts a band around `frequency` by `gain_db`. The electric
/// guitar voice uses a -6 dB cut at 2 kHz as a crude cabinet.
pub struct PeakingFilter {
    frequency: f32,
    q: f32,
    gain_db: f32,

    // Coefficients are derived lazily from the first sample rate seen.
    sample_rate: f32,
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl PeakingFilter {
    pub fn new(frequency: f32, q: f32, gain_db: f32) -> Self {
        Self {
            frequency,
            q: q.max(0.1),
            gain_db,
            sample_rate: 0.0,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    fn update_coefficients(&mut self, sample_rate: f32) {
        let a = 10.0f32.powf(self.gain_db / 40.0);
        let w0 = TAU * self.frequency / sample_rate;
        let alpha = w0.sin() / (2.0 * self.q);
        let cos_w0 = w0.cos();

        let a0 = 1.0 + alpha / a;
        self.b0 = (1.0 + alpha * a) / a0;
        self.b1 = (-2.0 * cos_w0) / a0;
        self.b2 = (1.0 - alpha * a) / a0;
        self.a1 = (-2.0 * cos_w0) / a0;
        self.a2 = (1.0 - alpha / a) / a0;
        self.sample_rate = sample_rate;
    }

    #[inline]
    pub fn next_sample(&mut self, x: f32, sample_rate: f32) -> f32 {
        if self.sample_rate != sample_rate {
            self.update_coefficients(sample_rate);
        }

        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}
