/* Signal Monitor

   Pull-model tap on the mix bus. The renderer pushes every output sample
   into a ring; the front end calls refresh() once per frame, which drains
   the ring into a rolling 2048-sample window and recomputes two snapshots:

     waveform()   the newest 1024 samples, oldest first
     spectrum()   1024 bins: Hann window -> 2048-point FFT -> magnitude,
                  smoothed across polls, mapped to [0, 1] over -100..-30 dB

   Smoothing runs on the linear magnitudes before the dB conversion, so a
   transient decays on screen instead of flickering. There is no history:
   whatever happened between two polls beyond one window is gone.
*/

use std::sync::Arc;

use rtrb::Consumer;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

pub const FFT_SIZE: usize = 2048;
pub const WAVEFORM_POINTS: usize = 1024;
pub const SPECTRUM_BINS: usize = FFT_SIZE / 2;

const DB_FLOOR: f32 = -100.0;
const DB_CEIL: f32 = -30.0;

/// Per-poll smoothing factor on linear magnitudes: how much of the previous
/// frame survives.
const SMOOTHING: f32 = 0.8;

pub struct SignalMonitor {
    tap: Consumer<f32>,
    window: Vec<f32>,
    write: usize,
    hann: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    spectrum: Vec<f32>,
    waveform: Vec<f32>,
}

impl SignalMonitor {
    pub fn new(tap: Consumer<f32>) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);

        let denom = (FFT_SIZE - 1) as f32;
        let hann = (0..FFT_SIZE)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        Self {
            tap,
            window: vec![0.0; FFT_SIZE],
            write: 0,
            hann,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); FFT_SIZE],
            smoothed: vec![0.0; SPECTRUM_BINS],
            spectrum: vec![0.0; SPECTRUM_BINS],
            waveform: vec![0.0; WAVEFORM_POINTS],
        }
    }

    /// Drain the tap and recompute both snapshots. Call once per UI frame.
    pub fn refresh(&mut self) {
        while let Ok(sample) = self.tap.pop() {
            self.window[self.write] = sample;
            self.write = (self.write + 1) % FFT_SIZE;
        }

        // Newest WAVEFORM_POINTS samples, in arrival order.
        for (i, slot) in self.waveform.iter_mut().enumerate() {
            let index = (self.write + FFT_SIZE - WAVEFORM_POINTS + i) % FFT_SIZE;
            *slot = self.window[index];
        }

        // Whole window, oldest first, Hann-tapered.
        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let index = (self.write + i) % FFT_SIZE;
            slot.re = self.window[index] * self.hann[i];
            slot.im = 0.0;
        }
        self.fft.process(&mut self.scratch);

        for bin in 0..SPECTRUM_BINS {
            let magnitude = self.scratch[bin].norm() / FFT_SIZE as f32;
            let smoothed = SMOOTHING * self.smoothed[bin] + (1.0 - SMOOTHING) * magnitude;
            self.smoothed[bin] = smoothed;
            let db = 20.0 * smoothed.max(1e-12).log10();
            self.spectrum[bin] = ((db - DB_FLOOR) / (DB_CEIL - DB_FLOOR)).clamp(0.0, 1.0);
        }
    }

    /// The newest window of output samples, oldest first.
    pub fn waveform(&self) -> &[f32] {
        &self.waveform
    }

    /// Normalized bin magnitudes, DC upward. Bin k covers
    /// `k * sample_rate / 2048` Hz.
    pub fn spectrum(&self) -> &[f32] {
        &self.spectrum
    }
}
