#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Master-Bus Compressor
=====================

Feed-forward design: a peak envelope follower tracks the input level, a
static gain computer maps that level (in dB) to a gain reduction, and the
reduced gain multiplies the signal. Nothing feeds back, so the response is
predictable and the curve is exactly the configured one.

Gain computer (soft knee): below threshold - knee/2 the gain is unity; above
threshold + knee/2 the slope is 1/ratio; between, a quadratic blends the two
so the transition doesn't pump audibly.

          output dB
             |        ____ slope 1/ratio
             |   ___--
             | _/   <- knee (quadratic blend)
             |/
     unity ->/
            /|__________ input dB
          threshold

The envelope follower is a one-pole RC: fast attack (3 ms) so transients
don't slam the bus, slow release (250 ms) so the gain doesn't flutter
between steps. Coefficients derive from the first sample rate seen.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct CompressorParams {
    pub threshold_db: f32,
    pub knee_db: f32,
    pub ratio: f32,
    pub attack: f32,
    pub release: f32,
}

impl Default for CompressorParams {
    fn default() -> Self {
        Self {
            threshold_db: -12.0,
            knee_db: 6.0,
            ratio: 4.0,
            attack: 0.003,
            release: 0.25,
        }
    }
}

pub struct Compressor {
    params: CompressorParams,
    envelope: f32,

    sample_rate: f32,
    attack_coeff: f32,
    release_coeff: f32,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(CompressorParams::default())
    }
}

impl Compressor {
    pub fn new(params: CompressorParams) -> Self {
        Self {
            params,
            envelope: 0.0,
            sample_rate: 0.0,
            attack_coeff: 1.0,
            release_coeff: 1.0,
        }
    }

    fn update_coefficients(&mut self, sample_rate: f32) {
        // One-pole step response: coeff = 1 - e^(-1 / (t * sr))
        self.attack_coeff = 1.0 - (-1.0 / (self.params.attack * sample_rate)).exp();
        self.release_coeff = 1.0 - (-1.0 / (self.params.release * sample_rate)).exp();
        self.sample_rate = sample_rate;
    }

    /// Static gain curve: input level in dB -> gain reduction in dB (<= 0).
    fn gain_reduction_db(&self, level_db: f32) -> f32 {
        let over = level_db - self.params.threshold_db;
        let knee = self.params.knee_db;
        let slope = 1.0 / self.params.ratio - 1.0;

        if 2.0 * over < -knee {
            0.0
        } else if 2.0 * over.abs() <= knee {
            slope * (over + knee * 0.5).powi(2) / (2.0 * knee)
        } else {
            slope * over
        }
    }

    pub fn process_block(&mut self, buffer: &mut [f32], sample_rate: f32) {
        if self.sample_rate != sample_rate {
            self.update_coefficients(sample_rate);
        }

        for sample in buffer.iter_mut() {
            let rectified = sample.abs();
            let coeff = if rectified > self.envelope {
                self.attack_coeff
            } else {
                self.release_coeff
            };
            self.envelope += (rectified - self.envelope) * coeff;

            let level_db = 20.0 * self.envelope.max(1e-6).log10();
            let gain = 10.0f32.powf(self.gain_reduction_db(level_db) / 20.0);
            *sample *= gain;
        }
    }

    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}
