use crate::dsp::filter::{resonance_from_q, PeakingFilter, SVFilter};
use crate::dsp::ParamCurve;
use crate::graph::node::{GraphNode, RenderCtx};

/// Cutoff automation is applied in chunks of this many samples. Coefficient
/// updates are the expensive part of the filter; 32 samples is under a
/// millisecond at any rate we run at, well below audible zipper noise.
const SWEEP_QUANTUM: usize = 32;

/// State-variable filter as a graph effect, with optional cutoff sweeps.
///
/// The synth-keys and synth-bass voices drive the sweep hard (200 Hz to
/// 4 kHz in 150 ms); percussion voices use the fixed form.
pub struct FilterNode {
    filter: SVFilter,
    sweep: Option<ParamCurve>,
    pos: u64,
}

impl FilterNode {
    pub fn new(filter: SVFilter) -> Self {
        Self {
            filter,
            sweep: None,
            pos: 0,
        }
    }

    pub fn lowpass(cutoff: f32, q: f32) -> Self {
        Self::new(SVFilter::lowpass(cutoff).with_q(q))
    }

    pub fn highpass(cutoff: f32, q: f32) -> Self {
        Self::new(SVFilter::highpass(cutoff).with_q(q))
    }

    pub fn bandpass(cutoff: f32, q: f32) -> Self {
        Self::new(SVFilter::bandpass(cutoff).with_q(q))
    }

    /// Automate the cutoff with a breakpoint curve (Hz over seconds).
    pub fn with_sweep(mut self, sweep: ParamCurve) -> Self {
        self.sweep = Some(sweep);
        self
    }

    pub fn lowpass_swept(sweep: ParamCurve, q: f32) -> Self {
        let start = sweep.value_at(0.0);
        Self::lowpass(start, q).with_sweep(sweep)
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        match &self.sweep {
            None => {
                self.filter.render(out, ctx.sample_rate);
                self.pos += out.len() as u64;
            }
            Some(sweep) => {
                let sample_rate = ctx.sample_rate as f64;
                // Nyquist guard: the curve is free to ask for anything.
                let max_cutoff = 0.49 * ctx.sample_rate;
                for chunk in out.chunks_mut(SWEEP_QUANTUM) {
                    let t = (self.pos as f64 / sample_rate) as f32;
                    let cutoff = sweep.value_at(t).clamp(10.0, max_cutoff);
                    self.filter.set_cutoff(cutoff);
                    self.filter.render(chunk, ctx.sample_rate);
                    self.pos += chunk.len() as u64;
                }
            }
        }
    }
}

/// RBJ peaking EQ as a graph effect. The electric-guitar voice uses one as
/// a cabinet: a -6 dB notch at 2 kHz after the waveshaper.
pub struct PeakingNode {
    filter: PeakingFilter,
}

impl PeakingNode {
    pub fn new(frequency: f32, q: f32, gain_db: f32) -> Self {
        Self {
            filter: PeakingFilter::new(frequency, q, gain_db),
        }
    }
}

impl GraphNode for PeakingNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx.sample_rate);
    }
}
