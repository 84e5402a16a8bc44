use crate::dsp::automation::ParamCurve;
use crate::dsp::oscillator::{Oscillator, Waveform};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Oscillator Source Node
======================

One pitched source inside a voice graph. Everything about it is decided at
build time:

  frequency   a ParamCurve, so pitch can fall (kick, tom) or hold steady
              (keys, bass) without any external modulation wiring

  level       fixed amplitude scale, used for partial banks where each
              overtone enters the shared filter at its own weight

  stop_at     explicit end of life in seconds from the voice start; after
              this the node renders silence and reports finished

Time is the node's own sample counter divided by the sample rate. The
counter keeps advancing after the stop so sibling branches in a Stack stay
aligned no matter who finishes first.
*/

pub struct OscNode {
    osc: Oscillator,
    frequency: ParamCurve,
    level: f32,
    stop_at: f32,
    pos: u64,
    stop_sample: Option<u64>,
}

impl OscNode {
    pub fn new(waveform: Waveform, frequency: ParamCurve, stop_at: f32) -> Self {
        Self {
            osc: Oscillator::new(waveform),
            frequency,
            level: 1.0,
            stop_at,
            pos: 0,
            stop_sample: None,
        }
    }

    pub fn sine(frequency: ParamCurve, stop_at: f32) -> Self {
        Self::new(Waveform::Sine, frequency, stop_at)
    }

    pub fn triangle(frequency: ParamCurve, stop_at: f32) -> Self {
        Self::new(Waveform::Triangle, frequency, stop_at)
    }

    pub fn sawtooth(frequency: ParamCurve, stop_at: f32) -> Self {
        Self::new(Waveform::Sawtooth, frequency, stop_at)
    }

    pub fn square(frequency: ParamCurve, stop_at: f32) -> Self {
        Self::new(Waveform::Square, frequency, stop_at)
    }

    /// Fixed amplitude scale applied to every sample.
    pub fn with_level(mut self, level: f32) -> Self {
        self.level = level;
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let sample_rate = ctx.sample_rate;
        let stop = (self.stop_at as f64 * sample_rate as f64) as u64;
        self.stop_sample = Some(stop);

        for sample in out.iter_mut() {
            if self.pos >= stop {
                *sample = 0.0;
            } else {
                let t = self.pos as f32 / sample_rate;
                let freq = self.frequency.value_at(t);
                *sample = self.osc.next_sample(freq, sample_rate) * self.level;
            }
            self.pos += 1;
        }
    }

    fn is_finished(&self) -> bool {
        matches!(self.stop_sample, Some(stop) if self.pos >= stop)
    }
}
