use crate::dsp::ParamCurve;
use crate::graph::node::{GraphNode, RenderCtx};

/// Multiplies the signal by an automated gain curve.
///
/// This is where every voice's amplitude envelope lives: the curve is
/// evaluated per sample against the node's own running clock, so a voice
/// scheduled mid-block still sees its envelope start at zero.
pub struct GainNode {
    curve: ParamCurve,
    pos: u64,
}

impl GainNode {
    pub fn new(curve: ParamCurve) -> Self {
        Self { curve, pos: 0 }
    }
}

impl GraphNode for GainNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let sample_rate = ctx.sample_rate as f64;
        for sample in out.iter_mut() {
            let t = (self.pos as f64 / sample_rate) as f32;
            *sample *= self.curve.value_at(t);
            self.pos += 1;
        }
    }
}
