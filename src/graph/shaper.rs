use crate::dsp::waveshaper::TransferCurve;
use crate::graph::node::{GraphNode, RenderCtx};

/// Waveshaping distortion as a graph effect.
///
/// The electric-guitar voice runs two detuned saws through one of these at
/// a drive of 150 before the cabinet EQ.
pub struct ShaperNode {
    curve: TransferCurve,
}

impl ShaperNode {
    pub fn new(drive: f32) -> Self {
        Self {
            curve: TransferCurve::overdrive(drive),
        }
    }
}

impl GraphNode for ShaperNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.curve.render(out);
    }
}
