//! Bass voices: round finger-style electric and an acid-flavored synth.

use crate::dsp::ParamCurve;
use crate::graph::extensions::NodeExt;
use crate::graph::oscillator::OscNode;
use crate::graph::stack::Stack;
use crate::graph::GraphNode;

/// Triangle and sine doubled at the fundamental, low-passed to round off
/// what little edge the triangle brings. Plucked envelope with a short hold.
pub fn electric(frequency: f32, level: f32) -> Box<dyn GraphNode> {
    Stack::pair(
        OscNode::triangle(ParamCurve::fixed(frequency), 0.65),
        OscNode::sine(ParamCurve::fixed(frequency), 0.65),
    )
    .lowpass(800.0, 0.707)
    .gain(
        ParamCurve::at(0.0)
            .linear_to(level, 0.01)
            .set_at(level, 0.1)
            .exp_to(0.001, 0.6),
    )
    .boxed()
}

/// Saw into a hard-resonant low-pass slamming shut, 3 kHz down to 100 Hz.
pub fn synth(frequency: f32, level: f32) -> Box<dyn GraphNode> {
    let sweep = ParamCurve::at(3_000.0).exp_to(100.0, 0.3);
    OscNode::sawtooth(ParamCurve::fixed(frequency), 0.55)
        .lowpass_swept(sweep, 12.0)
        .gain(
            ParamCurve::at(0.0)
                .linear_to(level * 0.9, 0.008)
                .exp_to(0.001, 0.5),
        )
        .boxed()
}
