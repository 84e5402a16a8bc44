//! Keys voices: additive piano, filter-swept synth, drawbar organ.

use crate::dsp::ParamCurve;
use crate::graph::extensions::NodeExt;
use crate::graph::oscillator::OscNode;
use crate::graph::stack::Stack;
use crate::graph::GraphNode;

const PIANO_AMPS: [f32; 5] = [0.70, 0.25, 0.12, 0.06, 0.03];

const DRAWBAR_HARMONICS: [f32; 6] = [1.0, 2.0, 3.0, 4.0, 6.0, 8.0];
const DRAWBAR_LEVELS: [f32; 6] = [0.50, 0.40, 0.30, 0.20, 0.15, 0.10];

/// Five harmonics, each with its own attack-settle-decay envelope. The fast
/// settle from full level to 60% around 100 ms is what reads as "struck
/// string" rather than "organ".
pub fn piano(frequency: f32, level: f32) -> Box<dyn GraphNode> {
    let partials = PIANO_AMPS
        .iter()
        .enumerate()
        .map(|(i, &weight)| {
            let amp = level * weight;
            let harmonic = (i + 1) as f32;
            OscNode::sine(ParamCurve::fixed(frequency * harmonic), 1.25)
                .gain(
                    ParamCurve::at(0.0)
                        .linear_to(amp, 0.005)
                        .exp_to(amp * 0.6, 0.1)
                        .exp_to(0.001, 1.2),
                )
                .boxed()
        })
        .collect();
    Stack::new(partials).boxed()
}

/// Sawtooth through a resonant low-pass whose cutoff blooms open and half
/// closes again, the bread-and-butter subtractive pluck.
pub fn synth(frequency: f32, level: f32) -> Box<dyn GraphNode> {
    let sweep = ParamCurve::at(200.0)
        .exp_to(4_000.0, 0.15)
        .exp_to(800.0, 0.5);
    OscNode::sawtooth(ParamCurve::fixed(frequency), 0.85)
        .lowpass_swept(sweep, 8.0)
        .gain(
            ParamCurve::at(0.0)
                .linear_to(level, 0.01)
                .exp_to(level * 0.6, 0.1)
                .exp_to(0.001, 0.8),
        )
        .boxed()
}

/// Sine drawbars held flat, then a quick linear release. No decay while
/// held; organs sustain.
pub fn organ(frequency: f32, level: f32) -> Box<dyn GraphNode> {
    let drawbars = DRAWBAR_HARMONICS
        .iter()
        .zip(DRAWBAR_LEVELS.iter())
        .map(|(&harmonic, &weight)| {
            let amp = level * weight;
            OscNode::sine(ParamCurve::fixed(frequency * harmonic), 0.46)
                .gain(
                    ParamCurve::at(0.0)
                        .linear_to(amp, 0.005)
                        .set_at(amp, 0.4)
                        .linear_to(0.0, 0.45),
                )
                .boxed()
        })
        .collect();
    Stack::new(drawbars).boxed()
}
