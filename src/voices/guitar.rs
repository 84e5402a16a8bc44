//! Guitar voices.
//!
//! The acoustic variant is resonator-based: a decaying noise pluck excites
//! three high-Q band-pass filters tuned to the string's first three modes,
//! each mode dying at its own rate (high modes first, as on a real string).
//! The electric variant is two detuned saws into a waveshaper and a cabinet
//! notch.

use crate::dsp::oscillator::{decaying_noise, XorShift};
use crate::dsp::ParamCurve;
use crate::graph::extensions::NodeExt;
use crate::graph::filter::FilterNode;
use crate::graph::gain::GainNode;
use crate::graph::noise::NoiseNode;
use crate::graph::oscillator::OscNode;
use crate::graph::stack::{Split, Stack};
use crate::graph::through::FxChain;
use crate::graph::GraphNode;

const MODE_GAINS: [f32; 3] = [0.70, 0.35, 0.15];
const MODE_DECAYS: [f32; 3] = [1.2, 0.8, 0.5];

pub fn acoustic(
    frequency: f32,
    level: f32,
    sample_rate: f32,
    rng: &mut XorShift,
) -> Box<dyn GraphNode> {
    // Half a second of pluck noise, decayed over a 20 ms constant. The source
    // stays alive to the longest mode decay so the resonators ring out.
    let len = (sample_rate * 0.5) as usize;
    let buffer = decaying_noise(len, sample_rate * 0.02, rng);
    let excitation = NoiseNode::new(buffer, 1.0).with_stop(MODE_DECAYS[0]);

    let modes = (0..3)
        .map(|i| {
            let harmonic = (i + 1) as f32;
            let q = 20.0 + i as f32 * 10.0;
            let envelope = ParamCurve::at(0.0)
                .linear_to(level * MODE_GAINS[i], 0.002)
                .exp_to(0.001, MODE_DECAYS[i]);
            FxChain::new(vec![
                Box::new(FilterNode::bandpass(frequency * harmonic, q)),
                Box::new(GainNode::new(envelope)),
            ])
            .boxed()
        })
        .collect();

    Split::new(Box::new(excitation), modes).boxed()
}

pub fn electric(frequency: f32, level: f32) -> Box<dyn GraphNode> {
    let saws = Stack::pair(
        OscNode::sawtooth(ParamCurve::fixed(frequency), 0.72),
        // A nickel's worth of detune thickens the pair into one wide voice.
        OscNode::sawtooth(ParamCurve::fixed(frequency * 1.005), 0.72),
    );
    saws.shaped(150.0)
        .peaking(2_000.0, 1.0, -6.0)
        .gain(
            ParamCurve::at(0.0)
                .linear_to(level * 0.4, 0.002)
                .exp_to(0.001, 0.7),
        )
        .boxed()
}
