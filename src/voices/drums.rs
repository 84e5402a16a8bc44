//! Drum voices.
//!
//! Seven sounds, each built from first principles:
//!
//! - kick: pitch-swept sine (3x the base frequency falling over 60 ms), the
//!   classic "thump"; the acoustic variant adds a short noise click for the
//!   beater transient
//! - snare: flat noise burst through a band-pass (the wire rattle) over a
//!   short sine body (the drum head)
//! - hihat / openhat / crash: banks of square waves at inharmonic frequency
//!   ratios, high-passed so only the metallic shimmer survives
//! - tom: the kick recipe, higher and slower
//! - clap: three staggered noise bursts, because a clap is many hands almost
//!   together
//!
//! The inharmonic ratio sets are the classic TR-808 cymbal trick: ratios
//! chosen so no partial is an integer multiple of another.

use crate::dsp::oscillator::{decaying_noise, noise_buffer, XorShift};
use crate::dsp::ParamCurve;
use crate::graph::extensions::NodeExt;
use crate::graph::noise::NoiseNode;
use crate::graph::oscillator::OscNode;
use crate::graph::stack::Stack;
use crate::graph::GraphNode;
use crate::voices::DrumVariant;

/// Linear onset applied to every percussive envelope. Short enough to be
/// inaudible as an attack, long enough to avoid a click at the voice start.
const ONSET: f32 = 0.002;

const HAT_RATIOS: [f32; 6] = [1.0, 1.3717, 1.5420, 1.7320, 2.0, 2.3960];
const CRASH_RATIOS: [f32; 8] = [1.0, 1.1, 1.47, 1.66, 1.88, 2.1, 2.35, 2.8];

/// Ramp up over `ONSET`, then decay exponentially to the floor at `decay`.
fn percussive(level: f32, decay: f32) -> ParamCurve {
    ParamCurve::at(0.0)
        .linear_to(level, ONSET)
        .exp_to(0.001, decay)
}

pub fn kick(
    variant: DrumVariant,
    level: f32,
    sample_rate: f32,
    rng: &mut XorShift,
) -> Box<dyn GraphNode> {
    let base = match variant {
        DrumVariant::Acoustic => 55.0,
        DrumVariant::Electronic => 60.0,
    };
    let sweep = ParamCurve::at(base * 3.0).exp_to(base, 0.06);
    let body = OscNode::sine(sweep, 0.41).gain(percussive(level, 0.4));

    match variant {
        DrumVariant::Electronic => body.boxed(),
        DrumVariant::Acoustic => {
            // Beater click: 30 ms of noise already decayed inside the buffer.
            let len = (sample_rate * 0.03) as usize;
            let buffer = decaying_noise(len, len as f32 * 0.3, rng);
            let click = NoiseNode::new(buffer, 1.0)
                .gain(ParamCurve::at(0.0).linear_to(level * 0.4, ONSET));
            Stack::pair(body, click).boxed()
        }
    }
}

pub fn snare(
    variant: DrumVariant,
    level: f32,
    sample_rate: f32,
    rng: &mut XorShift,
) -> Box<dyn GraphNode> {
    let (burst, center, tone) = match variant {
        DrumVariant::Acoustic => (0.22, 1500.0, 180.0),
        DrumVariant::Electronic => (0.18, 2000.0, 220.0),
    };
    let len = (sample_rate * burst) as usize;
    let rattle = NoiseNode::new(noise_buffer(len, rng), 1.0)
        .bandpass(center, 0.8)
        .gain(percussive(level * 0.8, burst));
    let body =
        OscNode::sine(ParamCurve::fixed(tone), 0.12).gain(percussive(level * 0.3, 0.1));
    Stack::pair(rattle, body).boxed()
}

/// Square-bank cymbal: partials at `base * ratios`, high-passed, one shared
/// decay envelope.
fn cymbal(ratios: &[f32], base: f32, cutoff: f32, level: f32, decay: f32) -> Box<dyn GraphNode> {
    let stop = decay + 0.01;
    let partials = ratios
        .iter()
        .map(|&r| OscNode::square(ParamCurve::fixed(base * r), stop).boxed())
        .collect();
    Stack::new(partials)
        .highpass(cutoff, 0.707)
        .gain(percussive(level, decay))
        .boxed()
}

pub fn hihat(variant: DrumVariant, level: f32) -> Box<dyn GraphNode> {
    let decay = match variant {
        DrumVariant::Acoustic => 0.08,
        DrumVariant::Electronic => 0.06,
    };
    cymbal(&HAT_RATIOS, 4000.0, 8000.0, level * 0.15, decay)
}

pub fn openhat(level: f32) -> Box<dyn GraphNode> {
    cymbal(&HAT_RATIOS, 4000.0, 7000.0, level * 0.12, 0.3)
}

pub fn crash(level: f32) -> Box<dyn GraphNode> {
    cymbal(&CRASH_RATIOS, 3000.0, 5000.0, level * 0.08, 1.2)
}

pub fn tom(variant: DrumVariant, level: f32) -> Box<dyn GraphNode> {
    let base = match variant {
        DrumVariant::Acoustic => 110.0,
        DrumVariant::Electronic => 140.0,
    };
    let sweep = ParamCurve::at(base * 1.5).exp_to(base, 0.08);
    OscNode::sine(sweep, 0.36)
        .gain(percussive(level, 0.35))
        .boxed()
}

pub fn clap(level: f32, sample_rate: f32, rng: &mut XorShift) -> Box<dyn GraphNode> {
    let len = (sample_rate * 0.05) as usize;
    let bursts = (0..3)
        .map(|i| {
            let onset = i as f32 * 0.01;
            NoiseNode::new(noise_buffer(len, rng), 1.0)
                .with_onset(onset)
                .bandpass(1200.0, 0.5)
                .gain(
                    ParamCurve::at(0.0)
                        .set_at(0.0, onset)
                        .linear_to(level * 0.5, onset + ONSET)
                        .exp_to(0.001, onset + 0.08),
                )
                .boxed()
        })
        .collect();
    Stack::new(bursts).boxed()
}
