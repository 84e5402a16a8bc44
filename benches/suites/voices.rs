//! Benchmarks for the instrument voice graphs.
//!
//! Each benchmark builds a voice exactly as a step trigger would and
//! renders its first block, so the numbers cover graph construction plus
//! the startup transient. Construction runs on the control thread, the
//! block on the audio thread; both have to stay cheap.

use std::hint::black_box;

use bandbox::dsp::oscillator::XorShift;
use bandbox::graph::{GraphNode, RenderCtx};
use bandbox::mixer::Mixer;
use bandbox::voices::{self, Instrument};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("voices/trigger");
    let ctx = RenderCtx::new(48_000.0);
    let mixer = Mixer::default();
    let mut rng = XorShift::new(0x5eed);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === DRUMS ===
        // Kick is the busiest build: pitch drop, body, noise click layer
        group.bench_with_input(BenchmarkId::new("drums_kick", size), &size, |b, _| {
            b.iter(|| {
                if let Some(mut voice) =
                    voices::build_voice(Instrument::Drums, 0, &mixer, 0.8, 48_000.0, &mut rng)
                {
                    voice.render_block(black_box(&mut buffer), &ctx);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("drums_snare", size), &size, |b, _| {
            b.iter(|| {
                if let Some(mut voice) =
                    voices::build_voice(Instrument::Drums, 1, &mixer, 0.8, 48_000.0, &mut rng)
                {
                    voice.render_block(black_box(&mut buffer), &ctx);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("drums_hihat", size), &size, |b, _| {
            b.iter(|| {
                if let Some(mut voice) =
                    voices::build_voice(Instrument::Drums, 2, &mixer, 0.8, 48_000.0, &mut rng)
                {
                    voice.render_block(black_box(&mut buffer), &ctx);
                }
            })
        });

        // === KEYS ===
        // Partial stacks, the widest graphs in the instrument set
        group.bench_with_input(BenchmarkId::new("keys_c4", size), &size, |b, _| {
            b.iter(|| {
                if let Some(mut voice) =
                    voices::build_voice(Instrument::Keys, 0, &mixer, 0.8, 48_000.0, &mut rng)
                {
                    voice.render_block(black_box(&mut buffer), &ctx);
                }
            })
        });

        // === GUITAR ===
        // Shaper and peaking stages on top of the source
        group.bench_with_input(BenchmarkId::new("guitar_e2", size), &size, |b, _| {
            b.iter(|| {
                if let Some(mut voice) =
                    voices::build_voice(Instrument::Guitar, 0, &mixer, 0.8, 48_000.0, &mut rng)
                {
                    voice.render_block(black_box(&mut buffer), &ctx);
                }
            })
        });

        // === BASS ===
        group.bench_with_input(BenchmarkId::new("bass_e1", size), &size, |b, _| {
            b.iter(|| {
                if let Some(mut voice) =
                    voices::build_voice(Instrument::Bass, 0, &mixer, 0.8, 48_000.0, &mut rng)
                {
                    voice.render_block(black_box(&mut buffer), &ctx);
                }
            })
        });
    }

    group.finish();
}
