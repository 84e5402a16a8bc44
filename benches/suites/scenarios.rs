//! Whole-engine scenario benchmarks.
//!
//! These run the renderer the way the audio callback does and the scheduler
//! the way the control thread does, so a regression in either shows up
//! against the block deadline rather than in isolation.

use std::hint::black_box;
use std::sync::Arc;

use bandbox::dsp::oscillator::XorShift;
use bandbox::dsp::ParamCurve;
use bandbox::engine::{
    AtomicF32, AudioClock, NoteEvent, Renderer, ScheduleSink, ScheduledVoice, Scheduler,
};
use bandbox::graph::extensions::NodeExt;
use bandbox::graph::oscillator::OscNode;
use bandbox::graph::GraphNode;
use bandbox::mixer::Mixer;
use bandbox::pattern::{PatternGrid, STEP_COUNTS};
use bandbox::session::Session;
use bandbox::voices;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

/// A renderer wired for offline use: voices in through the ring, samples
/// out through the monitor tap.
fn offline_renderer(
    max_voices: usize,
) -> (
    rtrb::Producer<ScheduledVoice>,
    Renderer,
    rtrb::Consumer<f32>,
) {
    let (voice_tx, voice_rx) = rtrb::RingBuffer::new(256);
    let (monitor_tx, monitor_rx) = rtrb::RingBuffer::new(1 << 15);
    let clock = Arc::new(AudioClock::new(48_000.0));
    let gain = Arc::new(AtomicF32::new(0.8));
    let renderer = Renderer::new(voice_rx, monitor_tx, clock, gain, max_voices);
    (voice_tx, renderer, monitor_rx)
}

/// A voice with a stop time far beyond any benchmark run, so steady-state
/// mixing cost stays visible instead of decaying to silence mid-measurement.
fn held_voice(frequency: f32) -> Box<dyn GraphNode> {
    OscNode::sawtooth(ParamCurve::fixed(frequency), 1e9)
        .lowpass(1_800.0, 0.9)
        .gain(ParamCurve::fixed(0.02))
        .boxed()
}

pub fn bench_renderer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/renderer");

    for &size in BLOCK_SIZES {
        let mut block = vec![0.0f32; size];

        // === EMPTY BUS ===
        // No voices: master compressor and monitor tap only
        let (_voice_tx, mut renderer, mut monitor_rx) = offline_renderer(64);
        group.bench_with_input(BenchmarkId::new("empty_bus", size), &size, |b, _| {
            b.iter(|| {
                renderer.render(black_box(&mut block));
                while monitor_rx.pop().is_ok() {}
            })
        });

        // === EIGHT VOICES ===
        // A typical moment of the default pattern
        let (mut voice_tx, mut renderer, mut monitor_rx) = offline_renderer(64);
        for i in 0..8u32 {
            let _ = voice_tx.push(ScheduledVoice {
                start_frame: 0,
                graph: held_voice(110.0 * (i + 1) as f32),
            });
        }
        group.bench_with_input(BenchmarkId::new("8_voices", size), &size, |b, _| {
            b.iter(|| {
                renderer.render(black_box(&mut block));
                while monitor_rx.pop().is_ok() {}
            })
        });

        // === THIRTY-TWO VOICES ===
        // A dense grid with every channel ringing into the next step
        let (mut voice_tx, mut renderer, mut monitor_rx) = offline_renderer(64);
        for i in 0..32u32 {
            let _ = voice_tx.push(ScheduledVoice {
                start_frame: 0,
                graph: held_voice(55.0 * (i + 1) as f32),
            });
        }
        group.bench_with_input(BenchmarkId::new("32_voices", size), &size, |b, _| {
            b.iter(|| {
                renderer.render(black_box(&mut block));
                while monitor_rx.pop().is_ok() {}
            })
        });
    }

    group.finish();
}

/// Collects scheduled work the way the control thread does, building a real
/// voice graph for every committed note.
struct BuildSink {
    mixer: Mixer,
    rng: XorShift,
    voices: Vec<Box<dyn GraphNode>>,
    steps: Vec<usize>,
}

impl ScheduleSink for BuildSink {
    fn note(&mut self, event: NoteEvent) {
        if let Some(graph) = voices::build_voice(
            event.instrument,
            event.row,
            &self.mixer,
            event.gain,
            48_000.0,
            &mut self.rng,
        ) {
            self.voices.push(graph);
        }
    }

    fn step(&mut self, step: usize) {
        self.steps.push(step);
    }
}

pub fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/scheduler");

    // Each iteration sweeps one full bar of the default pattern, committing
    // every step and building every voice the renderer would receive.
    for steps in STEP_COUNTS {
        let mut session = Session::default();
        session.pattern = PatternGrid::with_default_pattern(steps);
        let bar = session.seconds_per_step() * steps as f64;

        let mut sink = BuildSink {
            mixer: Mixer::default(),
            rng: XorShift::new(0x5eed),
            voices: Vec::new(),
            steps: Vec::new(),
        };
        let mut scheduler = Scheduler::new();
        scheduler.begin(0.0);
        let mut now = 0.0;

        group.bench_with_input(BenchmarkId::new("bar_sweep", steps), &steps, |b, _| {
            b.iter(|| {
                now += bar;
                scheduler.advance(black_box(now), &session, &mut sink);
                sink.voices.clear();
                sink.steps.clear();
            })
        });
    }

    group.finish();
}
