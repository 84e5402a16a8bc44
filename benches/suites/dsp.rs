//! Benchmarks for low-level DSP primitives.

use std::hint::black_box;

use bandbox::dsp::compressor::Compressor;
use bandbox::dsp::filter::{PeakingFilter, SVFilter};
use bandbox::dsp::oscillator::{noise_buffer, Oscillator, Waveform, XorShift};
use bandbox::dsp::waveshaper::TransferCurve;
use bandbox::dsp::ParamCurve;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let waveforms = [
            ("sine", Waveform::Sine),
            ("triangle", Waveform::Triangle),
            ("sawtooth", Waveform::Sawtooth),
            ("square", Waveform::Square),
        ];
        for (name, waveform) in waveforms {
            let mut osc = Oscillator::new(waveform);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = osc.next_sample(black_box(440.0), 48_000.0);
                    }
                })
            });
        }

        // Pitch automation sampled per frame, as a swept voice reads it
        let sweep = ParamCurve::at(2_200.0).exp_to(40.0, 0.12);
        group.bench_with_input(BenchmarkId::new("param_curve", size), &size, |b, _| {
            b.iter(|| {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    *sample = sweep.value_at(black_box(i as f32 / 48_000.0));
                }
            })
        });

        // White noise allocation, the way drum builds grab their buffers
        let mut rng = XorShift::new(7);
        group.bench_with_input(BenchmarkId::new("noise_buffer", size), &size, |b, _| {
            b.iter(|| {
                black_box(noise_buffer(size, &mut rng));
            })
        });
    }

    group.finish();
}

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp as the test signal
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let mut filter = SVFilter::lowpass(1_000.0).with_q(2.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), 48_000.0);
            })
        });

        let mut filter = SVFilter::highpass(1_000.0).with_q(2.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("highpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), 48_000.0);
            })
        });

        let mut filter = SVFilter::bandpass(1_000.0).with_q(2.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("bandpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), 48_000.0);
            })
        });

        let mut filter = SVFilter::notch(1_000.0).with_q(2.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("notch", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), 48_000.0);
            })
        });

        // Presence peak as the guitar voices run it
        let mut peak = PeakingFilter::new(2_500.0, 1.2, 6.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("peaking", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                peak.render(black_box(&mut buffer), 48_000.0);
            })
        });
    }

    group.finish();
}

pub fn bench_waveshaper(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/waveshaper");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.13).sin()).collect();

        let curve = TransferCurve::overdrive(4.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("overdrive", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                curve.render(black_box(&mut buffer));
            })
        });

        let curve = TransferCurve::overdrive(9.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("overdrive_hard", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                curve.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

pub fn bench_compressor(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/compressor");

    for &size in BLOCK_SIZES {
        // Hot enough to sit above the threshold the whole time
        let input: Vec<f32> = (0..size)
            .map(|i| (std::f32::consts::TAU * 440.0 * i as f32 / 48_000.0).sin() * 0.8)
            .collect();

        let mut compressor = Compressor::default();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("master_bus", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                compressor.process_block(black_box(&mut buffer), 48_000.0);
            })
        });
    }

    group.finish();
}
