//! Per-area benchmark suites.

mod dsp;
mod scenarios;
mod voices;

pub use dsp::{bench_compressor, bench_filter, bench_oscillator, bench_waveshaper};
pub use scenarios::{bench_renderer, bench_scheduler};
pub use voices::bench_voices;
