//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They intentionally stay focused on the
//! signal-processing math so graph combinators can layer on orchestration and
//! automation.

/// Breakpoint parameter automation (set / linear ramp / exponential ramp).
pub mod automation;
/// Feed-forward soft-knee dynamics compressor for the master bus.
pub mod compressor;
/// State-variable filter and peaking EQ with multiple responses.
pub mod filter;
/// Oscillator waveforms and noise sources.
pub mod oscillator;
/// Static nonlinear transfer curve for overdrive.
pub mod waveshaper;

pub use automation::ParamCurve;
