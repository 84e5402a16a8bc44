//! Composable building blocks for one-shot voice graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with what a triggered sound
//! needs: parameter automation, explicit stop times, and block-based
//! rendering. Voices are assembled once on the control thread, handed to the
//! audio callback fully specified, and dropped when every source in them has
//! played out. The `extensions` module adds fluent helpers so voice recipes
//! read as signal chains.

/// Fluent combinators (`.gain()`, `.lowpass()`, etc.).
pub mod extensions;
/// Filter nodes: swept state-variable filter and peaking EQ.
pub mod filter;
/// Amplitude automation (the envelope seat of every voice).
pub mod gain;
/// Per-trigger noise burst playback.
pub mod noise;
/// Core traits shared by all graph nodes.
pub mod node;
/// Pitched oscillator source with frequency automation.
pub mod oscillator;
/// Nonlinear waveshaping distortion.
pub mod shaper;
/// Parallel summing (Stack) and one-source fan-out (Split).
pub mod stack;
/// Serial chaining of two nodes (source -> effect).
pub mod through;

pub use node::{GraphNode, RenderCtx};
