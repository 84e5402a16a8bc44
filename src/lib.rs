pub mod dsp;
pub mod engine; // Lookahead scheduling, rendering, signal monitoring
pub mod graph; // Composable one-shot render graphs
pub mod mixer;
pub mod pattern;
pub mod session;
pub mod voices; // Per-family synthesis recipes

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
