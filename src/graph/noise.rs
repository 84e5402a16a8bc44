use crate::graph::node::{GraphNode, RenderCtx};

/// Plays back one private noise buffer, built fresh for each trigger.
///
/// `onset` delays the burst relative to the voice start (the clap voice
/// fires three of these 10 ms apart). An optional explicit stop extends the
/// node's life past the buffer so downstream resonators get silence to ring
/// into before the voice is collected.
pub struct NoiseNode {
    buffer: Vec<f32>,
    level: f32,
    onset: f32,
    stop_at: Option<f32>,
    pos: u64,
    stop_sample: Option<u64>,
}

impl NoiseNode {
    pub fn new(buffer: Vec<f32>, level: f32) -> Self {
        Self {
            buffer,
            level,
            onset: 0.0,
            stop_at: None,
            pos: 0,
            stop_sample: None,
        }
    }

    /// Delay the burst by `onset` seconds from the voice start.
    pub fn with_onset(mut self, onset: f32) -> Self {
        self.onset = onset;
        self
    }

    /// Keep the node alive (emitting silence) until `stop_at` seconds.
    pub fn with_stop(mut self, stop_at: f32) -> Self {
        self.stop_at = Some(stop_at);
        self
    }
}

impl GraphNode for NoiseNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let sample_rate = ctx.sample_rate as f64;
        let start = (self.onset as f64 * sample_rate) as u64;
        let end_of_buffer = start + self.buffer.len() as u64;
        let stop = match self.stop_at {
            Some(t) => ((t as f64 * sample_rate) as u64).max(end_of_buffer),
            None => end_of_buffer,
        };
        self.stop_sample = Some(stop);

        for sample in out.iter_mut() {
            *sample = if self.pos >= start && self.pos < end_of_buffer {
                self.buffer[(self.pos - start) as usize] * self.level
            } else {
                0.0
            };
            self.pos += 1;
        }
    }

    fn is_finished(&self) -> bool {
        matches!(self.stop_sample, Some(stop) if self.pos >= stop)
    }
}
