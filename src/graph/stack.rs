use crate::graph::node::{GraphNode, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/// Sums parallel branches into one signal.
///
/// Additive voices live here: the hi-hat stacks six inharmonic squares,
/// the piano five harmonic sines. Finished branches are skipped rather
/// than rendered to silence and summed anyway.
pub struct Stack {
    branches: Vec<Box<dyn GraphNode>>,
    temp_buffer: Vec<f32>,
}

impl Stack {
    pub fn new(branches: Vec<Box<dyn GraphNode>>) -> Self {
        Self {
            branches,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn pair(a: impl GraphNode + 'static, b: impl GraphNode + 'static) -> Self {
        Self::new(vec![Box::new(a), Box::new(b)])
    }
}

impl GraphNode for Stack {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        out.fill(0.0);
        let temp = &mut self.temp_buffer[..out.len()];
        for branch in &mut self.branches {
            if branch.is_finished() {
                continue;
            }
            branch.render_block(temp, ctx);
            for (acc, &sample) in out.iter_mut().zip(temp.iter()) {
                *acc += sample;
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.branches.iter().all(|branch| branch.is_finished())
    }
}

/// Feeds one source into parallel effect branches and sums the results.
///
/// The acoustic-guitar voice is the customer: one noise excitation drives
/// three band-pass resonators at the fundamental and its octaves, each
/// with its own ring time.
pub struct Split {
    source: Box<dyn GraphNode>,
    branches: Vec<Box<dyn GraphNode>>,
    source_buffer: Vec<f32>,
    temp_buffer: Vec<f32>,
}

impl Split {
    pub fn new(source: Box<dyn GraphNode>, branches: Vec<Box<dyn GraphNode>>) -> Self {
        Self {
            source,
            branches,
            source_buffer: vec![0.0; MAX_BLOCK_SIZE],
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl GraphNode for Split {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let source = &mut self.source_buffer[..out.len()];
        let temp = &mut self.temp_buffer[..out.len()];
        self.source.render_block(source, ctx);

        out.fill(0.0);
        for branch in &mut self.branches {
            temp.copy_from_slice(source);
            branch.render_block(temp, ctx);
            for (acc, &sample) in out.iter_mut().zip(temp.iter()) {
                *acc += sample;
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.source.is_finished()
    }
}
