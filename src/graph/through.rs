use crate::graph::node::{GraphNode, RenderCtx};

/// Routes a source through an effect, rendering in place.
///
/// The source fills the block, then the effect transforms it. The pair is
/// finished only when both halves agree: a source may stop early while a
/// filter still rings, and the effect's default `is_finished` keeps plain
/// transforms from pinning the voice alive forever.
pub struct Through<S, F> {
    source: S,
    effect: F,
}

impl<S: GraphNode, F: GraphNode> Through<S, F> {
    pub fn new(source: S, effect: F) -> Self {
        Self { source, effect }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn is_finished(&self) -> bool {
        self.source.is_finished() && self.effect.is_finished()
    }
}

/// A run of effects applied in order, all in place.
///
/// Voices with more than one processing stage (filter then envelope then
/// shaper...) box their stages into one of these rather than nesting
/// `Through` pairs per stage.
pub struct FxChain {
    stages: Vec<Box<dyn GraphNode>>,
}

impl FxChain {
    pub fn new(stages: Vec<Box<dyn GraphNode>>) -> Self {
        Self { stages }
    }
}

impl GraphNode for FxChain {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for stage in &mut self.stages {
            stage.render_block(out, ctx);
        }
    }

    fn is_finished(&self) -> bool {
        self.stages.iter().all(|stage| stage.is_finished())
    }
}
