/// Context passed to graph nodes during rendering.
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

/// Core trait for audio processing graph nodes.
///
/// Sources overwrite `out` with their signal; effects transform `out` in
/// place. Either way every sample of `out` must be written. A finished
/// source keeps writing silence, so rendering past the end is always safe.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Whether this node has produced all the sound it ever will.
    ///
    /// Sources answer from their explicit stop time. Effects have no
    /// lifetime of their own and default to `true`, so a chain's liveness
    /// is decided by the sources inside it.
    fn is_finished(&self) -> bool {
        true
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }
}
