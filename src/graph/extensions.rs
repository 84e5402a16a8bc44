use crate::dsp::ParamCurve;
use crate::graph::{
    filter::{FilterNode, PeakingNode},
    gain::GainNode,
    node::GraphNode,
    shaper::ShaperNode,
    through::Through,
};

pub trait NodeExt: GraphNode + Sized {
    fn gain(self, curve: ParamCurve) -> Through<Self, GainNode> {
        Through::new(self, GainNode::new(curve))
    }

    fn through<F: GraphNode>(self, effect: F) -> Through<Self, F> {
        Through::new(self, effect)
    }

    fn lowpass(self, cutoff: f32, q: f32) -> Through<Self, FilterNode> {
        Through::new(self, FilterNode::lowpass(cutoff, q))
    }

    fn highpass(self, cutoff: f32, q: f32) -> Through<Self, FilterNode> {
        Through::new(self, FilterNode::highpass(cutoff, q))
    }

    fn bandpass(self, cutoff: f32, q: f32) -> Through<Self, FilterNode> {
        Through::new(self, FilterNode::bandpass(cutoff, q))
    }

    fn lowpass_swept(self, sweep: ParamCurve, q: f32) -> Through<Self, FilterNode> {
        Through::new(self, FilterNode::lowpass_swept(sweep, q))
    }

    fn shaped(self, drive: f32) -> Through<Self, ShaperNode> {
        Through::new(self, ShaperNode::new(drive))
    }

    fn peaking(self, frequency: f32, q: f32, gain_db: f32) -> Through<Self, PeakingNode> {
        Through::new(self, PeakingNode::new(frequency, q, gain_db))
    }

    fn boxed(self) -> Box<dyn GraphNode>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<T: GraphNode> NodeExt for T {}
