use std::sync::Arc;

use rtrb::{Consumer, Producer};

use crate::dsp::compressor::Compressor;
use crate::engine::clock::AudioClock;
use crate::engine::AtomicF32;
use crate::graph::{GraphNode, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/// A voice graph plus the frame it should first sound on.
pub struct ScheduledVoice {
    pub start_frame: u64,
    pub graph: Box<dyn GraphNode>,
}

struct ActiveVoice {
    start_frame: u64,
    started: bool,
    graph: Box<dyn GraphNode>,
}

/// The audio-callback side of the engine: admits scheduled voices, mixes
/// the live ones at their exact sample offsets, and runs the master bus.
///
/// Everything here stays lock-free and allocation-free per block (the voice
/// list is pre-reserved; admitting moves a box, retiring drops one). Voices
/// that arrive while the list is full are counted and discarded; counting is
/// all the observability the callback can afford.
pub struct Renderer {
    incoming: Consumer<ScheduledVoice>,
    voices: Vec<ActiveVoice>,
    max_voices: usize,
    scratch: Vec<f32>,
    master_gain: Arc<AtomicF32>,
    compressor: Compressor,
    monitor_tx: Producer<f32>,
    clock: Arc<AudioClock>,
    ctx: RenderCtx,
    dropped: u64,
}

impl Renderer {
    pub fn new(
        incoming: Consumer<ScheduledVoice>,
        monitor_tx: Producer<f32>,
        clock: Arc<AudioClock>,
        master_gain: Arc<AtomicF32>,
        max_voices: usize,
    ) -> Self {
        let sample_rate = clock.sample_rate();
        Self {
            incoming,
            voices: Vec::with_capacity(max_voices),
            max_voices,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            master_gain,
            compressor: Compressor::default(),
            monitor_tx,
            clock,
            ctx: RenderCtx::new(sample_rate),
            dropped: 0,
        }
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Voices discarded because the list was at capacity.
    pub fn dropped_voices(&self) -> u64 {
        self.dropped
    }

    /// Render one mono block and advance the clock past it.
    pub fn render(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);
        let block_start = self.clock.frames();
        let block_end = block_start + out.len() as u64;

        while let Ok(voice) = self.incoming.pop() {
            if self.voices.len() >= self.max_voices {
                self.dropped += 1;
                continue;
            }
            self.voices.push(ActiveVoice {
                start_frame: voice.start_frame,
                started: false,
                graph: voice.graph,
            });
        }

        out.fill(0.0);
        for voice in &mut self.voices {
            if voice.start_frame >= block_end {
                continue;
            }
            // A voice that should already have started plays from the top
            // of this block; the schedule horizon makes that rare.
            let offset = voice.start_frame.saturating_sub(block_start) as usize;
            let span = &mut out[offset..];
            let scratch = &mut self.scratch[..span.len()];
            voice.graph.render_block(scratch, &self.ctx);
            voice.started = true;
            for (acc, &sample) in span.iter_mut().zip(scratch.iter()) {
                *acc += sample;
            }
        }
        self.voices
            .retain(|voice| !(voice.started && voice.graph.is_finished()));

        let master = self.master_gain.load();
        for sample in out.iter_mut() {
            *sample *= master;
        }
        self.compressor.process_block(out, self.ctx.sample_rate);

        for &sample in out.iter() {
            if self.monitor_tx.push(sample).is_err() {
                break;
            }
        }

        self.clock.advance(out.len());
    }
}
