/* Lookahead Scheduler

   Two clocks drive playback:

     control thread              audio callback
     (coarse, ~25 ms)            (sample-accurate)
          |                            |
          |  every tick:               |
          |  commit everything in      |
          |  [now, now + 100 ms) --->  |  renders each voice at its
          |                            |  exact start frame
          v                            v
     cheap to wake                drift-free timing

   The control thread wakes at a rate the OS can comfortably honor and
   commits, in advance, every step that falls inside the lookahead window.
   Times are measured on the audio clock (frames rendered / sample rate), so
   scheduling stays locked to the device no matter how late the thread wakes.
   The window only has to cover the worst-case wakeup jitter; 4x the tick
   period has proven comfortable.

   Tempo and swing changes take effect on the next uncommitted step. Stopping
   never retracts committed steps, so up to one lookahead window of sound may
   play after halt.
*/

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rtrb::Producer;

use crate::dsp::oscillator::XorShift;
use crate::engine::clock::AudioClock;
use crate::engine::renderer::ScheduledVoice;
use crate::mixer::Mixer;
use crate::session::Session;
use crate::voices::{self, Instrument};

/// How far ahead of the audio clock steps are committed, in seconds.
pub const LOOKAHEAD: f64 = 0.1;

/// Sleep between scheduler wakeups.
pub const CONTROL_TICK: Duration = Duration::from_millis(25);

/// One trigger, fully resolved: where it came from and when it starts.
/// `start_time` is on the audio clock. `length` is the painted note span in
/// steps; the synthesis recipes have fixed envelopes, so it rides along for
/// display purposes only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteEvent {
    pub instrument: Instrument,
    pub row: usize,
    pub start_time: f64,
    pub length: u8,
    pub gain: f32,
}

/// Receives what a scheduler tick commits. The engine's sink builds voice
/// graphs and crosses thread boundaries; tests collect into vectors.
pub trait ScheduleSink {
    fn note(&mut self, event: NoteEvent);

    /// A step was committed. Fires once per step, after its notes.
    fn step(&mut self, step: usize);
}

/// The pure scheduling core. Holds only transport state; each `advance` is
/// a function of (now, session), which is what makes the timing properties
/// testable without an audio device.
pub struct Scheduler {
    running: bool,
    current_step: usize,
    next_event_time: f64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            running: false,
            current_step: 0,
            next_event_time: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Start from step zero, anchored to `now`. A running scheduler ignores
    /// the call.
    pub fn begin(&mut self, now: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.current_step = 0;
        self.next_event_time = now;
    }

    /// Stop committing steps. Steps already handed to the sink stand.
    pub fn halt(&mut self) {
        self.running = false;
    }

    /// One control tick: commit every step inside the lookahead window.
    pub fn advance(&mut self, now: f64, session: &Session, sink: &mut impl ScheduleSink) {
        if !self.running {
            return;
        }
        let step_count = session.pattern.step_count().max(1);
        while self.next_event_time < now + LOOKAHEAD {
            let seconds_per_step = session.seconds_per_step();
            let swing = session.swing();

            let mut fire_at = self.next_event_time;
            if swing > 0.0 && self.current_step % 2 == 1 {
                fire_at += seconds_per_step * swing as f64 * 0.5;
            }

            for instrument in Instrument::ALL {
                let gain = session.mixer.effective_gain(instrument);
                if gain <= 0.0 {
                    continue;
                }
                for row in 0..instrument.rows().len() {
                    let length = session.pattern.note_at(instrument, row, self.current_step);
                    if length > 0 {
                        sink.note(NoteEvent {
                            instrument,
                            row,
                            start_time: fire_at,
                            length,
                            gain,
                        });
                    }
                }
            }
            sink.step(self.current_step);

            self.current_step = (self.current_step + 1) % step_count;
            self.next_event_time += seconds_per_step;
        }
    }
}

/// The engine-side sink: builds a voice graph per note and pushes it at the
/// audio callback, step notifications at the front end. Both rings drop on
/// full rather than block.
struct EngineSink {
    voice_tx: Producer<ScheduledVoice>,
    step_tx: Producer<usize>,
    mixer: Mixer,
    sample_rate: f32,
    rng: XorShift,
}

impl ScheduleSink for EngineSink {
    fn note(&mut self, event: NoteEvent) {
        let graph = voices::build_voice(
            event.instrument,
            event.row,
            &self.mixer,
            event.gain,
            self.sample_rate,
            &mut self.rng,
        );
        let Some(graph) = graph else { return };
        let start_frame = (event.start_time.max(0.0) * self.sample_rate as f64).round() as u64;
        if self.voice_tx.push(ScheduledVoice { start_frame, graph }).is_err() {
            log::warn!(
                "voice ring full; dropping {} trigger",
                event.instrument.name()
            );
        }
    }

    fn step(&mut self, step: usize) {
        // A skipped notification heals on the next poll.
        if self.step_tx.push(step).is_err() {
            log::debug!("step ring full; dropping notification for step {step}");
        }
    }
}

/// Body of the control thread. Runs until `playing` clears, then returns the
/// producers so the engine can reuse them on the next start.
pub(crate) fn run_control_loop(
    clock: Arc<AudioClock>,
    session: Arc<Mutex<Session>>,
    playing: Arc<AtomicBool>,
    voice_tx: Producer<ScheduledVoice>,
    step_tx: Producer<usize>,
) -> (Producer<ScheduledVoice>, Producer<usize>) {
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0x5EED);

    let mut scheduler = Scheduler::new();
    let mut sink = EngineSink {
        voice_tx,
        step_tx,
        mixer: Mixer::default(),
        sample_rate: clock.sample_rate(),
        rng: XorShift::new(seed),
    };
    scheduler.begin(clock.now());

    while playing.load(Ordering::Relaxed) {
        {
            let session = match session.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            sink.mixer = session.mixer;
            scheduler.advance(clock.now(), &session, &mut sink);
        }
        thread::sleep(CONTROL_TICK);
    }
    scheduler.halt();
    (sink.voice_tx, sink.step_tx)
}
