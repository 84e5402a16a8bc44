use bandbox::engine::{NoteEvent, ScheduleSink, Scheduler};
use bandbox::session::Session;
use bandbox::voices::Instrument;

/// Control tick used across these tests, matching the engine's cadence.
const TICK: f64 = 0.025;

/// Seconds per step at 120 bpm.
const SPS: f64 = 0.125;

/// Collects everything a scheduler commits, tagging each note with the step
/// that produced it.
#[derive(Default)]
struct CollectSink {
    pending: Vec<NoteEvent>,
    notes: Vec<(usize, NoteEvent)>,
    steps: Vec<usize>,
}

impl ScheduleSink for CollectSink {
    fn note(&mut self, event: NoteEvent) {
        self.pending.push(event);
    }

    fn step(&mut self, step: usize) {
        for event in self.pending.drain(..) {
            self.notes.push((step, event));
        }
        self.steps.push(step);
    }
}

#[test]
fn seconds_per_step_matches_the_sixteenth_grid() {
    let mut session = Session::default();
    for bpm in 40..=220u32 {
        session.set_bpm(bpm);
        assert_eq!(
            session.seconds_per_step(),
            (60.0 / bpm as f64) / 4.0,
            "bpm {bpm}"
        );
    }
}

#[test]
fn event_times_never_regress_across_tempo_changes() {
    let mut session = Session::default();
    session.pattern.clear_all();
    for step in 0..32 {
        session.pattern.set_note(Instrument::Drums, 2, step, 1);
    }

    let mut scheduler = Scheduler::new();
    scheduler.begin(0.0);
    let mut sink = CollectSink::default();
    for i in 0..200usize {
        // Yank the tempo between extremes every quarter second.
        session.set_bpm(if (i / 10) % 2 == 0 { 60 } else { 200 });
        scheduler.advance(i as f64 * TICK, &session, &mut sink);
    }

    let times: Vec<f64> = sink.notes.iter().map(|(_, n)| n.start_time).collect();
    assert!(times.len() > 30, "witnessed {} steps", times.len());
    assert!(
        times.windows(2).all(|pair| pair[1] >= pair[0]),
        "commit times must be non-decreasing"
    );
}

#[test]
fn swing_shifts_odd_steps_only_by_half_a_swung_step() {
    let mut session = Session::default();
    session.pattern.clear_all();
    for step in 0..32 {
        session.pattern.set_note(Instrument::Drums, 2, step, 1);
    }
    session.set_swing(0.37);

    let mut scheduler = Scheduler::new();
    scheduler.begin(0.0);
    let mut sink = CollectSink::default();
    for i in 0..40 {
        scheduler.advance(i as f64 * TICK, &session, &mut sink);
    }

    assert!(sink.notes.iter().any(|(step, _)| step % 2 == 1));
    for (step, note) in &sink.notes {
        let base = *step as f64 * SPS;
        let expected = if step % 2 == 1 {
            base + SPS * 0.37 * 0.5
        } else {
            base
        };
        assert!(
            (note.start_time - expected).abs() < 1e-9,
            "step {step} fired at {}",
            note.start_time
        );
    }
}

#[test]
fn start_and_stop_are_idempotent() {
    let session = Session::default();
    let mut scheduler = Scheduler::new();
    let mut sink = CollectSink::default();

    scheduler.begin(0.0);
    scheduler.advance(0.3, &session, &mut sink);
    let step_after = scheduler.current_step();
    let committed = sink.steps.len();

    // begin on a running transport must not rewind it
    scheduler.begin(99.0);
    assert!(scheduler.is_running());
    assert_eq!(scheduler.current_step(), step_after);
    scheduler.advance(0.3, &session, &mut sink);
    assert_eq!(sink.steps.len(), committed, "nothing re-committed");

    scheduler.halt();
    scheduler.halt();
    assert!(!scheduler.is_running());
    scheduler.advance(9.9, &session, &mut sink);
    assert_eq!(sink.steps.len(), committed, "halted scheduler commits nothing");
}

#[test]
fn a_thousand_ticks_commit_every_step_exactly_once() {
    let mut session = Session::default();
    session.pattern.clear_all();
    session.pattern.set_note(Instrument::Keys, 2, 5, 3);

    let mut scheduler = Scheduler::new();
    scheduler.begin(0.0);
    let mut sink = CollectSink::default();
    for i in 0..1000 {
        scheduler.advance(i as f64 * TICK, &session, &mut sink);
    }

    // The last window, 999 x 25 ms + 100 ms, covers step times through
    // 25.0 s: steps 0..=200.
    assert_eq!(sink.steps.len(), 201);
    for (i, &step) in sink.steps.iter().enumerate() {
        assert_eq!(step, i % 32, "steps advance in order with no gaps");
    }

    assert_eq!(
        sink.notes.iter().filter(|(step, _)| *step == 5).count(),
        7,
        "one trigger per lap through step 5"
    );
    assert_eq!(sink.notes.len(), 7, "no other cell fires");
    for (_, note) in &sink.notes {
        assert_eq!(note.instrument, Instrument::Keys);
        assert_eq!(note.length, 3);
    }
}

#[test]
fn muted_or_silent_channels_never_trigger() {
    // The stock pattern only plays drums and bass; silence both.
    let mut session = Session::default();
    session.mixer.toggle_mute(Instrument::Drums);
    session.mixer.set_volume(Instrument::Bass, 0.0);

    let mut scheduler = Scheduler::new();
    scheduler.begin(0.0);
    let mut sink = CollectSink::default();
    for i in 0..200 {
        scheduler.advance(i as f64 * TICK, &session, &mut sink);
    }

    assert!(!sink.steps.is_empty(), "steps still advance");
    assert!(sink.notes.is_empty(), "no triggers from silenced channels");
}

#[test]
fn boundary_length_notes_schedule_and_overhang_clamps() {
    let mut session = Session::default();
    session.pattern.clear_all();
    let step_count = session.pattern.step_count();
    session
        .pattern
        .set_note(Instrument::Keys, 0, 0, (step_count - 1) as u8);
    session.pattern.set_note(Instrument::Keys, 1, 30, 200);
    assert_eq!(
        session.pattern.note_at(Instrument::Keys, 1, 30),
        2,
        "the store clamps the overhang before the scheduler ever sees it"
    );

    let mut scheduler = Scheduler::new();
    scheduler.begin(0.0);
    let mut sink = CollectSink::default();
    for i in 0..200 {
        scheduler.advance(i as f64 * TICK, &session, &mut sink);
    }

    let long: Vec<_> = sink.notes.iter().filter(|(step, _)| *step == 0).collect();
    assert!(!long.is_empty());
    assert!(long.iter().all(|(_, n)| n.length == 31));
    let clamped: Vec<_> = sink.notes.iter().filter(|(step, _)| *step == 30).collect();
    assert!(!clamped.is_empty());
    assert!(clamped.iter().all(|(_, n)| n.length == 2));
}

#[test]
fn four_second_loop_census_lands_on_the_grid() {
    let mut session = Session::default();
    session.pattern.clear_all();
    session.pattern.set_note(Instrument::Drums, 0, 0, 1); // kick
    session.pattern.set_note(Instrument::Drums, 1, 4, 1); // snare
    for step in (0..32).step_by(2) {
        session.pattern.set_note(Instrument::Drums, 2, step, 1); // hihat
    }

    let mut scheduler = Scheduler::new();
    scheduler.begin(0.0);
    let mut sink = CollectSink::default();
    // One full 32-step loop at 120 bpm is 4 s. The tick at 155 x 25 ms =
    // 3.875 s is the last whose window still excludes step 32 (at 4.0 s).
    for i in 0..=155 {
        scheduler.advance(i as f64 * TICK, &session, &mut sink);
    }

    assert_eq!(sink.steps.len(), 32, "exactly one full loop");

    let row_notes = |row: usize| -> Vec<(usize, f64)> {
        sink.notes
            .iter()
            .filter(|(_, n)| n.row == row)
            .map(|(step, n)| (*step, n.start_time))
            .collect()
    };

    let kicks = row_notes(0);
    let snares = row_notes(1);
    let hihats = row_notes(2);
    assert_eq!(kicks.len(), 1);
    assert_eq!(snares.len(), 1);
    assert_eq!(hihats.len(), 16);

    assert!(kicks[0].1.abs() < 1e-12);
    assert!((snares[0].1 - 4.0 * SPS).abs() < 1e-12);
    for (step, time) in &hihats {
        assert!(
            (time - *step as f64 * SPS).abs() < 1e-12,
            "hihat at step {step} off the grid: {time}"
        );
    }
}

#[test]
fn full_swing_displaces_odd_hihats_by_half_a_step() {
    let mut session = Session::default();
    session.pattern.clear_all();
    for step in 0..32 {
        session.pattern.set_note(Instrument::Drums, 2, step, 1);
    }

    let run = |swing: f32| -> Vec<(usize, f64)> {
        let mut session = session.clone();
        session.set_swing(swing);
        let mut scheduler = Scheduler::new();
        scheduler.begin(0.0);
        let mut sink = CollectSink::default();
        for i in 0..=155 {
            scheduler.advance(i as f64 * TICK, &session, &mut sink);
        }
        sink.notes
            .iter()
            .map(|(step, n)| (*step, n.start_time))
            .collect()
    };

    let straight = run(0.0);
    let swung = run(1.0);
    assert_eq!(straight.len(), 32);
    assert_eq!(swung.len(), 32);

    for ((step, dry), (_, wet)) in straight.iter().zip(swung.iter()) {
        let shift = wet - dry;
        if step % 2 == 1 {
            assert!(
                (shift - SPS * 0.5).abs() < 1e-12,
                "odd step {step} shifted by {shift}"
            );
        } else {
            assert!(shift.abs() < 1e-12, "even step {step} moved by {shift}");
        }
    }
}
