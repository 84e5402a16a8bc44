//! Bandbox - event loop, key handling, engine wiring

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};

use bandbox::engine::Engine;
use bandbox::pattern::STEP_COUNTS;
use bandbox::voices::Instrument;

use super::ui;

/// The front end: one engine, one cursor, one screen.
pub struct Bandbox {
    engine: Engine,
    /// Which instrument grid is on screen.
    instrument: Instrument,
    cursor_row: usize,
    cursor_step: usize,
    /// Last step the scheduler committed, for the playhead column.
    playhead: Option<usize>,
    should_quit: bool,
}

impl Bandbox {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            instrument: Instrument::Drums,
            cursor_row: 0,
            cursor_step: 0,
            playhead: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop at ~60fps until quit.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_engine();
            terminal.draw(|frame| self.render(frame))?;

            // Non-blocking key handling
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    /// Drain step notifications, keeping the most recent for display.
    fn poll_engine(&mut self) {
        let mut last = None;
        self.engine.poll_steps(|step| last = Some(step));
        if last.is_some() {
            self.playhead = last;
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        if let Some(monitor) = self.engine.monitor_mut() {
            monitor.refresh();
        }
        let playing = self.engine.is_playing();
        let master_gain = self.engine.master_gain();
        let sample_rate = self.engine.sample_rate();
        let (waveform, spectrum) = match self.engine.monitor() {
            Some(monitor) => (monitor.waveform(), monitor.spectrum()),
            None => (&[][..], &[][..]),
        };
        let session = self.engine.session();
        let view = ui::View {
            session: &session,
            instrument: self.instrument,
            cursor: (self.cursor_row, self.cursor_step),
            playhead: if playing { self.playhead } else { None },
            playing,
            master_gain,
            sample_rate,
            waveform,
            spectrum,
        };
        ui::render(frame, &view);
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.toggle_playback(),
            KeyCode::Char(c @ '1'..='4') => {
                self.select_instrument(c as usize - '1' as usize);
            }
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char('x') => {
                let (row, step) = (self.cursor_row, self.cursor_step);
                self.engine
                    .session()
                    .pattern
                    .toggle_step(self.instrument, row, step);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge_bpm(5),
            KeyCode::Char('-') => self.nudge_bpm(-5),
            KeyCode::Char(']') => self.nudge_swing(0.05),
            KeyCode::Char('[') => self.nudge_swing(-0.05),
            KeyCode::Char('.') => self.nudge_volume(0.05),
            KeyCode::Char(',') => self.nudge_volume(-0.05),
            KeyCode::Char('>') => {
                let gain = self.engine.master_gain() + 0.05;
                self.engine.set_master_gain(gain);
            }
            KeyCode::Char('<') => {
                let gain = self.engine.master_gain() - 0.05;
                self.engine.set_master_gain(gain);
            }
            KeyCode::Char('m') => {
                self.engine.session().mixer.toggle_mute(self.instrument);
            }
            KeyCode::Char('v') => {
                self.engine.session().mixer.cycle_variant(self.instrument);
            }
            KeyCode::Char('c') => {
                self.engine.session().pattern.clear_instrument(self.instrument);
            }
            KeyCode::Char('C') => {
                self.engine.session().pattern.clear_all();
            }
            KeyCode::Char('s') => self.cycle_step_count(),
            _ => {}
        }
    }

    fn toggle_playback(&mut self) {
        if self.engine.is_playing() {
            self.engine.stop();
        } else {
            self.playhead = None;
            self.engine.start();
        }
    }

    fn select_instrument(&mut self, index: usize) {
        self.instrument = Instrument::ALL[index];
        let rows = self.instrument.rows().len();
        if self.cursor_row >= rows {
            self.cursor_row = rows - 1;
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_step: isize) {
        let rows = self.instrument.rows().len() as isize;
        let steps = self.engine.session().pattern.step_count() as isize;
        self.cursor_row = (self.cursor_row as isize + d_row).rem_euclid(rows) as usize;
        self.cursor_step = (self.cursor_step as isize + d_step).rem_euclid(steps) as usize;
    }

    fn nudge_bpm(&mut self, delta: i32) {
        let mut session = self.engine.session();
        let bpm = session.bpm() as i32 + delta;
        session.set_bpm(bpm.max(0) as u32);
    }

    fn nudge_swing(&mut self, delta: f32) {
        let mut session = self.engine.session();
        let swing = session.swing() + delta;
        session.set_swing(swing);
    }

    fn nudge_volume(&mut self, delta: f32) {
        let instrument = self.instrument;
        let mut session = self.engine.session();
        let volume = session.mixer.volume(instrument) + delta;
        session.mixer.set_volume(instrument, volume);
    }

    /// Cycle 16 -> 32 -> 64 steps. The scheduler's step index must never
    /// outrun the grid, so a running transport is restarted around the
    /// resize.
    fn cycle_step_count(&mut self) {
        let was_playing = self.engine.is_playing();
        if was_playing {
            self.engine.stop();
        }
        {
            let mut session = self.engine.session();
            let current = session.pattern.step_count();
            let position = STEP_COUNTS.iter().position(|&n| n == current).unwrap_or(0);
            let next = STEP_COUNTS[(position + 1) % STEP_COUNTS.len()];
            session.pattern.resize(next);
        }
        self.cursor_step = 0;
        self.playhead = None;
        if was_playing {
            self.engine.start();
        }
    }
}
