//! TUI module for bandbox
//!
//! A grid editor on top, live output views below. All widgets are free
//! functions drawing from one borrowed [`View`] per frame.

mod grid;
mod spectrum;
mod transport;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use bandbox::session::Session;
use bandbox::voices::Instrument;

use grid::render_grid;
use spectrum::render_spectrum;
use transport::render_transport;
use waveform::render_waveform;

/// Everything one frame needs, borrowed for the duration of the draw.
pub struct View<'a> {
    pub session: &'a Session,
    pub instrument: Instrument,
    /// (row, step) of the edit cursor on the visible grid.
    pub cursor: (usize, usize),
    pub playhead: Option<usize>,
    pub playing: bool,
    pub master_gain: f32,
    pub sample_rate: Option<f32>,
    pub waveform: &'a [f32],
    pub spectrum: &'a [f32],
}

pub fn render(frame: &mut Frame, view: &View) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Transport bar
            Constraint::Min(12),    // Step grid
            Constraint::Length(9),  // Output views
            Constraint::Length(1),  // Help bar
        ])
        .split(area);

    render_transport(frame, chunks[0], view);
    render_grid(frame, chunks[1], view);

    let views = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    render_waveform(frame, views[0], view.waveform);
    render_spectrum(frame, views[1], view.spectrum);

    let help = Paragraph::new(
        " [Space] Play  [1-4] Instrument  [Arrows] Cursor  [Enter] Toggle  [-/+] BPM  [[/]] Swing  [,/.] Volume  [M]ute  [V]ariant  [C]lear  [S]teps  [Q]uit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}
