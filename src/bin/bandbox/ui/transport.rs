//! Transport bar widget - play state, tempo, feel, channel summary

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::View;

/// Render the transport bar.
pub fn render_transport(frame: &mut Frame, area: Rect, view: &View) {
    let block = Block::default().title(" bandbox ").borders(Borders::ALL);

    let play_symbol = if view.playing { "▶" } else { "⏸" };
    let play_state = if view.playing { "Playing" } else { "Stopped" };

    let session = view.session;
    let mixer = &session.mixer;
    let instrument = view.instrument;

    let mut spans = vec![
        Span::styled(
            format!(" {} {}  ", play_symbol, play_state),
            Style::default().fg(if view.playing {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            format!("BPM: {}  ", session.bpm()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Swing: {:.2}  ", session.swing()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Steps: {}  ", session.pattern.step_count()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "{} [{}] vol {:.2}",
                instrument.name(),
                mixer.variant_name(instrument),
                mixer.volume(instrument)
            ),
            Style::default().fg(Color::White),
        ),
    ];
    if mixer.is_muted(instrument) {
        spans.push(Span::styled(" MUTED", Style::default().fg(Color::Red)));
    }
    spans.push(Span::styled(
        format!("  Master: {:.2}  ", view.master_gain),
        Style::default().fg(Color::Magenta),
    ));
    if let Some(rate) = view.sample_rate {
        spans.push(Span::styled(
            format!("{:.1}kHz", rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
