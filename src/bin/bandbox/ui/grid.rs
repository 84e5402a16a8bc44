//! Step-grid widget - pattern cells, edit cursor, playhead column

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use bandbox::voices::Instrument;

use super::View;

/// Left gutter holding row labels.
const LABEL_WIDTH: usize = 8;

/// Render the pattern editor for the selected instrument.
pub fn render_grid(frame: &mut Frame, area: Rect, view: &View) {
    let block = Block::default().title(" Pattern ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 4 || inner.width < LABEL_WIDTH as u16 + 8 {
        return;
    }

    let pattern = &view.session.pattern;
    let step_count = pattern.step_count();
    let mut lines = Vec::new();

    // Instrument tabs
    let mut tabs = vec![Span::raw(" ")];
    for (i, instrument) in Instrument::ALL.iter().enumerate() {
        let style = if *instrument == view.instrument {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tabs.push(Span::styled(
            format!(" {}:{} ", i + 1, instrument.name()),
            style,
        ));
        tabs.push(Span::raw(" "));
    }
    lines.push(Line::from(tabs));
    lines.push(Line::default());

    // Beat numbers, one per four steps
    let mut beats = String::new();
    beats.push_str(&" ".repeat(LABEL_WIDTH));
    for step in 0..step_count {
        if step % 4 == 0 {
            beats.push_str(&format!("{:<2}", step / 4 + 1));
        } else {
            beats.push_str("  ");
        }
    }
    lines.push(Line::from(Span::styled(
        beats,
        Style::default().fg(Color::DarkGray),
    )));

    // Voice rows
    for (row_index, row) in view.instrument.rows().iter().enumerate() {
        // Cells sustained by an earlier note's length
        let mut sustain = vec![false; step_count];
        for step in 0..step_count {
            let length = pattern.note_at(view.instrument, row_index, step) as usize;
            for cell in sustain
                .iter_mut()
                .take((step + length).min(step_count))
                .skip(step + 1)
            {
                *cell = true;
            }
        }

        let mut spans = vec![Span::styled(
            format!("{:<7} ", row.label),
            Style::default().fg(Color::White),
        )];
        for step in 0..step_count {
            let length = pattern.note_at(view.instrument, row_index, step);
            let symbol = if length > 0 {
                "█ "
            } else if sustain[step] {
                "▓ "
            } else {
                "░ "
            };
            let mut style = if length > 0 || sustain[step] {
                Style::default().fg(Color::Cyan)
            } else if step % 4 == 0 {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if view.playhead == Some(step) {
                style = style.bg(Color::DarkGray);
            }
            if (row_index, step) == view.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(symbol, style));
        }
        lines.push(Line::from(spans));
    }

    // Playhead marker row
    let mut marker = String::new();
    marker.push_str(&" ".repeat(LABEL_WIDTH));
    if let Some(playhead) = view.playhead {
        for step in 0..step_count {
            marker.push_str(if step == playhead { "▲ " } else { "  " });
        }
    }
    lines.push(Line::from(Span::styled(
        marker,
        Style::default().fg(Color::Yellow),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
