//! Spectrum bars widget
//!
//! The monitor hands over linearly spaced bins already normalized to [0, 1];
//! this widget resamples them onto a log frequency axis so the musical range
//! fills the screen instead of cramming into the first few columns.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

/// Render the output spectrum as one bar per column.
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[f32]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);
    let inner = block.inner(area);
    if spectrum.is_empty() || inner.width < 4 || inner.height < 2 {
        frame.render_widget(block, area);
        return;
    }

    let bar_count = inner.width as usize;
    let bins = spectrum.len() as f64;
    // Log-spaced column edges over the bin range, skipping DC
    let edge = |i: usize| -> usize {
        let t = i as f64 / bar_count as f64;
        (bins.powf(t) as usize).clamp(1, spectrum.len())
    };

    let bars: Vec<Bar> = (0..bar_count)
        .map(|i| {
            let lo = edge(i);
            let hi = edge(i + 1).max(lo + 1).min(spectrum.len());
            let level = spectrum[lo.min(hi)..hi]
                .iter()
                .fold(0.0f32, |acc, &x| acc.max(x));
            Bar::default()
                .value((level * 100.0) as u64)
                .text_value(String::new())
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(1)
        .bar_gap(0)
        .max(100)
        .bar_style(Style::default().fg(Color::Green))
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}
