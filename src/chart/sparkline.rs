use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::{no_data, value_range, ChartPalette, ChartSeries};

pub const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Quantize a value into one of the eight levels between `min` and `max`.
/// Truncates over seven steps, so only the maximum reaches the full block.
pub fn level(value: f64, min: f64, max: f64) -> usize {
    let norm = ((value - min) / (max - min)).clamp(0.0, 1.0);
    ((norm * (LEVELS.len() - 1) as f64) as usize).min(LEVELS.len() - 1)
}

/// One glyph per value, no axis
pub fn sparkline(values: &[f64]) -> String {
    if values.is_empty() {
        return String::new();
    }
    let (min, max) = value_range(values);
    values.iter().map(|&v| LEVELS[level(v, min, max)]).collect()
}

pub fn render(series: &ChartSeries, palette: &ChartPalette) -> Vec<Line<'static>> {
    if series.is_empty() {
        return no_data(palette);
    }
    vec![Line::from(vec![
        Span::styled("Sparkline: ", Style::default().fg(palette.text)),
        Span::styled(sparkline(&series.values), Style::default().fg(palette.accent)),
    ])]
}
