use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::{no_data, ChartPalette, ChartSeries};
use crate::util::{pad_right, truncate_ellipsis};

pub const LABEL_WIDTH: usize = 15;
/// Total width shared by the label column, the bars and the value text
pub const CHART_WIDTH: usize = 60;
/// Columns reserved for the separator and the printed value
const VALUE_COLS: usize = 15;
const BAR_GLYPH: char = '█';

/// Largest value, or 1 when the largest value is exactly zero.
/// A negative maximum is kept, so an all-negative series scales against it.
pub fn scale_max(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == 0.0 {
        1.0
    } else {
        max
    }
}

/// Room left for bars once the label column is laid out
pub fn bar_width(label_width: usize) -> usize {
    CHART_WIDTH - label_width.min(LABEL_WIDTH) - VALUE_COLS
}

/// Bar length in cells, rounded and clamped to `[0, width]`
pub fn bar_length(value: f64, max: f64, width: usize) -> usize {
    let len = (width as f64 * value / max).round();
    if len.is_nan() || len <= 0.0 {
        0
    } else {
        (len as usize).min(width)
    }
}

/// Width of the label column: the widest label, capped at `LABEL_WIDTH`
pub fn label_width(series: &ChartSeries) -> usize {
    series
        .entries()
        .map(|(label, _)| unicode_width::UnicodeWidthStr::width(label))
        .max()
        .unwrap_or(0)
        .min(LABEL_WIDTH)
}

pub fn render(series: &ChartSeries, palette: &ChartPalette) -> Vec<Line<'static>> {
    if series.is_empty() {
        return no_data(palette);
    }

    let max = scale_max(&series.values);
    let width = label_width(series);
    let bars = bar_width(width);
    let text = Style::default().fg(palette.text);
    let bar = Style::default().fg(palette.accent);

    let mut lines: Vec<Line<'static>> = series
        .entries()
        .map(|(label, value)| {
            let label = pad_right(&truncate_ellipsis(label, width), width);
            let glyphs: String = std::iter::repeat(BAR_GLYPH)
                .take(bar_length(value, max, bars))
                .collect();
            Line::from(vec![
                Span::styled(label, text),
                Span::styled(" │ ", Style::default().fg(palette.dim)),
                Span::styled(glyphs, bar),
                Span::styled(format!(" {:.1}", value), text),
            ])
        })
        .collect();

    let indent = " ".repeat(width);
    lines.push(Line::styled(
        format!("{} └{}", indent, "─".repeat(bars + 2)),
        Style::default().fg(palette.dim),
    ));
    lines.push(Line::from(vec![
        Span::styled(format!("{}  0", indent), Style::default().fg(palette.dim)),
        Span::raw(" ".repeat(bars - 10)),
        Span::styled(format!("{:.1}", max), text.add_modifier(Modifier::BOLD)),
    ]));
    lines
}
