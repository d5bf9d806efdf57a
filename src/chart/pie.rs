use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::{no_data, ChartPalette, ChartSeries};

pub const RADIUS: usize = 10;
const FILL: &str = "●";
const MARKER: &str = "■";

/// Sum of the values, or 1 when it is zero
pub fn total(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    if sum == 0.0 {
        1.0
    } else {
        sum
    }
}

/// Angle of the offset from the center in degrees, in `[0, 360)`
pub fn polar_angle(dx: f64, dy: f64) -> f64 {
    let deg = dy.atan2(dx).to_degrees();
    if deg < 0.0 {
        deg + 360.0
    } else {
        deg
    }
}

/// Upper angular bound of each slice: `cumulative_percent_i * 360`
pub fn slice_bounds(values: &[f64]) -> Vec<f64> {
    let total = total(values);
    values
        .iter()
        .scan(0.0, |cum, &v| {
            *cum += v / total;
            Some(*cum * 360.0)
        })
        .collect()
}

/// Slice owning an angle: entry `i` covers `[bound_{i-1}, bound_i)`
pub fn slice_at(angle: f64, bounds: &[f64]) -> Option<usize> {
    let mut start = 0.0;
    for (i, &end) in bounds.iter().enumerate() {
        if angle >= start && angle < end {
            return Some(i);
        }
        start = end;
    }
    None
}

/// `(2r+1)` square grid of slice indices; cells outside the circle are `None`
pub fn pie_grid(values: &[f64], radius: usize) -> Vec<Vec<Option<usize>>> {
    let size = radius * 2 + 1;
    let bounds = slice_bounds(values);
    let center = radius as f64;

    (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    let dx = x as f64 - center;
                    let dy = y as f64 - center;
                    if dx.hypot(dy) <= radius as f64 {
                        slice_at(polar_angle(dx, dy), &bounds)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect()
}

pub fn render(series: &ChartSeries, palette: &ChartPalette) -> Vec<Line<'static>> {
    if series.is_empty() {
        return no_data(palette);
    }

    let mut lines: Vec<Line<'static>> = pie_grid(&series.values, RADIUS)
        .into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|slot| match slot {
                    Some(i) => Span::styled(FILL, Style::default().fg(palette.slice_color(i))),
                    None => Span::raw(" "),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    lines.push(Line::default());

    let total = total(&series.values);
    let text = Style::default().fg(palette.text);
    lines.extend(series.entries().enumerate().map(|(i, (label, value))| {
        Line::from(vec![
            Span::styled(MARKER, Style::default().fg(palette.slice_color(i))),
            Span::styled(format!(" {}: {:.1}%", label, value / total * 100.0), text),
        ])
    }));
    lines
}
