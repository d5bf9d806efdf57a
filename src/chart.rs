//! ASCII chart rendering for a selected range.
//!
//! Each chart has a pure rasterizer (grids of glyphs or slice indices) and a
//! `render` wrapper that applies a [`ChartPalette`] and returns ratatui lines.

pub mod series;
pub mod bar;
pub mod line;
pub mod sparkline;
pub mod pie;

use ratatui::style::Color;
use ratatui::text::Line;

pub use series::{extract_series, ChartSeries};

/// Placeholder rendered by every chart when there are no values
pub const NO_DATA: &str = "No data to visualize";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Sparkline,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Sparkline,
        ChartKind::Pie,
    ];

    /// Digit keys 1-4 select a chart
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(ChartKind::Bar),
            '2' => Some(ChartKind::Line),
            '3' => Some(ChartKind::Sparkline),
            '4' => Some(ChartKind::Pie),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Sparkline => "Sparkline",
            ChartKind::Pie => "Pie Chart",
        }
    }
}

/// Colors a chart is drawn with, taken from the active theme
#[derive(Debug, Clone)]
pub struct ChartPalette {
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    /// Cycled through for pie slices and legend markers
    pub slices: Vec<Color>,
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            accent: Color::Green,
            text: Color::Reset,
            dim: Color::DarkGray,
            slices: vec![Color::Green, Color::Magenta, Color::Cyan, Color::Blue, Color::Yellow],
        }
    }
}

impl ChartPalette {
    pub fn slice_color(&self, idx: usize) -> Color {
        if self.slices.is_empty() {
            self.accent
        } else {
            self.slices[idx % self.slices.len()]
        }
    }
}

pub fn render(kind: ChartKind, series: &ChartSeries, palette: &ChartPalette) -> Vec<Line<'static>> {
    match kind {
        ChartKind::Bar => bar::render(series, palette),
        ChartKind::Line => line::render(series, palette),
        ChartKind::Sparkline if series.is_empty() => no_data(palette),
        ChartKind::Sparkline => {
            // Strip first, then the bars for the same values
            let mut lines = sparkline::render(series, palette);
            lines.push(Line::default());
            lines.extend(bar::render(series, palette));
            lines
        }
        ChartKind::Pie => pie::render(series, palette),
    }
}

pub(crate) fn no_data(palette: &ChartPalette) -> Vec<Line<'static>> {
    vec![Line::styled(NO_DATA, ratatui::style::Style::default().fg(palette.dim))]
}

/// Min and max of a non-empty slice, with a flat series widened to `[min, min + 1]`
pub(crate) fn value_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}
