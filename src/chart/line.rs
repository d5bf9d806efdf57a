use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::{no_data, value_range, ChartPalette, ChartSeries};

pub const HEIGHT: usize = 15;
pub const WIDTH: usize = 60;
pub const POINT: char = '●';
const BLANK: char = ' ';
/// Y-axis labels are printed on every Nth grid row
const LABEL_EVERY: usize = 3;

/// Grid column for point `i` of `n`. A single point sits in column 0.
pub fn column_for(i: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let x = (i as f64 * (width - 1) as f64 / (n - 1) as f64).round() as usize;
    x.min(width - 1)
}

/// Grid row for a value; the maximum maps to row 0
pub fn row_for(value: f64, min: f64, max: f64, height: usize) -> usize {
    let norm = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let from_bottom = (norm * (height - 1) as f64).round() as usize;
    (height - 1) - from_bottom.min(height - 1)
}

/// Rasterize the series onto a `height` x `width` glyph grid.
/// Points are placed first; connecting segments only fill blank cells, so the
/// first segment through a cell keeps it.
pub fn line_grid(values: &[f64], height: usize, width: usize) -> Vec<Vec<char>> {
    let mut grid = vec![vec![BLANK; width]; height];
    if values.is_empty() || height == 0 || width == 0 {
        return grid;
    }

    let (min, max) = value_range(values);
    let n = values.len();
    let points: Vec<(usize, usize)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (column_for(i, n, width), row_for(v, min, max, height)))
        .collect();

    for &(x, y) in &points {
        grid[y][x] = POINT;
    }
    for pair in points.windows(2) {
        draw_segment(&mut grid, pair[0], pair[1]);
    }
    grid
}

/// Bresenham between two grid cells, writing only into blank cells
fn draw_segment(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize)) {
    let (mut x, mut y) = (from.0 as i64, from.1 as i64);
    let (x1, y1) = (to.0 as i64, to.1 as i64);
    let dx = (x1 - x).abs();
    let dy = (y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };

    let glyph = if dx > dy {
        '─'
    } else if dy > dx {
        '│'
    } else if sx == sy {
        '\\'
    } else {
        '/'
    };

    let mut err = dx - dy;
    loop {
        if let Some(cell) = grid
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            if *cell == BLANK {
                *cell = glyph;
            }
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

pub fn render(series: &ChartSeries, palette: &ChartPalette) -> Vec<Line<'static>> {
    if series.is_empty() {
        return no_data(palette);
    }

    let (min, max) = value_range(&series.values);
    let grid = line_grid(&series.values, HEIGHT, WIDTH);
    let axis = Style::default().fg(palette.text);
    let plot = Style::default().fg(palette.accent);

    let mut lines: Vec<Line<'static>> = grid
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let label = if i % LABEL_EVERY == 0 {
                let v = max - (i as f64 / (HEIGHT - 1) as f64) * (max - min);
                format!("{:6.1}│", v)
            } else {
                "      │".to_string()
            };
            let mut spans = vec![Span::styled(label, axis)];
            spans.extend(glyph_runs(&row, plot));
            Line::from(spans)
        })
        .collect();

    lines.push(Line::styled(format!("      └{}", "─".repeat(WIDTH)), axis));
    lines
}

/// Group a grid row into spans so blanks stay unstyled
fn glyph_runs(row: &[char], plot: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut blank_run = true;
    for &c in row {
        let blank = c == BLANK;
        if blank != blank_run && !run.is_empty() {
            spans.push(run_span(std::mem::take(&mut run), blank_run, plot));
        }
        blank_run = blank;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(run_span(run, blank_run, plot));
    }
    spans
}

fn run_span(text: String, blank: bool, plot: Style) -> Span<'static> {
    if blank {
        Span::raw(text)
    } else {
        Span::styled(text, plot)
    }
}
