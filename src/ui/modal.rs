use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::chart::{self, ChartKind};
use crate::input::LineInput;
use crate::mode::detail::CellDetail;
use crate::mode::Mode;
use crate::style::{Style, Theme};
use crate::util::wrap_text;

/// Preferred chart modal size; shrunk to the terminal when smaller
const CHART_SIZE: (u16, u16) = (72, 40);

const THEME_BLURBS: [&str; 6] = [
    "Soft pastels, gentle on the eyes",
    "Cool Arctic blues, minimal",
    "Elegant rose tones",
    "Vibrant cyberpunk vibes",
    "Warm retro colors",
    "Classic high contrast",
];

/// Centered box of at most `width` x `height`, shrunk to fit the terminal
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Input text with a block caret at the caret position
pub fn input_spans(input: &LineInput, style: &Style) -> Vec<Span<'static>> {
    let chars: Vec<char> = input.value().chars().collect();
    let caret = input.caret().min(chars.len());
    let before: String = chars[..caret].iter().collect();
    let under = chars.get(caret).map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
    let after: String = chars.get(caret + 1..).map(|s| s.iter().collect()).unwrap_or_default();

    vec![
        Span::styled(before, style.cell()),
        Span::styled(under, style.cell_cursor()),
        Span::styled(after, style.cell()),
    ]
}

/// Chart content lines that do not fit in the modal on a terminal `height` rows tall
pub fn chart_overflow(app: &App, height: u16) -> usize {
    let inner = CHART_SIZE.1.min(height).saturating_sub(2) as usize;
    chart_lines(app).len().saturating_sub(inner)
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (title, lines, width, height) = match app.mode {
        Mode::Detail => ("Cell Details", detail_lines(app), 64, 20),
        Mode::Jump => ("Jump to Cell", jump_lines(app), 50, 11),
        Mode::Export => ("Export Sheet", export_lines(app), 50, 8),
        Mode::Theme => ("Select Theme", theme_lines(app), 60, 24),
        Mode::Chart => ("Data Visualization", chart_lines(app), CHART_SIZE.0, CHART_SIZE.1),
        Mode::Normal | Mode::Search | Mode::SelectRange => return,
    };

    let style = &app.style;
    let modal_area = centered(area, width, height);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style.modal_border())
        .title(Span::styled(format!(" {} ", title), style.modal_title()))
        .title_alignment(Alignment::Center)
        .style(style.modal());

    let scroll = if app.mode == Mode::Chart {
        app.chart_handler().scroll.min(chart_overflow(app, area.height))
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, modal_area);
}

fn detail_lines(app: &App) -> Vec<Line<'static>> {
    let style = &app.style;
    let detail = CellDetail::at(app.sheet(), app.view.cursor());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Cell: ", style.modal_key()),
            Span::styled(detail.reference, style.modal_value()),
        ]),
        Line::default(),
        Line::styled("Value:", style.modal_key()),
    ];
    lines.extend(
        wrap_text(&detail.value, 56)
            .into_iter()
            .map(|l| Line::styled(l, style.modal_value())),
    );

    if let Some(formula) = detail.formula {
        lines.push(Line::default());
        lines.push(Line::styled("Formula:", style.modal_key()));
        lines.extend(
            wrap_text(&format!("={}", formula), 56)
                .into_iter()
                .map(|l| Line::styled(l, style.modal_value())),
        );
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Type: ", style.modal_key()),
        Span::styled(detail.kind, style.modal_value()),
    ]));
    lines.push(Line::default());
    lines.push(Line::styled("Press Enter or Esc to close", style.dim()));
    lines
}

fn jump_lines(app: &App) -> Vec<Line<'static>> {
    let style = &app.style;
    vec![
        Line::styled("Enter cell reference:", style.modal_key()),
        Line::from(input_spans(&app.jump_handler().input, style)),
        Line::default(),
        Line::styled("Formats:", style.help()),
        Line::styled("  • A100   (column + row)", style.modal_value()),
        Line::styled("  • 500    (row only)", style.modal_value()),
        Line::styled("  • 10,5   (row,col)", style.modal_value()),
    ]
}

fn export_lines(app: &App) -> Vec<Line<'static>> {
    let style = &app.style;
    vec![
        Line::styled("Filename:", style.modal_key()),
        Line::from(input_spans(&app.export_handler().input, style)),
        Line::default(),
        Line::styled("Supported formats: .csv, .json", style.help()),
    ]
}

fn theme_lines(app: &App) -> Vec<Line<'static>> {
    let style = &app.style;
    let mut lines = Vec::new();

    for (i, (name, blurb)) in Theme::builtin_names().iter().zip(THEME_BLURBS).enumerate() {
        let Some(theme) = Theme::by_name(name) else {
            continue;
        };
        let mut spans = vec![
            Span::styled(format!("{}", i + 1), style.highlight()),
            Span::raw("  "),
            Span::styled(theme.name.clone(), style.modal_key()),
        ];
        if theme.name == style.theme.name {
            spans.push(Span::styled(" ✓", style.highlight()));
        }
        lines.push(Line::from(spans));
        lines.push(Line::styled(format!("   {}", blurb), style.help()));
        lines.push(Line::default());
    }

    lines.push(Line::styled("Press 1-6 to select, Esc to cancel", style.dim()));
    lines
}

fn chart_lines(app: &App) -> Vec<Line<'static>> {
    let style = &app.style;
    let handler = app.chart_handler();
    let mut lines = Vec::new();

    for (i, kind) in ChartKind::ALL.iter().enumerate() {
        let label = format!("{}. {}", i + 1, kind.title());
        if *kind == handler.kind {
            lines.push(Line::styled(format!("→ {}", label), style.highlight()));
        } else {
            lines.push(Line::styled(format!("  {}", label), style.modal_value()));
        }
    }

    lines.push(Line::default());
    lines.push(Line::styled("─".repeat(60), style.separator()));
    lines.push(Line::default());
    lines.extend(chart::render(handler.kind, &handler.series, &style.chart_palette()));
    lines.push(Line::default());
    lines.push(Line::styled(
        "Press 1-4 to switch chart type, ↑/↓ to scroll, Esc to close",
        style.dim(),
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered(area, 50, 10), Rect::new(15, 7, 50, 10));
        assert_eq!(centered(area, 200, 100), area);
    }

    #[test]
    fn test_input_caret_span() {
        let style = Style::default();
        let mut input = LineInput::new(10);
        input.set("abc");
        let spans = input_spans(&input, &style);
        assert_eq!(spans[0].content, "abc");
        assert_eq!(spans[1].content, " ");

        input.set("añb");
        input.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Home,
            crossterm::event::KeyModifiers::NONE,
        ));
        input.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Right,
            crossterm::event::KeyModifiers::NONE,
        ));
        let spans = input_spans(&input, &style);
        assert_eq!(spans[0].content, "a");
        assert_eq!(spans[1].content, "ñ");
        assert_eq!(spans[2].content, "b");
    }
}
