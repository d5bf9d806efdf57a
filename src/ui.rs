pub mod modal;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style as RatStyle,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::mode::Mode;
use crate::style::Style;
use crate::table::viewport::GUTTER_COLS;
use crate::util::{cell_ref, fit_to_width, letters_from_col, pad_center, truncate};

/// How a grid cell is highlighted, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellHighlight {
    Cursor,
    Selection,
    Match,
    CursorRow,
    CursorCol,
    Plain,
}

impl CellHighlight {
    pub fn style(&self, style: &Style) -> RatStyle {
        match self {
            CellHighlight::Cursor => style.cell_cursor(),
            CellHighlight::Selection => style.cell_selection(),
            CellHighlight::Match => style.cell_match(),
            CellHighlight::CursorRow => style.row_highlight(),
            CellHighlight::CursorCol => style.col_highlight(),
            CellHighlight::Plain => style.cell(),
        }
    }
}

/// Pick the highlight for a cell: cursor > selection > search match > cursor row > cursor column
pub fn cell_highlight(app: &App, row: usize, col: usize) -> CellHighlight {
    let view = &app.view;
    if row == view.cursor_row && col == view.cursor_col {
        CellHighlight::Cursor
    } else if app.selection.contains(row, col) {
        CellHighlight::Selection
    } else if app.search_handler().results.is_match(row, col) {
        CellHighlight::Match
    } else if row == view.cursor_row {
        CellHighlight::CursorRow
    } else if col == view.cursor_col {
        CellHighlight::CursorCol
    } else {
        CellHighlight::Plain
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let show_search = app.mode == Mode::Search || app.search_handler().is_active();
    let help_lines = app.help_rows();
    let banner = app.banner_rows();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(1),
            Constraint::Length(if show_search { 1 } else { 0 }),
            Constraint::Length(help_lines),
            Constraint::Length(banner),
        ])
        .split(frame.size());

    render_title(frame, app, chunks[0]);
    render_formula_bar(frame, app, chunks[1]);
    render_grid(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
    if show_search {
        render_search_bar(frame, app, chunks[5]);
    }
    render_help(frame, app, chunks[6]);
    if banner > 0 {
        render_selection_banner(frame, app, chunks[7]);
    }

    if app.mode.is_modal() {
        let area = frame.size();
        modal::render(frame, app, area);
    }
}

/// `file • sheet`, with the sheet position when there is more than one
pub fn title_text(app: &App) -> String {
    let sheet = app.sheet();
    let count = app.workbook.sheet_count();
    if count > 1 {
        format!(
            " {} • {} ({}/{})",
            app.file_name,
            sheet.name,
            app.workbook.active_index() + 1,
            count
        )
    } else {
        format!(" {} • {}", app.file_name, sheet.name)
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(title_text(app)).style(app.style.title());
    frame.render_widget(title, area);
}

fn render_formula_bar(frame: &mut Frame, app: &App, area: Rect) {
    let style = &app.style;
    let view = &app.view;
    let reference = cell_ref(view.cursor_row, view.cursor_col);

    let mut spans = vec![Span::styled(format!(" {}", reference), style.modal_key())];
    if let Some(cell) = app.sheet().cell(view.cursor_row, view.cursor_col) {
        spans.push(match cell.formula.as_deref() {
            Some(formula) => Span::styled(format!(" = {}", truncate(formula, 100)), style.cell()),
            None => Span::styled(format!(" {}", truncate(&cell.value, 100)), style.row_number()),
        });
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(style.formula_bar()), area);
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let sheet = app.sheet();
    let view = &app.view;
    let style = &app.style;
    let width = view.cell_width;
    let gutter = GUTTER_COLS as usize - 1;
    let sep = || Span::styled("│", style.separator());

    let first_col = view.viewport_col;
    let last_col = (first_col + view.viewport_width).min(sheet.max_cols());
    let first_row = view.viewport_row;
    let last_row = (first_row + view.viewport_height).min(sheet.max_rows());

    let mut lines = Vec::with_capacity(last_row.saturating_sub(first_row) + 1);

    // Column letters
    let mut header = vec![Span::styled(" ".repeat(gutter), style.row_number()), sep()];
    for col in first_col..last_col {
        let header_style = if col == view.cursor_col { style.header_cursor() } else { style.header() };
        header.push(Span::styled(pad_center(&letters_from_col(col), width), header_style));
        header.push(sep());
    }
    lines.push(Line::from(header));

    for row in first_row..last_row {
        let number_style = if row == view.cursor_row {
            style.row_number_cursor()
        } else {
            style.row_number()
        };
        let mut spans = vec![
            Span::styled(format!("{:>w$}", row + 1, w = gutter), number_style),
            sep(),
        ];
        for col in first_col..last_col {
            let text = sheet
                .cell(row, col)
                .map(|c| c.display(app.show_formulas))
                .unwrap_or_default();
            let highlight = cell_highlight(app, row, col);
            spans.push(Span::styled(fit_to_width(&text, width), highlight.style(style)));
            spans.push(sep());
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let style = &app.style;
    let sheet = app.sheet();
    let key = style.modal_key();
    let value = style.status_bar();
    let divider = || Span::styled(" │ ", style.separator());

    let mut spans = vec![
        Span::styled(format!(" {} ", app.mode.display_name()), style.highlight()),
        divider(),
        Span::styled("Rows:", key),
        Span::styled(format!(" {}", sheet.max_rows()), value),
        divider(),
        Span::styled("Cols:", key),
        Span::styled(format!(" {}", sheet.max_cols()), value),
        divider(),
        Span::styled("Pos:", key),
        Span::styled(format!(" {}", cell_ref(app.view.cursor_row, app.view.cursor_col)), value),
    ];

    if app.show_formulas {
        spans.push(divider());
        spans.push(Span::styled("Formulas", style.highlight()));
    }

    let results = &app.search_handler().results;
    if !results.is_empty() {
        spans.push(divider());
        spans.push(Span::styled(
            format!("🔍 {}/{}", results.current_index() + 1, results.len()),
            style.cell_match(),
        ));
    }

    if !app.status.text.is_empty() {
        spans.push(divider());
        spans.push(Span::styled(app.status.text.clone(), style.status(app.status.level)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(style.status_bar()), area);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let style = &app.style;
    let search = app.search_handler();

    let mut spans = vec![Span::styled("/", style.search_prompt())];
    if app.mode == Mode::Search {
        spans.extend(modal::input_spans(&search.input, style));
    } else {
        spans.push(Span::styled(search.query.clone(), style.cell()));
        if !search.results.is_empty() {
            spans.push(Span::styled(
                format!(" ({} results)", search.results.len()),
                style.row_number(),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(style.search_bar()), area);
}

/// `key desc • key desc ...`
fn help_line(entries: &[(&'static str, &'static str)], style: &Style) -> Line<'static> {
    let mut spans = Vec::with_capacity(entries.len() * 3);
    for (i, (keys, desc)) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", style.separator()));
        }
        spans.push(Span::styled(*keys, style.modal_key()));
        spans.push(Span::styled(format!(" {}", desc), style.help()));
    }
    Line::from(spans)
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = if app.show_help {
        app.keymap
            .full_help()
            .iter()
            .map(|group| help_line(group, &app.style))
            .collect()
    } else {
        vec![help_line(&app.keymap.short_help(), &app.style)]
    };
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_selection_banner(frame: &mut Frame, app: &App, area: Rect) {
    let rect = app.selection.normalize();
    let text = format!(
        "  SELECTION MODE: {}×{} | Move with arrows | V to finish | Esc to cancel",
        rect.rows(),
        rect.cols()
    );
    frame.render_widget(Paragraph::new(text).style(app.style.selection_banner()), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::RecordingClipboard;
    use crate::config::AppConfig;
    use crate::table::{Position, Sheet, Workbook};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn app(sheets: Vec<Sheet>) -> App {
        let workbook = Workbook::new(sheets).unwrap();
        let mut app = App::new(
            workbook,
            "data.xlsx".to_string(),
            AppConfig::new(),
            Box::new(RecordingClipboard::default()),
        );
        app.resize(80, 24);
        app
    }

    fn grid(rows: usize, cols: usize) -> Sheet {
        let values = (0..rows)
            .map(|r| (0..cols).map(|c| format!("{}{}", r, c)).collect())
            .collect();
        Sheet::from_values("Sheet1", values)
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    /// Screen as one string per terminal row
    fn screen_rows(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    /// Rows between the spacer under the formula bar and the status bar
    fn grid_rows(rows: &[String]) -> Vec<String> {
        let status = rows.iter().position(|r| r.contains("Pos:")).unwrap();
        rows[3..status].to_vec()
    }

    fn shows_row(rows: &[String], number: usize) -> bool {
        let gutter = format!("{:>w$}│", number, w = GUTTER_COLS as usize - 1);
        grid_rows(rows).iter().any(|r| r.starts_with(&gutter))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_full_help_keeps_cursor_row_on_grid() {
        let mut app = app(vec![grid(100, 5)]);
        for _ in 0..14 {
            press(&mut app, KeyCode::Down);
        }
        assert!(shows_row(&screen_rows(&app, 80, 24), 15));

        // The help block grows by six lines and the window follows the cursor
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.view.extent().rows, 11);
        let rows = screen_rows(&app, 80, 24);
        assert!(shows_row(&rows, 15));
        assert!(rows.iter().any(|r| r.contains("next sheet")));

        for _ in 0..20 {
            press(&mut app, KeyCode::Down);
            let cursor = app.view.cursor_row;
            assert!(shows_row(&screen_rows(&app, 80, 24), cursor + 1), "row {}", cursor + 1);
        }

        // The selection banner takes one more line
        press(&mut app, KeyCode::Char('V'));
        assert_eq!(app.view.extent().rows, 10);
        for _ in 0..3 {
            press(&mut app, KeyCode::Down);
        }
        let rows = screen_rows(&app, 80, 24);
        assert!(shows_row(&rows, 38));
        assert!(rows.iter().any(|r| r.contains("SELECTION MODE")));

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.view.extent().rows, 17);
        assert!(shows_row(&screen_rows(&app, 80, 24), 38));
    }

    #[test]
    fn test_chart_modal_scrolls_to_legend() {
        let sheet = Sheet::from_values(
            "Sales",
            vec![
                vec!["jan".into(), "10".into()],
                vec!["feb".into(), "20".into()],
                vec!["mar".into(), "30".into()],
            ],
        );
        let mut app = app(vec![sheet]);
        for code in [
            KeyCode::Char('V'),
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Right,
            KeyCode::Char('V'),
            KeyCode::Char('v'),
            KeyCode::Char('4'),
        ] {
            press(&mut app, code);
        }
        assert_eq!(app.mode, Mode::Chart);

        let overflow = modal::chart_overflow(&app, 24);
        assert!(overflow > 0);
        let screen = draw(&app);
        assert!(!screen.contains("mar: 50.0%"));

        for _ in 0..overflow + 3 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.chart_handler().scroll, overflow);
        let screen = draw(&app);
        assert!(screen.contains("mar: 50.0%"));
        assert!(screen.contains("Esc to close"));

        // Switching variant starts from the top again
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.chart_handler().scroll, 0);
        assert!(draw(&app).contains("→ 2."));
    }

    #[test]
    fn test_highlight_precedence() {
        let mut app = app(vec![grid(10, 10)]);
        app.view.jump_to(Position::new(2, 2));
        app.selection.start(Position::new(1, 1));
        app.selection.update(Position::new(3, 3));
        app.search_handler.commit("11", &mut app.view.clone(), &grid(10, 10)).unwrap();

        assert_eq!(cell_highlight(&app, 2, 2), CellHighlight::Cursor);
        assert_eq!(cell_highlight(&app, 1, 1), CellHighlight::Selection);
        assert_eq!(cell_highlight(&app, 2, 5), CellHighlight::CursorRow);
        assert_eq!(cell_highlight(&app, 5, 2), CellHighlight::CursorCol);
        assert_eq!(cell_highlight(&app, 6, 6), CellHighlight::Plain);

        app.selection.cancel();
        assert_eq!(cell_highlight(&app, 1, 1), CellHighlight::Match);
    }

    #[test]
    fn test_title_counts_sheets() {
        let single = app(vec![grid(1, 1)]);
        assert_eq!(title_text(&single), " data.xlsx • Sheet1");

        let multi = app(vec![grid(1, 1), grid(2, 2)]);
        assert_eq!(title_text(&multi), " data.xlsx • Sheet1 (1/2)");
    }

    #[test]
    fn test_every_mode_draws() {
        let mut app = app(vec![grid(40, 12)]);
        let screen = draw(&app);
        assert!(screen.contains("data.xlsx"));
        assert!(screen.contains("Rows: 40"));

        let keys = [
            KeyCode::Char('V'),
            KeyCode::Down,
            KeyCode::Right,
            KeyCode::Char('V'),
            KeyCode::Char('v'),
            KeyCode::Char('2'),
            KeyCode::Char('3'),
            KeyCode::Char('4'),
            KeyCode::Esc,
            KeyCode::Enter,
            KeyCode::Esc,
            KeyCode::Char('t'),
            KeyCode::Esc,
            KeyCode::Char('e'),
            KeyCode::Esc,
            KeyCode::Char('/'),
            KeyCode::Esc,
            KeyCode::Char('?'),
        ];
        for code in keys {
            app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
            draw(&app);
        }
        app.handle_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL));
        assert!(draw(&app).contains("Jump to Cell"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = app(vec![grid(3, 3)]);
        app.resize(10, 4);
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
    }
}
