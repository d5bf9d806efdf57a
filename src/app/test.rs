use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use crate::app::App;
use crate::chart::ChartKind;
use crate::clipboard::RecordingClipboard;
use crate::config::AppConfig;
use crate::mode::Mode;
use crate::status::StatusLevel;
use crate::table::{Cell, Position, Sheet, Workbook};

fn grid(name: &str, rows: usize, cols: usize) -> Sheet {
    let values = (0..rows)
        .map(|r| (0..cols).map(|c| format!("{},{}", r, c)).collect())
        .collect();
    Sheet::from_values(name, values)
}

fn app_with(sheets: Vec<Sheet>) -> (App, RecordingClipboard) {
    let clipboard = RecordingClipboard::default();
    let workbook = Workbook::new(sheets).unwrap();
    let mut app = App::new(
        workbook,
        "test.csv".to_string(),
        AppConfig::new(),
        Box::new(clipboard.clone()),
    );
    app.resize(80, 24);
    (app, clipboard)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn press_char(app: &mut App, c: char) {
    let mods = if c.is_ascii_uppercase() { KeyModifiers::SHIFT } else { KeyModifiers::NONE };
    app.handle_key(KeyEvent::new(KeyCode::Char(c), mods));
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        press_char(app, c);
    }
}

fn ctrl(app: &mut App, c: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

#[test]
fn test_cursor_stays_in_bounds() {
    let (mut app, _) = app_with(vec![grid("s", 7, 4)]);
    let keys = [
        KeyCode::Down, KeyCode::PageDown, KeyCode::Right, KeyCode::Right, KeyCode::End,
        KeyCode::Right, KeyCode::PageDown, KeyCode::Down, KeyCode::Up, KeyCode::PageUp,
        KeyCode::PageUp, KeyCode::Left, KeyCode::Home, KeyCode::Left, KeyCode::Up,
    ];
    for code in keys {
        press(&mut app, code);
        let cursor = app.view.cursor();
        assert!(cursor.row < 7 && cursor.col < 4, "{code:?} left {cursor:?}");
        assert!(app.view.is_visible(cursor.row, cursor.col));
    }
    assert_eq!(app.view.cursor(), Position::new(0, 0));

    press_char(&mut app, 'G');
    assert_eq!(app.view.cursor_col, 3);
    press_char(&mut app, 'g');
    assert_eq!(app.view.cursor_col, 0);
}

#[test]
fn test_resize_only_touches_extent() {
    let (mut app, _) = app_with(vec![grid("s", 100, 30)]);
    press(&mut app, KeyCode::PageDown);
    press_char(&mut app, 'V');
    press(&mut app, KeyCode::Right);
    let cursor = app.view.cursor();
    let offset = app.view.offset();
    let selection = app.selection;

    app.handle_event(Event::Resize(20, 5));
    app.handle_event(Event::Resize(200, 60));

    assert_eq!(app.view.cursor(), cursor);
    assert_eq!(app.view.offset(), offset);
    assert_eq!(app.mode, Mode::SelectRange);
    assert_eq!(app.selection.normalize(), selection.normalize());
    // the selection banner takes one row
    assert_eq!(app.view.extent().rows, 52);
}

#[test]
fn test_key_release_is_ignored() {
    let (mut app, _) = app_with(vec![grid("s", 5, 5)]);
    let release = KeyEvent {
        code: KeyCode::Down,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    };
    app.handle_event(Event::Key(release));
    assert_eq!(app.view.cursor_row, 0);
}

#[test]
fn test_select_then_chart() {
    let sheet = Sheet::from_values(
        "sales",
        vec![
            vec!["jan".into(), "10".into()],
            vec!["".into(), "n/a".into()],
            vec!["mar".into(), "30".into()],
        ],
    );
    let (mut app, _) = app_with(vec![sheet]);

    press_char(&mut app, 'v');
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.status.text, "Select range first (V)");
    assert_eq!(app.status.level, StatusLevel::Warning);

    press_char(&mut app, 'V');
    assert_eq!(app.mode, Mode::SelectRange);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Right);
    press_char(&mut app, 'V');
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.status.text, "Selected 3x2 range - Press v to visualize");
    assert!(app.selection.contains(1, 1));

    press_char(&mut app, 'v');
    assert_eq!(app.mode, Mode::Chart);
    let chart = app.chart_handler();
    assert_eq!(chart.kind, ChartKind::Bar);
    assert_eq!(chart.series.labels, vec!["jan", "Row 2", "mar"]);
    assert_eq!(chart.series.values, vec![10.0, 0.0, 30.0]);

    press_char(&mut app, '4');
    assert_eq!(app.chart_handler().kind, ChartKind::Pie);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.mode, Mode::Normal);
    assert!(app.selection.selecting);
}

#[test]
fn test_select_escape_cancels() {
    let (mut app, _) = app_with(vec![grid("s", 5, 5)]);
    press_char(&mut app, 'V');
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.status.text, "Selection cancelled");
    assert!(app.selection.rect().is_none());
}

#[test]
fn test_copy_cell_respects_formula_toggle() {
    let sheet = Sheet::new(
        "s",
        vec![vec![
            Cell::new(0, 0, "6").with_formula("SUM(A2:A4)"),
            Cell::new(0, 1, "plain"),
        ]],
    );
    let (mut app, clipboard) = app_with(vec![sheet]);

    press_char(&mut app, 'c');
    press_char(&mut app, 'f');
    assert_eq!(app.status.text, "Showing formulas");
    press_char(&mut app, 'c');
    press(&mut app, KeyCode::Right);
    press_char(&mut app, 'c');

    assert_eq!(*clipboard.writes.borrow(), vec!["6", "=SUM(A2:A4)", "plain"]);
    assert_eq!(app.status.text, "Copied: plain");
    assert_eq!(app.status.level, StatusLevel::Success);
}

#[test]
fn test_copy_row_ignores_formula_toggle() {
    let sheet = Sheet::new(
        "s",
        vec![vec![Cell::new(0, 0, "a"), Cell::new(0, 1, "2").with_formula("1+1")]],
    );
    let (mut app, clipboard) = app_with(vec![sheet]);
    press_char(&mut app, 'f');
    press_char(&mut app, 'C');
    assert_eq!(*clipboard.writes.borrow(), vec!["a\t2"]);
    assert_eq!(app.status.text, "Copied row 1 (2 cells)");
}

#[test]
fn test_clipboard_failure_is_a_status() {
    let (mut app, _) = app_with(vec![grid("s", 2, 2)]);
    app.clipboard = Box::new(RecordingClipboard { fail: true, ..Default::default() });
    press_char(&mut app, 'c');
    assert!(app.status.is_error());
    assert!(!app.should_quit);
    assert_eq!(app.mode, Mode::Normal);
}

#[test]
fn test_search_flow() {
    let (mut app, _) = app_with(vec![grid("s", 30, 5)]);

    press_char(&mut app, '/');
    assert_eq!(app.mode, Mode::Search);
    type_str(&mut app, "2,3");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::Normal);
    // "2,3", "12,3" and "22,3"
    assert_eq!(app.status.text, "Found 3 results");
    assert_eq!(app.view.cursor(), Position::new(2, 3));

    press_char(&mut app, 'N');
    assert_eq!(app.status.text, "Match 3/3");
    assert_eq!(app.view.cursor(), Position::new(22, 3));
    press_char(&mut app, 'n');
    assert_eq!(app.view.cursor(), Position::new(2, 3));

    press_char(&mut app, '/');
    assert_eq!(app.search_handler().input.value(), "2,3");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.search_handler().results.len(), 3);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.status.text, "Search cleared");
    assert!(app.search_handler().results.is_empty());
}

#[test]
fn test_jump_flow() {
    let (mut app, _) = app_with(vec![grid("s", 50, 12)]);

    ctrl(&mut app, 'g');
    assert_eq!(app.mode, Mode::Jump);
    type_str(&mut app, "J10");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.view.cursor(), Position::new(9, 9));
    assert_eq!(app.status.text, "→ J10");

    ctrl(&mut app, 'g');
    type_str(&mut app, "999999");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.view.cursor(), Position::new(9, 9));
    assert_eq!(app.status.text, "Invalid cell reference");
    assert!(app.status.is_error());
}

#[test]
fn test_sheet_switch_resets_state() {
    let (mut app, _) = app_with(vec![grid("first", 20, 20), grid("second", 3, 3)]);
    press_char(&mut app, '/');
    type_str(&mut app, "1");
    press(&mut app, KeyCode::Enter);
    ctrl(&mut app, 'g');
    type_str(&mut app, "T20");
    press(&mut app, KeyCode::Enter);
    press_char(&mut app, 'V');
    press_char(&mut app, 'V');

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.sheet().name, "second");
    assert_eq!(app.status.text, "→ second");
    assert_eq!(app.view.cursor(), Position::new(0, 0));
    assert_eq!(app.view.offset().row, 0);
    assert!(app.search_handler().results.is_empty());
    assert_eq!(app.search_handler().query, "1");
    assert!(app.selection.rect().is_none());

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.sheet().name, "second");
    app.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
    assert_eq!(app.status.text, "← first");
}

#[test]
fn test_export_flow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let (mut app, _) = app_with(vec![grid("s", 2, 2)]);

    press_char(&mut app, 'e');
    assert_eq!(app.mode, Mode::Export);
    type_str(&mut app, path.to_str().unwrap());
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.status.level, StatusLevel::Success);
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "\"0,0\",\"0,1\"\n\"1,0\",\"1,1\"\n");
}

#[test]
fn test_modal_modes_return_to_normal() {
    let (mut app, _) = app_with(vec![grid("s", 3, 3)]);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::Detail);
    press_char(&mut app, 'q');
    assert_eq!(app.mode, Mode::Normal);
    assert!(!app.should_quit);

    press_char(&mut app, 't');
    assert_eq!(app.mode, Mode::Theme);
    press_char(&mut app, '6');
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.status.text, "Theme: Dracula");

    press_char(&mut app, '?');
    assert!(app.show_help);
    press_char(&mut app, 'q');
    assert!(app.should_quit);
}

#[test]
fn test_ctrl_c_quits() {
    let (mut app, _) = app_with(vec![grid("s", 1, 1)]);
    ctrl(&mut app, 'c');
    assert!(app.should_quit);
}
