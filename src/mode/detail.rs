use crossterm::event::{KeyCode, KeyEvent};

use crate::input::{is_escape, KeyResult};
use crate::table::{Position, Sheet};
use crate::util::{cell_ref, cell_type};

/// What the detail box shows for one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellDetail {
    pub reference: String,
    pub value: String,
    pub formula: Option<String>,
    pub kind: &'static str,
}

impl CellDetail {
    /// Cells past the end of a jagged row read as empty
    pub fn at(sheet: &Sheet, pos: Position) -> Self {
        let reference = cell_ref(pos.row, pos.col);
        match sheet.cell(pos.row, pos.col) {
            Some(cell) => Self {
                reference,
                value: cell.value.clone(),
                formula: cell.formula.clone(),
                kind: cell_type(cell),
            },
            None => Self { reference, value: String::new(), formula: None, kind: "Empty" },
        }
    }
}

pub struct DetailHandler {}

impl DetailHandler {
    pub fn new() -> Self {
        Self {}
    }

    pub fn handle_key(&self, key: KeyEvent) -> KeyResult {
        if is_escape(key) {
            return KeyResult::Finish;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('q') => KeyResult::Finish,
            _ => KeyResult::Continue,
        }
    }
}
