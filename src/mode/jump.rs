use std::sync::OnceLock;

use crossterm::event::KeyEvent;
use regex::Regex;
use tracing::debug;

use crate::error::InputValidationError;
use crate::input::{KeyResult, LineEvent, LineInput};
use crate::status::StatusMessage;
use crate::table::{Position, Sheet, TableView};
use crate::util::{cell_ref, col_from_letters};

const JUMP_LIMIT: usize = 50;

static CELL_REF: OnceLock<Option<Regex>> = OnceLock::new();

/// A parsed jump destination and how to describe it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTarget {
    pub position: Position,
    pub label: String,
}

pub struct JumpHandler {
    pub input: LineInput,
}

impl JumpHandler {
    pub fn new() -> Self {
        Self { input: LineInput::new(JUMP_LIMIT) }
    }

    /// Open a blank prompt
    pub fn start(&mut self) {
        self.input.clear();
    }

    pub fn handle_key(&mut self, key: KeyEvent, view: &mut TableView, sheet: &Sheet) -> KeyResult {
        match self.input.handle_key(key) {
            LineEvent::Continue => KeyResult::Continue,
            LineEvent::Cancel => KeyResult::Finish,
            LineEvent::Submit(text) if text.trim().is_empty() => KeyResult::Finish,
            LineEvent::Submit(text) => match parse_jump(&text, sheet, view.cursor()) {
                Ok(target) => {
                    debug!(target = %target.label, "jump");
                    view.jump_to(target.position);
                    KeyResult::FinishWithStatus(StatusMessage::success(format!("→ {}", target.label)))
                }
                Err(e) => {
                    debug!(input = %text, "rejected jump");
                    KeyResult::FinishWithStatus(StatusMessage::error(e.to_string()))
                }
            },
        }
    }
}

/// Parse a jump reference. Forms are tried in order, first hit wins:
/// `A100` (column letters + row), `500` (row only, column kept),
/// `10,5` (row,col). All numbers are 1-indexed and must land inside the sheet.
pub fn parse_jump(
    input: &str,
    sheet: &Sheet,
    cursor: Position,
) -> Result<JumpTarget, InputValidationError> {
    let input = input.trim().to_uppercase();

    cell_reference(&input, sheet)
        .or_else(|| bare_row(&input, sheet, cursor))
        .or_else(|| row_col_pair(&input, sheet))
        .ok_or(InputValidationError::InvalidReference(input))
}

fn cell_reference(input: &str, sheet: &Sheet) -> Option<JumpTarget> {
    let re = CELL_REF
        .get_or_init(|| Regex::new(r"^([A-Z]+)([0-9]+)$").ok())
        .as_ref()?;
    let caps = re.captures(input)?;

    let col = col_from_letters(&caps[1])?;
    let row = one_based(&caps[2])?;
    sheet.contains(row, col).then(|| JumpTarget {
        position: Position::new(row, col),
        label: cell_ref(row, col),
    })
}

fn bare_row(input: &str, sheet: &Sheet, cursor: Position) -> Option<JumpTarget> {
    let row = one_based(input)?;
    (row < sheet.max_rows()).then(|| JumpTarget {
        position: Position::new(row, cursor.col),
        label: format!("Row {}", row + 1),
    })
}

fn row_col_pair(input: &str, sheet: &Sheet) -> Option<JumpTarget> {
    let (row, col) = input.split_once(',')?;
    if col.contains(',') {
        return None;
    }
    let row = one_based(row.trim())?;
    let col = one_based(col.trim())?;
    sheet.contains(row, col).then(|| JumpTarget {
        position: Position::new(row, col),
        label: format!("{},{}", row + 1, col + 1),
    })
}

/// 1-indexed decimal to 0-indexed; zero and non-numbers are rejected
fn one_based(s: &str) -> Option<usize> {
    s.parse::<usize>().ok()?.checked_sub(1)
}
