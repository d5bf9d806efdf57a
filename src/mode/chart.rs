use crossterm::event::{KeyCode, KeyEvent};

use crate::chart::{extract_series, ChartKind, ChartSeries};
use crate::input::{is_escape, KeyResult};
use crate::table::{SelectionRect, Sheet};

/// Chart viewer state. The series is taken fresh from the selection on every entry.
pub struct ChartHandler {
    pub kind: ChartKind,
    pub series: ChartSeries,
    /// First content line shown when the chart is taller than the modal
    pub scroll: usize,
}

impl ChartHandler {
    pub fn new() -> Self {
        Self { kind: ChartKind::default(), series: ChartSeries::default(), scroll: 0 }
    }

    pub fn open(&mut self, sheet: &Sheet, rect: SelectionRect) {
        self.kind = ChartKind::Bar;
        self.series = extract_series(sheet, rect);
        self.scroll = 0;
    }

    /// `overflow` is how many content lines do not fit in the modal
    pub fn handle_key(&mut self, key: KeyEvent, overflow: usize) -> KeyResult {
        if is_escape(key) {
            return KeyResult::Finish;
        }

        match key.code {
            KeyCode::Char('q') => KeyResult::Finish,
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.min(overflow).saturating_sub(1);
                KeyResult::Continue
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = (self.scroll + 1).min(overflow);
                KeyResult::Continue
            }
            KeyCode::Char(c) => {
                if let Some(kind) = ChartKind::from_digit(c) {
                    self.kind = kind;
                    self.scroll = 0;
                }
                KeyResult::Continue
            }
            _ => KeyResult::Continue,
        }
    }
}
