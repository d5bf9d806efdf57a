//! Normal-mode action execution for App
//!
//! Actions that need more than the cursor live here: sheet switching,
//! search navigation, clipboard, mode entry and range selection.

use tracing::{debug, warn};

use crate::app::App;
use crate::clipboard::{cell_text, row_text};
use crate::config::Action;
use crate::mode::Mode;
use crate::status::StatusMessage;
use crate::table::Direction;
use crate::util::truncate;

impl App {
    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::NextSheet => self.switch_sheet(Direction::Next),
            Action::PrevSheet => self.switch_sheet(Direction::Prev),
            Action::Search => {
                self.search_handler.start();
                self.set_mode(Mode::Search);
            }
            Action::NextResult => self.goto_result(Direction::Next),
            Action::PrevResult => self.goto_result(Direction::Prev),
            Action::ClearSearch => {
                if let Some(msg) = self.search_handler.clear() {
                    self.status = msg;
                }
            }
            Action::Detail => self.set_mode(Mode::Detail),
            Action::Jump => {
                self.jump_handler.start();
                self.set_mode(Mode::Jump);
            }
            Action::ToggleFormulas => {
                self.show_formulas = !self.show_formulas;
                self.status = if self.show_formulas {
                    StatusMessage::info("Showing formulas")
                } else {
                    StatusMessage::info("Showing values")
                };
            }
            Action::Copy => self.copy_cell(),
            Action::CopyRow => self.copy_row(),
            Action::Export => {
                self.export_handler.start();
                self.set_mode(Mode::Export);
            }
            Action::Theme => self.set_mode(Mode::Theme),
            Action::Help => {
                self.show_help = !self.show_help;
                self.relayout();
            }
            Action::Quit => self.should_quit = true,
            Action::Visualize => self.visualize(),
            Action::SelectRange => self.start_selection(),
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::PageUp
            | Action::PageDown
            | Action::RowStart
            | Action::RowEnd
            | Action::FirstCol
            | Action::LastCol => {
                let sheet = self.workbook.active_sheet();
                self.nav_handler.apply(action, &mut self.view, sheet);
            }
        }
    }

    /// The new sheet starts at A1 with no results and no selection
    fn switch_sheet(&mut self, direction: Direction) {
        let moved = match direction {
            Direction::Next => self.workbook.next_sheet(),
            Direction::Prev => self.workbook.prev_sheet(),
        };
        if !moved {
            return;
        }

        self.view.reset();
        self.search_handler.drop_results();
        self.selection.cancel();

        let name = &self.workbook.active_sheet().name;
        debug!(sheet = %name, index = self.workbook.active_index(), "switched sheet");
        self.status = match direction {
            Direction::Next => StatusMessage::info(format!("→ {}", name)),
            Direction::Prev => StatusMessage::info(format!("← {}", name)),
        };
    }

    fn goto_result(&mut self, direction: Direction) {
        if let Some(msg) = self.search_handler.navigate(direction, &mut self.view) {
            self.status = msg;
        }
    }

    fn copy_cell(&mut self) {
        let sheet = self.workbook.active_sheet();
        let Some(cell) = sheet.cell(self.view.cursor_row, self.view.cursor_col) else {
            return;
        };
        let text = cell_text(Some(cell), self.show_formulas);

        self.status = match self.clipboard.write_text(&text) {
            Ok(()) => StatusMessage::success(format!("Copied: {}", truncate(&text, 30))),
            Err(e) => {
                warn!(error = %e, "copy failed");
                StatusMessage::error(format!("Failed to copy: {}", e))
            }
        };
    }

    fn copy_row(&mut self) {
        let row_idx = self.view.cursor_row;
        let Some(row) = self.workbook.active_sheet().row(row_idx) else {
            return;
        };
        let text = row_text(row);
        let count = row.len();

        self.status = match self.clipboard.write_text(&text) {
            Ok(()) => StatusMessage::success(format!("Copied row {} ({} cells)", row_idx + 1, count)),
            Err(e) => {
                warn!(error = %e, "copy row failed");
                StatusMessage::error(format!("Failed to copy row: {}", e))
            }
        };
    }

    fn visualize(&mut self) {
        match self.selection.rect() {
            Some(rect) => {
                self.chart_handler.open(self.workbook.active_sheet(), rect);
                debug!(points = self.chart_handler.series.len(), "chart opened");
                self.set_mode(Mode::Chart);
            }
            None => self.status = StatusMessage::warning("Select range first (V)"),
        }
    }

    /// Start a new selection at the cursor, or resume dragging the existing one
    fn start_selection(&mut self) {
        let cursor = self.view.cursor();
        if self.selection.selecting {
            self.selection.update(cursor);
            self.status = StatusMessage::info("Extending selection - press V to finish");
        } else {
            self.selection.start(cursor);
            self.status =
                StatusMessage::info("Selection started - Move cursor, press V to finish");
        }
        self.set_mode(Mode::SelectRange);
    }
}
