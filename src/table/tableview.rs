use crate::table::viewport::{
    adjust_viewport, center_viewport, visible_extent, Extent, Offset, Position,
};
use crate::table::workbook::Sheet;

/// Cursor and viewport for the active sheet
#[derive(Debug, Clone)]
pub struct TableView {
    // Cursor position
    pub cursor_row: usize,
    pub cursor_col: usize,

    // Viewport offset (top-left visible cell)
    pub viewport_row: usize,
    pub viewport_col: usize,

    // Visible window size, recomputed on resize
    pub viewport_height: usize,
    pub viewport_width: usize,

    pub cell_width: usize,
}

impl TableView {
    pub fn new(cell_width: usize) -> Self {
        Self {
            cursor_row: 0,
            cursor_col: 0,
            viewport_row: 0,
            viewport_col: 0,
            viewport_height: 1,
            viewport_width: 1,
            cell_width,
        }
    }

    pub fn cursor(&self) -> Position {
        Position::new(self.cursor_row, self.cursor_col)
    }

    pub fn offset(&self) -> Offset {
        Offset { row: self.viewport_row, col: self.viewport_col }
    }

    pub fn extent(&self) -> Extent {
        Extent { rows: self.viewport_height, cols: self.viewport_width }
    }

    /// Recompute the visible window for a new terminal size. Cursor and offsets are untouched.
    pub fn resize(&mut self, width: u16, height: u16) {
        let extent = visible_extent(width, height, self.cell_width);
        self.viewport_height = extent.rows;
        self.viewport_width = extent.cols;
    }

    /// Back to A1 with the window at the origin
    pub fn reset(&mut self) {
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.viewport_row = 0;
        self.viewport_col = 0;
    }

    /// Ensure cursor is within sheet bounds
    pub fn clamp_cursor(&mut self, sheet: &Sheet) {
        self.cursor_row = self.cursor_row.min(sheet.max_rows().saturating_sub(1));
        self.cursor_col = self.cursor_col.min(sheet.max_cols().saturating_sub(1));
    }

    /// Ensure viewport contains the cursor
    pub fn scroll_to_cursor(&mut self) {
        let offset = adjust_viewport(self.cursor(), self.offset(), self.extent());
        self.viewport_row = offset.row;
        self.viewport_col = offset.col;
    }

    /// Move the cursor to an in-bounds target and center the window on it
    pub fn jump_to(&mut self, target: Position) {
        self.cursor_row = target.row;
        self.cursor_col = target.col;
        let offset = center_viewport(self.cursor(), self.extent());
        self.viewport_row = offset.row;
        self.viewport_col = offset.col;
    }

    // Navigation methods
    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            self.scroll_to_cursor();
        }
    }

    pub fn move_right(&mut self, sheet: &Sheet) {
        if self.cursor_col + 1 < sheet.max_cols() {
            self.cursor_col += 1;
            self.scroll_to_cursor();
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.scroll_to_cursor();
        }
    }

    pub fn move_down(&mut self, sheet: &Sheet) {
        if self.cursor_row + 1 < sheet.max_rows() {
            self.cursor_row += 1;
            self.scroll_to_cursor();
        }
    }

    pub fn page_down(&mut self, sheet: &Sheet) {
        let last = sheet.max_rows().saturating_sub(1);
        self.cursor_row = (self.cursor_row + self.viewport_height).min(last);
        self.scroll_to_cursor();
    }

    pub fn page_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(self.viewport_height);
        self.scroll_to_cursor();
    }

    /// Column 0 with the window scrolled fully left
    pub fn move_to_first_col(&mut self) {
        self.cursor_col = 0;
        self.viewport_col = 0;
    }

    pub fn move_to_last_col(&mut self, sheet: &Sheet) {
        self.cursor_col = sheet.max_cols().saturating_sub(1);
        self.scroll_to_cursor();
    }

    /// Whether a cell lies inside the rendered window
    pub fn is_visible(&self, row: usize, col: usize) -> bool {
        row >= self.viewport_row
            && row < self.viewport_row + self.viewport_height
            && col >= self.viewport_col
            && col < self.viewport_col + self.viewport_width
    }
}
