//! Visible-window arithmetic shared by the grid and the state machine.
//!
//! Every function here is pure: callers own the cursor and offsets and feed
//! them in, which keeps the scrolling rules testable without a terminal.

/// Lines always taken by the title, formula bar, spacer, column header,
/// status, search and one help row
pub const CHROME_ROWS: u16 = 7;
/// Columns taken by the row-number gutter
pub const GUTTER_COLS: u16 = 8;
/// Separator padding added to every rendered cell
pub const CELL_PADDING: usize = 2;

/// A 0-indexed (row, col) coordinate in the active sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Top-left cell of the visible window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub row: usize,
    pub col: usize,
}

/// Number of rows and columns that fit on screen; never zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Extent {
    fn default() -> Self {
        Self { rows: 1, cols: 1 }
    }
}

/// How many rows/columns of the grid fit in a terminal of the given size
pub fn visible_extent(width: u16, height: u16, cell_width: usize) -> Extent {
    let rows = height.saturating_sub(CHROME_ROWS) as usize;
    let cols = width.saturating_sub(GUTTER_COLS) as usize / (cell_width + CELL_PADDING);
    Extent { rows: rows.max(1), cols: cols.max(1) }
}

/// Minimal scroll: move the window only as far as needed to show the cursor
pub fn adjust_viewport(cursor: Position, offset: Offset, extent: Extent) -> Offset {
    Offset {
        row: adjust_axis(cursor.row, offset.row, extent.rows),
        col: adjust_axis(cursor.col, offset.col, extent.cols),
    }
}

fn adjust_axis(cursor: usize, offset: usize, extent: usize) -> usize {
    if cursor < offset {
        cursor
    } else if cursor >= offset + extent {
        cursor + 1 - extent
    } else {
        offset
    }
}

/// Put the cursor near the middle of the window. The far edge is not clamped,
/// so the window may extend past the last row or column of the sheet.
pub fn center_viewport(cursor: Position, extent: Extent) -> Offset {
    Offset {
        row: cursor.row.saturating_sub(extent.rows / 2),
        col: cursor.col.saturating_sub(extent.cols / 2),
    }
}
