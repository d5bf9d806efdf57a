use std::cmp;

use crate::table::viewport::Position;

/// Normalized bounds of a selection, inclusive on every side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl SelectionRect {
    pub fn rows(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn cols(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.min_row..=self.max_row).contains(&row) && (self.min_col..=self.max_col).contains(&col)
    }
}

/// Anchor/active-corner pair. The rectangle is always derived, never stored,
/// so drag direction is invisible to consumers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
    pub selecting: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, pos: Position) {
        self.anchor = pos;
        self.active = pos;
        self.selecting = true;
    }

    pub fn update(&mut self, pos: Position) {
        self.active = pos;
    }

    pub fn normalize(&self) -> SelectionRect {
        SelectionRect {
            min_row: cmp::min(self.anchor.row, self.active.row),
            max_row: cmp::max(self.anchor.row, self.active.row),
            min_col: cmp::min(self.anchor.col, self.active.col),
            max_col: cmp::max(self.anchor.col, self.active.col),
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.selecting && self.normalize().contains(row, col)
    }

    /// End the drag. The rectangle stays live so it can be charted later.
    pub fn finish(&self) -> SelectionRect {
        self.normalize()
    }

    pub fn cancel(&mut self) {
        self.selecting = false;
    }

    /// The rectangle, if a selection exists
    pub fn rect(&self) -> Option<SelectionRect> {
        self.selecting.then(|| self.normalize())
    }
}
