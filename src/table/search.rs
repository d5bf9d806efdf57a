use rayon::prelude::*;

use crate::table::viewport::Position;
use crate::table::workbook::{Cell, Sheet};

/// Sheets with more cells than this are scanned in parallel
const PARALLEL_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Case-insensitive substring scan over display values and formula text.
/// Matches come back in row-major order; that order defines the first match.
/// An empty query matches nothing.
pub fn search(sheet: &Sheet, query: &str) -> Vec<Position> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let scan_row = |(r, row): (usize, &Vec<Cell>)| -> Vec<Position> {
        row.iter()
            .enumerate()
            .filter(|(_, cell)| cell_matches(cell, &needle))
            .map(|(c, _)| Position::new(r, c))
            .collect()
    };

    let cells = sheet.max_rows() * sheet.max_cols();
    let per_row: Vec<Vec<Position>> = if cells > PARALLEL_THRESHOLD {
        sheet.rows().par_iter().enumerate().map(scan_row).collect()
    } else {
        sheet.rows().iter().enumerate().map(scan_row).collect()
    };
    per_row.into_iter().flatten().collect()
}

fn cell_matches(cell: &Cell, needle: &str) -> bool {
    cell.value.to_lowercase().contains(needle)
        || cell
            .formula
            .as_deref()
            .is_some_and(|f| f.to_lowercase().contains(needle))
}

/// Ordered match list with a cyclic cursor
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    matches: Vec<Position>,
    current: usize,
}

impl SearchIndex {
    pub fn new(matches: Vec<Position>) -> Self {
        Self { matches, current: 0 }
    }

    pub fn build(sheet: &Sheet, query: &str) -> Self {
        Self::new(search(sheet, query))
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<Position> {
        self.matches.get(self.current).copied()
    }

    /// Step the cursor with wraparound; no-op on an empty set
    pub fn navigate(&mut self, direction: Direction) -> Option<Position> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        self.current = match direction {
            Direction::Next => (self.current + 1) % len,
            Direction::Prev => (self.current + len - 1) % len,
        };
        self.current()
    }

    pub fn is_match(&self, row: usize, col: usize) -> bool {
        self.matches.binary_search(&Position::new(row, col)).is_ok()
    }

    pub fn clear(&mut self) {
        self.matches.clear();
        self.current = 0;
    }
}
