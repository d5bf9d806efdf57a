use crate::error::FileError;

/// A single loaded cell. Formula text is kept verbatim and never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub value: String,
    pub formula: Option<String>,
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize, value: impl Into<String>) -> Self {
        Self { value: value.into(), formula: None, row, col }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        let formula = formula.into();
        self.formula = if formula.is_empty() { None } else { Some(formula) };
        self
    }

    /// Text shown in the grid: `=formula` when formulas are displayed and one exists
    pub fn display(&self, show_formulas: bool) -> String {
        match &self.formula {
            Some(f) if show_formulas => format!("={}", f),
            _ => self.value.clone(),
        }
    }
}

/// Named, possibly jagged grid of cells. Indices past the end of a row are empty cells.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<Cell>>,
    max_rows: usize,
    max_cols: usize,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        let max_rows = rows.len();
        let max_cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        Self { name: name.into(), rows, max_rows, max_cols }
    }

    /// Build a sheet from plain display values
    pub fn from_values(name: impl Into<String>, values: Vec<Vec<String>>) -> Self {
        let rows = values
            .into_iter()
            .enumerate()
            .map(|(r, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(c, value)| Cell::new(r, c, value))
                    .collect()
            })
            .collect();
        Self::new(name, rows)
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn max_cols(&self) -> usize {
        self.max_cols
    }

    pub fn is_empty(&self) -> bool {
        self.max_rows == 0
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    /// Display value, empty for cells outside a jagged row
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).map(|c| c.value.as_str()).unwrap_or("")
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.max_rows && col < self.max_cols
    }
}

/// All sheets loaded from one source file plus the active sheet index
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    active: usize,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Result<Self, FileError> {
        if sheets.is_empty() {
            return Err(FileError::EmptyWorkbook);
        }
        Ok(Self { sheets, active: 0 })
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_sheet(&self) -> &Sheet {
        &self.sheets[self.active]
    }

    /// Advance to the next sheet; returns false when already on the last one
    pub fn next_sheet(&mut self) -> bool {
        if self.active + 1 < self.sheets.len() {
            self.active += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_sheet(&mut self) -> bool {
        if self.active > 0 {
            self.active -= 1;
            true
        } else {
            false
        }
    }
}
