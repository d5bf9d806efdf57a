use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info, warn};

use crate::error::{ExportError, FileError};
use crate::table::{Cell, Sheet, Workbook};

/// Detected file format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Csv,
    Tsv,
    /// Anything calamine opens: xlsx, xlsm, xls, xlsb, ods
    Spreadsheet,
}

impl FileFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" => Some(FileFormat::Tsv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(FileFormat::Spreadsheet),
            _ => None,
        }
    }

    /// Get the delimiter for CSV-like formats
    fn delimiter(&self) -> Option<u8> {
        match self {
            FileFormat::Csv => Some(b','),
            FileFormat::Tsv => Some(b'\t'),
            FileFormat::Spreadsheet => None,
        }
    }
}

/// Startup check: the path must exist and be a regular file
pub fn validate_path(path: &Path) -> Result<(), FileError> {
    let meta = std::fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
        _ => FileError::Open { path: path.to_path_buf(), source: e },
    })?;
    if meta.is_dir() {
        return Err(FileError::IsDirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Load every sheet of a workbook. Values are display strings, formulas are
/// kept as text without the leading `=`.
pub fn load_file(path: &Path) -> Result<Workbook, FileError> {
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let format = FileFormat::from_extension(path).ok_or(FileError::Unsupported(ext))?;

    let sheets = match format.delimiter() {
        Some(delim) => vec![load_csv(path, delim)?],
        None => load_spreadsheet(path)?,
    };

    for sheet in &sheets {
        debug!(sheet = %sheet.name, rows = sheet.max_rows(), cols = sheet.max_cols(), "sheet loaded");
    }
    info!(path = %path.display(), sheets = sheets.len(), "workbook loaded");
    Workbook::new(sheets)
}

// === CSV/TSV ===

fn load_csv(path: &Path, delim: u8) -> Result<Sheet, FileError> {
    let file = File::open(path).map_err(|source| FileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::with_capacity(1 << 20, file); // 1 MB

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (r, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row: Vec<Cell> = record
            .iter()
            .enumerate()
            .map(|(c, value)| Cell::new(r, c, value))
            .collect();
        rows.push(row);
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Sheet1".to_string());
    Ok(Sheet::new(name, rows))
}

// === Spreadsheets ===

fn load_spreadsheet(path: &Path) -> Result<Vec<Sheet>, FileError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in &sheet_names {
        let range = match workbook.worksheet_range(name) {
            Ok(range) => range,
            Err(e) => {
                warn!(sheet = %name, error = %e, "skipping unreadable sheet");
                continue;
            }
        };

        // Range start offset (data may not begin at A1)
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut grid: Vec<Vec<Cell>> = Vec::new();
        for (row_idx, row) in range.rows().enumerate() {
            let r = start_row as usize + row_idx;
            let cells = row.iter().enumerate().map(|(col_idx, data)| {
                let c = start_col as usize + col_idx;
                (c, data_to_string(data))
            });
            for (c, value) in cells {
                cell_at(&mut grid, r, c).value = value;
            }
        }

        if let Ok(formulas) = workbook.worksheet_formula(name) {
            let (start_row, start_col) = formulas.start().unwrap_or((0, 0));
            for (row_idx, row) in formulas.rows().enumerate() {
                for (col_idx, formula) in row.iter().enumerate() {
                    if formula.is_empty() {
                        continue;
                    }
                    let r = start_row as usize + row_idx;
                    let c = start_col as usize + col_idx;
                    let text = formula.strip_prefix('=').unwrap_or(formula);
                    cell_at(&mut grid, r, c).formula = Some(text.to_string());
                }
            }
        }

        for row in grid.iter_mut() {
            trim_trailing_empty(row);
        }
        sheets.push(Sheet::new(name.clone(), grid));
    }
    Ok(sheets)
}

/// Grow the grid as needed and return the cell at `(r, c)`
fn cell_at(grid: &mut Vec<Vec<Cell>>, r: usize, c: usize) -> &mut Cell {
    if grid.len() <= r {
        grid.resize_with(r + 1, Vec::new);
    }
    let row = &mut grid[r];
    while row.len() <= c {
        let col = row.len();
        row.push(Cell::new(r, col, ""));
    }
    &mut row[c]
}

fn trim_trailing_empty(row: &mut Vec<Cell>) {
    while row
        .last()
        .is_some_and(|cell| cell.value.is_empty() && cell.formula.is_none())
    {
        row.pop();
    }
}

/// Display text for a cached cell value
fn data_to_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Format nicely: integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

// === Export ===

/// Write the sheet to `filename`, picking the format from its extension
pub fn export(sheet: &Sheet, filename: &str) -> Result<(), ExportError> {
    let lower = filename.to_lowercase();
    if lower.ends_with(".csv") {
        export_csv(sheet, Path::new(filename))
    } else if lower.ends_with(".json") {
        export_json(sheet, Path::new(filename))
    } else {
        Err(ExportError::UnsupportedExtension)
    }
}

/// One record per row, display values only
pub fn export_csv(sheet: &Sheet, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    for row in sheet.rows() {
        csv_writer.write_record(row.iter().map(|cell| cell.value.as_str()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Array of objects keyed by the first row. Blank or missing headers become `col_<j>`.
pub fn export_json(sheet: &Sheet, path: &Path) -> Result<(), ExportError> {
    let records = json_records(sheet)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn json_records(sheet: &Sheet) -> Result<Vec<BTreeMap<String, String>>, ExportError> {
    let (headers, body) = sheet.rows().split_first().ok_or(ExportError::EmptySheet)?;

    Ok(body
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, cell)| {
                    let key = headers
                        .get(j)
                        .map(|h| h.value.as_str())
                        .filter(|h| !h.is_empty())
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("col_{}", j));
                    (key, cell.value.clone())
                })
                .collect()
        })
        .collect())
}
