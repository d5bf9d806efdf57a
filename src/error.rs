use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while opening a workbook. Only ever fatal at startup.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file '{}' does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("'{}' is a directory, not a file", .0.display())]
    IsDirectory(PathBuf),
    #[error("unsupported file format: {0} (supported: .csv, .tsv, .xlsx, .xlsm, .xls, .xlsb, .ods)")]
    Unsupported(String),
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to open spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("no sheets found in file")]
    EmptyWorkbook,
}

/// Failures while writing the active sheet to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Use .csv or .json extension")]
    UnsupportedExtension,
    #[error("sheet is empty")]
    EmptySheet,
    #[error("failed to create file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard tool found (install xclip or wl-copy)")]
    NoTool,
    #[error("clipboard error: {0}")]
    Platform(String),
}

/// User input that could not be acted on. The state is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputValidationError {
    #[error("Invalid cell reference")]
    InvalidReference(String),
    #[error("Empty search query")]
    EmptyQuery,
}
