use crossterm::event::KeyEvent;
use tracing::{info, warn};

use crate::error::ExportError;
use crate::fileio;
use crate::input::{KeyResult, LineEvent, LineInput};
use crate::status::StatusMessage;
use crate::table::Sheet;

const EXPORT_LIMIT: usize = 100;

pub struct ExportHandler {
    pub input: LineInput,
}

impl ExportHandler {
    pub fn new() -> Self {
        Self { input: LineInput::new(EXPORT_LIMIT) }
    }

    pub fn start(&mut self) {
        self.input.clear();
    }

    pub fn handle_key(&mut self, key: KeyEvent, sheet: &Sheet) -> KeyResult {
        match self.input.handle_key(key) {
            LineEvent::Continue => KeyResult::Continue,
            LineEvent::Cancel => KeyResult::Finish,
            LineEvent::Submit(text) => {
                let filename = text.trim();
                if filename.is_empty() {
                    return KeyResult::Finish;
                }
                KeyResult::FinishWithStatus(export_sheet(sheet, filename))
            }
        }
    }
}

/// Write the sheet and describe the outcome. Failures never leave this function.
pub fn export_sheet(sheet: &Sheet, filename: &str) -> StatusMessage {
    match fileio::export(sheet, filename) {
        Ok(()) => {
            info!(path = filename, sheet = %sheet.name, "exported");
            StatusMessage::success(format!("✓ Exported to {}", filename))
        }
        Err(e @ ExportError::UnsupportedExtension) => StatusMessage::error(e.to_string()),
        Err(e) => {
            warn!(path = filename, error = %e, "export failed");
            StatusMessage::error(format!("Export failed: {}", e))
        }
    }
}
