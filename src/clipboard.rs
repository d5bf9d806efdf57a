use crate::error::ClipboardError;
use crate::table::Cell;

/// Anything that can receive copied text
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        copy_to_system_clipboard(text)
    }
}

/// Text placed on the clipboard for a single cell: `=formula` when formulas
/// are shown and the cell has one, otherwise the value
pub fn cell_text(cell: Option<&Cell>, show_formulas: bool) -> String {
    cell.map(|c| c.display(show_formulas)).unwrap_or_default()
}

/// Row values joined with tabs
pub fn row_text(row: &[Cell]) -> String {
    row.iter()
        .map(|c| c.value.as_str())
        .collect::<Vec<_>>()
        .join("\t")
}

/// Copy text to system clipboard using platform-appropriate method
fn copy_to_system_clipboard(text: &str) -> Result<(), ClipboardError> {
    // Try command-line tools first on Linux (more reliable with terminal apps)
    #[cfg(target_os = "linux")]
    {
        use std::io::Write;
        use std::process::{Command, Stdio};

        // Try wl-copy (Wayland) first, then xclip (X11)
        let commands = [
            ("wl-copy", vec![]),
            ("xclip", vec!["-selection", "clipboard"]),
            ("xsel", vec!["--clipboard", "--input"]),
        ];

        for (cmd, args) in commands {
            if let Ok(mut child) = Command::new(cmd)
                .args(&args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                if let Some(mut stdin) = child.stdin.take() {
                    if stdin.write_all(text.as_bytes()).is_ok() {
                        drop(stdin);
                        if child.wait().map(|s| s.success()).unwrap_or(false) {
                            return Ok(());
                        }
                    }
                }
            }
        }

        Err(ClipboardError::NoTool)
    }

    // Use arboard on other platforms (macOS, Windows)
    #[cfg(not(target_os = "linux"))]
    {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Platform(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Platform(e.to_string()))
    }
}

/// Test double that remembers every write, or fails on demand
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingClipboard {
    pub writes: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
    pub fail: bool,
}

#[cfg(test)]
impl ClipboardSink for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::NoTool);
        }
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }
}
