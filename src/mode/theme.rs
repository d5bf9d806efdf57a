use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::input::{is_escape, KeyResult};
use crate::status::StatusMessage;
use crate::style::{Style, Theme};

/// Built-in theme picker, digits 1-6
pub struct ThemeHandler {}

impl ThemeHandler {
    pub fn new() -> Self {
        Self {}
    }

    pub fn handle_key(&self, key: KeyEvent, style: &mut Style) -> KeyResult {
        if is_escape(key) {
            return KeyResult::Finish;
        }

        match key.code {
            KeyCode::Char('q') => KeyResult::Finish,
            KeyCode::Char(c) => match Theme::by_digit(c) {
                Some(theme) => {
                    debug!(theme = %theme.name, "theme applied");
                    let msg = StatusMessage::success(format!("Theme: {}", theme.name));
                    style.set_theme(theme);
                    KeyResult::FinishWithStatus(msg)
                }
                None => KeyResult::Continue,
            },
            _ => KeyResult::Continue,
        }
    }
}
