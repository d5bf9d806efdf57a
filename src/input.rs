use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Action;
use crate::mode::Mode;
use crate::status::StatusMessage;
use crate::table::{Sheet, TableView};

/// Result of handling a key event
#[derive(Debug, Clone, PartialEq)]
pub enum KeyResult {
    /// Continue in current mode
    Continue,
    /// Switch to a different mode
    SwitchMode(Mode),
    /// Run a Normal-mode action
    Execute(Action),
    /// Return to normal mode
    Finish,
    /// Show a message and return to normal mode
    FinishWithStatus(StatusMessage),
    /// Quit the application
    Quit,
}

/// Check for escape key (Esc or Ctrl+[)
pub fn is_escape(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('[') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Outcome of feeding a key to a [`LineInput`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Continue,
    Submit(String),
    Cancel,
}

/// Single-line text editor with a caret and a character limit.
/// The caret counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct LineInput {
    buffer: String,
    caret: usize,
    limit: usize,
}

impl LineInput {
    pub fn new(limit: usize) -> Self {
        Self { buffer: String::new(), caret: 0, limit }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Replace the contents and put the caret at the end
    pub fn set(&mut self, text: &str) {
        self.buffer = text.chars().take(self.limit).collect();
        self.caret = self.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.caret = 0;
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_at(&self, caret: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(caret)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    pub fn insert(&mut self, c: char) -> bool {
        if self.len() >= self.limit {
            return false;
        }
        let at = self.byte_at(self.caret);
        self.buffer.insert(at, c);
        self.caret += 1;
        true
    }

    pub fn backspace(&mut self) {
        if self.caret > 0 {
            self.caret -= 1;
            let at = self.byte_at(self.caret);
            self.buffer.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.caret < self.len() {
            let at = self.byte_at(self.caret);
            self.buffer.remove(at);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LineEvent {
        if is_escape(key) {
            return LineEvent::Cancel;
        }

        match key.code {
            KeyCode::Enter => return LineEvent::Submit(self.buffer.clone()),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.caret = self.caret.saturating_sub(1),
            KeyCode::Right => self.caret = (self.caret + 1).min(self.len()),
            KeyCode::Home => self.caret = 0,
            KeyCode::End => self.caret = self.len(),
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c);
            }
            _ => {}
        }
        LineEvent::Continue
    }
}

/// Cursor movement shared by Normal and SelectRange
pub struct NavigationHandler;

impl NavigationHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn is_navigation(action: Action) -> bool {
        matches!(
            action,
            Action::MoveUp
                | Action::MoveDown
                | Action::MoveLeft
                | Action::MoveRight
                | Action::PageUp
                | Action::PageDown
                | Action::RowStart
                | Action::RowEnd
                | Action::FirstCol
                | Action::LastCol
        )
    }

    /// Apply a movement action, returns true if the action was a movement
    pub fn apply(&self, action: Action, view: &mut TableView, sheet: &Sheet) -> bool {
        match action {
            Action::MoveLeft => view.move_left(),
            Action::MoveRight => view.move_right(sheet),
            Action::MoveUp => view.move_up(),
            Action::MoveDown => view.move_down(sheet),
            Action::PageUp => view.page_up(),
            Action::PageDown => view.page_down(sheet),
            Action::RowStart | Action::FirstCol => view.move_to_first_col(),
            Action::RowEnd | Action::LastCol => view.move_to_last_col(sheet),
            _ => return false,
        }
        true
    }
}
