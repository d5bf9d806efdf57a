use crossterm::event::KeyEvent;

use crate::config::{Action, KeyMap};
use crate::input::{is_escape, KeyResult, NavigationHandler};
use crate::status::StatusMessage;
use crate::table::{Selection, Sheet, TableView};

/// Range selection: movement drags the active corner
pub struct SelectHandler {}

impl SelectHandler {
    pub fn new() -> Self {
        Self {}
    }

    pub fn handle_key(
        &self,
        key: KeyEvent,
        keymap: &KeyMap,
        view: &mut TableView,
        sheet: &Sheet,
        nav: &NavigationHandler,
        selection: &mut Selection,
    ) -> KeyResult {
        if is_escape(key) {
            selection.cancel();
            return KeyResult::FinishWithStatus(StatusMessage::info("Selection cancelled"));
        }

        match keymap.lookup(key) {
            Some(action) if nav.apply(action, view, sheet) => {
                selection.update(view.cursor());
                KeyResult::Continue
            }
            Some(Action::SelectRange) => {
                let rect = selection.finish();
                KeyResult::FinishWithStatus(StatusMessage::success(format!(
                    "Selected {}x{} range - Press v to visualize",
                    rect.rows(),
                    rect.cols()
                )))
            }
            _ => KeyResult::Continue,
        }
    }
}
