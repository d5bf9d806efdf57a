use crossterm::event::KeyEvent;

use crate::config::{Action, KeyMap};
use crate::input::{KeyResult, NavigationHandler};
use crate::mode::Mode;
use crate::table::{Sheet, TableView};

pub struct NormalHandler {}

impl NormalHandler {
    pub fn new() -> Self {
        Self {}
    }

    /// Movement is applied in place; every other bound key becomes an action
    /// for the dispatcher. Unbound keys are ignored.
    pub fn handle_key(
        &self,
        key: KeyEvent,
        keymap: &KeyMap,
        view: &mut TableView,
        sheet: &Sheet,
        nav: &NavigationHandler,
    ) -> KeyResult {
        let Some(action) = keymap.lookup(key) else {
            return KeyResult::Continue;
        };

        if nav.apply(action, view, sheet) {
            return KeyResult::Continue;
        }

        match action {
            Action::Quit => KeyResult::Quit,
            Action::Detail => KeyResult::SwitchMode(Mode::Detail),
            Action::Theme => KeyResult::SwitchMode(Mode::Theme),
            action => KeyResult::Execute(action),
        }
    }
}
