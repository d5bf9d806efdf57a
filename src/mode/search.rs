use crossterm::event::KeyEvent;
use tracing::debug;

use crate::error::InputValidationError;
use crate::input::{KeyResult, LineEvent, LineInput};
use crate::status::StatusMessage;
use crate::table::{Direction, SearchIndex, Sheet, TableView};

const SEARCH_LIMIT: usize = 100;

/// Search state and functionality
pub struct SearchHandler {
    pub input: LineInput,
    pub query: String,
    pub results: SearchIndex,
}

impl SearchHandler {
    pub fn new() -> Self {
        Self {
            input: LineInput::new(SEARCH_LIMIT),
            query: String::new(),
            results: SearchIndex::default(),
        }
    }

    /// Open the prompt preloaded with the last committed query
    pub fn start(&mut self) {
        self.input.set(&self.query);
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent, view: &mut TableView, sheet: &Sheet) -> KeyResult {
        match self.input.handle_key(key) {
            LineEvent::Continue => KeyResult::Continue,
            LineEvent::Cancel => KeyResult::Finish,
            LineEvent::Submit(text) => match self.commit(&text, view, sheet) {
                Ok(msg) => KeyResult::FinishWithStatus(msg),
                Err(e) => KeyResult::FinishWithStatus(StatusMessage::warning(e.to_string())),
            },
        }
    }

    /// Run a new search. On a hit the cursor lands on the first match.
    pub fn commit(
        &mut self,
        text: &str,
        view: &mut TableView,
        sheet: &Sheet,
    ) -> Result<StatusMessage, InputValidationError> {
        let term = text.trim();
        if term.is_empty() {
            return Err(InputValidationError::EmptyQuery);
        }

        self.query = term.to_string();
        self.results = SearchIndex::build(sheet, term);
        debug!(query = term, matches = self.results.len(), "search");

        match self.results.current() {
            Some(pos) => {
                view.jump_to(pos);
                Ok(StatusMessage::success(format!("Found {} results", self.results.len())))
            }
            None => Ok(StatusMessage::warning("No results found")),
        }
    }

    /// Step through the results cyclically; `None` when there is nothing to visit
    pub fn navigate(&mut self, direction: Direction, view: &mut TableView) -> Option<StatusMessage> {
        let pos = self.results.navigate(direction)?;
        view.jump_to(pos);
        Some(StatusMessage::info(format!(
            "Match {}/{}",
            self.results.current_index() + 1,
            self.results.len()
        )))
    }

    /// Forget the query and its results
    pub fn clear(&mut self) -> Option<StatusMessage> {
        if self.query.is_empty() {
            return None;
        }
        self.query.clear();
        self.results.clear();
        Some(StatusMessage::info("Search cleared"))
    }

    /// Results belong to one sheet; the query text survives for the next prompt
    pub fn drop_results(&mut self) {
        self.results.clear();
    }
}
