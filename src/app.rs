use std::io;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::clipboard::ClipboardSink;
use crate::config::{AppConfig, KeyMap};
use crate::input::{KeyResult, NavigationHandler};
use crate::mode::chart::ChartHandler;
use crate::mode::detail::DetailHandler;
use crate::mode::export::ExportHandler;
use crate::mode::jump::JumpHandler;
use crate::mode::normal::NormalHandler;
use crate::mode::search::SearchHandler;
use crate::mode::select::SelectHandler;
use crate::mode::theme::ThemeHandler;
use crate::mode::Mode;
use crate::status::StatusMessage;
use crate::style::Style;
use crate::table::{Selection, Sheet, TableView, Workbook};
use crate::ui;

pub struct App {
    pub workbook: Workbook,
    pub view: TableView,
    pub selection: Selection,
    pub style: Style,
    pub keymap: KeyMap,
    pub mode: Mode,
    pub status: StatusMessage,
    pub file_name: String,
    pub show_formulas: bool,
    pub show_help: bool,
    pub should_quit: bool,
    // Mode handlers
    pub(crate) nav_handler: NavigationHandler,
    pub(crate) normal_handler: NormalHandler,
    pub(crate) select_handler: SelectHandler,
    pub(crate) search_handler: SearchHandler,
    pub(crate) jump_handler: JumpHandler,
    pub(crate) export_handler: ExportHandler,
    pub(crate) theme_handler: ThemeHandler,
    pub(crate) detail_handler: DetailHandler,
    pub(crate) chart_handler: ChartHandler,
    pub(crate) clipboard: Box<dyn ClipboardSink>,
    // Last terminal size, kept so layout changes can recompute the extent
    term_size: (u16, u16),
}

impl App {
    pub fn new(
        workbook: Workbook,
        file_name: String,
        config: AppConfig,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            workbook,
            view: TableView::new(config.cell_width),
            selection: Selection::new(),
            style: Style::with_theme(config.theme),
            keymap: config.keymap,
            mode: Mode::Normal,
            status: StatusMessage::default(),
            file_name,
            show_formulas: false,
            show_help: false,
            should_quit: false,
            nav_handler: NavigationHandler::new(),
            normal_handler: NormalHandler::new(),
            select_handler: SelectHandler::new(),
            search_handler: SearchHandler::new(),
            jump_handler: JumpHandler::new(),
            export_handler: ExportHandler::new(),
            theme_handler: ThemeHandler::new(),
            detail_handler: DetailHandler::new(),
            chart_handler: ChartHandler::new(),
            clipboard,
            term_size: (0, 0),
        }
    }

    pub fn sheet(&self) -> &Sheet {
        self.workbook.active_sheet()
    }

    // Accessor methods for UI
    pub fn search_handler(&self) -> &SearchHandler {
        &self.search_handler
    }

    pub fn jump_handler(&self) -> &JumpHandler {
        &self.jump_handler
    }

    pub fn export_handler(&self) -> &ExportHandler {
        &self.export_handler
    }

    pub fn chart_handler(&self) -> &ChartHandler {
        &self.chart_handler
    }

    /// Help lines under the status bar: one, or every group when toggled
    pub fn help_rows(&self) -> u16 {
        if self.show_help {
            self.keymap.full_help().len() as u16
        } else {
            1
        }
    }

    pub fn banner_rows(&self) -> u16 {
        u16::from(self.mode == Mode::SelectRange)
    }

    /// Terminal size changed. Only the visible window is recomputed.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.term_size = (width, height);
        let extra = self.help_rows().saturating_sub(1) + self.banner_rows();
        self.view.resize(width, height.saturating_sub(extra));
    }

    /// The help block or the banner changed height: recompute the window and keep the cursor in it
    pub(crate) fn relayout(&mut self) {
        let (width, height) = self.term_size;
        self.resize(width, height);
        self.view.scroll_to_cursor();
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let size = terminal.size()?;
        self.resize(size.width, size.height);

        while !self.should_quit {
            terminal.draw(|f| ui::render(f, self))?;
            let ev = event::read()?;
            self.handle_event(ev);
        }
        Ok(())
    }

    pub fn handle_event(&mut self, ev: Event) {
        match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    // === Key handling ===

    pub fn handle_key(&mut self, key: KeyEvent) {
        let chart_overflow = match self.mode {
            Mode::Chart => ui::modal::chart_overflow(self, self.term_size.1),
            _ => 0,
        };
        let sheet = self.workbook.active_sheet();

        let result = match self.mode {
            Mode::Normal => self.normal_handler.handle_key(
                key,
                &self.keymap,
                &mut self.view,
                sheet,
                &self.nav_handler,
            ),
            Mode::SelectRange => self.select_handler.handle_key(
                key,
                &self.keymap,
                &mut self.view,
                sheet,
                &self.nav_handler,
                &mut self.selection,
            ),
            Mode::Search => self.search_handler.handle_key(key, &mut self.view, sheet),
            Mode::Jump => self.jump_handler.handle_key(key, &mut self.view, sheet),
            Mode::Export => self.export_handler.handle_key(key, sheet),
            Mode::Theme => self.theme_handler.handle_key(key, &mut self.style),
            Mode::Detail => self.detail_handler.handle_key(key),
            Mode::Chart => self.chart_handler.handle_key(key, chart_overflow),
        };

        self.process_key_result(result);
    }

    fn process_key_result(&mut self, result: KeyResult) {
        match result {
            KeyResult::Continue => {}
            KeyResult::SwitchMode(mode) => self.set_mode(mode),
            KeyResult::Execute(action) => self.execute_action(action),
            KeyResult::Finish => self.set_mode(Mode::Normal),
            KeyResult::FinishWithStatus(msg) => {
                self.status = msg;
                self.set_mode(Mode::Normal);
            }
            KeyResult::Quit => self.should_quit = true,
        }
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        debug!(from = self.mode.display_name(), to = mode.display_name(), "mode change");
        self.mode = mode;
        self.relayout();
    }
}

#[cfg(test)]
mod test;
