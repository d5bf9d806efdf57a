use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::style::Theme;

pub const DEFAULT_CELL_WIDTH: usize = 12;
pub const MIN_CELL_WIDTH: usize = 4;
pub const MAX_CELL_WIDTH: usize = 40;

/// Everything a Normal-mode key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    RowStart,
    RowEnd,
    FirstCol,
    LastCol,
    NextSheet,
    PrevSheet,
    Search,
    NextResult,
    PrevResult,
    ClearSearch,
    Detail,
    Jump,
    ToggleFormulas,
    Copy,
    CopyRow,
    Export,
    Theme,
    Help,
    Quit,
    Visualize,
    SelectRange,
}

impl Action {
    /// Key label and description shown in the help line
    pub fn help(&self) -> (&'static str, &'static str) {
        match self {
            Action::MoveUp => ("↑/k", "up"),
            Action::MoveDown => ("↓/j", "down"),
            Action::MoveLeft => ("←/h", "left"),
            Action::MoveRight => ("→/l", "right"),
            Action::PageUp => ("pgup/^u", "page up"),
            Action::PageDown => ("pgdn/^d", "page down"),
            Action::RowStart => ("home/0", "row start"),
            Action::RowEnd => ("end/$", "row end"),
            Action::FirstCol => ("g", "first col"),
            Action::LastCol => ("G", "last col"),
            Action::NextSheet => ("tab", "next sheet"),
            Action::PrevSheet => ("⇧tab", "prev sheet"),
            Action::Search => ("/", "search"),
            Action::NextResult => ("n", "next"),
            Action::PrevResult => ("N", "prev"),
            Action::ClearSearch => ("esc", "clear"),
            Action::Detail => ("enter", "detail"),
            Action::Jump => ("^g", "jump"),
            Action::ToggleFormulas => ("f", "formulas"),
            Action::Copy => ("c", "copy"),
            Action::CopyRow => ("C", "copy row"),
            Action::Export => ("e", "export"),
            Action::Theme => ("t", "theme"),
            Action::Help => ("?", "help"),
            Action::Quit => ("q", "quit"),
            Action::Visualize => ("v", "visualize"),
            Action::SelectRange => ("V", "select"),
        }
    }
}

/// Normal-mode key bindings
pub struct KeyMap {
    bindings: HashMap<(KeyCode, KeyModifiers), Action>,
}

impl KeyMap {
    pub fn new(bindings: HashMap<(KeyCode, KeyModifiers), Action>) -> Self {
        Self { bindings }
    }

    /// Shift is folded into the character itself, so it is ignored here
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let mods = key.modifiers.difference(KeyModifiers::SHIFT);
        self.bindings.get(&(key.code, mods)).copied()
    }

    pub fn short_help(&self) -> Vec<(&'static str, &'static str)> {
        [Action::Search, Action::Jump, Action::Detail, Action::Theme, Action::Help, Action::Quit]
            .iter()
            .map(Action::help)
            .collect()
    }

    pub fn full_help(&self) -> Vec<Vec<(&'static str, &'static str)>> {
        use Action as A;
        let groups: [&[Action]; 7] = [
            &[A::MoveUp, A::MoveDown, A::MoveLeft, A::MoveRight],
            &[A::PageUp, A::PageDown, A::FirstCol, A::LastCol],
            &[A::RowStart, A::RowEnd, A::NextSheet, A::PrevSheet],
            &[A::Search, A::NextResult, A::PrevResult, A::ClearSearch],
            &[A::Detail, A::Jump, A::ToggleFormulas],
            &[A::Copy, A::CopyRow, A::Export, A::Theme],
            &[A::Visualize, A::SelectRange, A::Help, A::Quit],
        ];
        groups
            .iter()
            .map(|group| group.iter().map(Action::help).collect())
            .collect()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        Self::new(HashMap::from([
            ((KeyCode::Up, none), Action::MoveUp),
            ((KeyCode::Char('k'), none), Action::MoveUp),
            ((KeyCode::Down, none), Action::MoveDown),
            ((KeyCode::Char('j'), none), Action::MoveDown),
            ((KeyCode::Left, none), Action::MoveLeft),
            ((KeyCode::Char('h'), none), Action::MoveLeft),
            ((KeyCode::Right, none), Action::MoveRight),
            ((KeyCode::Char('l'), none), Action::MoveRight),
            ((KeyCode::PageUp, none), Action::PageUp),
            ((KeyCode::Char('u'), ctrl), Action::PageUp),
            ((KeyCode::PageDown, none), Action::PageDown),
            ((KeyCode::Char('d'), ctrl), Action::PageDown),
            ((KeyCode::Home, none), Action::RowStart),
            ((KeyCode::Char('0'), none), Action::RowStart),
            ((KeyCode::End, none), Action::RowEnd),
            ((KeyCode::Char('$'), none), Action::RowEnd),
            ((KeyCode::Char('g'), none), Action::FirstCol),
            ((KeyCode::Char('G'), none), Action::LastCol),
            ((KeyCode::Tab, none), Action::NextSheet),
            ((KeyCode::BackTab, none), Action::PrevSheet),
            ((KeyCode::Char('/'), none), Action::Search),
            ((KeyCode::Char('n'), none), Action::NextResult),
            ((KeyCode::Char('N'), none), Action::PrevResult),
            ((KeyCode::Esc, none), Action::ClearSearch),
            ((KeyCode::Enter, none), Action::Detail),
            ((KeyCode::Char('g'), ctrl), Action::Jump),
            ((KeyCode::Char('f'), none), Action::ToggleFormulas),
            ((KeyCode::Char('c'), none), Action::Copy),
            ((KeyCode::Char('C'), none), Action::CopyRow),
            ((KeyCode::Char('e'), none), Action::Export),
            ((KeyCode::Char('t'), none), Action::Theme),
            ((KeyCode::Char('?'), none), Action::Help),
            ((KeyCode::Char('q'), none), Action::Quit),
            ((KeyCode::Char('c'), ctrl), Action::Quit),
            ((KeyCode::Char('v'), none), Action::Visualize),
            ((KeyCode::Char('V'), none), Action::SelectRange),
        ]))
    }
}

/// Contents of `config.toml`; every field is optional
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub theme: Option<String>,
    pub theme_file: Option<PathBuf>,
    pub cell_width: Option<usize>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))
    }
}

/// `$XDG_CONFIG_HOME/sheetview`, falling back to `$HOME/.config/sheetview`
pub fn config_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg).join("sheetview"));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config").join("sheetview"))
}

pub struct AppConfig {
    pub keymap: KeyMap,
    pub theme: Theme,
    pub cell_width: usize,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            keymap: KeyMap::default(),
            theme: Theme::default(),
            cell_width: DEFAULT_CELL_WIDTH,
        }
    }

    /// Load the user config file, if any, and resolve the theme.
    /// Problems are returned as warnings; defaults fill the gaps.
    pub fn load(cli_theme: Option<&str>) -> (Self, Vec<String>) {
        let file = config_dir().map(|dir| dir.join("config.toml"));
        match file {
            Some(path) if path.is_file() => match FileConfig::from_file(&path) {
                Ok(cfg) => {
                    debug!(path = %path.display(), "loaded config");
                    Self::resolve(cli_theme, cfg)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring config");
                    let (config, mut warnings) = Self::resolve(cli_theme, FileConfig::default());
                    warnings.insert(0, e);
                    (config, warnings)
                }
            },
            _ => Self::resolve(cli_theme, FileConfig::default()),
        }
    }

    /// Precedence: CLI theme, then `theme_file`, then `theme`, then the default.
    /// A CLI value that names an existing file is read as a theme file.
    pub fn resolve(cli_theme: Option<&str>, file: FileConfig) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let mut config = Self::new();

        config.cell_width = file
            .cell_width
            .unwrap_or(DEFAULT_CELL_WIDTH)
            .clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH);

        let theme = if let Some(arg) = cli_theme {
            load_theme_arg(arg, &mut warnings)
        } else if let Some(path) = file.theme_file.as_deref() {
            Theme::from_file(path)
                .map_err(|e| warnings.push(e))
                .ok()
        } else if let Some(name) = file.theme.as_deref() {
            by_name_or_warn(name, &mut warnings)
        } else {
            None
        };
        config.theme = theme.unwrap_or_default();

        (config, warnings)
    }
}

fn load_theme_arg(arg: &str, warnings: &mut Vec<String>) -> Option<Theme> {
    let path = Path::new(arg);
    if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("toml")) || path.is_file() {
        return Theme::from_file(path).map_err(|e| warnings.push(e)).ok();
    }
    by_name_or_warn(arg, warnings)
}

fn by_name_or_warn(name: &str, warnings: &mut Vec<String>) -> Option<Theme> {
    let theme = Theme::by_name(name);
    if theme.is_none() {
        warnings.push(format!("Unknown theme '{}', using catppuccin", name));
    }
    theme
}
