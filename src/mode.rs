pub mod chart;
pub mod detail;
pub mod export;
pub mod jump;
pub mod normal;
pub mod search;
pub mod select;
pub mod theme;

/// Exactly one mode is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Search,
    Detail,
    Jump,
    Export,
    Theme,
    Chart,
    SelectRange,
}

impl Mode {
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Search => "SEARCH",
            Mode::Detail => "DETAIL",
            Mode::Jump => "JUMP",
            Mode::Export => "EXPORT",
            Mode::Theme => "THEME",
            Mode::Chart => "CHART",
            Mode::SelectRange => "SELECT",
        }
    }

    /// Modes drawn as a box over the grid
    pub fn is_modal(&self) -> bool {
        matches!(
            self,
            Mode::Detail | Mode::Jump | Mode::Export | Mode::Theme | Mode::Chart
        )
    }
}
