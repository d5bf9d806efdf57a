use ratatui::style::{Color, Modifier, Style as RatStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::chart::ChartPalette;
use crate::status::StatusLevel;

/// Color that can be serialized/deserialized
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// Named color: "red", "blue", "cyan", etc.
    Named(NamedColor),
    /// RGB color: [255, 128, 0]
    Rgb([u8; 3]),
    /// 256-color index: 42
    Indexed(u8),
    /// Hex string: "#CBA6F7"
    Hex(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    White,
    Reset,
}

impl From<&ThemeColor> for Color {
    fn from(tc: &ThemeColor) -> Color {
        match tc {
            ThemeColor::Named(n) => match n {
                NamedColor::Black => Color::Black,
                NamedColor::Red => Color::Red,
                NamedColor::Green => Color::Green,
                NamedColor::Yellow => Color::Yellow,
                NamedColor::Blue => Color::Blue,
                NamedColor::Magenta => Color::Magenta,
                NamedColor::Cyan => Color::Cyan,
                NamedColor::Gray => Color::Gray,
                NamedColor::DarkGray => Color::DarkGray,
                NamedColor::LightRed => Color::LightRed,
                NamedColor::LightGreen => Color::LightGreen,
                NamedColor::LightYellow => Color::LightYellow,
                NamedColor::LightBlue => Color::LightBlue,
                NamedColor::LightMagenta => Color::LightMagenta,
                NamedColor::LightCyan => Color::LightCyan,
                NamedColor::White => Color::White,
                NamedColor::Reset => Color::Reset,
            },
            ThemeColor::Rgb([r, g, b]) => Color::Rgb(*r, *g, *b),
            ThemeColor::Indexed(i) => Color::Indexed(*i),
            ThemeColor::Hex(s) => parse_hex(s).unwrap_or(Color::Reset),
        }
    }
}

/// `#RRGGBB` (leading `#` optional)
pub fn parse_hex(s: &str) -> Option<Color> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn hex(rgb: u32) -> ThemeColor {
    ThemeColor::Rgb([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
}

/// Style definition for a single element
#[derive(Clone, Debug, Default)]
pub struct ElementStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl ElementStyle {
    pub fn fg(color: &ThemeColor) -> Self {
        Self { fg: Some(color.into()), ..Default::default() }
    }

    pub fn with_bg(mut self, color: &ThemeColor) -> Self {
        self.bg = Some(color.into());
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn to_ratatui(&self) -> RatStyle {
        let mut style = RatStyle::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underline {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

/// Complete theme palette
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub primary: ThemeColor,
    pub secondary: ThemeColor,
    pub accent: ThemeColor,
    pub text: ThemeColor,
    pub dim_text: ThemeColor,
    pub background: ThemeColor,
    pub border: ThemeColor,
    pub row_highlight: ThemeColor,
    pub col_highlight: ThemeColor,
    pub cell_highlight: ThemeColor,
    pub search_match: ThemeColor,
    pub success: ThemeColor,
    pub error: ThemeColor,
    pub warning: ThemeColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin()
    }
}

/// Palette in field order: primary, secondary, accent, text, dim_text,
/// background, border, row/col/cell highlight, search_match, success, error, warning
fn palette(name: &str, c: [u32; 14]) -> Theme {
    Theme {
        name: name.to_string(),
        primary: hex(c[0]),
        secondary: hex(c[1]),
        accent: hex(c[2]),
        text: hex(c[3]),
        dim_text: hex(c[4]),
        background: hex(c[5]),
        border: hex(c[6]),
        row_highlight: hex(c[7]),
        col_highlight: hex(c[8]),
        cell_highlight: hex(c[9]),
        search_match: hex(c[10]),
        success: hex(c[11]),
        error: hex(c[12]),
        warning: hex(c[13]),
    }
}

impl Theme {
    pub fn catppuccin() -> Self {
        palette("Catppuccin Mocha", [
            0xCBA6F7, 0x89DCEB, 0xA6E3A1, 0xCDD6F4, 0x6C7086, 0x1E1E2E, 0x313244,
            0x181825, 0x313244, 0xB4BEFE, 0xF9E2AF, 0xA6E3A1, 0xF38BA8, 0xFAB387,
        ])
    }

    pub fn nord() -> Self {
        palette("Nord", [
            0x88C0D0, 0x81A1C1, 0xA3BE8C, 0xECEFF4, 0x4C566A, 0x2E3440, 0x3B4252,
            0x242933, 0x3B4252, 0x8FBCBB, 0xEBCB8B, 0xA3BE8C, 0xBF616A, 0xD08770,
        ])
    }

    pub fn rose_pine() -> Self {
        palette("Rosé Pine", [
            0xEBBCBA, 0x9CCFD8, 0xF6C177, 0xE0DEF4, 0x6E6A86, 0x191724, 0x26233A,
            0x1F1D2E, 0x26233A, 0xC4A7E7, 0xF6C177, 0x9CCFD8, 0xEB6F92, 0xF6C177,
        ])
    }

    pub fn tokyo_night() -> Self {
        palette("Tokyo Night", [
            0xBB9AF7, 0x7DCFFF, 0x9ECE6A, 0xC0CAF5, 0x565F89, 0x1A1B26, 0x24283B,
            0x16161E, 0x24283B, 0x7AA2F7, 0xE0AF68, 0x9ECE6A, 0xF7768E, 0xFF9E64,
        ])
    }

    pub fn gruvbox() -> Self {
        palette("Gruvbox Dark", [
            0xD3869B, 0x83A598, 0xB8BB26, 0xEBDBB2, 0x928374, 0x282828, 0x3C3836,
            0x1D2021, 0x3C3836, 0xFABD2F, 0xFE8019, 0xB8BB26, 0xFB4934, 0xFABD2F,
        ])
    }

    pub fn dracula() -> Self {
        palette("Dracula", [
            0xBD93F9, 0x8BE9FD, 0x50FA7B, 0xF8F8F2, 0x6272A4, 0x282A36, 0x44475A,
            0x21222C, 0x44475A, 0xFFB86C, 0xF1FA8C, 0x50FA7B, 0xFF5555, 0xFFB86C,
        ])
    }

    /// Load theme from TOML file
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file: {}", e))?;
        toml::from_str(&content)
            .map_err(|e| format!("Failed to parse theme file: {}", e))
    }

    /// Get theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "catppuccin" => Some(Self::catppuccin()),
            "nord" => Some(Self::nord()),
            "rose-pine" => Some(Self::rose_pine()),
            "tokyo-night" => Some(Self::tokyo_night()),
            "gruvbox" => Some(Self::gruvbox()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// List available built-in themes, in Theme-mode digit order
    pub fn builtin_names() -> &'static [&'static str] {
        &["catppuccin", "nord", "rose-pine", "tokyo-night", "gruvbox", "dracula"]
    }

    /// Built-in theme for a 1-based digit key
    pub fn by_digit(c: char) -> Option<Self> {
        let idx = c.to_digit(10)? as usize;
        let name = Self::builtin_names().get(idx.checked_sub(1)?)?;
        Self::by_name(name)
    }
}

/// Runtime style manager
#[derive(Clone, Debug, Default)]
pub struct Style {
    pub theme: Theme,
}

const BLACK: ThemeColor = ThemeColor::Rgb([0, 0, 0]);

impl Style {
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn color(&self, color: &ThemeColor) -> Color {
        color.into()
    }

    // Convenience accessors that return ratatui styles
    pub fn title(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.primary)
            .with_bg(&self.theme.background)
            .with_bold()
            .to_ratatui()
    }

    pub fn header(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.secondary)
            .with_bg(&self.theme.border)
            .with_bold()
            .to_ratatui()
    }

    pub fn header_cursor(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.secondary)
            .with_bg(&self.theme.col_highlight)
            .with_bold()
            .to_ratatui()
    }

    pub fn cell(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.text).to_ratatui()
    }

    pub fn cell_cursor(&self) -> RatStyle {
        ElementStyle::fg(&BLACK)
            .with_bg(&self.theme.cell_highlight)
            .with_bold()
            .to_ratatui()
    }

    pub fn cell_selection(&self) -> RatStyle {
        ElementStyle::fg(&BLACK)
            .with_bg(&self.theme.accent)
            .to_ratatui()
    }

    pub fn cell_match(&self) -> RatStyle {
        ElementStyle::fg(&BLACK)
            .with_bg(&self.theme.search_match)
            .with_bold()
            .to_ratatui()
    }

    pub fn row_highlight(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.text)
            .with_bg(&self.theme.row_highlight)
            .to_ratatui()
    }

    pub fn col_highlight(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.text)
            .with_bg(&self.theme.col_highlight)
            .to_ratatui()
    }

    pub fn row_number(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.dim_text).to_ratatui()
    }

    pub fn row_number_cursor(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.primary)
            .with_bg(&self.theme.row_highlight)
            .with_bold()
            .to_ratatui()
    }

    pub fn separator(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.border).to_ratatui()
    }

    pub fn status_bar(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.text)
            .with_bg(&self.theme.border)
            .to_ratatui()
    }

    pub fn status(&self, level: StatusLevel) -> RatStyle {
        let color = match level {
            StatusLevel::Info => &self.theme.text,
            StatusLevel::Success => &self.theme.success,
            StatusLevel::Warning => &self.theme.warning,
            StatusLevel::Error => &self.theme.error,
        };
        ElementStyle::fg(color)
            .with_bg(&self.theme.border)
            .with_bold()
            .to_ratatui()
    }

    pub fn search_bar(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.text)
            .with_bg(&self.theme.border)
            .to_ratatui()
    }

    pub fn search_prompt(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.accent).with_bold().to_ratatui()
    }

    pub fn formula_bar(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.accent)
            .with_bg(&self.theme.border)
            .to_ratatui()
    }

    pub fn selection_banner(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.accent)
            .with_bg(&self.theme.border)
            .with_bold()
            .to_ratatui()
    }

    pub fn modal(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.text)
            .with_bg(&self.theme.background)
            .to_ratatui()
    }

    pub fn modal_border(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.primary).to_ratatui()
    }

    pub fn modal_title(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.primary)
            .with_bold()
            .with_underline()
            .to_ratatui()
    }

    pub fn modal_key(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.secondary).with_bold().to_ratatui()
    }

    pub fn modal_value(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.text).to_ratatui()
    }

    pub fn highlight(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.accent).with_bold().to_ratatui()
    }

    pub fn dim(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.dim_text).with_italic().to_ratatui()
    }

    pub fn help(&self) -> RatStyle {
        ElementStyle::fg(&self.theme.dim_text).to_ratatui()
    }

    pub fn chart_palette(&self) -> ChartPalette {
        let t = &self.theme;
        ChartPalette {
            accent: self.color(&t.accent),
            text: self.color(&t.text),
            dim: self.color(&t.dim_text),
            slices: [&t.accent, &t.primary, &t.secondary, &t.success, &t.warning]
                .into_iter()
                .map(|c| self.color(c))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn every_builtin_resolves() {
        for name in Theme::builtin_names() {
            assert!(Theme::by_name(name).is_some(), "{}", name);
        }
        assert_eq!(Theme::by_name("NORD").map(|t| t.name), Some("Nord".to_string()));
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn digits_follow_builtin_order() {
        assert_eq!(Theme::by_digit('1'), Some(Theme::catppuccin()));
        assert_eq!(Theme::by_digit('6'), Some(Theme::dracula()));
        assert_eq!(Theme::by_digit('0'), None);
        assert_eq!(Theme::by_digit('7'), None);
    }

    #[test]
    fn builtin_colors_decode() {
        let t = Theme::catppuccin();
        assert_eq!(Color::from(&t.primary), Color::Rgb(0xCB, 0xA6, 0xF7));
        assert_eq!(Color::from(&t.warning), Color::Rgb(0xFA, 0xB3, 0x87));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex("#1E1E2E"), Some(Color::Rgb(0x1E, 0x1E, 0x2E)));
        assert_eq!(parse_hex("ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn theme_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r##"
name = "Custom"
primary = "#FF0000"
secondary = "cyan"
accent = [0, 255, 0]
text = "white"
dim_text = 245
background = "black"
border = "#222222"
row_highlight = "#111111"
col_highlight = "#111111"
cell_highlight = "yellow"
search_match = "magenta"
success = "green"
error = "red"
warning = "#FFA500"
"##
        )
        .unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "Custom");
        assert_eq!(Color::from(&theme.primary), Color::Rgb(255, 0, 0));
        assert_eq!(Color::from(&theme.secondary), Color::Cyan);
        assert_eq!(Color::from(&theme.accent), Color::Rgb(0, 255, 0));
        assert_eq!(Color::from(&theme.dim_text), Color::Indexed(245));
    }

    #[test]
    fn bad_theme_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"Broken\"").unwrap();
        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(err.starts_with("Failed to parse theme file"));
    }

    #[test]
    fn chart_palette_uses_theme_colors() {
        let style = Style::with_theme(Theme::nord());
        let palette = style.chart_palette();
        assert_eq!(palette.accent, Color::Rgb(0xA3, 0xBE, 0x8C));
        assert_eq!(palette.slices.len(), 5);
        assert_eq!(palette.slices[1], Color::Rgb(0x88, 0xC0, 0xD0));
    }
}
