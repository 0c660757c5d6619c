//! Styling and theming
//!
//! Colors are stored in the config file as either a named color
//! (`"blue"`) or an `[r, g, b]` triple.

use ratatui::style::{Color as RatatuiColor, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Serializable color wrapper for ratatui colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    White,
    #[serde(untagged)]
    Rgb(u8, u8, u8),
}

impl From<Color> for RatatuiColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Reset => RatatuiColor::Reset,
            Color::Black => RatatuiColor::Black,
            Color::Red => RatatuiColor::Red,
            Color::Green => RatatuiColor::Green,
            Color::Yellow => RatatuiColor::Yellow,
            Color::Blue => RatatuiColor::Blue,
            Color::Magenta => RatatuiColor::Magenta,
            Color::Cyan => RatatuiColor::Cyan,
            Color::Gray => RatatuiColor::Gray,
            Color::DarkGray => RatatuiColor::DarkGray,
            Color::White => RatatuiColor::White,
            Color::Rgb(r, g, b) => RatatuiColor::Rgb(r, g, b),
        }
    }
}

/// UI theme with customizable colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Header background and focused borders
    pub primary: Color,
    /// Unfocused borders
    pub secondary: Color,
    /// Buttons and key hints
    pub accent: Color,
    /// Alert dialogs
    pub error: Color,
    /// Token notice
    pub warning: Color,
    /// Normal text
    pub text: Color,
    /// Background behind highlighted text
    pub background: Color,
    /// Placeholders and hints
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Blue,
            secondary: Color::Gray,
            accent: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            text: Color::White,
            background: Color::Black,
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary.into())
    }

    pub fn secondary_style(&self) -> Style {
        Style::default().fg(self.secondary.into())
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent.into())
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error.into())
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning.into())
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text.into())
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted.into())
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.text.into())
            .bg(self.primary.into())
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer_style(&self) -> Style {
        Style::default()
            .fg(self.background.into())
            .bg(self.secondary.into())
    }

    /// Selected list entries
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.background.into())
            .bg(self.primary.into())
    }

    /// Border style for a block depending on whether it holds focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.primary_style().add_modifier(Modifier::BOLD)
        } else {
            self.secondary_style()
        }
    }

    pub fn button_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.background.into())
                .bg(self.accent.into())
                .add_modifier(Modifier::BOLD)
        } else {
            self.accent_style()
        }
    }
}
