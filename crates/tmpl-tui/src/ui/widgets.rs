//! Specialized widgets
//!
//! HTML highlighting for template bodies, the request spinner, the alert
//! dialog, and the token status indicator.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use syntect::{
    easy::HighlightLines, highlighting::ThemeSet, parsing::SyntaxSet, util::LinesWithEndings,
};

const HIGHLIGHT_THEME: &str = "base16-ocean.dark";

/// Syntax highlighter for template markup
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    pub fn highlight_html(&self, html: &str) -> Vec<Line<'static>> {
        self.highlight_text(html, "html")
    }

    pub fn highlight_css(&self, css: &str) -> Vec<Line<'static>> {
        self.highlight_text(css, "css")
    }

    /// Highlight text for the syntax registered under `extension`.
    /// Falls back to unstyled lines when the theme is unavailable.
    pub fn highlight_text(&self, text: &str, extension: &str) -> Vec<Line<'static>> {
        let Some(theme) = self.theme_set.themes.get(HIGHLIGHT_THEME) else {
            return text.lines().map(|l| Line::raw(l.to_string())).collect();
        };
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(extension)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        // One highlighter for the whole body; markup state spans lines.
        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(text) {
            let spans = match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => ranges
                    .into_iter()
                    .map(|(style, text)| {
                        let fg = style.foreground;
                        Span::styled(
                            text.trim_end_matches(['\r', '\n']).to_string(),
                            Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                        )
                    })
                    .collect(),
                Err(_) => vec![Span::raw(line.trim_end_matches(['\r', '\n']).to_string())],
            };
            lines.push(Line::from(spans));
        }

        lines
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline spinner shown while requests are in flight
pub struct LoadingSpinner {
    message: String,
    frame: usize,
}

impl LoadingSpinner {
    const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

    pub fn new(message: String, frame: usize) -> Self {
        Self { message, frame }
    }
}

impl Widget for LoadingSpinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spinner = Self::FRAMES[self.frame % Self::FRAMES.len()];
        Paragraph::new(format!("{} {}", spinner, self.message)).render(area, buf);
    }
}

/// Blocking alert dialog
pub struct ErrorDialog {
    title: String,
    message: String,
    hint: String,
    border_style: Style,
}

impl ErrorDialog {
    pub fn new(title: String, message: String, hint: String) -> Self {
        Self {
            title,
            message,
            hint,
            border_style: Style::default().fg(Color::Red),
        }
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }
}

impl Widget for ErrorDialog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(self.border_style);

        let mut text = Text::from(self.message);
        text.push_line(Line::raw(""));
        text.push_line(Line::styled(self.hint, Style::default().fg(Color::DarkGray)));

        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning,
}

/// One-line status indicator: symbol plus label
pub struct StatusIndicator {
    status: Status,
    label: String,
}

impl StatusIndicator {
    pub fn new(status: Status, label: String) -> Self {
        Self { status, label }
    }
}

impl Widget for StatusIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 {
            return;
        }

        let (symbol, color) = match self.status {
            Status::Success => ("✓", Color::Green),
            Status::Warning => ("⚠", Color::Yellow),
        };

        buf.set_string(area.x, area.y, symbol, Style::default().fg(color));

        let label_width = area.width.saturating_sub(2) as usize;
        let label: String = if self.label.chars().count() > label_width {
            let kept: String = self.label.chars().take(label_width.saturating_sub(3)).collect();
            format!("{}...", kept)
        } else {
            self.label
        };
        buf.set_string(area.x + 2, area.y, label, Style::default().fg(Color::White));
    }
}
