//! Reusable UI components
//!
//! Header, footer, buttons, text fields and the help panel.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::style::Theme;
use crate::ui::widgets::{Status, StatusIndicator};

/// Application header: title on the left, token status on the right
pub struct Header<'a> {
    title: &'a str,
    token_present: bool,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, token_present: bool, theme: &'a Theme) -> Self {
        Self {
            title,
            token_present,
            theme,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(self.title)
            .style(self.theme.header_style())
            .alignment(Alignment::Left);
        f.render_widget(header, area);

        let (status, label) = if self.token_present {
            (Status::Success, "token loaded")
        } else {
            (Status::Warning, "no token")
        };
        let width = 16.min(area.width);
        let status_area = Rect {
            x: area.x + area.width - width,
            width,
            ..area
        };
        f.render_widget(StatusIndicator::new(status, label.to_string()), status_area);
    }
}

/// Application footer component
pub struct Footer<'a> {
    text: &'a str,
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(text: &'a str, theme: &'a Theme) -> Self {
        Self { text, theme }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let footer = Paragraph::new(self.text)
            .style(self.theme.footer_style())
            .alignment(Alignment::Center);
        f.render_widget(footer, area);
    }
}

/// Bordered push button
pub struct Button<'a> {
    label: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, focused: bool, theme: &'a Theme) -> Self {
        Self {
            label,
            focused,
            theme,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let button = Paragraph::new(format!("[ {} ]", self.label))
            .style(self.theme.button_style(self.focused))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style(self.focused)),
            );
        f.render_widget(button, area);
    }
}

/// Titled input box. Shows a placeholder when empty and a cursor when focused.
pub struct TextField<'a> {
    title: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> TextField<'a> {
    pub fn new(title: &'a str, value: &'a str, focused: bool, theme: &'a Theme) -> Self {
        Self {
            title,
            value,
            placeholder: "",
            focused,
            theme,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .border_style(self.theme.border_style(self.focused));

        let text = if self.value.is_empty() && !self.focused {
            Text::from(Span::styled(self.placeholder, self.theme.muted_style()))
        } else {
            let mut text = Text::styled(self.value.to_string(), self.theme.text_style());
            if self.focused {
                let cursor = Span::styled("▏", self.theme.accent_style());
                match text.lines.last_mut() {
                    Some(last) if !self.value.ends_with('\n') => last.spans.push(cursor),
                    _ => text.lines.push(Line::from(cursor)),
                }
            }
            text
        };

        let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}

/// Help panel component
#[derive(Debug)]
pub struct HelpPanel {
    shortcuts: Vec<(String, String)>,
}

impl HelpPanel {
    pub fn new() -> Self {
        Self {
            shortcuts: Vec::new(),
        }
    }

    pub fn add_shortcut(&mut self, key: impl Into<String>, description: impl Into<String>) {
        self.shortcuts.push((key.into(), description.into()));
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines = vec![
            Line::from(Span::styled("Keyboard Shortcuts", theme.primary_style())),
            Line::from(""),
        ];

        for (key, desc) in &self.shortcuts {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<12}", key), theme.accent_style()),
                Span::styled(desc.clone(), theme.text_style()),
            ]));
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help")
                    .border_style(theme.primary_style()),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
    }
}

impl Default for HelpPanel {
    fn default() -> Self {
        Self::new()
    }
}
