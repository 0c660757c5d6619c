//! Screen composition
//!
//! Renders an [`AppState`] into a frame. Rendering never mutates state.

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, Focus};
use crate::ui::components::{Button, Footer, Header, HelpPanel, TextField};
use crate::ui::layout::{
    app_layout, centered_layout, content_layout, form_layout, stacked_layout, two_column_layout,
};
use crate::ui::style::Theme;
use crate::ui::widgets::{ErrorDialog, LoadingSpinner, SyntaxHighlighter};

pub const TITLE: &str = " Template Manager";

pub struct View {
    theme: Theme,
    highlighter: SyntaxHighlighter,
    token_location: String,
}

impl View {
    pub fn new(theme: Theme, token_location: impl Into<String>) -> Self {
        Self {
            theme,
            highlighter: SyntaxHighlighter::new(),
            token_location: token_location.into(),
        }
    }

    /// Draw one frame. `tick` drives the spinner animation.
    pub fn draw(&self, f: &mut Frame, state: &AppState, tick: usize) {
        let [header, content, footer] = app_layout(f.area());

        Header::new(TITLE, !state.needs_token_notice(), &self.theme).render(f, header);

        let [notice, actions, body] = content_layout(content, state.needs_token_notice());
        if state.needs_token_notice() {
            self.draw_token_notice(f, notice);
        }
        self.draw_actions(f, state, actions, tick);

        let [left, right] = two_column_layout(body, 2, 3);
        let [list_area, detail_area] = stacked_layout(left, state.detail().is_some());
        self.draw_template_list(f, state, list_area);
        if state.detail().is_some() {
            self.draw_detail(f, state, detail_area);
        }
        self.draw_form(f, state, right);

        Footer::new(footer_hint(state), &self.theme).render(f, footer);

        if state.show_help() {
            let area = centered_layout(f.area(), 50, 14);
            self.help_panel().render(f, area, &self.theme);
        }

        if let Some(alert) = state.alert() {
            let title = match state.pending_alerts() {
                1 => format!(" {} ", alert.title),
                n => format!(" {} (1 of {}) ", alert.title, n),
            };
            let dialog = ErrorDialog::new(
                title,
                format!("{}\n\n{}", alert.message, alert.suggestion),
                "Press Enter to dismiss".to_string(),
            )
            .border_style(self.theme.error_style());
            f.render_widget(dialog, centered_layout(f.area(), 60, 11));
        }
    }

    fn draw_token_notice(&self, f: &mut Frame, area: Rect) {
        let text = format!(
            "Please login using the API to obtain a bearer token and save it to {}.",
            self.token_location
        );
        let notice = Paragraph::new(text)
            .style(self.theme.warning_style())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.warning_style()),
            );
        f.render_widget(notice, area);
    }

    fn draw_actions(&self, f: &mut Frame, state: &AppState, area: Rect, tick: usize) {
        let button_width = 24.min(area.width);
        let button_area = Rect {
            width: button_width,
            ..area
        };
        Button::new(
            "Load templates",
            state.focus() == Focus::LoadButton,
            &self.theme,
        )
        .render(f, button_area);

        if state.is_loading() && area.width > button_width + 2 {
            let spinner_area = Rect {
                x: area.x + button_width + 2,
                y: area.y + 1,
                width: area.width - button_width - 2,
                height: 1,
            };
            f.render_widget(
                LoadingSpinner::new("Waiting for the server...".to_string(), tick),
                spinner_area,
            );
        }
    }

    fn draw_template_list(&self, f: &mut Frame, state: &AppState, area: Rect) {
        let focused = state.focus() == Focus::TemplateList;
        let items: Vec<ListItem> = state
            .templates()
            .iter()
            .map(|template| ListItem::new(template.name.clone()).style(self.theme.text_style()))
            .collect();

        let mut list_state = ListState::default();
        if focused && !state.templates().is_empty() {
            list_state.select(Some(state.selected()));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Templates ({})", state.templates().len()))
                    .border_style(self.theme.border_style(focused)),
            )
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("> ");
        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_detail(&self, f: &mut Frame, state: &AppState, area: Rect) {
        let Some(template) = state.detail() else {
            return;
        };

        let mut lines = vec![Line::from(vec![
            Span::styled("id: ", self.theme.muted_style()),
            Span::styled(template.id.to_string(), self.theme.text_style()),
        ])];
        if let Some(created) = &template.created_at {
            lines.push(Line::from(vec![
                Span::styled("created: ", self.theme.muted_style()),
                Span::styled(created.clone(), self.theme.text_style()),
            ]));
        }
        lines.push(Line::from(""));
        lines.extend(self.highlighter.highlight_html(&template.html));
        if let Some(css) = &template.css {
            lines.push(Line::from(""));
            lines.push(Line::styled("/* css */", self.theme.muted_style()));
            lines.extend(self.highlighter.highlight_css(css));
        }

        let detail = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} (Esc to close)", template.name))
                    .border_style(self.theme.secondary_style()),
            );
        f.render_widget(detail, area);
    }

    fn draw_form(&self, f: &mut Frame, state: &AppState, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Create Template")
            .border_style(self.theme.secondary_style());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [name_area, html_area, button_area] = form_layout(inner);
        let draft = state.draft();

        TextField::new("Name", &draft.name, state.focus() == Focus::Name, &self.theme)
            .placeholder("Template name")
            .render(f, name_area);
        TextField::new("HTML", &draft.html, state.focus() == Focus::Html, &self.theme)
            .render(f, html_area);

        let button_area = Rect {
            width: 16.min(button_area.width),
            ..button_area
        };
        Button::new("Create", state.focus() == Focus::CreateButton, &self.theme)
            .render(f, button_area);
    }

    fn help_panel(&self) -> HelpPanel {
        let mut help = HelpPanel::new();
        help.add_shortcut("Tab", "Move focus");
        help.add_shortcut("Enter", "Activate / newline in HTML");
        help.add_shortcut("↑↓", "Select template");
        help.add_shortcut("Ctrl-L", "Load templates");
        help.add_shortcut("Ctrl-S", "Create template");
        help.add_shortcut("Esc", "Close panel");
        help.add_shortcut("Ctrl-Q", "Quit");
        help
    }
}

fn footer_hint(state: &AppState) -> &'static str {
    if state.alert().is_some() {
        return "Enter/Esc: Dismiss";
    }
    match state.focus() {
        Focus::LoadButton => "Enter: Load | Tab: Next | Ctrl-S: Create | F1: Help | Ctrl-Q: Quit",
        Focus::TemplateList => "↑↓: Select | Enter: Open | Tab: Next | F1: Help | Ctrl-Q: Quit",
        Focus::Name => "Type name | Enter: Create | Tab: Next | Ctrl-S: Create",
        Focus::Html => "Type HTML | Enter: Newline | Tab: Next | Ctrl-S: Create",
        Focus::CreateButton => "Enter: Create | Tab: Next | Ctrl-L: Load | Ctrl-Q: Quit",
    }
}
