//! Application shell: state, user actions, and the request workflow
//!
//! State changes only through [`AppState`]'s methods. User actions that need
//! the network return a [`Command`]; running a command produces an
//! [`Outcome`], and applying an outcome may return a follow-up command.
//! Creation success is the only outcome with a follow-up: a full reload
//! of the list.

use std::collections::VecDeque;

use tracing::{error, info, warn};

use crate::api::{ApiClient, NewTemplate, Template, TemplateId};
use crate::error::{ApiError, AppError, ErrorDisplay};
use crate::token::BearerToken;
use crate::ui::input::KeyAction;

pub const DEFAULT_DRAFT_HTML: &str = "<h1>Invoice</h1>";
pub const CREATE_FAILED: &str = "Failed to create template";

/// Unsaved create-form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub html: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            name: String::new(),
            html: DEFAULT_DRAFT_HTML.to_string(),
        }
    }
}

impl Draft {
    pub fn new(name: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            html: html.into(),
        }
    }

    /// Request body for this draft. Submitted as-is, without validation.
    pub fn to_request(&self) -> NewTemplate {
        NewTemplate {
            name: self.name.clone(),
            html: self.html.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Focusable controls, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    LoadButton,
    TemplateList,
    Name,
    Html,
    CreateButton,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::LoadButton => Focus::TemplateList,
            Focus::TemplateList => Focus::Name,
            Focus::Name => Focus::Html,
            Focus::Html => Focus::CreateButton,
            Focus::CreateButton => Focus::LoadButton,
        }
    }
}

/// Network work requested by a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadTemplates,
    CreateTemplate(NewTemplate),
    FetchTemplate(TemplateId),
}

/// Result of one completed network call
#[derive(Debug)]
pub enum Outcome {
    TemplatesLoaded(Result<Vec<Template>, ApiError>),
    TemplateCreated(Result<(), ApiError>),
    TemplateFetched(Result<Template, ApiError>),
}

/// Run a single command against the API
pub async fn execute(client: &ApiClient, command: Command) -> Outcome {
    match command {
        Command::LoadTemplates => Outcome::TemplatesLoaded(client.list_templates().await),
        Command::CreateTemplate(request) => {
            Outcome::TemplateCreated(client.create_template(&request).await)
        }
        Command::FetchTemplate(id) => Outcome::TemplateFetched(client.get_template(&id).await),
    }
}

/// Blocking, user-facing alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub suggestion: String,
}

impl Alert {
    fn from_error(action: &str, err: &ApiError) -> Self {
        let display = ErrorDisplay::new(AppError::from(err));
        Self {
            title: display.title().to_string(),
            message: display.message(action),
            suggestion: display.suggestion().to_string(),
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    token: BearerToken,
    templates: Vec<Template>,
    draft: Draft,
    focus: Focus,
    selected: usize,
    detail: Option<Template>,
    alerts: VecDeque<Alert>,
    in_flight: usize,
    load_failed: bool,
    show_help: bool,
    quit: bool,
}

impl AppState {
    pub fn new(token: BearerToken) -> Self {
        Self {
            token,
            templates: Vec::new(),
            draft: Draft::default(),
            focus: Focus::LoadButton,
            selected: 0,
            detail: None,
            alerts: VecDeque::new(),
            in_flight: 0,
            load_failed: false,
            show_help: false,
            quit: false,
        }
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    /// Whether the "obtain a token" notice should be displayed
    pub fn needs_token_notice(&self) -> bool {
        self.token.is_empty()
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn detail(&self) -> Option<&Template> {
        self.detail.as_ref()
    }

    /// The alert currently shown; later ones wait behind it.
    pub fn alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn pending_alerts(&self) -> usize {
        self.alerts.len()
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    /// Whether the most recent list load failed
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Request a list refresh. Overlapping loads are not deduplicated.
    pub fn load_templates(&mut self) -> Command {
        self.in_flight += 1;
        Command::LoadTemplates
    }

    /// Submit the current draft
    pub fn create_template(&mut self) -> Command {
        self.in_flight += 1;
        Command::CreateTemplate(self.draft.to_request())
    }

    /// Fetch the full record for the selected list entry
    pub fn open_selected(&mut self) -> Option<Command> {
        let id = self.templates.get(self.selected)?.id.clone();
        self.in_flight += 1;
        Some(Command::FetchTemplate(id))
    }

    /// Apply a completed request. Returns the follow-up command, if any.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Command> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            Outcome::TemplatesLoaded(Ok(templates)) => {
                info!(count = templates.len(), "loaded templates");
                self.templates = templates;
                self.load_failed = false;
                self.selected = self.selected.min(self.templates.len().saturating_sub(1));
                None
            }
            Outcome::TemplatesLoaded(Err(err)) => {
                error!(error = %err, status = ?err.status(), "Failed to load templates");
                self.load_failed = true;
                None
            }
            Outcome::TemplateCreated(Ok(())) => {
                info!(name = %self.draft.name, "created template");
                self.draft.reset();
                Some(self.load_templates())
            }
            Outcome::TemplateCreated(Err(err)) => {
                warn!(error = %err, status = ?err.status(), "{}", CREATE_FAILED);
                self.alerts.push_back(Alert::from_error(CREATE_FAILED, &err));
                None
            }
            Outcome::TemplateFetched(Ok(template)) => {
                info!(id = %template.id, "fetched template");
                self.detail = Some(template);
                None
            }
            Outcome::TemplateFetched(Err(err)) => {
                error!(error = %err, status = ?err.status(), "Failed to fetch template");
                None
            }
        }
    }

    /// Handle a bound key. Returns the command to run, if any.
    pub fn handle_action(&mut self, action: KeyAction) -> Option<Command> {
        if action == KeyAction::Quit {
            self.quit = true;
            return None;
        }

        // An alert blocks everything except dismissal.
        if !self.alerts.is_empty() {
            if matches!(action, KeyAction::Select | KeyAction::Back) {
                self.dismiss_alert();
            }
            return None;
        }

        match action {
            KeyAction::Help => {
                self.show_help = !self.show_help;
                None
            }
            KeyAction::Back => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.detail = None;
                }
                None
            }
            KeyAction::NextFocus => {
                self.focus = self.focus.next();
                None
            }
            KeyAction::NavigateUp => {
                if self.focus == Focus::TemplateList {
                    self.selected = self.selected.saturating_sub(1);
                }
                None
            }
            KeyAction::NavigateDown => {
                if self.focus == Focus::TemplateList
                    && self.selected + 1 < self.templates.len()
                {
                    self.selected += 1;
                }
                None
            }
            KeyAction::Load => Some(self.load_templates()),
            KeyAction::Submit => Some(self.create_template()),
            KeyAction::Select => match self.focus {
                Focus::LoadButton => Some(self.load_templates()),
                Focus::TemplateList => self.open_selected(),
                Focus::Name => Some(self.create_template()),
                Focus::Html => {
                    self.draft.html.push('\n');
                    None
                }
                Focus::CreateButton => Some(self.create_template()),
            },
            KeyAction::Quit => None,
        }
    }

    /// Handle typed input for the focused text field
    pub fn handle_char(&mut self, c: char) {
        if !self.alerts.is_empty() {
            return;
        }

        let field = match self.focus {
            Focus::Name => &mut self.draft.name,
            Focus::Html => &mut self.draft.html,
            _ => return,
        };

        if c == '\x08' || c == '\x7f' {
            field.pop();
        } else if !c.is_control() {
            field.push(c);
        }
    }
}

/// Drives an [`AppState`] against the API one request at a time.
///
/// Used by the headless subcommands and tests; the interactive UI runs
/// commands on spawned tasks instead so input stays responsive.
pub struct TemplateManager {
    client: ApiClient,
    state: AppState,
}

impl TemplateManager {
    pub fn new(client: ApiClient) -> Self {
        let state = AppState::new(client.token().clone());
        Self { client, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub async fn load_templates(&mut self) {
        let command = self.state.load_templates();
        self.run(command).await;
    }

    /// Submit the draft, then reload the list if the server accepted it
    pub async fn create_template(&mut self) {
        let command = self.state.create_template();
        self.run(command).await;
    }

    pub async fn open_template(&mut self, id: TemplateId) {
        self.state.in_flight += 1;
        self.run(Command::FetchTemplate(id)).await;
    }

    async fn run(&mut self, command: Command) {
        let mut next = Some(command);
        while let Some(command) = next.take() {
            let outcome = execute(&self.client, command).await;
            next = self.state.apply(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn template(id: i64, name: &str) -> Template {
        Template {
            id: TemplateId::Number(id),
            name: name.to_string(),
            html: "<p/>".to_string(),
            css: None,
            org_id: None,
            created_at: None,
        }
    }

    fn server_error(status: StatusCode) -> ApiError {
        ApiError::Status {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn token_notice_follows_token_presence() {
        assert!(AppState::new(BearerToken::default()).needs_token_notice());
        assert!(!AppState::new(BearerToken::new("abc123")).needs_token_notice());
    }

    #[test]
    fn last_resolved_load_wins() {
        let mut state = AppState::new(BearerToken::default());
        state.load_templates();
        state.load_templates();
        assert!(state.is_loading());

        state.apply(Outcome::TemplatesLoaded(Ok(vec![template(2, "Second")])));
        state.apply(Outcome::TemplatesLoaded(Ok(vec![template(1, "First")])));

        assert_eq!(state.templates(), &[template(1, "First")]);
        assert!(!state.is_loading());
    }

    #[test]
    fn failed_load_keeps_list_and_raises_no_alert() {
        let mut state = AppState::new(BearerToken::default());
        state.apply(Outcome::TemplatesLoaded(Ok(vec![template(1, "Kept")])));

        let follow_up = state.apply(Outcome::TemplatesLoaded(Err(server_error(
            StatusCode::INTERNAL_SERVER_ERROR,
        ))));

        assert!(follow_up.is_none());
        assert_eq!(state.templates(), &[template(1, "Kept")]);
        assert!(state.alert().is_none());
    }

    #[test]
    fn created_resets_draft_and_requests_reload() {
        let mut state = AppState::new(BearerToken::default());
        *state.draft_mut() = Draft::new("X", "<b>Y</b>");

        let command = state.create_template();
        assert_eq!(
            command,
            Command::CreateTemplate(NewTemplate {
                name: "X".into(),
                html: "<b>Y</b>".into()
            })
        );

        let follow_up = state.apply(Outcome::TemplateCreated(Ok(())));
        assert_eq!(follow_up, Some(Command::LoadTemplates));
        assert_eq!(state.draft(), &Draft::default());
    }

    #[test]
    fn failed_create_alerts_and_keeps_draft() {
        let mut state = AppState::new(BearerToken::default());
        *state.draft_mut() = Draft::new("X", "<b>Y</b>");
        state.create_template();

        let follow_up = state.apply(Outcome::TemplateCreated(Err(server_error(
            StatusCode::BAD_REQUEST,
        ))));

        assert!(follow_up.is_none());
        assert_eq!(state.draft(), &Draft::new("X", "<b>Y</b>"));
        let alert = state.alert().expect("alert raised");
        assert!(alert.message.starts_with(CREATE_FAILED));
    }

    #[test]
    fn alert_blocks_editing_until_dismissed() {
        let mut state = AppState::new(BearerToken::default());
        state.set_focus(Focus::Name);
        state.apply(Outcome::TemplateCreated(Err(server_error(
            StatusCode::BAD_REQUEST,
        ))));

        state.handle_char('a');
        assert_eq!(state.handle_action(KeyAction::Load), None);
        assert_eq!(state.draft().name, "");

        state.handle_action(KeyAction::Select);
        assert!(state.alert().is_none());

        state.handle_char('a');
        assert_eq!(state.draft().name, "a");
    }

    #[test]
    fn typing_edits_focused_field() {
        let mut state = AppState::new(BearerToken::default());
        state.handle_char('x');
        assert_eq!(state.draft(), &Draft::default());

        state.handle_action(KeyAction::NextFocus);
        state.handle_action(KeyAction::NextFocus);
        assert_eq!(state.focus(), Focus::Name);
        for c in "Inv".chars() {
            state.handle_char(c);
        }
        state.handle_char('\x7f');
        assert_eq!(state.draft().name, "In");

        state.handle_action(KeyAction::NextFocus);
        assert_eq!(state.focus(), Focus::Html);
        state.handle_action(KeyAction::Select);
        assert_eq!(state.draft().html, format!("{}\n", DEFAULT_DRAFT_HTML));
    }

    #[test]
    fn enter_in_name_field_submits_draft() {
        let mut state = AppState::new(BearerToken::default());
        state.set_focus(Focus::Name);
        state.handle_char('X');

        let command = state.handle_action(KeyAction::Select);

        assert_eq!(
            command,
            Some(Command::CreateTemplate(NewTemplate {
                name: "X".into(),
                html: DEFAULT_DRAFT_HTML.into()
            }))
        );
        assert_eq!(state.focus(), Focus::Name);
        assert!(state.is_loading());
    }

    #[test]
    fn each_failed_create_needs_its_own_dismissal() {
        let mut state = AppState::new(BearerToken::default());
        state.create_template();
        state.create_template();
        state.apply(Outcome::TemplateCreated(Err(server_error(
            StatusCode::BAD_REQUEST,
        ))));
        state.apply(Outcome::TemplateCreated(Err(server_error(
            StatusCode::UNAUTHORIZED,
        ))));
        assert_eq!(state.pending_alerts(), 2);
        assert_eq!(state.alert().map(|a| a.title.as_str()), Some("Request Rejected"));

        state.handle_action(KeyAction::Select);
        let second = state.alert().expect("second alert still queued");
        assert!(second.suggestion.contains("bearer token"));

        state.handle_action(KeyAction::Back);
        assert!(state.alert().is_none());
        assert_eq!(state.pending_alerts(), 0);
    }

    #[test]
    fn load_failure_flag_tracks_latest_load() {
        let mut state = AppState::new(BearerToken::default());
        assert!(!state.load_failed());

        state.apply(Outcome::TemplatesLoaded(Err(server_error(
            StatusCode::SERVICE_UNAVAILABLE,
        ))));
        assert!(state.load_failed());
        assert!(state.alert().is_none());

        state.apply(Outcome::TemplatesLoaded(Ok(vec![template(1, "A")])));
        assert!(!state.load_failed());
    }

    #[test]
    fn list_selection_opens_detail() {
        let mut state = AppState::new(BearerToken::default());
        state.apply(Outcome::TemplatesLoaded(Ok(vec![
            template(1, "A"),
            template(2, "B"),
        ])));
        state.set_focus(Focus::TemplateList);

        state.handle_action(KeyAction::NavigateDown);
        state.handle_action(KeyAction::NavigateDown);
        assert_eq!(state.selected(), 1);

        let command = state.handle_action(KeyAction::Select);
        assert_eq!(command, Some(Command::FetchTemplate(TemplateId::Number(2))));

        state.apply(Outcome::TemplateFetched(Ok(template(2, "B"))));
        assert_eq!(state.detail().map(|t| t.name.as_str()), Some("B"));

        state.handle_action(KeyAction::Back);
        assert!(state.detail().is_none());
    }

    #[test]
    fn shrinking_list_clamps_selection() {
        let mut state = AppState::new(BearerToken::default());
        state.apply(Outcome::TemplatesLoaded(Ok(vec![
            template(1, "A"),
            template(2, "B"),
        ])));
        state.set_focus(Focus::TemplateList);
        state.handle_action(KeyAction::NavigateDown);

        state.apply(Outcome::TemplatesLoaded(Ok(Vec::new())));
        assert_eq!(state.selected(), 0);
        assert_eq!(state.open_selected(), None);
    }
}
