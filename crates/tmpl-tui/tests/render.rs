use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use reqwest::StatusCode;
use tmpl_tui::api::{Template, TemplateId};
use tmpl_tui::ui::{Theme, View};
use tmpl_tui::{ApiError, AppState, BearerToken, Outcome};

fn render(state: &AppState) -> Buffer {
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    let view = View::new(Theme::default(), "/tmp/tmpl-tui/token");
    terminal.draw(|f| view.draw(f, state, 0)).unwrap();
    terminal.backend().buffer().clone()
}

fn rows(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

fn occurrences(buffer: &Buffer, needle: &str) -> usize {
    rows(buffer).iter().map(|row| row.matches(needle).count()).sum()
}

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

#[test]
fn empty_token_shows_login_notice() {
    let state = AppState::new(BearerToken::new(""));
    let buffer = render(&state);

    assert_eq!(occurrences(&buffer, "Please login using the API"), 1);
    assert_eq!(occurrences(&buffer, "/tmp/tmpl-tui/token"), 1);
}

#[test]
fn present_token_hides_login_notice() {
    let state = AppState::new(BearerToken::new("abc123"));
    let buffer = render(&state);

    assert_eq!(occurrences(&buffer, "Please login using the API"), 0);
    assert_eq!(occurrences(&buffer, "Load templates"), 1);
    assert_eq!(occurrences(&buffer, "Create Template"), 1);
}

#[test]
fn loaded_templates_are_listed_once() {
    let mut state = AppState::new(BearerToken::new("abc123"));
    state.load_templates();
    state.apply(Outcome::TemplatesLoaded(Ok(vec![
        template(1, "Invoice A"),
        template(2, "Invoice B"),
    ])));

    let buffer = render(&state);
    assert_eq!(occurrences(&buffer, "Invoice A"), 1);
    assert_eq!(occurrences(&buffer, "Invoice B"), 1);
    assert_eq!(occurrences(&buffer, "Templates (2)"), 1);
}

#[test]
fn draft_defaults_are_rendered_in_the_form() {
    let state = AppState::new(BearerToken::new("abc123"));
    let buffer = render(&state);

    assert_eq!(occurrences(&buffer, "Template name"), 1);
    assert_eq!(occurrences(&buffer, "<h1>Invoice</h1>"), 1);
}

#[test]
fn failed_create_renders_alert() {
    let mut state = AppState::new(BearerToken::new("abc123"));
    state.create_template();
    state.apply(Outcome::TemplateCreated(Err(ApiError::Status {
        status: StatusCode::BAD_REQUEST,
        body: "bad".to_string(),
    })));

    let buffer = render(&state);
    assert_eq!(occurrences(&buffer, "Failed to create template"), 1);
    assert_eq!(occurrences(&buffer, "Press Enter to dismiss"), 1);
}

#[test]
fn opened_template_renders_detail_panel() {
    let mut state = AppState::new(BearerToken::new("abc123"));
    let mut detailed = template(7, "Detailed");
    detailed.created_at = Some("2024-05-01".to_string());
    state.apply(Outcome::TemplateFetched(Ok(detailed)));

    let buffer = render(&state);
    assert_eq!(occurrences(&buffer, "Detailed (Esc to close)"), 1);
    assert_eq!(occurrences(&buffer, "2024-05-01"), 1);
}

#[test]
fn queued_alerts_show_their_count() {
    let mut state = AppState::new(BearerToken::new("abc123"));
    for _ in 0..2 {
        state.create_template();
        state.apply(Outcome::TemplateCreated(Err(ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            body: "bad".to_string(),
        })));
    }

    let buffer = render(&state);
    assert_eq!(occurrences(&buffer, "Request Rejected (1 of 2)"), 1);
    assert_eq!(occurrences(&buffer, "Failed to create template"), 1);
}
