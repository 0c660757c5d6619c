use std::path::PathBuf;
use std::time::Duration;
use std::{fs, io, panic};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::info;

use tmpl_tui::app::{self, AppState, Command, Draft, Outcome, TemplateManager, DEFAULT_DRAFT_HTML};
use tmpl_tui::config::AppConfig;
use tmpl_tui::event::{EventLoop, EventResult};
use tmpl_tui::ui::View;
use tmpl_tui::{logging, report, ApiClient, BearerToken, TemplateId, TokenStore};

const TICK: Duration = Duration::from_millis(100);

/// Template Manager TUI - terminal client for the invoice template API
#[derive(Parser)]
#[command(name = "tmpl-tui", version)]
struct Cli {
    /// Template API base URL (defaults to the configured endpoint)
    #[arg(long, env = "TMPL_ENDPOINT")]
    endpoint: Option<String>,

    /// Bearer token; overrides the token file
    #[arg(long, env = "TMPL_AUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Token file path
    #[arg(long)]
    token_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file for the interactive UI
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the template list and exit.
    List,
    /// Create a template, then print the refreshed list.
    Create {
        #[arg(long, default_value = "")]
        name: String,
        /// Template body (defaults to a bare invoice heading)
        #[arg(long, conflicts_with = "html_file")]
        html: Option<String>,
        /// Read the template body from a file
        #[arg(long)]
        html_file: Option<PathBuf>,
    },
    /// Print a single template.
    Show { id: TemplateId },
}

struct App {
    state: AppState,
    client: ApiClient,
    view: View,
    event_loop: EventLoop,
    outcomes_tx: UnboundedSender<Outcome>,
    outcomes_rx: UnboundedReceiver<Outcome>,
    tick: usize,
}

impl App {
    fn new(config: AppConfig, client: ApiClient, token_store: &TokenStore) -> App {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let view = View::new(config.theme, token_store.path().display().to_string());

        App {
            state: AppState::new(client.token().clone()),
            client,
            view,
            event_loop: EventLoop::new(config.key_bindings, TICK),
            outcomes_tx,
            outcomes_rx,
            tick: 0,
        }
    }

    /// Run a command on its own task; the outcome comes back on the channel.
    fn dispatch(&self, command: Command) {
        let client = self.client.clone();
        let tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let outcome = app::execute(&client, command).await;
            // The receiver is dropped only on shutdown.
            let _ = tx.send(outcome);
        });
    }

    fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal
                .draw(|f| self.view.draw(f, &self.state, self.tick))
                .map_err(|e| anyhow!("Failed to draw terminal: {:?}", e))?;
            self.tick = self.tick.wrapping_add(1);

            while let Ok(outcome) = self.outcomes_rx.try_recv() {
                if let Some(command) = self.state.apply(outcome) {
                    self.dispatch(command);
                }
            }

            if let Some(event) = self.event_loop.next_event()? {
                let command = match event {
                    EventResult::Action(action) => self.state.handle_action(action),
                    EventResult::Char(c) => {
                        self.state.handle_char(c);
                        None
                    }
                };
                if let Some(command) = command {
                    self.dispatch(command);
                }
            }

            if self.state.should_quit() {
                break;
            }
        }
        Ok(())
    }
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn resolve_token(flag: Option<&str>, store: &TokenStore) -> Result<BearerToken> {
    match flag {
        Some(token) => {
            info!("using bearer token from command line");
            Ok(BearerToken::new(token))
        }
        None => store
            .read()
            .with_context(|| format!("failed to read token file {}", store.path().display())),
    }
}

async fn run_headless(command: Commands, client: ApiClient) -> Result<()> {
    match command {
        Commands::List => {
            let templates = client
                .list_templates()
                .await
                .context("Failed to load templates")?;
            println!("{}", report::templates_table(&templates));
        }
        Commands::Create {
            name,
            html,
            html_file,
        } => {
            let html = match html_file {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => html.unwrap_or_else(|| DEFAULT_DRAFT_HTML.to_string()),
            };

            let mut manager = TemplateManager::new(client);
            *manager.state_mut().draft_mut() = Draft::new(name, html);
            manager.create_template().await;

            if let Some(alert) = manager.state().alert() {
                bail!("{}", alert.message);
            }
            println!("Template created.");
            if manager.state().load_failed() {
                eprintln!("Template list reload failed; run `tmpl-tui list` to retry.");
            } else {
                println!("{}", report::templates_table(manager.state().templates()));
            }
        }
        Commands::Show { id } => {
            let template = client
                .get_template(&id)
                .await
                .context("Failed to fetch template")?;
            println!("{}", report::template_details(&template));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let endpoint = cli
        .endpoint
        .clone()
        .unwrap_or_else(|| config.endpoint.clone());
    let token_store = match &cli.token_file {
        Some(path) => TokenStore::new(path),
        None => config.token_store(),
    };

    if let Some(command) = cli.command {
        logging::init_stderr_logging(&config.log_filter)?;
        let token = resolve_token(cli.token.as_deref(), &token_store)?;
        let client = ApiClient::new(endpoint, token)?;
        return run_headless(command, client).await;
    }

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| AppConfig::data_dir().join("tmpl-tui.log"));
    logging::init_file_logging(&log_path, &config.log_filter)?;
    let token = resolve_token(cli.token.as_deref(), &token_store)?;
    let client = ApiClient::new(endpoint, token)?;
    info!(endpoint = %client.base_url(), "starting template manager");

    // Setup panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = init_terminal()?;

    let app_result = {
        let mut app = App::new(config, client, &token_store);
        app.run(&mut terminal)
    };

    restore_terminal(&mut terminal)?;

    app_result
}
