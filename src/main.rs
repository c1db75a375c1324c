//! Project Intake TUI - terminal intake form for new project inquiries
//!
//! Collects contact, company and project details, validates them and posts
//! them as JSON to the configured endpoint.

mod app;
mod config;
mod platform;
mod prefill;
mod state;
mod submit;
mod ui;
mod validation;

use anyhow::Result;
use app::App;
use clap::Parser;
use config::IntakeConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use submit::HttpTransport;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validation::Service;

/// Terminal intake form for new project inquiries
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Launch query string used for pre-fill, e.g. "service=Web%20Dev"
    #[arg(long)]
    query: Option<String>,

    /// Pre-select a service by name (overrides --query)
    #[arg(long)]
    service: Option<String>,

    /// Submission endpoint (overrides INTAKE_ENDPOINT and the config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Remember --endpoint in the config file
    #[arg(long, requires = "endpoint")]
    save_endpoint: bool,
}

impl Cli {
    fn prefill(&self) -> Option<Service> {
        self.service
            .as_deref()
            .and_then(Service::from_label)
            .or_else(|| self.query.as_deref().and_then(prefill::service_from_query))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "project_intake_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Precedence: --endpoint, then INTAKE_ENDPOINT, then the config file
    let mut config = IntakeConfig::load()?;
    if cli.save_endpoint {
        config.endpoint = cli.endpoint.clone();
        config.save()?;
        tracing::info!("Saved endpoint to config file");
    }
    let config = config
        .with_env()
        .with_endpoint_override(cli.endpoint.clone());

    let transport = HttpTransport::new(config.request_timeout())?;
    let mut app = App::new(config.endpoint(), Arc::new(transport), cli.prefill());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Pick up a finished submission, if any
        app.poll_submission();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll faster while a submission is in flight so the result shows promptly
        let poll_duration = if app.is_submitting() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        // Hand the runtime a chance to drive the submission task between polls
        tokio::task::yield_now().await;

        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }

                    app.handle_key(key).await?;
                }
                Event::Resize(_width, _height) => {
                    // Layout is recalculated on next draw
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
