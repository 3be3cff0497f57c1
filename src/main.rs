//! Active Tigger TUI - a terminal client for the Active Tigger annotation server.
//!
//! Provides a keyboard-driven interface for logging in, browsing projects,
//! and inspecting project state, backed by the server's REST API.

mod api;
mod app;
mod auth;
mod config;
mod models;
mod ui;
mod utils;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, AppState};
use models::ProjectData;
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Initialize the tracing subscriber for logging.
///
/// Logs go to a file in the state directory so they do not corrupt the
/// terminal UI. Use RUST_LOG to control the level (e.g. RUST_LOG=debug).
/// Returns the appender guard, which must stay alive for the program's
/// lifetime so buffered lines get flushed.
fn init_tracing(state_dir: &Path) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if std::fs::create_dir_all(state_dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::never(state_dir, "tigger.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let state_dir = config::Config::load()
        .unwrap_or_default()
        .state_dir()
        .unwrap_or_else(|_| PathBuf::from("./state"));
    let _guard = init_tracing(&state_dir);

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--login" {
        return cli_login().await;
    }
    if args.len() > 1 && args[1] == "--create-project" {
        let path = args
            .get(2)
            .context("Usage: tigger --create-project <file.json>")?;
        return cli_create_project(path).await;
    }

    info!("Active Tigger TUI starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new()?;

    // A valid saved session skips the login screen
    if !app.is_authenticated() {
        app.start_login();
    } else {
        app.current_tab = app::Tab::Projects;
        app.refresh_projects();
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Active Tigger TUI shutting down");
    Ok(())
}

/// Log in from the command line and persist the session
async fn cli_login() -> Result<()> {
    let mut app = App::new()?;
    app.login_interactive().await?;
    Ok(())
}

/// Create a project from a JSON definition file
async fn cli_create_project(path: &str) -> Result<()> {
    let app = App::new()?;
    if !app.is_authenticated() {
        anyhow::bail!("No saved session. Run `tigger --login` first.");
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path))?;
    let project: ProjectData =
        serde_json::from_str(&raw).with_context(|| format!("Invalid project file {}", path))?;

    app.create_project(&project).await?;
    println!("Project '{}' created", project.project_name);
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Check for completed background tasks
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
