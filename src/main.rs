//! abroad-tui - study abroad registration wizard for the terminal
//!
//! A Ratatui-based TUI that walks an applicant through personal details,
//! program choice, accommodation and a priced summary that can be exported.

mod app;
mod config;
mod directory;
mod domain;
mod error;
mod export;
mod i18n;
mod platform;
mod state;
mod steps;
mod ui;
mod wizard;

use anyhow::Result;
use app::App;
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directory::{HttpDirectory, LookupOutcome};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "abroad-tui.log";

/// Log file in the data directory; the terminal belongs to the UI
fn open_log_file() -> Option<File> {
    let dir = AppConfig::data_dir()?;
    fs::create_dir_all(&dir).ok()?;
    File::options()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
        .ok()
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "abroad_tui=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    match open_log_file() {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = AppConfig::load()?;
    tracing::info!(
        "Starting with {:?} program selector, language {}",
        config.program_selector(),
        config.language().code()
    );
    let directory = Arc::new(HttpDirectory::from_config(&config));
    let mut app = App::new(config, directory);
    let mut lookups = app
        .take_lookup_receiver()
        .ok_or_else(|| anyhow::anyhow!("lookup receiver already taken"))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut lookups);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("Exiting after error: {err:?}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    tracing::info!("Bye");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    lookups: &mut UnboundedReceiver<LookupOutcome>,
) -> Result<()> {
    loop {
        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle crossterm events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }
                app.handle_key(key)?;
            }
        }

        // Deliver finished directory lookups
        while let Ok(outcome) = lookups.try_recv() {
            app.handle_lookup(outcome);
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
