mod admin;
mod app;
mod cli;
mod config;
mod entries;
mod error;
mod logging;
mod runtime;
mod session;
mod text_input;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use journal_api::{HttpJournalClient, JournalApi, MemoryJournalApi};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    let config = config::JournalConfig::load()?.with_overrides(
        std::env::var(config::API_URL_ENV).ok(),
        cli.api_url.clone(),
    );

    match cli.command.unwrap_or(cli::Commands::Run) {
        cli::Commands::ConfigPath => {
            let path = config::JournalConfig::config_path()?;
            if !path.exists() {
                config::JournalConfig::default().save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
        cli::Commands::Health => {
            let client = HttpJournalClient::new(&config.api_url)?;
            let status = client
                .health_check()
                .await
                .with_context(|| format!("Health check against {} failed", config.api_url))?;
            println!("{}: {}", config.api_url, status);
            Ok(())
        }
        cli::Commands::Run => {
            logging::init_tracing(&config::JournalConfig::log_path()?, &config.log_level)?;
            let client = HttpJournalClient::new(&config.api_url)?;
            info!(api_url = %config.api_url, "starting");
            run_terminal(&client).await
        }
        cli::Commands::Dev => {
            logging::init_tracing(&config::JournalConfig::log_path()?, &config.log_level)?;
            info!("starting against in-memory service");
            run_terminal(&dev_backend()).await
        }
    }
}

/// Seeded accounts: `demo`/`demo` (user) and `admin`/`admin`.
fn dev_backend() -> MemoryJournalApi {
    MemoryJournalApi::new()
        .with_user("demo", "demo")
        .with_entry("demo", "Welcome", "Press e to edit this entry, d to delete it.")
        .with_entry("demo", "Second thoughts", "Search for an entry by pasting its ID.")
        .with_admin("admin", "admin")
}

async fn run_terminal(api: &dyn JournalApi) -> Result<()> {
    let mut app = App::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, api).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "terminal loop failed");
    }
    res
}
