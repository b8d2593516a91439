//! Movie Shelf TUI Application
//!
//! A terminal user interface for browsing popular movies and keeping favorites.

use clap::Parser;
use crossterm::event;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::Stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use movie_shelf::config::{DEFAULT_API_URL, DEFAULT_IMAGE_BASE_URL, DEFAULT_TOKEN_VAR};
use movie_shelf::tui::{
    handle_event, process_state, render, restore_terminal, setup_terminal, AppState,
};
use movie_shelf::{CatalogSettings, FavoritesRepository, JsonFileStore, PopularFeed};

#[derive(Parser, Debug)]
#[command(version, about)]
struct CliArgs {
    /// Catalog API root.
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Environment variable holding the catalog bearer token.
    #[arg(long, default_value = DEFAULT_TOKEN_VAR)]
    token_var: String,

    /// Base URL poster paths are appended to.
    #[arg(long, default_value = DEFAULT_IMAGE_BASE_URL)]
    image_base_url: String,

    /// File the favorites are stored in.
    #[arg(long, default_value = "movie-shelf.json")]
    store: PathBuf,

    /// File log output is appended to. Filter with RUST_LOG.
    #[arg(long, default_value = "movie-shelf.log")]
    log_file: PathBuf,
}

impl From<&CliArgs> for CatalogSettings {
    fn from(args: &CliArgs) -> Self {
        CatalogSettings {
            api_url: args.api_url.clone(),
            token_var: args.token_var.clone(),
            image_base_url: args.image_base_url.clone(),
        }
    }
}

fn init_logging(path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
) -> std::io::Result<()> {
    loop {
        terminal.draw(|f| render(f, state))?;

        process_state(state);

        if state.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            handle_event(event, state);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = CliArgs::parse();
    init_logging(&args.log_file)?;

    let settings = CatalogSettings::from(&args);
    info!(api_url = %settings.api_url, store = %args.store.display(), "starting");

    let store = JsonFileStore::open(&args.store)?;
    let mut state = AppState::new(PopularFeed::new(settings), FavoritesRepository::new(store));
    state.refresh_popular();

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut state);
    restore_terminal(&mut terminal)?;
    result?;

    info!("bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movie-shelf.log");

        init_logging(&path).unwrap();
        tracing::error!("hello from the log test");

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("hello from the log test"));
        assert!(init_logging(&path).is_err());
    }
}
