//! Searchbar TUI Entry Point
//!
//! Usage:
//!   searchbar-tui [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>          Configuration file
//!       --api-key <KEY>          Answers API key
//!       --experience-key <KEY>   Answers experience key
//!       --locale <LOCALE>        Experience locale
//!       --results-url <URL>      Full search results page
//!
//! Logs go to `searchbar-tui.log` in the cache directory (the terminal
//! belongs to the UI). Set `RUST_LOG` to change the filter.

use std::fs::{self, File};
use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use searchbar_core::{default_config_path, load_config_from_path, ConfigOverrides};
use searchbar_tui::App;

/// Default log filter
const DEFAULT_FILTER: &str = "searchbar_core=info,searchbar_tui=info";

/// Log file name
const LOG_FILE: &str = "searchbar-tui.log";

/// Searchbar TUI - search with an animated placeholder and live previews
#[derive(Parser, Debug)]
#[command(name = "searchbar-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "SEARCHBAR_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Answers API key
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Answers experience key
    #[arg(long, value_name = "KEY")]
    experience_key: Option<String>,

    /// Experience locale
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,

    /// Full search results page
    #[arg(long, value_name = "URL")]
    results_url: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(ref key) = self.api_key {
            overrides = overrides.with_api_key(key.clone());
        }
        if let Some(ref key) = self.experience_key {
            overrides = overrides.with_experience_key(key.clone());
        }
        if let Some(ref locale) = self.locale {
            overrides = overrides.with_locale(locale.clone());
        }
        if let Some(ref url) = self.results_url {
            overrides = overrides.with_results_url(url.clone());
        }
        overrides
    }
}

/// Send logs to a file in the cache directory
fn init_logging() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .map(|p| p.join("searchbar"))
        .unwrap_or_else(std::env::temp_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let path = dir.join(LOG_FILE);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .init();

    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: searchbar-tui requires a terminal (TTY)");
        std::process::exit(1);
    }

    let log_path = init_logging()?;

    let mut config = load_config_from_path(args.config.clone().or_else(default_config_path))?;
    args.overrides().apply(&mut config);
    config.validate()?;
    tracing::info!(
        source = %config.source(),
        log = %log_path.display(),
        "Starting search bar"
    );

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let last_navigation = result?;
    if let Some(url) = last_navigation {
        println!("{url}");
    }
    Ok(())
}

/// Run the app; returns the last results page the user asked for
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: searchbar_core::SearchBarConfig,
) -> Result<Option<String>> {
    let mut app = App::new(config)?;
    app.run(terminal).await?;
    Ok(app.last_navigation().map(|nav| nav.url.clone()))
}
