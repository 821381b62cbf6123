use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use checkers_ai::ai::Difficulty;
use checkers_ai::config::AppConfig;
use checkers_ai::game::Player;
use checkers_ai::ui::App;

/// Play checkers against a minimax computer opponent in the terminal.
#[derive(Parser)]
#[command(name = "checkers", about = "Play checkers against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Search depth preset: easy, medium, hard or extreme
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Explicit search depth, overrides --difficulty
    #[arg(long)]
    depth: Option<usize>,

    /// Side you play: black or white
    #[arg(long)]
    human: Option<Player>,

    /// Side that moves first: black or white
    #[arg(long)]
    first: Option<Player>,

    /// Seed for the computer's tie-breaks
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the board)
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(difficulty) = cli.difficulty {
        config.search.depth = difficulty.depth();
    }
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(human) = cli.human {
        config.ui.human = human;
    }
    if let Some(first) = cli.first {
        config.session.first_player = first;
    }
    if cli.seed.is_some() {
        config.search.seed = cli.seed;
    }
    config.validate().context("invalid settings")?;

    tracing::info!(
        depth = config.search.depth,
        human = %config.ui.human,
        first = %config.session.first_player,
        "starting game"
    );

    run(config).context("terminal error")
}

fn run(config: AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.search, config.session, config.ui);
    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
