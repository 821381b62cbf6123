use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use checkers_ai::ai::{Agent, MinimaxAgent, RandomAgent, SearchConfig};
use checkers_ai::config::AppConfig;
use checkers_ai::game::Player;
use checkers_ai::tournament::{Seat, Tournament};

/// Pit two computer players against each other.
#[derive(Parser)]
#[command(name = "selfplay", about = "Run a headless checkers tournament")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// First player: minimax or random (starts as Black)
    #[arg(long, default_value = "minimax")]
    black: String,

    /// Second player: minimax or random
    #[arg(long, default_value = "random")]
    white: String,

    /// Override search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Base seed; each player derives its own from it
    #[arg(long)]
    seed: Option<u64>,
}

fn build_agent(
    kind: &str,
    search: &SearchConfig,
    side: Player,
    seed: Option<u64>,
) -> Result<Box<dyn Agent>> {
    let agent: Box<dyn Agent> = match (kind, seed) {
        ("minimax", Some(seed)) => Box::new(MinimaxAgent::with_seed(search.depth, side, seed)),
        ("minimax", None) => Box::new(MinimaxAgent::from_config(search, side)),
        ("random", Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
        ("random", None) => Box::new(RandomAgent::new()),
        (other, _) => bail!("unknown player '{}' (expected 'minimax' or 'random')", other),
    };
    Ok(agent)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(games) = cli.games {
        config.tournament.games = games;
    }
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    config.validate().context("invalid settings")?;

    let seed = cli.seed.or(config.search.seed);
    let mut first = build_agent(&cli.black, &config.search, Player::Black, seed)?;
    let mut second = build_agent(
        &cli.white,
        &config.search,
        Player::White,
        seed.map(|s| s.wrapping_add(1)),
    )?;

    let tournament = Tournament::new(config.tournament.clone());
    let stats = tournament
        .run(first.as_mut(), second.as_mut(), &config.session)
        .context("tournament aborted")?;

    println!("-------------------------------------------");
    println!(
        "{} games | {} (first): {} wins | {} (second): {} wins | draws: {}",
        stats.games(),
        first.name(),
        stats.wins(Seat::First),
        second.name(),
        stats.wins(Seat::Second),
        stats.draws(),
    );
    println!(
        "Black wins: {} | White wins: {} | avg length: {:.1} plies",
        stats.color_wins(Player::Black),
        stats.color_wins(Player::White),
        stats.average_game_length(),
    );
    Ok(())
}
