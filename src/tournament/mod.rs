//! Headless matches between computer players: single games, series with
//! color swapping and the statistics they produce.

mod game;
mod metrics;
mod runner;

pub use game::{play_game, GameRecord};
pub use metrics::{MatchResult, MatchStats, Seat};
pub use runner::{Tournament, TournamentConfig};
