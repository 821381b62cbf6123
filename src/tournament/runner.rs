use serde::{Deserialize, Serialize};

use crate::ai::Agent;
use crate::error::SessionError;
use crate::game::Player;
use crate::session::SessionConfig;

use super::game::play_game;
use super::metrics::{MatchResult, MatchStats, Seat};

/// Tournament configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub games: usize,
    pub log_interval: usize,
    /// Alternate colors every game, the first agent starting as Black.
    pub swap_colors: bool,
    /// Ply cap per game, used when the session config sets none.
    pub max_plies: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            games: 20,
            log_interval: 5,
            swap_colors: true,
            max_plies: 400,
        }
    }
}

/// Headless series of games between two agents.
pub struct Tournament {
    config: TournamentConfig,
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Self {
        Tournament { config }
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Play every game of the series and return the totals.
    pub fn run(
        &self,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
        session: &SessionConfig,
    ) -> Result<MatchStats, SessionError> {
        let session = SessionConfig {
            max_plies: session.max_plies.or(Some(self.config.max_plies)),
            ..session.clone()
        };
        let mut stats = MatchStats::new();

        tracing::info!(
            games = self.config.games,
            first = first.name(),
            second = second.name(),
            "starting tournament"
        );

        for game in 1..=self.config.games {
            let first_color = if self.config.swap_colors && game % 2 == 0 {
                Player::White
            } else {
                Player::Black
            };
            let record = match first_color {
                Player::Black => play_game(first, second, &session)?,
                Player::White => play_game(second, first, &session)?,
            };
            tracing::debug!(game, plies = record.plies, "{}", record.result);

            stats.record(MatchResult {
                first_color,
                winner: record.result.outcome.winner(),
                reason: record.result.reason,
                plies: record.plies,
            });

            if game % self.config.log_interval.max(1) == 0 {
                tracing::info!(
                    "Game {}/{} | first: {:.1}% | second: {:.1}% | draw: {:.1}% | avg_len: {:.1}",
                    game,
                    self.config.games,
                    stats.win_rate(Seat::First) * 100.0,
                    stats.win_rate(Seat::Second) * 100.0,
                    stats.draw_rate() * 100.0,
                    stats.average_game_length(),
                );
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MinimaxAgent, RandomAgent};

    #[test]
    fn test_run_plays_every_game() {
        let tournament = Tournament::new(TournamentConfig {
            games: 4,
            log_interval: 2,
            swap_colors: true,
            max_plies: 120,
        });
        let mut first = RandomAgent::with_seed(1);
        let mut second = RandomAgent::with_seed(2);
        let stats = tournament
            .run(&mut first, &mut second, &SessionConfig::default())
            .unwrap();

        assert_eq!(stats.games(), 4);
        assert_eq!(
            stats.wins(Seat::First) + stats.wins(Seat::Second) + stats.draws(),
            4
        );
        let colors: Vec<Player> = stats.results().iter().map(|r| r.first_color).collect();
        assert_eq!(
            colors,
            vec![Player::Black, Player::White, Player::Black, Player::White]
        );
        assert!(stats.results().iter().all(|r| r.plies <= 120));
    }

    #[test]
    fn test_without_swapping_first_keeps_black() {
        let tournament = Tournament::new(TournamentConfig {
            games: 2,
            swap_colors: false,
            max_plies: 10,
            ..Default::default()
        });
        let mut first = RandomAgent::with_seed(3);
        let mut second = RandomAgent::with_seed(4);
        let stats = tournament
            .run(&mut first, &mut second, &SessionConfig::default())
            .unwrap();
        assert!(stats
            .results()
            .iter()
            .all(|r| r.first_color == Player::Black));
    }

    #[test]
    fn test_minimax_outscores_random() {
        let tournament = Tournament::new(TournamentConfig {
            games: 2,
            ..Default::default()
        });
        let mut first = MinimaxAgent::with_seed(3, Player::Black, 11);
        let mut second = RandomAgent::with_seed(12);
        let stats = tournament
            .run(&mut first, &mut second, &SessionConfig::default())
            .unwrap();
        assert_eq!(stats.wins(Seat::Second), 0);
    }
}
