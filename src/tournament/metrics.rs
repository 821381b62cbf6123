use crate::game::Player;
use crate::session::EndReason;

/// Which of the two competing agents, independent of color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    First,
    Second,
}

/// Result of a single tournament game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Color played by the first agent.
    pub first_color: Player,
    pub winner: Option<Player>,
    pub reason: EndReason,
    pub plies: usize,
}

impl MatchResult {
    pub fn winning_seat(&self) -> Option<Seat> {
        self.winner.map(|w| {
            if w == self.first_color {
                Seat::First
            } else {
                Seat::Second
            }
        })
    }
}

/// Running totals over a series of games.
#[derive(Debug, Default)]
pub struct MatchStats {
    results: Vec<MatchResult>,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: MatchResult) {
        self.results.push(result);
    }

    pub fn games(&self) -> usize {
        self.results.len()
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn wins(&self, seat: Seat) -> usize {
        self.results
            .iter()
            .filter(|r| r.winning_seat() == Some(seat))
            .count()
    }

    /// Games won by whichever agent played `color`
    pub fn color_wins(&self, color: Player) -> usize {
        self.results
            .iter()
            .filter(|r| r.winner == Some(color))
            .count()
    }

    pub fn draws(&self) -> usize {
        self.results.iter().filter(|r| r.winner.is_none()).count()
    }

    pub fn win_rate(&self, seat: Seat) -> f32 {
        self.rate(self.wins(seat))
    }

    pub fn draw_rate(&self) -> f32 {
        self.rate(self.draws())
    }

    /// Average game length in plies
    pub fn average_game_length(&self) -> f32 {
        if self.results.is_empty() {
            return 0.0;
        }
        let total: usize = self.results.iter().map(|r| r.plies).sum();
        total as f32 / self.results.len() as f32
    }

    fn rate(&self, count: usize) -> f32 {
        if self.results.is_empty() {
            return 0.0;
        }
        count as f32 / self.results.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(first_color: Player, winner: Option<Player>, plies: usize) -> MatchResult {
        MatchResult {
            first_color,
            winner,
            reason: if winner.is_some() {
                EndReason::NoPieces
            } else {
                EndReason::PlyLimit
            },
            plies,
        }
    }

    #[test]
    fn test_winning_seat_follows_colors() {
        assert_eq!(
            result(Player::Black, Some(Player::Black), 10).winning_seat(),
            Some(Seat::First)
        );
        assert_eq!(
            result(Player::White, Some(Player::Black), 10).winning_seat(),
            Some(Seat::Second)
        );
        assert_eq!(result(Player::White, None, 10).winning_seat(), None);
    }

    #[test]
    fn test_rates() {
        let mut stats = MatchStats::new();
        stats.record(result(Player::Black, Some(Player::Black), 20));
        stats.record(result(Player::White, Some(Player::White), 30));
        stats.record(result(Player::Black, Some(Player::White), 40));
        stats.record(result(Player::White, None, 50));

        assert_eq!(stats.games(), 4);
        assert_eq!(stats.wins(Seat::First), 2);
        assert_eq!(stats.wins(Seat::Second), 1);
        assert_eq!(stats.color_wins(Player::White), 2);
        assert_eq!(stats.draws(), 1);
        assert!((stats.win_rate(Seat::First) - 0.5).abs() < 1e-6);
        assert!((stats.draw_rate() - 0.25).abs() < 1e-6);
        assert!((stats.average_game_length() - 35.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_stats() {
        let stats = MatchStats::new();
        assert_eq!(stats.win_rate(Seat::First), 0.0);
        assert_eq!(stats.average_game_length(), 0.0);
    }
}
