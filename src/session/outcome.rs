use std::fmt;

use crate::game::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Winner(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The loser has no pieces left.
    NoPieces,
    /// The side to move has no legal move and loses.
    Blocked,
    /// Too many consecutive non-capturing moves with only kings on the board.
    KingsOnly,
    /// The configured ply limit was reached.
    PlyLimit,
}

impl EndReason {
    pub fn description(self) -> &'static str {
        match self {
            EndReason::NoPieces => "no pieces left",
            EndReason::Blocked => "no legal moves",
            EndReason::KingsOnly => "kings only, no progress",
            EndReason::PlyLimit => "move limit reached",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: GameOutcome,
    pub reason: EndReason,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            GameOutcome::Winner(player) => {
                write!(f, "{} wins ({})", player.name(), self.reason.description())
            }
            GameOutcome::Draw => write!(f, "Draw ({})", self.reason.description()),
        }
    }
}
