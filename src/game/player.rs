use serde::{Deserialize, Serialize};

use super::board::ROWS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Black, Player::White];

    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Row a man of this player must reach to be crowned
    pub fn crowning_row(self) -> usize {
        match self {
            Player::Black => ROWS - 1,
            Player::White => 0,
        }
    }

    /// Row delta of a forward step
    pub fn forward(self) -> isize {
        match self {
            Player::Black => 1,
            Player::White => -1,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Black => "Black",
            Player::White => "White",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Player::Black),
            "white" => Ok(Player::White),
            other => Err(format!("unknown player '{other}' (expected black or white)")),
        }
    }
}
