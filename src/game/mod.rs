//! Core checkers rules: board representation, players and pieces, and the
//! immutable state transitions that enumerate legal successor positions.

mod board;
mod player;
mod state;

pub use board::{Board, Piece, Position, COLS, ROWS};
pub use player::Player;
pub use state::{BoardState, MoveKind};
