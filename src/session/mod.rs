//! Game sessions: move validation against the current position, undo
//! history and the end-of-game rules layered on top of the board.

mod controller;
mod feedback;
mod outcome;

pub use controller::{Session, SessionConfig, MAX_UNDO_MEMORY};
pub use feedback::MoveFeedback;
pub use outcome::{EndReason, GameOutcome, GameResult};
