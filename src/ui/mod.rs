//! Terminal UI: play against the minimax agent with cursor selection,
//! destination hints, undo and restart.

mod app;
mod board_widget;
mod game_view;

pub use app::{App, UiConfig};
