//! # Checkers AI
//!
//! American checkers on an 8x8 board against a depth-limited minimax agent
//! with alpha-beta pruning. Features a terminal UI built with Ratatui and a
//! headless tournament runner for pitting agents against each other.
//!
//! ## Modules
//!
//! - [`game`]: Core rules: board, player, immutable board states and successor generation
//! - [`ai`]: Agent trait, minimax search, random agent
//! - [`session`]: Move validation, undo history, end-of-game rules
//! - [`tournament`]: Headless games and match statistics
//! - [`ui`]: Terminal UI
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod tournament;
pub mod ui;
