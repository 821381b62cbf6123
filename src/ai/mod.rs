//! Computer players: the `Agent` trait, the alpha-beta minimax search and a
//! uniform random sparring partner.

mod agent;
mod minimax;
mod random;

pub use agent::Agent;
pub use minimax::{Difficulty, MinimaxAgent, SearchConfig, MAX_SEARCH_DEPTH};
pub use random::RandomAgent;
