use crate::error::SearchError;
use crate::game::{BoardState, Player};

/// Universal interface for computer players.
pub trait Agent: Send {
    /// Pick one of `state.successors()`.
    fn select_move(&mut self, state: &BoardState) -> Result<BoardState, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Called before a game starts with the side this agent will play.
    fn new_game(&mut self, _side: Player) {}

    /// Clone the agent into a boxed trait object.
    fn clone_agent(&self) -> Box<dyn Agent>;
}
