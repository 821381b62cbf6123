use crate::ai::Agent;
use crate::error::SessionError;
use crate::game::{BoardState, Player};
use crate::session::{GameResult, Session, SessionConfig};

/// Summary of one finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub result: GameResult,
    pub plies: usize,
    pub final_state: BoardState,
}

/// Play one game between two agents, `black` moving for Black.
pub fn play_game(
    black: &mut dyn Agent,
    white: &mut dyn Agent,
    config: &SessionConfig,
) -> Result<GameRecord, SessionError> {
    let mut session = Session::new(config.clone());
    black.new_game(Player::Black);
    white.new_game(Player::White);

    loop {
        if let Some(result) = session.result() {
            return Ok(GameRecord {
                result,
                plies: session.plies(),
                final_state: *session.state(),
            });
        }
        let agent: &mut dyn Agent = match session.turn() {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };
        session.apply_agent_move(agent)?;
    }
}
