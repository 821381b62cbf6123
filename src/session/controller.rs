use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::ai::Agent;
use crate::error::{MoveError, SessionError};
use crate::game::{BoardState, MoveKind, Player, Position};

use super::feedback::MoveFeedback;
use super::outcome::{EndReason, GameOutcome, GameResult};

/// Largest undo history the configuration accepts.
pub const MAX_UNDO_MEMORY: usize = 1000;

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub first_player: Player,
    /// Number of positions kept for undo, current one included.
    pub undo_memory: usize,
    /// Consecutive non-capturing moves in a kings-only position before a draw.
    pub kings_only_draw_moves: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_plies: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            first_player: BoardState::DEFAULT_FIRST_PLAYER,
            undo_memory: 20,
            kings_only_draw_moves: 20,
            max_plies: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    state: BoardState,
    kings_only_moves: u32,
    ply: usize,
}

/// A game in progress: bounded history of positions plus the end-of-game
/// rules that are not part of the board itself.
pub struct Session {
    config: SessionConfig,
    history: VecDeque<Entry>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let start = BoardState::with_first_player(config.first_player);
        Self::from_state(config, start)
    }

    /// Start from an arbitrary position
    pub fn from_state(config: SessionConfig, state: BoardState) -> Self {
        let mut history = VecDeque::new();
        history.push_back(Entry {
            state,
            kings_only_moves: 0,
            ply: 0,
        });
        Session { config, history }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn current(&self) -> &Entry {
        // History always holds at least the starting entry.
        &self.history[self.history.len() - 1]
    }

    /// Current position
    pub fn state(&self) -> &BoardState {
        &self.current().state
    }

    pub fn turn(&self) -> Player {
        self.state().turn()
    }

    /// Plies played since the start of the game
    pub fn plies(&self) -> usize {
        self.current().ply
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Result of the game, once it has ended
    pub fn result(&self) -> Option<GameResult> {
        let entry = self.current();
        let state = &entry.state;

        if state.is_game_over() {
            let outcome = state.winner().map_or(GameOutcome::Draw, GameOutcome::Winner);
            return Some(GameResult {
                outcome,
                reason: EndReason::NoPieces,
            });
        }
        if state.successors().is_empty() {
            return Some(GameResult {
                outcome: GameOutcome::Winner(state.turn().other()),
                reason: EndReason::Blocked,
            });
        }
        if entry.kings_only_moves >= self.config.kings_only_draw_moves {
            return Some(GameResult {
                outcome: GameOutcome::Draw,
                reason: EndReason::KingsOnly,
            });
        }
        if self.config.max_plies.is_some_and(|max| entry.ply >= max) {
            return Some(GameResult {
                outcome: GameOutcome::Draw,
                reason: EndReason::PlyLimit,
            });
        }
        None
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.result().map(|r| r.outcome)
    }

    pub fn is_game_over(&self) -> bool {
        self.result().is_some()
    }

    /// Legal successors for the piece at `pos`, with captures still forced
    pub fn legal_moves_from(&self, pos: Position) -> Result<Vec<BoardState>, SessionError> {
        if self.is_game_over() {
            return Err(SessionError::GameOver);
        }
        Ok(self.state().successors_from(pos)?)
    }

    /// Explain why a piece of the side to move has no moves
    pub fn feedback(&self) -> MoveFeedback {
        if self.state().successors_of(MoveKind::Jump).is_empty() {
            MoveFeedback::PieceBlocked
        } else {
            MoveFeedback::ForcedJump
        }
    }

    /// Play the move `from -> to` for the side to move
    pub fn play(&mut self, from: Position, to: Position) -> Result<&BoardState, SessionError> {
        if self.is_game_over() {
            return Err(SessionError::GameOver);
        }
        let next = self
            .state()
            .successors_from(from)?
            .into_iter()
            .find(|s| s.last_move() == Some((from, to)))
            .ok_or(MoveError::NoSuchMove { from, to })?;
        self.advance(next)
    }

    /// Ask `agent` for a move and play it
    pub fn apply_agent_move(&mut self, agent: &mut dyn Agent) -> Result<&BoardState, SessionError> {
        if self.is_game_over() {
            return Err(SessionError::GameOver);
        }
        let next = agent.select_move(self.state())?;
        self.advance(next)
    }

    /// Accept `next` as the new position. It must be one of the current
    /// position's successors.
    pub fn advance(&mut self, next: BoardState) -> Result<&BoardState, SessionError> {
        if self.is_game_over() {
            return Err(SessionError::GameOver);
        }
        let current = *self.current();
        if !current.state.successors().contains(&next) {
            return Err(MoveError::NotASuccessor.into());
        }

        let kings_only = Player::ALL
            .iter()
            .all(|&p| current.state.piece_count(p) == current.state.king_count(p));
        let kings_only_moves = if kings_only && next.last_capture().is_none() {
            current.kings_only_moves + 1
        } else {
            0
        };

        if let Some((from, to)) = next.last_move() {
            tracing::debug!(
                player = %current.state.turn(),
                %from,
                %to,
                ply = current.ply + 1,
                "move played"
            );
        }

        self.history.push_back(Entry {
            state: next,
            kings_only_moves,
            ply: current.ply + 1,
        });
        if self.history.len() > self.config.undo_memory.max(1) {
            self.history.pop_front();
        }

        if let Some(result) = self.result() {
            tracing::info!(plies = current.ply + 1, "game over: {result}");
        }

        Ok(self.state())
    }

    /// Step back to the most recent position where `player` is to move.
    pub fn undo(&mut self, player: Player) -> Result<&BoardState, SessionError> {
        if self.history.len() < 2 {
            return Err(SessionError::NothingToUndo);
        }
        self.history.pop_back();
        while self.history.len() > 1 && self.turn() != player {
            self.history.pop_back();
        }
        tracing::debug!(ply = self.plies(), "undo");
        Ok(self.state())
    }
}
