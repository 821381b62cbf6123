use crate::error::SearchError;
use crate::game::BoardState;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;

/// An agent that selects uniformly at random from legal successors.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &BoardState) -> Result<BoardState, SearchError> {
        let successors = state.successors();
        if successors.is_empty() {
            return Err(SearchError::EmptyChoice);
        }
        let idx = self.rng.random_range(0..successors.len());
        Ok(successors[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    #[test]
    fn test_random_agent_selects_legal_move() {
        let mut agent = RandomAgent::with_seed(3);
        let state = BoardState::initial();
        let legal = state.successors();

        for _ in 0..100 {
            let next = agent.select_move(&state).unwrap();
            assert!(legal.contains(&next), "{:?} is not legal", next.last_move());
        }
    }

    #[test]
    fn test_random_agent_plays_until_stuck_or_finished() {
        let mut agent = RandomAgent::with_seed(11);
        let mut state = BoardState::initial();

        for _ in 0..500 {
            if state.is_game_over() {
                break;
            }
            match agent.select_move(&state) {
                Ok(next) => state = next,
                Err(SearchError::EmptyChoice) => {
                    assert!(state.successors().is_empty());
                    break;
                }
            }
        }

        for player in Player::ALL {
            assert!(state.piece_count(player) <= 12);
        }
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
        assert_eq!(agent.clone_agent().name(), "Random");
    }

    #[test]
    fn test_clone_keeps_seeded_stream() {
        let mut agent = RandomAgent::with_seed(42);
        let mut clone = agent.clone_agent();
        let mut state = BoardState::initial();
        for _ in 0..10 {
            let next = agent.select_move(&state).unwrap();
            assert_eq!(clone.select_move(&state).unwrap(), next);
            state = next;
        }
    }
}
