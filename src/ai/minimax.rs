use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::game::{BoardState, Player};

use super::agent::Agent;

/// Deepest search the configuration accepts.
pub const MAX_SEARCH_DEPTH: usize = 16;

/// Named search depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub fn depth(self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 5,
            Difficulty::Hard => 8,
            Difficulty::Extreme => 12,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "extreme" => Ok(Difficulty::Extreme),
            other => Err(format!(
                "unknown difficulty '{other}' (expected easy, medium, hard or extreme)"
            )),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: usize,
    /// Seed for the tie-break; drawn from the OS when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: Difficulty::Medium.depth(),
            seed: None,
        }
    }
}

/// Depth-limited minimax agent with alpha-beta pruning. Scores are taken
/// from a fixed perspective: nodes where that player moves maximize, the
/// others minimize. Equally good moves are broken uniformly at random.
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    depth: usize,
    perspective: Player,
    rng: StdRng,
}

impl MinimaxAgent {
    pub fn new(depth: usize, perspective: Player) -> Self {
        Self::with_rng(depth, perspective, StdRng::from_os_rng())
    }

    pub fn with_seed(depth: usize, perspective: Player, seed: u64) -> Self {
        Self::with_rng(depth, perspective, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &SearchConfig, perspective: Player) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(config.depth, perspective, seed),
            None => Self::new(config.depth, perspective),
        }
    }

    fn with_rng(depth: usize, perspective: Player, rng: StdRng) -> Self {
        MinimaxAgent {
            depth: depth.max(1),
            perspective,
            rng,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn perspective(&self) -> Player {
        self.perspective
    }

    /// Choose the best successor of `state`. A lone successor (including a
    /// forced multi-jump continuation) is returned without searching.
    pub fn choose_move(&mut self, state: &BoardState) -> Result<BoardState, SearchError> {
        let successors = state.successors();
        if let [only] = successors.as_slice() {
            return Ok(*only);
        }
        let candidates = self.best_candidates(successors);
        self.pick(&candidates)
    }

    /// Every successor whose minimax value ties the best one, in generation order.
    pub fn best_candidates(&self, successors: Vec<BoardState>) -> Vec<BoardState> {
        let mut best_score = i32::MIN;
        let mut candidates = Vec::new();

        for succ in successors {
            let score = self.minimax_value(&succ, self.depth - 1, i32::MIN, i32::MAX);
            if score > best_score {
                best_score = score;
                candidates.clear();
            }
            if score == best_score {
                candidates.push(succ);
            }
        }

        candidates
    }

    fn pick(&mut self, candidates: &[BoardState]) -> Result<BoardState, SearchError> {
        if candidates.is_empty() {
            return Err(SearchError::EmptyChoice);
        }
        let idx = self.rng.random_range(0..candidates.len());
        Ok(candidates[idx])
    }

    /// Minimax value of `node` searched `depth` plies deep within the
    /// `[alpha, beta]` window. Values are never added to, so the `i32`
    /// sentinels for won and lost positions cannot overflow.
    pub fn minimax_value(&self, node: &BoardState, depth: usize, mut alpha: i32, mut beta: i32) -> i32 {
        if depth == 0 || node.is_game_over() {
            return node.evaluate_heuristic(self.perspective);
        }

        if node.turn() == self.perspective {
            let mut value = i32::MIN;
            for child in node.successors() {
                value = value.max(self.minimax_value(&child, depth - 1, alpha, beta));
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        } else {
            let mut value = i32::MAX;
            for child in node.successors() {
                value = value.min(self.minimax_value(&child, depth - 1, alpha, beta));
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        }
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, state: &BoardState) -> Result<BoardState, SearchError> {
        self.choose_move(state)
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self, side: Player) {
        self.perspective = side;
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(self.clone())
    }
}
