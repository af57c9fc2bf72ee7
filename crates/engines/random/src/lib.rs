//! Random Move Chess Agent
//!
//! Picks uniformly among the legal moves. Any real engine should easily
//! beat it, which makes it a useful sparring partner for the arena.

use chess_core::{Agent, Color, Move, Position, SearchError, ensure_to_move, legal_moves_into};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomConfig {
    /// Fixed seed for a reproducible move sequence.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
    moves: Vec<Move>,
}

impl RandomAgent {
    pub fn new(config: RandomConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            moves: Vec::with_capacity(64),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new(RandomConfig::default())
    }
}

impl Agent for RandomAgent {
    fn make_move(&mut self, pos: &Position, color: Color) -> Result<Move, SearchError> {
        ensure_to_move(pos, color)?;
        if pos.is_game_over() {
            return Err(SearchError::NoLegalMoves);
        }
        let mut scratch = pos.scratch();
        legal_moves_into(&mut scratch, &mut self.moves);
        let mv = self.moves.choose(&mut self.rng).copied().ok_or(SearchError::NoLegalMoves)?;
        trace!(mv = %mv, choices = self.moves.len(), "random move");
        Ok(mv)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
