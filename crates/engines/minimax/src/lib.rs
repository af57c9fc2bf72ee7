//! Minimax Chess Engine
//!
//! Fixed-depth alpha-beta search over a material plus piece-square
//! evaluation. The search is generic over [`chess_core::Game`] and
//! [`Evaluator`]; [`MinimaxAgent`] wires it to chess positions.

mod config;
pub mod eval;
pub mod search;

use chess_core::{Agent, Color, Move, Position, SearchError, ensure_to_move};
use tracing::debug;

pub use config::MinimaxConfig;
pub use eval::{Evaluator, PieceSquareEvaluator, evaluate};
pub use search::{MATE_SCORE, SearchOutcome, search};

/// Depth-limited alpha-beta agent.
///
/// Plays the first move of the best-value set, so for a fixed position and
/// depth the choice is deterministic.
#[derive(Debug, Clone)]
pub struct MinimaxAgent<E = PieceSquareEvaluator> {
    config: MinimaxConfig,
    evaluator: E,
    name: String,
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxAgent<PieceSquareEvaluator> {
    pub fn new(config: MinimaxConfig) -> Result<Self, SearchError> {
        Self::with_evaluator(config, PieceSquareEvaluator)
    }
}

impl<E: Evaluator<Position>> MinimaxAgent<E> {
    pub fn with_evaluator(config: MinimaxConfig, evaluator: E) -> Result<Self, SearchError> {
        config.validate()?;
        let name = format!("Minimax (depth {})", config.depth);
        Ok(Self {
            config,
            evaluator,
            name,
            nodes: 0,
        })
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// Positions visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl<E: Evaluator<Position>> Agent for MinimaxAgent<E> {
    fn make_move(&mut self, pos: &Position, color: Color) -> Result<Move, SearchError> {
        ensure_to_move(pos, color)?;
        if pos.is_game_over() {
            return Err(SearchError::NoLegalMoves);
        }
        // Keep the history so repetitions inside the search count earlier plies.
        let mut scratch = pos.clone();

        let outcome = search(&mut scratch, &self.evaluator, color, self.config.depth);
        self.nodes = outcome.nodes;
        debug!(
            depth = self.config.depth,
            score = outcome.score,
            nodes = outcome.nodes,
            tied = outcome.best_moves.len(),
            "minimax search finished"
        );
        outcome.best_moves.first().copied().ok_or(SearchError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
