pub mod board;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use game::Game;
pub use movegen::*;
pub use perft::perft;
pub use time_control::*;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

use thiserror::Error;

// =============================================================================
// Agent trait - implemented by every move-choosing engine (minimax, UCT, ...)
// =============================================================================

/// Why an agent could not produce a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The position is already over; callers should check `is_game_over()` first.
    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("asked to move for {requested} but {to_move} is to move")]
    WrongSideToMove { requested: Color, to_move: Color },
}

impl SearchError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        SearchError::InvalidConfiguration(msg.into())
    }
}

/// Fails with `WrongSideToMove` unless `color` is to move in `pos`.
pub fn ensure_to_move<G: Game>(pos: &G, color: Color) -> Result<(), SearchError> {
    let to_move = pos.side_to_move();
    if to_move != color {
        return Err(SearchError::WrongSideToMove {
            requested: color,
            to_move,
        });
    }
    Ok(())
}

/// Anything that can pick a move for one side of a chess game.
///
/// Agents keep no state between calls: every `make_move` starts a fresh search.
pub trait Agent: Send {
    /// Choose a move for `color`, which must be the side to move in `pos`.
    fn make_move(&mut self, pos: &Position, color: Color) -> Result<Move, SearchError>;

    /// Returns the agent's display name
    fn name(&self) -> &str;
}
