//! The rules interface consumed by the search engines.
//!
//! Engines only need to enumerate moves, play and take back moves on a
//! scratch copy, and ask whether and how the game ended. [`Position`]
//! implements it for chess; tests implement it for small synthetic trees.

use std::fmt::Debug;

use crate::board::Position;
use crate::movegen::legal_moves;
use crate::types::{Color, Move, Outcome};

pub trait Game: Clone + Send + Sync {
    type Move: Copy + Eq + Debug + Send + Sync;

    fn side_to_move(&self) -> Color;

    /// Legal moves in a stable (but otherwise arbitrary) order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    fn push(&mut self, mv: Self::Move);

    /// Takes back the most recent `push`.
    fn pop(&mut self);

    fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// `Some` exactly when the game is over.
    fn outcome(&self) -> Option<Outcome>;
}

impl Game for Position {
    type Move = Move;

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self)
    }

    fn push(&mut self, mv: Move) {
        Position::push(self, mv);
    }

    fn pop(&mut self) {
        Position::pop(self);
    }

    fn is_game_over(&self) -> bool {
        Position::is_game_over(self)
    }

    fn outcome(&self) -> Option<Outcome> {
        Position::outcome(self)
    }
}
