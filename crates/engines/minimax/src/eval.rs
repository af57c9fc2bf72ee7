//! Material plus piece-square evaluation.
//!
//! Scores are in centipawns from White's point of view (zero-sum: Black's
//! score is the negation). Each side scores the sum of its piece values
//! plus a per-piece-type bonus read from a 64-cell table.
//!
//! The tables follow the chessprogramming.org "Simplified Evaluation
//! Function". They are laid out for Black with index 0 = a1, so a Black
//! piece on `sq` reads `table[sq]` and a White piece reads `table[63 - sq]`.
//! Swapping every piece's color and mirroring the board through its center
//! therefore negates the score exactly.

use chess_core::{Color, PieceKind, Position};

/// Material values in centipawns, indexed by `PieceKind::idx()`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 20_000];

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     50,  50,  50,  50,  50,  50,  50,  50,
     10,  10,  20,  30,  30,  20,  10,  10,
      5,   5,  10,  25,  25,  10,   5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      5,  10,  10, -20, -20,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10,  10,  10,  10,  10,   5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   0,   5,   5,   5,   5,   0,  -5,
    -10,   5,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

/// Piece-square tables indexed by `PieceKind::idx()`.
const TABLES: [&[i32; 64]; 6] = [
    &PAWN_TABLE,
    &KNIGHT_TABLE,
    &BISHOP_TABLE,
    &ROOK_TABLE,
    &QUEEN_TABLE,
    &KING_TABLE,
];

/// Static evaluation used at the leaves of the minimax tree.
pub trait Evaluator<G>: Send + Sync {
    /// Score of `pos` from White's point of view.
    fn evaluate(&self, pos: &G) -> i32;
}

/// The default chess evaluator: material plus piece-square tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareEvaluator;

impl Evaluator<Position> for PieceSquareEvaluator {
    fn evaluate(&self, pos: &Position) -> i32 {
        evaluate(pos)
    }
}

/// Positional bonus for a `color` piece of `kind` standing on `sq`.
pub fn square_bonus(kind: PieceKind, color: Color, sq: u8) -> i32 {
    let cell = match color {
        Color::White => 63 - sq as usize,
        Color::Black => sq as usize,
    };
    TABLES[kind.idx()][cell]
}

/// Material plus positional score of everything `color` has on the board.
pub fn side_score(pos: &Position, color: Color) -> i32 {
    pos.pieces()
        .filter(|(_, pc)| pc.color == color)
        .map(|(sq, pc)| PIECE_VALUES[pc.kind.idx()] + square_bonus(pc.kind, color, sq))
        .sum()
}

/// `side_score(White) - side_score(Black)`.
pub fn evaluate(pos: &Position) -> i32 {
    side_score(pos, Color::White) - side_score(pos, Color::Black)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
