//! Zobrist keys for chess positions.
//!
//! A position's key is the XOR of one random value per occupied
//! `(color, piece, square)`, plus values for black to move, each castling
//! right and the en passant file. Used to count repetitions in the push
//! history of a [`Position`].

use crate::board::Position;
use crate::types::{Color, Piece, file_of};

pub struct ZobristKeys {
    /// Indexed by `[color][piece_kind][square]`.
    pub pieces: [[[u64; 64]; 6]; 2],
    pub black_to_move: u64,
    /// `[wk, wq, bk, bq]`
    pub castling: [u64; 4],
    pub en_passant_file: [u64; 8],
}

/// Keys generated once at compile time from a fixed seed.
pub static ZOBRIST: ZobristKeys = ZobristKeys::generate(0x123456789ABCDEF0);

const fn xorshift64(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

impl ZobristKeys {
    pub const fn generate(seed: u64) -> Self {
        let mut state = seed;
        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut i = 0;
        while i < 2 * 6 * 64 {
            state = xorshift64(state);
            pieces[i / 384][(i / 64) % 6][i % 64] = state;
            i += 1;
        }

        state = xorshift64(state);
        let black_to_move = state;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant_file = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant_file[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant_file,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// Full key of `pos`, computed from scratch.
    pub fn hash(&self, pos: &Position) -> u64 {
        let mut h = pos
            .pieces()
            .fold(0u64, |h, (sq, pc)| h ^ self.piece_key(pc, sq));
        if pos.side_to_move == Color::Black {
            h ^= self.black_to_move;
        }
        for (right, key) in pos.castling.bits().iter().zip(self.castling) {
            if *right {
                h ^= key;
            }
        }
        if let Some(ep) = pos.en_passant {
            h ^= self.en_passant_file[file_of(ep) as usize];
        }
        h
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
