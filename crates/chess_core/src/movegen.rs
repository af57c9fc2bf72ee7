use crate::board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position};
use crate::types::*;

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all legal moves, returning a freshly allocated vector.
/// The order is stable: squares a1..h8, then per-piece direction order.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.scratch();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    for (from, pc) in pos.pieces().filter(|(_, pc)| pc.color == us) {
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, us, out),
            PieceKind::Knight => gen_steps(pos, from, us, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => gen_slides(pos, from, us, &DIAGONALS, out),
            PieceKind::Rook => gen_slides(pos, from, us, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_slides(pos, from, us, &DIAGONALS, out);
                gen_slides(pos, from, us, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, us, &KING_DELTAS, out);
                gen_castles(pos, from, us, out);
            }
        }
    }
}

fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        out.extend(PROMOTIONS.iter().map(|&pk| Move {
            promo: Some(pk),
            ..Move::new(from, to)
        }));
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let (dir, start_rank, promo_rank) = match us {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    if let Some(one) = sq(f, r + dir)
        && pos.piece_at(one).is_none()
    {
        push_pawn_move(from, one, promo_rank, out);
        if r == start_rank
            && let Some(two) = sq(f, r + 2 * dir)
            && pos.piece_at(two).is_none()
        {
            out.push(Move::new(from, two));
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != us => push_pawn_move(from, to, promo_rank, out),
            None if pos.en_passant == Some(to) => out.push(Move {
                is_en_passant: true,
                ..Move::new(from, to)
            }),
            _ => {}
        }
    }
}

/// Knight and king moves: one step per delta onto an empty or enemy square.
fn gen_steps(pos: &Position, from: u8, us: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let (f, r) = (file_of(from), rank_of(from));
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr)
            && pos.piece_at(to).is_none_or(|pc| pc.color != us)
        {
            out.push(Move::new(from, to));
        }
    }
}

fn gen_slides(pos: &Position, from: u8, us: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for (df, dr) in dirs {
        let mut f = file_of(from) + df;
        let mut r = rank_of(from) + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != us {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

struct CastleRule {
    king_to: u8,
    /// Squares between king and rook.
    empty: &'static [u8],
    /// Squares the king passes over or lands on.
    safe: [u8; 2],
}

const KINGSIDE_WHITE: CastleRule = CastleRule {
    king_to: 6,
    empty: &[5, 6],
    safe: [5, 6],
};
const QUEENSIDE_WHITE: CastleRule = CastleRule {
    king_to: 2,
    empty: &[3, 2, 1],
    safe: [3, 2],
};
const KINGSIDE_BLACK: CastleRule = CastleRule {
    king_to: 62,
    empty: &[61, 62],
    safe: [61, 62],
};
const QUEENSIDE_BLACK: CastleRule = CastleRule {
    king_to: 58,
    empty: &[59, 58, 57],
    safe: [59, 58],
};

fn gen_castles(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let (home, rules) = match us {
        Color::White => (
            4,
            [
                (pos.castling.wk, KINGSIDE_WHITE),
                (pos.castling.wq, QUEENSIDE_WHITE),
            ],
        ),
        Color::Black => (
            60,
            [
                (pos.castling.bk, KINGSIDE_BLACK),
                (pos.castling.bq, QUEENSIDE_BLACK),
            ],
        ),
    };
    // Can't castle out of check either.
    if from != home || pos.in_check(us) {
        return;
    }
    let enemy = us.other();
    for (allowed, rule) in rules {
        if allowed
            && rule.empty.iter().all(|&s| pos.piece_at(s).is_none())
            && rule.safe.iter().all(|&s| !pos.is_square_attacked(s, enemy))
        {
            out.push(Move {
                is_castle: true,
                ..Move::new(from, rule.king_to)
            });
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
