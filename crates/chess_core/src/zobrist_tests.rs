use super::*;
use crate::movegen::legal_moves;
use crate::types::PieceKind;
use std::collections::HashSet;

#[test]
fn test_zobrist_keys_unique() {
    let mut seen = HashSet::new();
    for color in ZOBRIST.pieces.iter() {
        for piece in color.iter() {
            for key in piece.iter() {
                assert!(seen.insert(*key), "Duplicate Zobrist key found");
            }
        }
    }
    assert!(seen.insert(ZOBRIST.black_to_move));
    for key in ZOBRIST.castling.iter().chain(ZOBRIST.en_passant_file.iter()) {
        assert!(seen.insert(*key), "Zobrist key collision");
    }
}

#[test]
fn test_piece_key_depends_on_square() {
    let piece = Piece {
        color: Color::White,
        kind: PieceKind::Pawn,
    };
    assert_ne!(ZOBRIST.piece_key(piece, 0), ZOBRIST.piece_key(piece, 1));
}

#[test]
fn test_hash_restored_after_push_pop() {
    let mut pos = Position::startpos();
    let before = pos.key();
    for mv in legal_moves(&pos) {
        pos.push(mv);
        assert_ne!(pos.key(), before, "{mv} should change the key");
        pos.pop();
        assert_eq!(pos.key(), before);
    }
}

#[test]
fn test_transposition_has_same_key() {
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let mut a = Position::from_fen(fen).unwrap();
    let mut b = Position::from_fen(fen).unwrap();
    for (pos, order) in [(&mut a, ["g1f3", "g8f6", "b1c3"]), (&mut b, ["b1c3", "g8f6", "g1f3"])] {
        for txt in order {
            let mv = crate::uci::parse_uci_move(pos, txt).unwrap();
            pos.push(mv);
        }
    }
    assert_eq!(a.key(), b.key());
}
