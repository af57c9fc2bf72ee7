use super::*;

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
        .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
}

#[test]
fn test_generation_order_is_stable() {
    let pos = Position::startpos();
    assert_eq!(legal_moves(&pos), legal_moves(&pos));
    // a1..h8 scan: the b1 knight comes first.
    assert_eq!(legal_moves(&pos)[0].from, 1);
}

#[test]
fn test_en_passant_generated() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let ep: Vec<_> = legal_moves(&pos).into_iter().filter(|m| m.is_en_passant).collect();
    assert_eq!(ep.len(), 1);
    assert_eq!(ep[0].to, coord_to_sq("d6").unwrap());
}

#[test]
fn test_pinned_piece_cannot_move() {
    // The e2 knight is pinned against the king by the e8 rook.
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    assert!(legal_moves(&pos).iter().all(|m| m.from != coord_to_sq("e2").unwrap()));
}

#[test]
fn test_no_castling_through_attacked_square() {
    // The f8 rook covers f1.
    let pos = Position::from_fen("5rk1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(legal_moves(&pos).iter().all(|m| !m.is_castle));
}
