//! Game-over detection through the public `Game` interface:
//! stalemate, insufficient material, the seventy-five move rule and
//! fivefold repetition all end the game as a draw.

use chess_core::{Game, Outcome, Position, parse_uci_move};

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

// =============================================================================
// Stalemate
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    let pos = fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(Game::legal_moves(&pos).is_empty());
    assert!(!pos.in_check(chess_core::Color::Black));
    assert_eq!(Game::outcome(&pos), Some(Outcome::Draw));
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    let pos = fen("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");
    assert!(Game::is_game_over(&pos));
    assert_eq!(Game::outcome(&pos), Some(Outcome::Draw));
}

// =============================================================================
// Insufficient material
// =============================================================================

#[test]
fn test_insufficient_material_cases() {
    let drawn = [
        ("8/8/8/4k3/8/4K3/8/8 w - - 0 1", "K vs K"),
        ("8/8/8/4k3/8/4KB2/8/8 w - - 0 1", "K+B vs K"),
        ("8/8/8/4k3/8/4KN2/8/8 w - - 0 1", "K+N vs K"),
        ("8/8/4n3/4k3/8/4K3/8/8 w - - 0 1", "K vs K+N"),
        ("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1", "K+B vs K+B, same shade"),
    ];
    for (f, name) in drawn {
        let pos = fen(f);
        assert!(pos.is_insufficient_material(), "{name}");
        assert_eq!(Game::outcome(&pos), Some(Outcome::Draw), "{name}");
    }
}

#[test]
fn test_sufficient_material_cases() {
    let playable = [
        ("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1", "opposite shade bishops"),
        ("8/8/8/4k3/8/4K3/4P3/8 w - - 0 1", "pawn"),
        ("8/8/8/4k3/8/4K3/8/4R3 w - - 0 1", "rook"),
        ("8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1", "queen"),
        ("8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1", "two knights"),
        ("8/8/4n3/4k3/8/4KB2/8/8 w - - 0 1", "bishop vs knight"),
    ];
    for (f, name) in playable {
        let pos = fen(f);
        assert!(!pos.is_insufficient_material(), "{name}");
        assert!(!Game::is_game_over(&pos), "{name}");
    }
}

// =============================================================================
// Move counters and repetition
// =============================================================================

#[test]
fn test_pawn_move_resets_halfmove_clock() {
    let mut pos = fen("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    let mv = parse_uci_move(&pos, "e2e4").unwrap();
    Game::push(&mut pos, mv);
    assert_eq!(pos.halfmove_clock, 0);
    assert!(!pos.is_fifty_move_draw());
    Game::pop(&mut pos);
    assert_eq!(pos.halfmove_clock, 99);
}

#[test]
fn test_seventyfive_move_rule_reached_by_push() {
    let mut pos = fen("8/8/8/4k3/8/3K4/4R3/8 w - - 149 100");
    assert!(!Game::is_game_over(&pos));
    let mv = parse_uci_move(&pos, "e2h2").unwrap();
    Game::push(&mut pos, mv);
    assert_eq!(Game::outcome(&pos), Some(Outcome::Draw));
}

#[test]
fn test_capture_breaks_repetition_window() {
    let mut pos = fen("4k3/8/8/8/8/8/3r4/R3K3 w - - 0 1");
    for txt in ["a1a2", "d2d3", "a2a1", "d3d2", "a1a2", "d2d3", "a2a1", "d3d2"] {
        let mv = parse_uci_move(&pos, txt).unwrap();
        Game::push(&mut pos, mv);
    }
    assert_eq!(pos.repetition_count(), 3);
    let mv = parse_uci_move(&pos, "e1d2").unwrap();
    Game::push(&mut pos, mv);
    assert_eq!(pos.repetition_count(), 1);
}
