use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::movegen::legal_moves_into;
use crate::types::*;
use crate::zobrist::ZOBRIST;

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Plies without capture or pawn move after which the game is drawn outright.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;
/// Occurrences of the same position that end the game without a claim.
const FIVEFOLD: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, got {0}")]
    MissingFields(usize),
    #[error("invalid board section: {0}")]
    Board(String),
    #[error("invalid side to move: {0}")]
    SideToMove(String),
    #[error("invalid castling rights: {0}")]
    Castling(String),
    #[error("invalid en passant square: {0}")]
    EnPassant(String),
    #[error("invalid move counter: {0}")]
    Counter(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    /// Drops every right tied to `sq`. Called with both squares of a move, so it
    /// covers king moves, rook moves and rooks captured on their home corner.
    fn touch(&mut self, sq: u8) {
        match sq {
            0 => self.wq = false,
            7 => self.wk = false,
            4 => {
                self.wk = false;
                self.wq = false;
            }
            56 => self.bq = false,
            63 => self.bk = false,
            60 => {
                self.bk = false;
                self.bq = false;
            }
            _ => {}
        }
    }

    pub(crate) fn bits(&self) -> [bool; 4] {
        [self.wk, self.wq, self.bk, self.bq]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    history: Vec<PlyRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

/// One pushed move: enough to pop it and to detect repetitions.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PlyRecord {
    mv: Move,
    undo: Undo,
    /// Zobrist key of the position the move was played from.
    key: u64,
}

impl Position {
    fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights {
                wk: false,
                wq: false,
                bk: false,
                bq: false,
            },
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        };

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece {
                color: Color::White,
                kind,
            });
            p.board[8 + f] = Some(Piece {
                color: Color::White,
                kind: PieceKind::Pawn,
            });
            p.board[48 + f] = Some(Piece {
                color: Color::Black,
                kind: PieceKind::Pawn,
            });
            p.board[56 + f] = Some(Piece {
                color: Color::Black,
                kind,
            });
        }
        p
    }

    /// Parses Forsyth-Edwards Notation. The move counters are optional.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }
        let mut p = Position::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::Board(parts[0].to_string()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(FenError::Board(rank_str.to_string())),
                    };
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let at = sq(file, rank).ok_or_else(|| FenError::Board(rank_str.to_string()))?;
                    p.board[at as usize] = Some(Piece { color, kind });
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::Board(rank_str.to_string()));
                }
            }
            if file != 8 {
                return Err(FenError::Board(rank_str.to_string()));
            }
        }

        p.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => p.castling.wk = true,
                    'Q' => p.castling.wq = true,
                    'k' => p.castling.bk = true,
                    'q' => p.castling.bq = true,
                    _ => return Err(FenError::Castling(parts[2].to_string())),
                }
            }
        }

        if parts[3] != "-" {
            p.en_passant =
                Some(coord_to_sq(parts[3]).ok_or_else(|| FenError::EnPassant(parts[3].to_string()))?);
        }

        let counter = |idx: usize, default: u32| -> Result<u32, FenError> {
            match parts.get(idx) {
                Some(s) => s.parse().map_err(|_| FenError::Counter(s.to_string())),
                None => Ok(default),
            }
        };
        p.halfmove_clock = counter(4, 0)?;
        p.fullmove_number = counter(5, 1)?;
        Ok(p)
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&s| {
            self.board[s as usize]
                == Some(Piece {
                    color: c,
                    kind: PieceKind::King,
                })
        })
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Iterates over `(square, piece)` for every occupied cell.
    pub fn pieces(&self) -> impl Iterator<Item = (u8, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|pc| (i as u8, pc)))
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    fn has_piece(&self, at: Option<u8>, by: Color, kinds: &[PieceKind]) -> bool {
        at.and_then(|s| self.piece_at(s))
            .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
    }

    /// First piece met walking from `target` along `(df, dr)`.
    fn ray_hit(&self, target: u8, (df, dr): (i8, i8)) -> Option<u8> {
        let mut f = file_of(target) + df;
        let mut r = rank_of(target) + dr;
        while let Some(s) = sq(f, r) {
            if self.piece_at(s).is_some() {
                return Some(s);
            }
            f += df;
            r += dr;
        }
        None
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // Pawns attack diagonally forward, so look one rank behind the target.
        let back = if by == Color::White { -1 } else { 1 };
        if [-1, 1]
            .iter()
            .any(|df| self.has_piece(sq(tf + df, tr + back), by, &[PieceKind::Pawn]))
        {
            return true;
        }
        if KNIGHT_DELTAS
            .iter()
            .any(|(df, dr)| self.has_piece(sq(tf + df, tr + dr), by, &[PieceKind::Knight]))
        {
            return true;
        }
        if KING_DELTAS
            .iter()
            .any(|(df, dr)| self.has_piece(sq(tf + df, tr + dr), by, &[PieceKind::King]))
        {
            return true;
        }
        let diag = [PieceKind::Bishop, PieceKind::Queen];
        let ortho = [PieceKind::Rook, PieceKind::Queen];
        DIAGONALS
            .iter()
            .any(|&d| self.has_piece(self.ray_hit(target, d), by, &diag))
            || ORTHOGONALS
                .iter()
                .any(|&d| self.has_piece(self.ray_hit(target, d), by, &ortho))
    }

    /// Copy of the current position without the pushed history, for move
    /// generation and other make/unmake probing.
    pub fn scratch(&self) -> Position {
        Position {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling.clone(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            history: Vec::new(),
        }
    }

    /// Plays `mv` without recording it in the history. Pair with `unmake_move`.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let (from, to) = (mv.from, mv.to);
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut undo = Undo {
            captured: self.piece_at(to),
            castling: self.castling.clone(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            moved_piece: moved,
            rook_move: None,
            ep_captured_sq: None,
        };

        self.en_passant = None;

        if mv.is_en_passant {
            let behind = if moved.color == Color::White { -1 } else { 1 };
            if let Some(cs) = sq(file_of(to), rank_of(to) + behind) {
                undo.captured = self.piece_at(cs);
                undo.ep_captured_sq = Some(cs);
                self.set_piece(cs, None);
            }
        }

        self.set_piece(from, None);
        let promo_rank = if moved.color == Color::White { 7 } else { 0 };
        let placed = if moved.kind == PieceKind::Pawn && rank_of(to) == promo_rank {
            Piece {
                color: moved.color,
                kind: mv.promo.unwrap_or(PieceKind::Queen),
            }
        } else {
            moved
        };
        self.set_piece(to, Some(placed));

        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_squares = match (from, to) {
                (4, 6) => Some((7, 5)),
                (4, 2) => Some((0, 3)),
                (60, 62) => Some((63, 61)),
                (60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                undo.rook_move = Some((rf, rt));
            }
        }

        self.castling.touch(from);
        self.castling.touch(to);

        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        let irreversible = moved.kind == PieceKind::Pawn || undo.captured.is_some();
        self.halfmove_clock = if irreversible {
            0
        } else {
            self.halfmove_clock + 1
        };
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
        undo
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // The moved piece goes back as it was, which also reverts promotions.
        self.set_piece(mv.from, Some(undo.moved_piece));
        match undo.ep_captured_sq {
            Some(cs) => {
                self.set_piece(mv.to, None);
                self.set_piece(cs, undo.captured);
            }
            None => self.set_piece(mv.to, undo.captured),
        }
    }

    /// Plays `mv` and records it so that `pop` can take it back.
    pub fn push(&mut self, mv: Move) {
        let key = self.key();
        let undo = self.make_move(mv);
        self.history.push(PlyRecord { mv, undo, key });
    }

    /// Takes back the last pushed move, returning it.
    pub fn pop(&mut self) -> Option<Move> {
        let record = self.history.pop()?;
        self.unmake_move(record.mv, record.undo);
        Some(record.mv)
    }

    /// Number of moves pushed since this position was set up.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|r| r.mv)
    }

    /// Zobrist key of the current position.
    pub fn key(&self) -> u64 {
        ZOBRIST.hash(self)
    }

    /// How many times the current position has occurred in the pushed history,
    /// counting the current occurrence.
    pub fn repetition_count(&self) -> usize {
        let key = self.key();
        // Nothing before the last capture or pawn move can repeat.
        let window = (self.halfmove_clock as usize).min(self.history.len());
        1 + self.history[self.history.len() - window..]
            .iter()
            .filter(|r| r.key == key)
            .count()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    pub fn is_seventyfive_move_draw(&self) -> bool {
        self.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetition_count() >= FIVEFOLD
    }

    /// Neither side can ever deliver mate: bare kings, a single minor piece,
    /// or only bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_shades = [false; 2];
        for (s, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_shades[((file_of(s) + rank_of(s)) % 2) as usize] = true;
                }
            }
        }
        minors <= 1 || (knights == 0 && !(bishop_shades[0] && bishop_shades[1]))
    }

    /// Result of the game if it is over, `None` while it is still being played.
    pub fn outcome(&self) -> Option<Outcome> {
        let mut tmp = self.scratch();
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut tmp, &mut moves);
        if moves.is_empty() {
            if self.in_check(self.side_to_move) {
                return Some(match self.side_to_move {
                    Color::White => Outcome::BlackWin,
                    Color::Black => Outcome::WhiteWin,
                });
            }
            return Some(Outcome::Draw);
        }
        if self.is_insufficient_material()
            || self.is_seventyfive_move_draw()
            || self.is_fivefold_repetition()
        {
            return Some(Outcome::Draw);
        }
        None
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn is_checkmate(&self) -> bool {
        self.outcome().is_some_and(|o| o.winner().is_some())
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let row: Vec<String> = (0..8)
                .map(|file| {
                    self.piece_at(rank * 8 + file)
                        .map_or('.', Piece::symbol)
                        .to_string()
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
