//! Small games for exercising the search without chess.

use chess_core::{Color, Game, Outcome};

/// Players alternately add 1, 2 or 3 to a running total; whoever reaches
/// `target` exactly wins. The player to move loses when
/// `target - total` is a multiple of 4.
#[derive(Debug, Clone)]
pub struct Race {
    pub target: u8,
    history: Vec<u8>,
}

impl Race {
    pub fn new(target: u8) -> Self {
        Self {
            target,
            history: Vec::new(),
        }
    }

    pub fn total(&self) -> u8 {
        self.history.iter().sum()
    }
}

impl Game for Race {
    type Move = u8;

    fn side_to_move(&self) -> Color {
        if self.history.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    fn legal_moves(&self) -> Vec<u8> {
        let left = self.target - self.total();
        (1..=3).filter(|&step| step <= left).collect()
    }

    fn push(&mut self, mv: u8) {
        self.history.push(mv);
    }

    fn pop(&mut self) {
        self.history.pop();
    }

    fn outcome(&self) -> Option<Outcome> {
        if self.total() < self.target {
            return None;
        }
        Some(match self.side_to_move().other() {
            Color::White => Outcome::WhiteWin,
            Color::Black => Outcome::BlackWin,
        })
    }
}

/// Two moves forever; every playout hits the ply cap.
#[derive(Debug, Clone, Default)]
pub struct Endless {
    ply: u32,
}

impl Game for Endless {
    type Move = bool;

    fn side_to_move(&self) -> Color {
        if self.ply % 2 == 0 { Color::White } else { Color::Black }
    }

    fn legal_moves(&self) -> Vec<bool> {
        vec![false, true]
    }

    fn push(&mut self, _mv: bool) {
        self.ply += 1;
    }

    fn pop(&mut self) {
        self.ply -= 1;
    }

    fn outcome(&self) -> Option<Outcome> {
        None
    }
}

/// [`Race`] where playing `3` as the first move panics.
#[derive(Debug, Clone)]
pub struct Fragile(pub Race);

impl Game for Fragile {
    type Move = u8;

    fn side_to_move(&self) -> Color {
        self.0.side_to_move()
    }

    fn legal_moves(&self) -> Vec<u8> {
        self.0.legal_moves()
    }

    fn push(&mut self, mv: u8) {
        if mv == 3 && self.0.history.is_empty() {
            panic!("fragile move played");
        }
        self.0.push(mv);
    }

    fn pop(&mut self) {
        self.0.pop();
    }

    fn outcome(&self) -> Option<Outcome> {
        self.0.outcome()
    }
}

/// Calls `f` on every node of the tree below and including `node`.
pub fn for_each_node<M>(node: &crate::node::Node<M>, f: &mut impl FnMut(&crate::node::Node<M>)) {
    f(node);
    for child in node.children().into_iter().flatten() {
        for_each_node(&child, f);
    }
}
