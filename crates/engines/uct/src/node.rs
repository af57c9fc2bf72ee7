//! Search tree nodes and the per-node selection rule.
//!
//! A node owns one slot per legal move of its position. Slots start empty
//! and are filled at most once. Statistics and slots sit behind a single
//! mutex per node, so concurrent workers serialize only on the nodes they
//! actually share.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chess_core::Color;
use rand::Rng;

/// Visit count and accumulated reward of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeStats {
    pub visits: u32,
    /// Sum of rewards in `[0, 1]`, so always within `[0, visits]`.
    pub value: f64,
}

impl NodeStats {
    /// Average reward, or `None` before the first visit.
    pub fn mean(&self) -> Option<f64> {
        (self.visits > 0).then(|| self.value / f64::from(self.visits))
    }

    /// UCB1 score as seen from a parent visited `parent_visits` times.
    /// Unvisited nodes score infinity.
    pub fn ucb(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let n = f64::from(self.visits);
        let ln_parent = f64::from(parent_visits.max(1)).ln();
        self.value / n + exploration * (ln_parent / n).sqrt()
    }
}

pub struct Node<M> {
    moves: Vec<M>,
    ply: u32,
    /// The player whose move led here; rewards are credited to them.
    credited: Color,
    state: Mutex<NodeState<M>>,
}

pub(crate) struct NodeState<M> {
    pub(crate) stats: NodeStats,
    pub(crate) children: Vec<Option<Arc<Node<M>>>>,
}

impl<M> Node<M> {
    pub fn new(moves: Vec<M>, ply: u32, credited: Color) -> Self {
        let children = moves.iter().map(|_| None).collect();
        Self {
            moves,
            ply,
            credited,
            state: Mutex::new(NodeState {
                stats: NodeStats::default(),
                children,
            }),
        }
    }

    pub fn moves(&self) -> &[M] {
        &self.moves
    }

    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn credited(&self) -> Color {
        self.credited
    }

    /// Statistics are updated under the lock as a unit, so a poisoned lock
    /// still holds a consistent value.
    pub(crate) fn lock(&self) -> MutexGuard<'_, NodeState<M>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn stats(&self) -> NodeStats {
        self.lock().stats
    }

    /// Snapshot of the child slots.
    pub fn children(&self) -> Vec<Option<Arc<Node<M>>>> {
        self.lock().children.clone()
    }

    /// Counts one conclusive playout through this node. `white_reward` is
    /// 1 for a white win, 0.5 for a draw and 0 for a black win.
    pub fn record(&self, white_reward: f64) {
        let credit = match self.credited {
            Color::White => white_reward,
            Color::Black => 1.0 - white_reward,
        };
        let mut state = self.lock();
        state.stats.visits += 1;
        state.stats.value += credit;
    }
}

impl<M> NodeState<M> {
    /// Picks the slot to descend into. Must not be called on a node without moves.
    ///
    /// Empty slots come first, chosen uniformly. Then any child below
    /// `min_tries` visits, chosen uniformly among the least visited. After
    /// that the first child with the highest UCB1 score.
    pub(crate) fn select<R: Rng>(&self, min_tries: u32, exploration: f64, rng: &mut R) -> usize {
        let empty: Vec<usize> = (0..self.children.len())
            .filter(|&i| self.children[i].is_none())
            .collect();
        if !empty.is_empty() {
            return empty[rng.gen_range(0..empty.len())];
        }

        let stats: Vec<NodeStats> = self
            .children
            .iter()
            .flatten()
            .map(|child| child.lock().stats)
            .collect();
        let fewest = stats.iter().map(|s| s.visits).min().unwrap_or(0);
        if fewest < min_tries {
            let least: Vec<usize> = (0..stats.len()).filter(|&i| stats[i].visits == fewest).collect();
            return least[rng.gen_range(0..least.len())];
        }

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, s) in stats.iter().enumerate() {
            let score = s.ucb(self.stats.visits, exploration);
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod node_tests;
