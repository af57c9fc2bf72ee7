//! The UCT iteration: select, expand, play out, back-propagate.
//!
//! Every iteration walks from the root to a finished game, expanding at
//! most one new node per level on the way down. The finished game's result
//! is credited to every node on the path. Walks that reach `max_ply`
//! without the game ending are dropped and leave no trace in the
//! statistics.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chess_core::{Color, Game, TimeControl};
use rand::Rng;
use tracing::trace;

use crate::config::UctConfig;
use crate::node::Node;

/// Result of a single iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Playout {
    /// The game ended; reward from White's point of view.
    Decisive(f64),
    /// Cut off by the ply cap.
    Inconclusive,
}

/// A tree rooted at the position a search started from.
pub struct SearchTree<M> {
    root: Node<M>,
    expansions: AtomicU64,
}

impl<M: Copy> SearchTree<M> {
    /// Root over every legal move of `pos`.
    pub fn new<G: Game<Move = M>>(pos: &G) -> Self {
        Self::with_root_moves(pos.legal_moves(), pos.side_to_move())
    }

    /// Root over a subset of the moves available to `mover`.
    pub fn with_root_moves(moves: Vec<M>, mover: Color) -> Self {
        Self {
            root: Node::new(moves, 0, mover.other()),
            expansions: AtomicU64::new(0),
        }
    }

    pub fn root(&self) -> &Node<M> {
        &self.root
    }

    /// Child slots filled so far, across all workers.
    pub fn expansions(&self) -> u64 {
        self.expansions.load(Ordering::Relaxed)
    }

    /// Nodes in the tree, root included.
    pub fn node_count(&self) -> u64 {
        self.expansions() + 1
    }
}

/// Counters for one worker's share of a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub iterations: u64,
    pub inconclusive: u64,
}

impl RunStats {
    pub fn merge(self, other: RunStats) -> RunStats {
        RunStats {
            iterations: self.iterations + other.iterations,
            inconclusive: self.inconclusive + other.inconclusive,
        }
    }
}

/// One root-to-terminal pass. `pos` must be the root position and is
/// restored before returning.
pub fn iterate<G: Game, R: Rng>(
    tree: &SearchTree<G::Move>,
    pos: &mut G,
    config: &UctConfig,
    rng: &mut R,
) -> Playout {
    descend(tree, &tree.root, pos, config, rng)
}

fn descend<G: Game, R: Rng>(
    tree: &SearchTree<G::Move>,
    node: &Node<G::Move>,
    pos: &mut G,
    config: &UctConfig,
    rng: &mut R,
) -> Playout {
    let result = if let Some(outcome) = pos.outcome() {
        Playout::Decisive(outcome.white_reward())
    } else if node.ply() >= config.max_ply || node.moves().is_empty() {
        Playout::Inconclusive
    } else {
        let mover = pos.side_to_move();
        let child = {
            // Selection and expansion happen under the node's lock, so a
            // slot is filled exactly once even with concurrent walkers.
            let mut state = node.lock();
            let idx = state.select(config.min_tries_per_node, config.exploration_constant, rng);
            pos.push(node.moves()[idx]);
            let child = state.children[idx].get_or_insert_with(|| {
                tree.expansions.fetch_add(1, Ordering::Relaxed);
                Arc::new(Node::new(pos.legal_moves(), node.ply() + 1, mover))
            });
            Arc::clone(child)
        };
        let result = descend(tree, &child, pos, config, rng);
        pos.pop();
        result
    };

    if let Playout::Decisive(reward) = result {
        node.record(reward);
    }
    result
}

/// Runs iterations until the clock runs out, another worker stops the
/// search, or the configured iteration cap is hit.
pub fn run<G: Game, R: Rng>(
    tree: &SearchTree<G::Move>,
    pos: &mut G,
    config: &UctConfig,
    time_control: &TimeControl,
    rng: &mut R,
) -> RunStats {
    let mut stats = RunStats::default();
    while !time_control.check_time() && config.max_iterations.is_none_or(|cap| stats.iterations < cap) {
        if iterate(tree, pos, config, rng) == Playout::Inconclusive {
            stats.inconclusive += 1;
        }
        stats.iterations += 1;
    }
    stats
}

/// The move a finished search recommends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootChoice<M> {
    pub mv: M,
    /// Average reward for the side to move at the root. Zero when unvisited.
    pub mean: f64,
    pub visits: u32,
}

/// Best root child by average reward among children with positive value.
///
/// Falls back to the best visited child when every visited child scored
/// zero, and to the first root move when nothing was visited at all.
/// `None` only when the root has no moves.
pub fn choose_root_move<M: Copy + std::fmt::Debug>(root: &Node<M>) -> Option<RootChoice<M>> {
    let mut positive: Option<RootChoice<M>> = None;
    let mut visited: Option<RootChoice<M>> = None;

    for (i, slot) in root.children().iter().enumerate() {
        let Some(child) = slot else {
            trace!(index = i, "root child never expanded");
            continue;
        };
        let stats = child.stats();
        let Some(mean) = stats.mean() else {
            continue;
        };
        trace!(
            index = i,
            mv = ?root.moves()[i],
            value = stats.value,
            visits = stats.visits,
            "root child"
        );
        let candidate = RootChoice {
            mv: root.moves()[i],
            mean,
            visits: stats.visits,
        };
        if stats.value > 0.0 && positive.is_none_or(|best| mean > best.mean) {
            positive = Some(candidate);
        }
        if visited.is_none_or(|best| mean > best.mean) {
            visited = Some(candidate);
        }
    }

    positive.or(visited).or_else(|| {
        root.moves().first().map(|&mv| RootChoice {
            mv,
            mean: 0.0,
            visits: 0,
        })
    })
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
