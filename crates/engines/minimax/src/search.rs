//! Fixed-depth minimax with alpha-beta pruning and one-ply move ordering.
//!
//! White maximizes and Black minimizes a single White-relative score, so
//! the recursion alternates explicitly between the two sides instead of
//! negating. Before recursing, every move is scored one ply ahead and the
//! moves are visited best-first for the side to move, which makes cutoffs
//! come early. Ordering changes only how much is pruned, never the value.

use chess_core::{Color, Game, Outcome};

use crate::eval::Evaluator;

/// Score of a won game, before the remaining-depth bonus.
pub const MATE_SCORE: i32 = 1_000_000;

/// Window bound; every reachable score is strictly inside `(-INFINITY, INFINITY)`.
const INFINITY: i32 = i32::MAX;

/// What a search found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<M> {
    /// Minimax value of the position, from White's point of view.
    pub score: i32,
    /// Moves reaching `score`, in the order they were explored.
    /// Empty when the position is already over.
    pub best_moves: Vec<M>,
    /// Positions visited, for statistics.
    pub nodes: u64,
}

/// Score of `pos` as a leaf. Finished games are scored by their result, so a
/// mate is seen even at the search horizon; `depth_left` makes faster mates
/// score higher.
pub(crate) fn leaf_score<G: Game, E: Evaluator<G>>(pos: &G, evaluator: &E, depth_left: u8) -> i32 {
    match pos.outcome() {
        Some(Outcome::WhiteWin) => MATE_SCORE + depth_left as i32,
        Some(Outcome::BlackWin) => -MATE_SCORE - depth_left as i32,
        Some(Outcome::Draw) => 0,
        None => evaluator.evaluate(pos),
    }
}

/// Legal moves paired with their one-ply score, best first for `mover`.
fn ordered_moves<G: Game, E: Evaluator<G>>(
    pos: &mut G,
    evaluator: &E,
    mover: Color,
    depth_left: u8,
    nodes: &mut u64,
) -> Vec<(G::Move, i32)> {
    let mut scored: Vec<(G::Move, i32)> = pos
        .legal_moves()
        .into_iter()
        .map(|mv| {
            pos.push(mv);
            *nodes += 1;
            let score = leaf_score(pos, evaluator, depth_left);
            pos.pop();
            (mv, score)
        })
        .collect();
    // Stable sort: equal scores keep generation order.
    match mover {
        Color::White => scored.sort_by(|a, b| b.1.cmp(&a.1)),
        Color::Black => scored.sort_by(|a, b| a.1.cmp(&b.1)),
    }
    scored
}

/// Searches `depth` plies below `pos` with `mover` to play.
///
/// `pos` is used as a scratchpad and is restored before returning.
pub fn search<G: Game, E: Evaluator<G>>(
    pos: &mut G,
    evaluator: &E,
    mover: Color,
    depth: u8,
) -> SearchOutcome<G::Move> {
    let mut nodes = 0;
    let (score, best_moves) = alpha_beta(pos, evaluator, mover, depth, -INFINITY, INFINITY, &mut nodes);
    SearchOutcome {
        score,
        best_moves,
        nodes,
    }
}

/// Returns the value of `pos` and the moves tied for it.
///
/// A strictly better child replaces the retained set; an equal one joins it.
/// Once the window has been tightened by an earlier sibling, an equal value
/// is only known to be no better than the best, so callers should prefer the
/// first move.
fn alpha_beta<G: Game, E: Evaluator<G>>(
    pos: &mut G,
    evaluator: &E,
    mover: Color,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    nodes: &mut u64,
) -> (i32, Vec<G::Move>) {
    if depth == 0 || pos.is_game_over() {
        return (leaf_score(pos, evaluator, depth), Vec::new());
    }

    let maximizing = mover == Color::White;
    let mut value = if maximizing { -INFINITY } else { INFINITY };
    let mut best = Vec::new();

    for (mv, one_ply) in ordered_moves(pos, evaluator, mover, depth - 1, nodes) {
        // At depth 1 the ordering score is already the child's leaf value.
        let child = if depth == 1 {
            one_ply
        } else {
            pos.push(mv);
            let (child, _) = alpha_beta(pos, evaluator, mover.other(), depth - 1, alpha, beta, nodes);
            pos.pop();
            child
        };

        let improves = if maximizing { child > value } else { child < value };
        if improves {
            value = child;
            best.clear();
            best.push(mv);
        } else if child == value {
            best.push(mv);
        }

        if maximizing {
            alpha = alpha.max(value);
        } else {
            beta = beta.min(value);
        }
        if alpha >= beta {
            break;
        }
    }
    (value, best)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
