//! Shared-tree parallelism: every worker grows the same tree.
//!
//! Each worker owns a private copy of the root position and its own random
//! source; only nodes are shared. Node locks serialize selection, expansion
//! and statistic updates per node.

use std::thread;

use chess_core::{Game, SearchError, TimeControl};
use tracing::{debug, warn};

use crate::SearchSummary;
use crate::config::UctConfig;
use crate::search::{self, RunStats, SearchTree, choose_root_move};

/// Runs `config.worker_count` workers on `tree` until the budget is spent.
/// Returns the counters of every worker that finished; a worker that
/// panicked is logged and left out.
pub fn run_workers<G: Game>(
    tree: &SearchTree<G::Move>,
    pos: &G,
    config: &UctConfig,
    time_control: &TimeControl,
) -> Vec<RunStats> {
    thread::scope(|scope| {
        let handles: Vec<_> = (0..config.worker_count)
            .map(|index| {
                let mut pos = pos.clone();
                let time_control = time_control.clone();
                scope.spawn(move || {
                    let mut rng = config.worker_rng(index);
                    search::run(tree, &mut pos, config, &time_control, &mut rng)
                })
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .filter_map(|(index, handle)| match handle.join() {
                Ok(stats) => Some(stats),
                Err(_) => {
                    warn!(worker = index, "shared-tree worker panicked");
                    None
                }
            })
            .collect()
    })
}

pub fn search<G: Game>(
    pos: &G,
    config: &UctConfig,
    time_control: &TimeControl,
) -> Result<SearchSummary<G::Move>, SearchError> {
    let tree = SearchTree::new(pos);
    let reports = run_workers(&tree, pos, config, time_control);
    if reports.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }

    let workers = reports.len();
    let stats = reports.into_iter().fold(RunStats::default(), RunStats::merge);
    let choice = choose_root_move(tree.root()).ok_or(SearchError::NoLegalMoves)?;
    debug!(
        workers,
        iterations = stats.iterations,
        inconclusive = stats.inconclusive,
        nodes = tree.node_count(),
        mean = choice.mean,
        "shared-tree search finished"
    );
    Ok(SearchSummary {
        choice,
        stats,
        nodes: tree.node_count(),
        workers,
    })
}

#[cfg(test)]
#[path = "shared_tree_tests.rs"]
mod shared_tree_tests;
