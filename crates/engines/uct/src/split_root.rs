//! Split-root parallelism: disjoint trees over slices of the root moves.
//!
//! The root moves are cut into at most `worker_count` contiguous slices of
//! equal size (the last may be shorter). Each worker searches a private tree
//! whose root only offers its slice and reports its best move with that
//! move's average reward. The coordinator keeps the best report.

use std::thread;

use chess_core::{Game, SearchError, TimeControl};
use tracing::{debug, trace, warn};

use crate::SearchSummary;
use crate::config::UctConfig;
use crate::search::{self, RootChoice, RunStats, SearchTree, choose_root_move};

/// Contiguous slices of `moves`, `ceil(len / workers)` long.
/// Fewer than `workers` slices come back when there are not enough moves.
pub fn partition<M>(moves: &[M], workers: usize) -> Vec<&[M]> {
    if moves.is_empty() {
        return Vec::new();
    }
    let size = moves.len().div_ceil(workers.max(1));
    moves.chunks(size).collect()
}

/// What one split-root worker found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkerReport<M> {
    pub choice: RootChoice<M>,
    pub stats: RunStats,
    pub nodes: u64,
}

fn run_slice<G: Game>(
    pos: &G,
    moves: &[G::Move],
    index: usize,
    config: &UctConfig,
    time_control: &TimeControl,
) -> Option<WorkerReport<G::Move>> {
    let tree = SearchTree::with_root_moves(moves.to_vec(), pos.side_to_move());
    let mut pos = pos.clone();
    let mut rng = config.worker_rng(index);
    let stats = search::run(&tree, &mut pos, config, time_control, &mut rng);
    let choice = choose_root_move(tree.root())?;
    Some(WorkerReport {
        choice,
        stats,
        nodes: tree.node_count(),
    })
}

/// Runs one worker per slice and returns the reports of the workers that
/// finished, in slice order.
pub fn run_workers<G: Game>(pos: &G, config: &UctConfig, time_control: &TimeControl) -> Vec<WorkerReport<G::Move>> {
    let moves = pos.legal_moves();
    let slices = partition(&moves, config.worker_count);
    debug!(slices = slices.len(), moves = moves.len(), "split-root partition");

    thread::scope(|scope| {
        let handles: Vec<_> = slices
            .iter()
            .enumerate()
            .map(|(index, &slice)| {
                let time_control = time_control.clone();
                scope.spawn(move || run_slice(pos, slice, index, config, &time_control))
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .filter_map(|(index, handle)| match handle.join() {
                Ok(report) => report,
                Err(_) => {
                    warn!(worker = index, "split-root worker panicked; ignoring its slice");
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
    let reports = run_workers(pos, config, time_control);

    let mut best: Option<RootChoice<G::Move>> = None;
    for (index, report) in reports.iter().enumerate() {
        trace!(worker = index, mv = ?report.choice.mv, mean = report.choice.mean, "worker report");
        if best.is_none_or(|b| report.choice.mean > b.mean) {
            best = Some(report.choice);
        }
    }
    let choice = best.ok_or(SearchError::NoLegalMoves)?;

    let stats = reports.iter().map(|r| r.stats).fold(RunStats::default(), RunStats::merge);
    let nodes = reports.iter().map(|r| r.nodes).sum();
    debug!(
        workers = reports.len(),
        iterations = stats.iterations,
        inconclusive = stats.inconclusive,
        nodes,
        mean = choice.mean,
        "split-root search finished"
    );
    Ok(SearchSummary {
        choice,
        stats,
        nodes,
        workers: reports.len(),
    })
}

#[cfg(test)]
#[path = "split_root_tests.rs"]
mod split_root_tests;
