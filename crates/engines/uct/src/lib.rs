//! UCT Chess Engine
//!
//! Monte Carlo tree search with UCB1 selection. Playouts are full descents
//! through the tree until the game ends; there is no random rollout policy
//! below the tree and no static evaluation. Two ways to use several threads
//! are provided:
//! - [`split_root`]: independent trees over disjoint slices of root moves
//! - [`shared_tree`]: one tree, fine-grained per-node locking

mod config;
pub mod node;
pub mod search;
pub mod shared_tree;
pub mod split_root;

use chess_core::{Agent, Color, Game, Move, Position, SearchError, TimeControl, ensure_to_move};
use tracing::debug;

pub use config::{ParallelStrategy, UctConfig};
pub use search::{Playout, RootChoice, RunStats, SearchTree};

/// Outcome of a complete UCT search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSummary<M> {
    pub choice: RootChoice<M>,
    /// Summed over all workers that reported.
    pub stats: RunStats,
    pub nodes: u64,
    /// Workers that contributed a result.
    pub workers: usize,
}

/// Runs the configured strategy from `pos` for `config`'s budget.
pub fn search<G: Game>(pos: &G, config: &UctConfig) -> Result<SearchSummary<G::Move>, SearchError> {
    config.validate()?;
    let time_control = TimeControl::with_budget(config.time_budget());
    match config.parallel_strategy {
        ParallelStrategy::SplitRoot => split_root::search(pos, config, &time_control),
        ParallelStrategy::SharedTree => shared_tree::search(pos, config, &time_control),
    }
}

/// Time-bounded Monte Carlo tree search agent.
#[derive(Debug, Clone)]
pub struct UctAgent {
    config: UctConfig,
    name: String,
    last: Option<SearchSummary<Move>>,
}

impl UctAgent {
    pub fn new(config: UctConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let name = format!(
            "UCT ({}s, {} tries, {} x {})",
            config.time_budget_seconds, config.min_tries_per_node, config.worker_count, config.parallel_strategy
        );
        Ok(Self {
            config,
            name,
            last: None,
        })
    }

    pub fn config(&self) -> &UctConfig {
        &self.config
    }

    /// Summary of the most recent search.
    pub fn last_search(&self) -> Option<&SearchSummary<Move>> {
        self.last.as_ref()
    }
}

impl Agent for UctAgent {
    fn make_move(&mut self, pos: &Position, color: Color) -> Result<Move, SearchError> {
        ensure_to_move(pos, color)?;
        if pos.is_game_over() {
            return Err(SearchError::NoLegalMoves);
        }

        let summary = search(pos, &self.config)?;
        debug!(
            mv = %summary.choice.mv,
            mean = summary.choice.mean,
            visits = summary.choice.visits,
            iterations = summary.stats.iterations,
            nodes = summary.nodes,
            "uct move chosen"
        );
        self.last = Some(summary);
        Ok(summary.choice.mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod test_games;
