//! UCT agent configuration.

use std::fmt;
use std::time::Duration;

use chess_core::SearchError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// How the search budget is spread over several threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParallelStrategy {
    /// Root moves are split into contiguous slices; every worker grows its
    /// own tree over one slice.
    SplitRoot,
    /// All workers grow one tree, synchronizing on per-node locks.
    #[default]
    SharedTree,
}

impl fmt::Display for ParallelStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParallelStrategy::SplitRoot => f.write_str("split-root"),
            ParallelStrategy::SharedTree => f.write_str("shared-tree"),
        }
    }
}

/// Settings for [`crate::UctAgent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UctConfig {
    /// Wall-clock budget per move. Workers finish the pass they are in, so
    /// a search may overrun by one pass.
    pub time_budget_seconds: f64,

    /// Every child of a node is visited at least this often before UCB1
    /// takes over.
    pub min_tries_per_node: u32,

    /// Playouts reaching a node this deep are abandoned as inconclusive.
    pub max_ply: u32,

    /// `c` in `mean + c * sqrt(ln(N) / n)`.
    pub exploration_constant: f64,

    pub worker_count: usize,
    pub parallel_strategy: ParallelStrategy,

    /// Fixed seed for reproducible searches. Worker `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Optional cap on iterations per worker, checked alongside the clock.
    pub max_iterations: Option<u64>,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            time_budget_seconds: 10.0,
            min_tries_per_node: 10,
            max_ply: 150,
            exploration_constant: std::f64::consts::SQRT_2,
            worker_count: 1,
            parallel_strategy: ParallelStrategy::SharedTree,
            seed: None,
            max_iterations: None,
        }
    }
}

impl UctConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            time_budget_seconds: 0.2,
            min_tries_per_node: 2,
            seed: Some(0),
            ..Self::default()
        }
    }

    /// Builder pattern: set time budget.
    pub fn with_time_budget(mut self, seconds: f64) -> Self {
        self.time_budget_seconds = seconds;
        self
    }

    /// Builder pattern: set worker count and how they share the work.
    pub fn with_workers(mut self, worker_count: usize, strategy: ParallelStrategy) -> Self {
        self.worker_count = worker_count;
        self.parallel_strategy = strategy;
        self
    }

    /// Builder pattern: set seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder pattern: set iteration cap.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.time_budget_seconds.is_finite() || self.time_budget_seconds <= 0.0 {
            return Err(SearchError::invalid(format!(
                "time budget must be a positive number of seconds, got {}",
                self.time_budget_seconds
            )));
        }
        if let Err(e) = Duration::try_from_secs_f64(self.time_budget_seconds) {
            return Err(SearchError::invalid(format!(
                "time budget of {} seconds is out of range: {e}",
                self.time_budget_seconds
            )));
        }
        if self.max_ply == 0 {
            return Err(SearchError::invalid("max_ply must be at least 1"));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::invalid(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if self.worker_count == 0 {
            return Err(SearchError::invalid("worker_count must be at least 1"));
        }
        if self.max_iterations == Some(0) {
            return Err(SearchError::invalid("max_iterations must be at least 1 when set"));
        }
        Ok(())
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_secs_f64(self.time_budget_seconds)
    }

    /// Random source for worker `index`.
    pub fn worker_rng(&self, index: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_entropy(),
        }
    }
}
