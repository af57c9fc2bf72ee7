//! Wall-clock budget shared by search workers.
//!
//! A [`TimeControl`] is started once per search and cloned into every
//! worker. Workers poll [`TimeControl::check_time`] between iterations; the
//! first one to see the deadline pass raises the shared stop flag so the
//! rest only pay an atomic load.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    started: Instant,
    /// None = run until stopped by hand
    budget: Option<Duration>,
}

impl TimeControl {
    /// Starts the clock now.
    pub fn start(budget: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            started: Instant::now(),
            budget,
        }
    }

    pub fn with_budget(budget: Duration) -> Self {
        Self::start(Some(budget))
    }

    /// Force every holder of this controller to stop.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Reads the clock and raises the stop flag once the budget is spent.
    /// Returns true when the search should stop.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(budget) = self.budget
            && self.started.elapsed() >= budget
        {
            self.stop();
            return true;
        }
        false
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left before the deadline (None if there is no budget).
    pub fn remaining(&self) -> Option<Duration> {
        self.budget
            .map(|budget| budget.saturating_sub(self.started.elapsed()))
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
