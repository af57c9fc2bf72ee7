//! Match files.
//!
//! ```toml
//! games = 3
//! max_plies = 300
//! log = "rungame"
//!
//! [white]
//! kind = "minimax"
//! depth = 2
//!
//! [black]
//! kind = "uct"
//! time_budget_seconds = 10.0
//! min_tries_per_node = 10
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_core::{Agent, SearchError};
use minimax_engine::{MinimaxAgent, MinimaxConfig};
use random_engine::{RandomAgent, RandomConfig};
use serde::{Deserialize, Serialize};
use uct_engine::{UctAgent, UctConfig};

/// Which agent plays a side, with its settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AgentSpec {
    Minimax(MinimaxConfig),
    Uct(UctConfig),
    Random(RandomConfig),
}

impl AgentSpec {
    pub fn build(&self) -> Result<Box<dyn Agent>, SearchError> {
        Ok(match self {
            AgentSpec::Minimax(config) => Box::new(MinimaxAgent::new(config.clone())?),
            AgentSpec::Uct(config) => Box::new(UctAgent::new(config.clone())?),
            AgentSpec::Random(config) => Box::new(RandomAgent::new(config.clone())),
        })
    }
}

fn default_games() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchConfig {
    #[serde(default = "default_games")]
    pub games: u32,
    /// Games still running after this many plies are reported unfinished.
    #[serde(default)]
    pub max_plies: Option<u32>,
    /// Game `n` is appended to `<log>_<n>.txt`.
    #[serde(default)]
    pub log: Option<PathBuf>,
    pub white: AgentSpec,
    pub black: AgentSpec,
}

impl MatchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Command-line values take precedence over the file.
    pub fn override_with(&mut self, games: Option<u32>, log: Option<PathBuf>, max_plies: Option<u32>) {
        if let Some(games) = games {
            self.games = games;
        }
        if log.is_some() {
            self.log = log;
        }
        if max_plies.is_some() {
            self.max_plies = max_plies;
        }
    }

    /// Log file of game `number` (1-based), if logging is on.
    pub fn log_path(&self, number: u32) -> Option<PathBuf> {
        self.log.as_ref().map(|prefix| {
            let mut name = prefix.clone().into_os_string();
            name.push(format!("_{number}.txt"));
            PathBuf::from(name)
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
