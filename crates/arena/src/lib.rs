//! Arena for ML-chess agents
//!
//! Plays agent-vs-agent games from a TOML match file, printing every
//! position as it goes and optionally logging each game to its own file.
//!
//! ```bash
//! cargo run -p arena -- play --config crates/arena/match.toml --games 3 --log rungame
//! ```

mod config;
mod match_runner;

pub use config::*;
pub use match_runner::*;
