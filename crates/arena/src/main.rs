//! Arena CLI
//!
//! Plays games between the configured agents and prints a result summary.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use arena::{MatchConfig, MatchRunner};
use clap::{Parser, Subcommand};

/// Agent-vs-agent chess games on the console
#[derive(Parser)]
#[command(name = "arena")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Default log filter when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match described by a TOML file
    Play {
        #[arg(long)]
        config: PathBuf,
        /// Number of games (overrides the file)
        #[arg(long)]
        games: Option<u32>,
        /// Prefix for per-game log files: <LOG>_<n>.txt
        #[arg(long)]
        log: Option<PathBuf>,
        /// Stop a game after this many plies and count it unfinished
        #[arg(long)]
        max_plies: Option<u32>,
    },
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play {
            config,
            games,
            log,
            max_plies,
        } => {
            let mut match_config = MatchConfig::load(&config)?;
            match_config.override_with(games, log, max_plies);

            let runner = MatchRunner::new(match_config);
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let summary = runner.run(&mut out)?;

            writeln!(out)?;
            writeln!(out, "=== Final Result ===")?;
            writeln!(
                out,
                "White wins: {}, Black wins: {}, Draws: {}, Unfinished: {}",
                summary.white_wins, summary.black_wins, summary.draws, summary.unfinished
            )?;
        }
    }
    Ok(())
}
