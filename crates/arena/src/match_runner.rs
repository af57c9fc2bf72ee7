//! Match runner for playing games between agents

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chess_core::{Agent, Color, Outcome, Position};
use tracing::{debug, info};

use crate::config::MatchConfig;

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Finished(Outcome),
    /// Stopped at the ply limit.
    Unfinished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub result: GameResult,
    pub plies: u32,
    pub final_position: Position,
}

/// Tally over a whole match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
    pub unfinished: u32,
}

impl MatchSummary {
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Finished(Outcome::WhiteWin) => self.white_wins += 1,
            GameResult::Finished(Outcome::BlackWin) => self.black_wins += 1,
            GameResult::Finished(Outcome::Draw) => self.draws += 1,
            GameResult::Unfinished => self.unfinished += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.white_wins + self.black_wins + self.draws + self.unfinished
    }
}

/// Plays one game from the start position. After every ply the board and
/// ply count go to `out` and, when given, to `log`.
pub fn play_game(
    white: &mut dyn Agent,
    black: &mut dyn Agent,
    max_plies: Option<u32>,
    out: &mut dyn Write,
    mut log: Option<&mut dyn Write>,
) -> Result<GameRecord> {
    let mut pos = Position::startpos();
    let mut plies = 0;

    let result = loop {
        if let Some(outcome) = pos.outcome() {
            break GameResult::Finished(outcome);
        }
        if max_plies.is_some_and(|limit| plies >= limit) {
            break GameResult::Unfinished;
        }

        let mover = pos.side_to_move;
        let agent: &mut dyn Agent = match mover {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        let mv = agent
            .make_move(&pos, mover)
            .with_context(|| format!("{} ({mover}) failed to move at ply {}", agent.name(), plies + 1))?;
        debug!(ply = plies + 1, %mover, mv = %mv, agent = agent.name(), "move played");
        pos.push(mv);
        plies += 1;

        let frame = format!("{pos}Number of plies: {plies}\n\n");
        out.write_all(frame.as_bytes())?;
        if let Some(log) = log.as_deref_mut() {
            log.write_all(frame.as_bytes())?;
        }
    };

    if let GameResult::Finished(_) = result {
        writeln!(out, "GAME OVER")?;
    }
    Ok(GameRecord {
        result,
        plies,
        final_position: pos,
    })
}

/// Runs every game of a match
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Plays `config.games` games with fresh agents each game.
    pub fn run(&self, out: &mut dyn Write) -> Result<MatchSummary> {
        let mut summary = MatchSummary::default();
        for number in 1..=self.config.games {
            let mut white = self.config.white.build().context("building white agent")?;
            let mut black = self.config.black.build().context("building black agent")?;
            info!(game = number, white = white.name(), black = black.name(), "starting game");

            let record = match self.config.log_path(number) {
                Some(path) => {
                    let mut file = open_log(&path)?;
                    play_game(white.as_mut(), black.as_mut(), self.config.max_plies, out, Some(&mut file as &mut dyn Write))?
                }
                None => play_game(white.as_mut(), black.as_mut(), self.config.max_plies, out, None)?,
            };

            summary.record(record.result);
            let result = match record.result {
                GameResult::Finished(outcome) => outcome.to_string(),
                GameResult::Unfinished => "*".to_string(),
            };
            info!(game = number, %result, plies = record.plies, "game finished");
            writeln!(
                out,
                "Game {number}/{}: {result} after {} plies",
                self.config.games, record.plies
            )?;
        }
        Ok(summary)
    }
}

fn open_log(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening game log {}", path.display()))
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
