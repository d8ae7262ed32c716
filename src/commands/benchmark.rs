//! Benchmark command
//!
//! Plays many AI-driven games in parallel and aggregates outcome statistics.

use crate::core::Difficulty;
use crate::game::{GameController, GameState};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Benchmark parameters
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkConfig {
    pub games: usize,
    pub difficulty: Difficulty,
    /// Base seed; game `i` plays with `seed + i`. Random when absent.
    pub seed: Option<u64>,
}

/// Terminal classification of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Won,
    Lost,
    /// The engine ran out of confident moves before the game ended
    Stalled,
}

/// Record of a single benchmark game
#[derive(Debug, Clone, Copy)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub turns: usize,
    pub revealed: usize,
}

/// Result of a benchmark run
#[derive(Debug)]
pub struct BenchmarkResult {
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub stalls: usize,
    pub win_rate: f64,
    pub average_turns: f64,
    pub average_revealed: f64,
    pub duration: Duration,
    pub games_per_second: f64,
}

/// Play one seeded game to its end
///
/// Halts on the first turn that produces no confident move. The turn cap is
/// a safety net: every successful turn changes at least one cell state, so
/// the loop cannot legitimately run that long.
#[must_use]
pub fn play_single_game(difficulty: Difficulty, seed: u64) -> GameRecord {
    let mut controller = GameController::new();
    let mut rng = StdRng::seed_from_u64(seed);
    controller.start_game_with_rng(difficulty.rows, difficulty.cols, difficulty.mines, &mut rng);

    let turn_cap = difficulty.rows * difficulty.cols * 2;
    let mut turns = 0;

    while controller.state() == GameState::InProgress && turns < turn_cap {
        let Some(turn) = controller.run_ai_turn() else {
            break;
        };
        turns += 1;
        if !turn.success && controller.state() == GameState::InProgress {
            break;
        }
    }

    let outcome = match controller.state() {
        GameState::Won => GameOutcome::Won,
        GameState::Lost => GameOutcome::Lost,
        GameState::InProgress | GameState::NotStarted => GameOutcome::Stalled,
    };

    GameRecord {
        outcome,
        turns,
        revealed: controller.revealed_count(),
    }
}

/// Run `config.games` independent games in parallel
///
/// # Panics
///
/// Panics if the progress bar template is rejected, which cannot happen for
/// the fixed template used here.
#[must_use]
pub fn run_benchmark(config: &BenchmarkConfig) -> BenchmarkResult {
    let pb = ProgressBar::new(config.games as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );

    let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let start = Instant::now();

    let records: Vec<GameRecord> = (0..config.games)
        .into_par_iter()
        .map(|game| {
            let record = play_single_game(config.difficulty, base_seed.wrapping_add(game as u64));
            pb.inc(1);
            record
        })
        .collect();

    pb.finish_with_message("Complete!");

    let duration = start.elapsed();
    let total_games = records.len();
    let wins = records
        .iter()
        .filter(|r| r.outcome == GameOutcome::Won)
        .count();
    let losses = records
        .iter()
        .filter(|r| r.outcome == GameOutcome::Lost)
        .count();
    let stalls = total_games - wins - losses;

    let total_turns: usize = records.iter().map(|r| r.turns).sum();
    let total_revealed: usize = records.iter().map(|r| r.revealed).sum();
    let games = total_games.max(1) as f64;

    BenchmarkResult {
        total_games,
        wins,
        losses,
        stalls,
        win_rate: wins as f64 / games,
        average_turns: total_turns as f64 / games,
        average_revealed: total_revealed as f64 / games,
        duration,
        games_per_second: total_games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}
