//! Minesweeper AI - CLI
//!
//! Watches an inference engine play minesweeper: deterministic rules first,
//! then pattern recognition, then probabilistic estimation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use minesweeper_ai::{
    commands::{BenchmarkConfig, PlayConfig, run_autoplay, run_benchmark},
    core::Difficulty,
    output::print_benchmark_result,
};

#[derive(Parser)]
#[command(
    name = "minesweeper_ai",
    about = "Minesweeper AI combining logical rules, pattern recognition, and probability",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Difficulty: easy (8×8/10), medium (16×16/40), hard (16×30/99)
    #[arg(short, long, global = true, default_value = "easy")]
    difficulty: String,

    /// Seed for mine placement (random if omitted)
    #[arg(short, long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the AI play a single game (default)
    Play {
        /// Show the probability map after each turn
        #[arg(short, long)]
        probabilities: bool,
    },

    /// Benchmark the AI over many games
    Benchmark {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,
    },
}

/// Strict preset lookup for the CLI flag
///
/// The library's [`Difficulty::from_name`] silently falls back to easy; an
/// explicit flag deserves an explicit error instead.
fn parse_difficulty(name: &str) -> Result<Difficulty> {
    match name {
        "easy" | "medium" | "hard" => Ok(Difficulty::from_name(name)),
        other => anyhow::bail!("Unknown difficulty '{other}' (expected easy, medium, or hard)"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let difficulty = parse_difficulty(&cli.difficulty)?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play {
        probabilities: false,
    });

    match command {
        Commands::Play { probabilities } => {
            run_autoplay(&PlayConfig {
                difficulty,
                seed: cli.seed,
                show_probabilities: probabilities,
            });
        }
        Commands::Benchmark { count } => {
            let result = run_benchmark(&BenchmarkConfig {
                games: count,
                difficulty,
                seed: cli.seed,
            });
            print_benchmark_result(&result);
        }
    }

    Ok(())
}
