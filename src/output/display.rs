//! Display functions for command results

use super::formatters::{cell_glyph, probability_bar};
use crate::commands::BenchmarkResult;
use crate::core::{Board, InferenceKind};
use crate::game::{GameState, TurnOutcome};
use crate::solver::EngineStatistics;
use colored::Colorize;
use rustc_hash::FxHashMap;

/// Print the board grid with row and column labels
///
/// `reveal_mines` shows surviving mines post-game; during play they stay
/// indistinguishable from other hidden cells.
pub fn print_board(board: &Board, reveal_mines: bool) {
    print!("\n    ");
    for col in 0..board.cols() {
        print!("{:>2}", col % 10);
    }
    println!();

    for row in 0..board.rows() {
        print!("{row:>3} ");
        for col in 0..board.cols() {
            if let Some(cell) = board.cell_at(row, col) {
                print!(" {}", cell_glyph(cell, reveal_mines));
            }
        }
        println!();
    }
    println!();
}

/// Print one AI turn: marker, inference kind, certainty, and what happened
pub fn print_turn(number: usize, outcome: &TurnOutcome) {
    let marker = if outcome.success {
        "●".green()
    } else {
        "○".red()
    };

    if let Some(info) = &outcome.info {
        println!(
            "{marker} Turn {number} [{}] {}",
            info.kind,
            format!("{:.0}% certain", info.certainty * 100.0).bright_black()
        );
        println!("  {}", outcome.message);
    } else {
        println!("{marker} Turn {number}: {}", outcome.message);
    }
}

/// Print the final verdict line of a game
pub fn print_game_summary(state: GameState, turns: usize, revealed: usize, flagged: usize) {
    println!("\n{}", "─".repeat(60).cyan());
    let verdict = match state {
        GameState::Won => "✅ Game won".green().bold(),
        GameState::Lost => "❌ Game lost".red().bold(),
        GameState::InProgress => "⏸  Halted: no confident move left".yellow().bold(),
        GameState::NotStarted => "Game never started".yellow(),
    };
    println!("{verdict} after {turns} turns ({revealed} revealed, {flagged} flagged)");
}

/// Print engine statistics for a finished game
pub fn print_statistics(stats: &EngineStatistics) {
    println!("\n📊 {}", "Inference statistics:".bright_cyan().bold());
    println!("   Engine moves:      {}", stats.moves_total);
    println!(
        "   Average certainty: {}",
        format!("{:.1}%", stats.average_certainty * 100.0).bright_yellow()
    );

    let kinds = [
        InferenceKind::DeterministicLogic,
        InferenceKind::RecognizedPattern,
        InferenceKind::BayesianNetwork,
        InferenceKind::Heuristic,
    ];
    for kind in kinds {
        if let Some(count) = stats.kind_counts.get(&kind) {
            println!("   {:<20} {count}", kind.to_string());
        }
    }

    println!("\n   Rule success rates:");
    for (name, rate) in &stats.rule_success_rates {
        println!("     {name:<16} {:5.1}%", rate * 100.0);
    }
}

/// Print the safest hidden cells from a probability map
pub fn print_probability_map(map: &FxHashMap<String, f64>) {
    if map.is_empty() {
        return;
    }

    let mut entries: Vec<(&String, f64)> = map.iter().map(|(coord, &p)| (coord, p)).collect();
    entries.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    println!("\n   Safest cells:");
    for (coord, probability) in entries.iter().take(8) {
        let bar = probability_bar(*probability, 20);
        println!(
            "     {coord:>7}  [{}] {:5.1}%",
            bar.green(),
            probability * 100.0
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.total_games);
    println!(
        "   Win rate:         {}",
        format!("{:.1}%", result.win_rate * 100.0)
            .bright_yellow()
            .bold()
    );
    println!("   Average turns:    {:.2}", result.average_turns);
    println!("   Average revealed: {:.1}", result.average_revealed);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    println!("\n📈 {}", "Outcomes:".bright_cyan().bold());
    let outcomes = [
        ("Won", result.wins),
        ("Lost", result.losses),
        ("Stalled", result.stalls),
    ];
    for (label, count) in outcomes {
        let pct = if result.total_games > 0 {
            (count as f64 / result.total_games as f64) * 100.0
        } else {
            0.0
        };
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░".repeat(40_usize.saturating_sub(bar_width)).bright_black()
        );
        println!("   {label:<8} {bar} {count:4} ({pct:5.1}%)");
    }
}
