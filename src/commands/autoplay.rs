//! Autoplay command
//!
//! Plays one game with the AI driving every turn, printing the board and the
//! reasoning behind each move as it goes.

use crate::core::Difficulty;
use crate::game::{GameController, GameState};
use crate::output::{
    print_board, print_game_summary, print_probability_map, print_statistics, print_turn,
};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Autoplay parameters
#[derive(Debug, Clone, Copy)]
pub struct PlayConfig {
    pub difficulty: Difficulty,
    /// Mine placement seed; random when absent
    pub seed: Option<u64>,
    /// Print the probability map after each turn
    pub show_probabilities: bool,
}

/// What a finished autoplay run looked like
#[derive(Debug, Clone, Copy)]
pub struct PlayReport {
    pub state: GameState,
    pub turns: usize,
    pub revealed: usize,
    pub flagged: usize,
}

/// Play one game to its end, narrating every turn
pub fn run_autoplay(config: &PlayConfig) -> PlayReport {
    let difficulty = config.difficulty;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());

    let mut controller = GameController::new();
    let mut rng = StdRng::seed_from_u64(seed);
    controller.start_game_with_rng(difficulty.rows, difficulty.cols, difficulty.mines, &mut rng);

    println!(
        "\nPlaying {} ({}×{}, {} mines), seed {seed}",
        difficulty.name.bright_yellow().bold(),
        difficulty.rows,
        difficulty.cols,
        difficulty.mines
    );

    let turn_cap = difficulty.rows * difficulty.cols * 2;
    let mut turns = 0;

    while controller.state() == GameState::InProgress && turns < turn_cap {
        let Some(turn) = controller.run_ai_turn() else {
            break;
        };
        turns += 1;
        print_turn(turns, &turn);

        if let Some(board) = controller.board() {
            print_board(board, false);
        }
        if config.show_probabilities && controller.state() == GameState::InProgress {
            print_probability_map(&controller.probability_map());
        }

        if !turn.success && controller.state() == GameState::InProgress {
            break;
        }
    }

    // Final view with surviving mines disclosed
    if let Some(board) = controller.board() {
        print_board(board, true);
    }
    print_game_summary(
        controller.state(),
        turns,
        controller.revealed_count(),
        controller.flagged_count(),
    );
    if let Some(stats) = controller.statistics() {
        print_statistics(&stats);
    }

    PlayReport {
        state: controller.state(),
        turns,
        revealed: controller.revealed_count(),
        flagged: controller.flagged_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoplay_terminates_and_reports() {
        let config = PlayConfig {
            difficulty: Difficulty::EASY,
            seed: Some(42),
            show_probabilities: false,
        };
        let report = run_autoplay(&config);

        assert!(report.turns >= 1);
        assert!(report.revealed <= 64);
        if report.state == GameState::Won {
            assert_eq!(report.revealed, 54);
        }
    }

    #[test]
    fn autoplay_matches_the_benchmark_player() {
        // Same seed, same difficulty: both drivers must see the same game.
        let config = PlayConfig {
            difficulty: Difficulty::EASY,
            seed: Some(7),
            show_probabilities: false,
        };
        let report = run_autoplay(&config);
        let record = super::super::benchmark::play_single_game(Difficulty::EASY, 7);

        assert_eq!(report.turns, record.turns);
        assert_eq!(report.revealed, record.revealed);
    }
}
