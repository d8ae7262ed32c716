//! Formatting utilities for terminal output

use crate::core::{Cell, CellState};
use colored::{ColoredString, Colorize};

/// Render a single cell as a colored glyph
///
/// `reveal_mines` is for post-game rendering: hidden mines show as `*`
/// instead of the undisclosed `·`.
#[must_use]
pub fn cell_glyph(cell: &Cell, reveal_mines: bool) -> ColoredString {
    match cell.state() {
        CellState::Hidden => {
            if reveal_mines && cell.has_mine() {
                "*".bright_red()
            } else {
                "·".bright_black()
            }
        }
        CellState::Flagged => "⚑".yellow().bold(),
        CellState::Detonated => "✸".bright_red().bold(),
        CellState::Revealed => digit_glyph(cell.adjacent_mines()),
    }
}

/// Classic per-digit coloring; zero renders as a blank
fn digit_glyph(adjacent: u8) -> ColoredString {
    let text = adjacent.to_string();
    match adjacent {
        0 => " ".normal(),
        1 => text.bright_blue(),
        2 => text.green(),
        3 => text.bright_red(),
        4 => text.blue(),
        5 => text.red(),
        6 => text.cyan(),
        7 => text.magenta(),
        _ => text.bright_black(),
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a mine probability in [0, 1] as a bar
#[must_use]
pub fn probability_bar(probability: f64, width: usize) -> String {
    create_progress_bar(probability, 1.0, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(glyph: &ColoredString) -> String {
        colored::control::set_override(false);
        let text = glyph.to_string();
        colored::control::unset_override();
        text
    }

    #[test]
    fn hidden_cell_glyphs() {
        let mut cell = Cell::new(0, 0);
        assert_eq!(plain(&cell_glyph(&cell, false)), "·");

        cell.set_mine(true);
        assert_eq!(plain(&cell_glyph(&cell, false)), "·");
        assert_eq!(plain(&cell_glyph(&cell, true)), "*");
    }

    #[test]
    fn revealed_cell_glyphs() {
        let mut cell = Cell::new(0, 0);
        cell.set_state(CellState::Revealed);
        assert_eq!(plain(&cell_glyph(&cell, false)), " ");

        cell.set_adjacent_mines(3);
        assert_eq!(plain(&cell_glyph(&cell, false)), "3");
    }

    #[test]
    fn flag_and_detonation_glyphs() {
        let mut cell = Cell::new(0, 0);
        cell.set_state(CellState::Flagged);
        assert_eq!(plain(&cell_glyph(&cell, false)), "⚑");

        cell.set_state(CellState::Detonated);
        assert_eq!(plain(&cell_glyph(&cell, false)), "✸");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn probability_bar_is_unit_scaled() {
        assert_eq!(probability_bar(0.5, 10), "█████░░░░░");
        assert_eq!(probability_bar(1.0, 4), "████");
    }
}
