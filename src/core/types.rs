//! Shared inference and configuration types

use std::fmt;

/// A board coordinate (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    /// Formats as `"row-col"`, the key format of the probability map.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Action recommended by an inference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Reveal the target cells (believed safe)
    Reveal,
    /// Flag the target cells as mines
    Flag,
}

/// How an inference was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InferenceKind {
    /// Logically certain deduction from a single constraint or constraint pair
    DeterministicLogic,
    /// Known board pattern (e.g. 1-2-1)
    RecognizedPattern,
    /// Probabilistic estimate over mine configurations
    BayesianNetwork,
    /// Rule of thumb (opening move, corner preference)
    Heuristic,
}

impl fmt::Display for InferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DeterministicLogic => "deterministic logic",
            Self::RecognizedPattern => "recognized pattern",
            Self::BayesianNetwork => "bayesian network",
            Self::Heuristic => "heuristic",
        };
        write!(f, "{name}")
    }
}

/// Result of one inference attempt
///
/// A failed attempt carries no action and no targets; the orchestrator
/// silently moves on to the next rule or phase.
#[derive(Debug, Clone)]
pub struct InferenceResult {
    pub success: bool,
    pub action: Option<Action>,
    /// Target coordinates, applied in order
    pub targets: Vec<Coord>,
    /// Human-readable explanation of the deduction
    pub rationale: String,
    /// Confidence in [0, 1]; 1.0 for deterministic deductions
    pub certainty: f64,
    pub kind: InferenceKind,
}

impl InferenceResult {
    /// A successful inference recommending `action` on `targets`
    #[must_use]
    pub fn new(
        action: Action,
        targets: Vec<Coord>,
        rationale: impl Into<String>,
        certainty: f64,
        kind: InferenceKind,
    ) -> Self {
        Self {
            success: true,
            action: Some(action),
            targets,
            rationale: rationale.into(),
            certainty,
            kind,
        }
    }

    /// A failed inference of the given kind (no action, no targets)
    #[must_use]
    pub fn failed(kind: InferenceKind) -> Self {
        Self {
            success: false,
            action: None,
            targets: Vec::new(),
            rationale: String::new(),
            certainty: 0.0,
            kind,
        }
    }
}

/// A named board configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty {
    pub name: &'static str,
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl Difficulty {
    /// 8×8 board with 10 mines
    pub const EASY: Self = Self {
        name: "easy",
        rows: 8,
        cols: 8,
        mines: 10,
    };

    /// 16×16 board with 40 mines
    pub const MEDIUM: Self = Self {
        name: "medium",
        rows: 16,
        cols: 16,
        mines: 40,
    };

    /// 16×30 board with 99 mines
    pub const HARD: Self = Self {
        name: "hard",
        rows: 16,
        cols: 30,
        mines: 99,
    };

    /// Look up a preset by name
    ///
    /// Supported names: "easy", "medium", "hard". Defaults to easy if the
    /// name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "medium" => Self::MEDIUM,
            "hard" => Self::HARD,
            _ => Self::EASY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_display_is_row_dash_col() {
        assert_eq!(Coord::new(3, 12).to_string(), "3-12");
        assert_eq!(Coord::new(0, 0).to_string(), "0-0");
    }

    #[test]
    fn failed_result_has_no_action_or_targets() {
        let result = InferenceResult::failed(InferenceKind::DeterministicLogic);
        assert!(!result.success);
        assert!(result.action.is_none());
        assert!(result.targets.is_empty());
        assert!(result.certainty.abs() < f64::EPSILON);
    }

    #[test]
    fn successful_result_carries_targets_in_order() {
        let targets = vec![Coord::new(0, 1), Coord::new(2, 3)];
        let result = InferenceResult::new(
            Action::Flag,
            targets.clone(),
            "test",
            0.95,
            InferenceKind::RecognizedPattern,
        );
        assert!(result.success);
        assert_eq!(result.action, Some(Action::Flag));
        assert_eq!(result.targets, targets);
    }

    #[test]
    fn difficulty_presets_match_standard_boards() {
        assert_eq!(Difficulty::EASY.rows, 8);
        assert_eq!(Difficulty::EASY.cols, 8);
        assert_eq!(Difficulty::EASY.mines, 10);
        assert_eq!(Difficulty::MEDIUM.mines, 40);
        assert_eq!(Difficulty::HARD.cols, 30);
        assert_eq!(Difficulty::HARD.mines, 99);
    }

    #[test]
    fn difficulty_from_name() {
        assert_eq!(Difficulty::from_name("hard"), Difficulty::HARD);
        assert_eq!(Difficulty::from_name("medium"), Difficulty::MEDIUM);
        assert_eq!(Difficulty::from_name("easy"), Difficulty::EASY);
        assert_eq!(Difficulty::from_name("unknown"), Difficulty::EASY);
    }
}
