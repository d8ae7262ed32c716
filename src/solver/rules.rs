//! Deterministic and pattern inference rules
//!
//! Each rule inspects one revealed cell's neighborhood and either produces a
//! certain (or near-certain) action or fails silently. Rules never mutate the
//! board; the game controller applies whatever they return.

use crate::core::{Action, Board, Cell, CellState, Coord, InferenceKind, InferenceResult};
use rustc_hash::FxHashSet;

/// A single inference rule over one revealed cell's neighborhood
///
/// `apply` is only called after `is_applicable` returns true, but must
/// re-validate and return a failed result if the precondition no longer
/// holds.
pub trait Rule {
    fn name(&self) -> &'static str;

    /// Lower priority runs earlier within a phase
    fn priority(&self) -> u8;

    fn kind(&self) -> InferenceKind;

    /// Cheap precondition check
    fn is_applicable(&self, index: usize, board: &Board) -> bool;

    /// Attempt the deduction; failure is an empty unsuccessful result
    fn apply(&self, index: usize, board: &Board) -> InferenceResult;
}

/// Enum wrapper for all rule types
///
/// The rule set is closed; the enum keeps dispatch static while letting the
/// orchestrator hold rules in one ordered list.
#[derive(Debug, Clone, Copy)]
pub enum RuleType {
    CompleteMines(CompleteMinesRule),
    Saturation(SaturationRule),
    Subset(SubsetRule),
    Pattern121(Pattern121Rule),
}

impl Rule for RuleType {
    fn name(&self) -> &'static str {
        match self {
            Self::CompleteMines(r) => r.name(),
            Self::Saturation(r) => r.name(),
            Self::Subset(r) => r.name(),
            Self::Pattern121(r) => r.name(),
        }
    }

    fn priority(&self) -> u8 {
        match self {
            Self::CompleteMines(r) => r.priority(),
            Self::Saturation(r) => r.priority(),
            Self::Subset(r) => r.priority(),
            Self::Pattern121(r) => r.priority(),
        }
    }

    fn kind(&self) -> InferenceKind {
        match self {
            Self::CompleteMines(r) => r.kind(),
            Self::Saturation(r) => r.kind(),
            Self::Subset(r) => r.kind(),
            Self::Pattern121(r) => r.kind(),
        }
    }

    fn is_applicable(&self, index: usize, board: &Board) -> bool {
        match self {
            Self::CompleteMines(r) => r.is_applicable(index, board),
            Self::Saturation(r) => r.is_applicable(index, board),
            Self::Subset(r) => r.is_applicable(index, board),
            Self::Pattern121(r) => r.is_applicable(index, board),
        }
    }

    fn apply(&self, index: usize, board: &Board) -> InferenceResult {
        match self {
            Self::CompleteMines(r) => r.apply(index, board),
            Self::Saturation(r) => r.apply(index, board),
            Self::Subset(r) => r.apply(index, board),
            Self::Pattern121(r) => r.apply(index, board),
        }
    }
}

/// Attempt/success counters for one rule, observability only
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleStats {
    pub attempts: usize,
    pub successes: usize,
}

impl RuleStats {
    /// Successes over attempts, 0 if the rule never ran
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.successes as f64 / self.attempts as f64
        }
    }
}

/// The fixed, priority-ordered rule list with per-rule counters
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<(RuleType, RuleStats)>,
}

impl RuleSet {
    /// All four rules, sorted ascending by priority
    #[must_use]
    pub fn new() -> Self {
        let mut rules = vec![
            RuleType::CompleteMines(CompleteMinesRule),
            RuleType::Saturation(SaturationRule),
            RuleType::Subset(SubsetRule),
            RuleType::Pattern121(Pattern121Rule),
        ];
        rules.sort_by_key(Rule::priority);

        Self {
            rules: rules.into_iter().map(|r| (r, RuleStats::default())).collect(),
        }
    }

    /// Rules in priority order
    pub fn rules(&self) -> impl Iterator<Item = &RuleType> {
        self.rules.iter().map(|(rule, _)| rule)
    }

    /// Apply the rule at `rule_index` to the cell at `cell_index`,
    /// recording the attempt in its counters
    pub fn apply(&mut self, rule_index: usize, cell_index: usize, board: &Board) -> InferenceResult {
        let result = self.rules[rule_index].0.apply(cell_index, board);
        let stats = &mut self.rules[rule_index].1;
        stats.attempts += 1;
        if result.success {
            stats.successes += 1;
        }
        result
    }

    /// (name, success rate) for every rule
    #[must_use]
    pub fn success_rates(&self) -> Vec<(&'static str, f64)> {
        self.rules
            .iter()
            .map(|(rule, stats)| (rule.name(), stats.success_rate()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn rule(&self, rule_index: usize) -> &RuleType {
        &self.rules[rule_index].0
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

fn informative(cell: &Cell) -> bool {
    cell.is_revealed() && cell.adjacent_mines() > 0
}

/// All mines accounted for: a revealed cell whose flagged neighbors already
/// match its adjacent count makes every remaining Hidden neighbor safe
#[derive(Debug, Clone, Copy)]
pub struct CompleteMinesRule;

impl Rule for CompleteMinesRule {
    fn name(&self) -> &'static str {
        "complete-mines"
    }

    fn priority(&self) -> u8 {
        1
    }

    fn kind(&self) -> InferenceKind {
        InferenceKind::DeterministicLogic
    }

    fn is_applicable(&self, index: usize, board: &Board) -> bool {
        informative(board.cell(index))
    }

    fn apply(&self, index: usize, board: &Board) -> InferenceResult {
        if !self.is_applicable(index, board) {
            return InferenceResult::failed(self.kind());
        }

        let hidden = board.neighbors_in_state(index, CellState::Hidden);
        let flagged = board.count_neighbors_in_state(index, CellState::Flagged);
        let adjacent = usize::from(board.cell(index).adjacent_mines());

        if flagged == adjacent && !hidden.is_empty() {
            let targets: Vec<Coord> = hidden.iter().map(|&n| board.cell(n).coord()).collect();
            let rationale = format!(
                "All {adjacent} mines flagged; {} neighboring cells are safe",
                targets.len()
            );
            return InferenceResult::new(Action::Reveal, targets, rationale, 1.0, self.kind());
        }

        InferenceResult::failed(self.kind())
    }
}

/// Saturation: as many Hidden neighbors as unflagged mines, so every Hidden
/// neighbor is a mine
#[derive(Debug, Clone, Copy)]
pub struct SaturationRule;

impl Rule for SaturationRule {
    fn name(&self) -> &'static str {
        "saturation"
    }

    fn priority(&self) -> u8 {
        1
    }

    fn kind(&self) -> InferenceKind {
        InferenceKind::DeterministicLogic
    }

    fn is_applicable(&self, index: usize, board: &Board) -> bool {
        informative(board.cell(index))
    }

    fn apply(&self, index: usize, board: &Board) -> InferenceResult {
        if !self.is_applicable(index, board) {
            return InferenceResult::failed(self.kind());
        }

        let hidden = board.neighbors_in_state(index, CellState::Hidden);
        let remaining = board.remaining_mines(index);

        if !hidden.is_empty() && remaining == hidden.len() as i32 {
            let targets: Vec<Coord> = hidden.iter().map(|&n| board.cell(n).coord()).collect();
            let rationale = format!(
                "Saturated: {remaining} mines across {} hidden cells",
                targets.len()
            );
            return InferenceResult::new(Action::Flag, targets, rationale, 1.0, self.kind());
        }

        InferenceResult::failed(self.kind())
    }
}

/// Subset analysis between a revealed cell and its revealed neighbors
///
/// When one cell's hidden-neighbor set strictly contains the other's, the
/// set difference inherits the difference in remaining mines: all mines
/// (flag) or none (reveal). Only directly-adjacent revealed cells are
/// compared; constraint chains are out of this rule's window.
#[derive(Debug, Clone, Copy)]
pub struct SubsetRule;

impl Rule for SubsetRule {
    fn name(&self) -> &'static str {
        "subset"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn kind(&self) -> InferenceKind {
        InferenceKind::DeterministicLogic
    }

    fn is_applicable(&self, index: usize, board: &Board) -> bool {
        informative(board.cell(index))
    }

    fn apply(&self, index: usize, board: &Board) -> InferenceResult {
        if !self.is_applicable(index, board) {
            return InferenceResult::failed(self.kind());
        }

        let hidden_here: FxHashSet<usize> = board
            .neighbors_in_state(index, CellState::Hidden)
            .into_iter()
            .collect();
        if hidden_here.is_empty() {
            return InferenceResult::failed(self.kind());
        }
        let mines_here = board.remaining_mines(index);

        for &neighbor in board.neighbors(index) {
            if !informative(board.cell(neighbor)) {
                continue;
            }

            let hidden_there: FxHashSet<usize> = board
                .neighbors_in_state(neighbor, CellState::Hidden)
                .into_iter()
                .collect();
            if hidden_there.is_empty() || hidden_here.len() == hidden_there.len() {
                continue;
            }
            let mines_there = board.remaining_mines(neighbor);

            // Orient so `small` is strictly contained in `large`
            let (small, large, diff_mines) = if hidden_here.is_subset(&hidden_there) {
                (&hidden_here, &hidden_there, mines_there - mines_here)
            } else if hidden_there.is_subset(&hidden_here) {
                (&hidden_there, &hidden_here, mines_here - mines_there)
            } else {
                continue;
            };

            let mut diff: Vec<usize> = large.difference(small).copied().collect();
            diff.sort_unstable();

            if diff_mines == diff.len() as i32 && diff_mines > 0 {
                let targets: Vec<Coord> = diff.iter().map(|&n| board.cell(n).coord()).collect();
                let rationale =
                    format!("Subset analysis: {diff_mines} mines in the set difference");
                return InferenceResult::new(Action::Flag, targets, rationale, 1.0, self.kind());
            }

            if diff_mines == 0 && !diff.is_empty() {
                let targets: Vec<Coord> = diff.iter().map(|&n| board.cell(n).coord()).collect();
                let rationale = format!("Subset analysis: {} safe cells", targets.len());
                return InferenceResult::new(Action::Reveal, targets, rationale, 1.0, self.kind());
            }
        }

        InferenceResult::failed(self.kind())
    }
}

/// The classic 1-2-1 pattern along a straight or diagonal axis
///
/// Checks only the 4 canonical axis triples; offset and L-shaped 1-2-1
/// variants are deliberately not recognized.
#[derive(Debug, Clone, Copy)]
pub struct Pattern121Rule;

/// Opposite-neighbor offset pairs: vertical, horizontal, both diagonals
const AXIS_PAIRS: [[(isize, isize); 2]; 4] = [
    [(-1, 0), (1, 0)],
    [(0, -1), (0, 1)],
    [(-1, -1), (1, 1)],
    [(-1, 1), (1, -1)],
];

impl Rule for Pattern121Rule {
    fn name(&self) -> &'static str {
        "pattern-121"
    }

    fn priority(&self) -> u8 {
        3
    }

    fn kind(&self) -> InferenceKind {
        InferenceKind::RecognizedPattern
    }

    fn is_applicable(&self, index: usize, board: &Board) -> bool {
        let cell = board.cell(index);
        cell.is_revealed() && cell.adjacent_mines() == 2
    }

    fn apply(&self, index: usize, board: &Board) -> InferenceResult {
        if !self.is_applicable(index, board) {
            return InferenceResult::failed(self.kind());
        }

        let center = board.cell(index).coord();

        for [d1, d2] in AXIS_PAIRS {
            let Some(one_a) = offset_index(board, center, d1) else {
                continue;
            };
            let Some(one_b) = offset_index(board, center, d2) else {
                continue;
            };

            let is_one = |i: usize| board.cell(i).is_revealed() && board.cell(i).adjacent_mines() == 1;
            if !is_one(one_a) || !is_one(one_b) {
                continue;
            }

            // Mine candidates: hidden neighbors of the "2" adjacent to
            // exactly one of the flanking "1"s
            let candidates: Vec<usize> = board
                .neighbors(index)
                .iter()
                .copied()
                .filter(|&n| {
                    board.cell(n).is_hidden()
                        && n != one_a
                        && n != one_b
                        && (board.neighbors(one_a).contains(&n)
                            ^ board.neighbors(one_b).contains(&n))
                })
                .collect();

            if candidates.len() >= 2 {
                let targets: Vec<Coord> = candidates[..2]
                    .iter()
                    .map(|&n| board.cell(n).coord())
                    .collect();
                return InferenceResult::new(
                    Action::Flag,
                    targets,
                    "1-2-1 pattern detected",
                    0.95,
                    self.kind(),
                );
            }
        }

        InferenceResult::failed(self.kind())
    }
}

fn offset_index(board: &Board, from: Coord, delta: (isize, isize)) -> Option<usize> {
    let row = from.row.checked_add_signed(delta.0)?;
    let col = from.col.checked_add_signed(delta.1)?;
    board.index_of(row, col)
}
