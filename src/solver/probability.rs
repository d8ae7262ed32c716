//! Mine probability estimation
//!
//! Exact constraint enumeration over a bounded relevant set, with a weighted
//! local approximation beyond the bound and the global mine ratio when no
//! constraint touches the target at all.

use crate::core::{Board, CellState, Coord};
use rustc_hash::{FxHashMap, FxHashSet};

/// Relevant sets up to this size are enumerated exactly (2^12 assignments)
const EXACT_ENUMERATION_LIMIT: usize = 12;

/// Reveal below this probability
const REVEAL_THRESHOLD: f64 = 0.5;

/// Flag above this probability
const FLAG_THRESHOLD: f64 = 0.85;

/// Probability of one Hidden cell
#[derive(Debug, Clone, Copy)]
pub struct CellProbability {
    pub coord: Coord,
    pub probability: f64,
}

/// The safest available move and what to do with it
#[derive(Debug, Clone)]
pub struct BestMove {
    pub coord: Coord,
    pub probability: f64,
    pub rationale: String,
}

impl BestMove {
    /// Whether the probability is low enough to reveal
    #[must_use]
    pub fn recommends_reveal(&self) -> bool {
        self.probability < REVEAL_THRESHOLD
    }

    /// Whether the probability is high enough to flag
    #[must_use]
    pub fn recommends_flag(&self) -> bool {
        self.probability > FLAG_THRESHOLD
    }
}

/// Probability estimator with an instance-scoped cache
///
/// The cache maps cell index to the last computed probability and must be
/// invalidated whenever the board changes (accepted inference or manual
/// move); entries are stale the moment a cell changes state.
#[derive(Debug, Default)]
pub struct ProbabilityEngine {
    cache: FxHashMap<usize, f64>,
}

impl ProbabilityEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all cached probabilities
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    /// Mine probability of the cell at `index`
    ///
    /// Flagged cells are 1.0 and Revealed (or Detonated) cells 0.0, neither
    /// cached. A Hidden cell with no informative neighbor gets the global
    /// ratio; otherwise the constraint-based estimate, cached per cell.
    pub fn probability_of(&mut self, index: usize, board: &Board) -> f64 {
        match board.cell(index).state() {
            CellState::Flagged => return 1.0,
            CellState::Revealed | CellState::Detonated => return 0.0,
            CellState::Hidden => {}
        }

        if let Some(&cached) = self.cache.get(&index) {
            return cached;
        }

        let informative = informative_neighbors(index, board);
        if informative.is_empty() {
            return global_ratio(board);
        }

        let probability = self.constrained_probability(index, &informative, board);
        self.cache.insert(index, probability);
        probability
    }

    /// Probability of every Hidden cell, sorted ascending (safest first)
    ///
    /// The sort is stable, so equal probabilities keep row-major order.
    pub fn probability_map(&mut self, board: &Board) -> Vec<CellProbability> {
        let mut map: Vec<CellProbability> = board
            .all_indices()
            .filter(|&index| board.cell(index).is_hidden())
            .map(|index| CellProbability {
                coord: board.cell(index).coord(),
                probability: self.probability_of(index, board),
            })
            .collect();

        map.sort_by(|a, b| a.probability.total_cmp(&b.probability));
        map
    }

    /// The lowest-probability Hidden cell, or `None` when nothing is Hidden
    pub fn best_move(&mut self, board: &Board) -> Option<BestMove> {
        let map = self.probability_map(board);
        let best = map.first()?;

        Some(BestMove {
            coord: best.coord,
            probability: best.probability,
            rationale: format!(
                "Bayesian network: {:.1}% mine probability",
                best.probability * 100.0
            ),
        })
    }

    fn constrained_probability(
        &self,
        target: usize,
        informative: &[usize],
        board: &Board,
    ) -> f64 {
        // Relevant set: the target plus every Hidden neighbor of every
        // informative neighbor
        let mut relevant: FxHashSet<usize> = FxHashSet::default();
        relevant.insert(target);
        for &neighbor in informative {
            for &n in board.neighbors(neighbor) {
                if board.cell(n).is_hidden() {
                    relevant.insert(n);
                }
            }
        }

        if relevant.len() > EXACT_ENUMERATION_LIMIT {
            return approximate_probability(informative, board);
        }

        exact_probability(target, &relevant, informative, board)
    }
}

fn informative_neighbors(index: usize, board: &Board) -> Vec<usize> {
    board
        .neighbors(index)
        .iter()
        .copied()
        .filter(|&n| board.cell(n).is_revealed() && board.cell(n).adjacent_mines() > 0)
        .collect()
}

/// Remaining mines over remaining hidden cells, clamped to [0, 1]
fn global_ratio(board: &Board) -> f64 {
    let hidden = board.hidden_count();
    if hidden == 0 {
        return 0.0;
    }
    let remaining = board.total_mines() as f64 - board.flagged_count() as f64;
    (remaining / hidden as f64).clamp(0.0, 1.0)
}

/// Exact enumeration over every mine assignment of the relevant set
///
/// An assignment is valid iff each informative neighbor's flagged count plus
/// its assigned relevant-set mines equals its adjacent count exactly. The
/// probability is the fraction of valid assignments containing the target.
fn exact_probability(
    target: usize,
    relevant: &FxHashSet<usize>,
    informative: &[usize],
    board: &Board,
) -> f64 {
    let cells: Vec<usize> = relevant.iter().copied().collect();
    let position: FxHashMap<usize, usize> =
        cells.iter().enumerate().map(|(i, &c)| (c, i)).collect();
    let target_bit = 1_u32 << position[&target];

    // Per constraint: bitmask over the relevant cells in its neighborhood,
    // plus the mine total it requires beyond its flags. An over-flagged
    // constraint has a negative requirement and rejects every assignment.
    let constraints: Vec<(u32, i64)> = informative
        .iter()
        .map(|&neighbor| {
            let mut mask = 0_u32;
            for n in board.neighbors(neighbor) {
                if let Some(&bit) = position.get(n) {
                    mask |= 1 << bit;
                }
            }
            let required = i64::from(board.remaining_mines(neighbor));
            (mask, required)
        })
        .collect();

    let mut valid = 0_u64;
    let mut with_target = 0_u64;

    for assignment in 0..(1_u32 << cells.len()) {
        if constraints
            .iter()
            .all(|&(mask, required)| i64::from((assignment & mask).count_ones()) == required)
        {
            valid += 1;
            if assignment & target_bit != 0 {
                with_target += 1;
            }
        }
    }

    if valid == 0 {
        return global_ratio(board);
    }
    with_target as f64 / valid as f64
}

/// Weighted average of each constraint's local mine density
///
/// A constraint with k hidden neighbors and m remaining mines contributes
/// m/k at weight 1/(k+1): tighter neighborhoods speak louder.
fn approximate_probability(informative: &[usize], board: &Board) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for &neighbor in informative {
        let hidden = board.count_neighbors_in_state(neighbor, CellState::Hidden);
        if hidden == 0 {
            continue;
        }
        let local = f64::from(board.remaining_mines(neighbor)) / hidden as f64;
        let weight = 1.0 / (hidden as f64 + 1.0);
        weighted_sum += local * weight;
        weight_sum += weight;
    }

    if weight_sum == 0.0 {
        return global_ratio(board);
    }
    (weighted_sum / weight_sum).clamp(0.0, 1.0)
}
