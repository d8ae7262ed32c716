//! Game controller: the single mutation gate for the board
//!
//! Owns the board and the inference engine, applies manual and AI actions,
//! and detects win and loss. Every operation is total: failures come back as
//! an unsuccessful outcome with a message, never a panic.

use crate::core::{Action, Board, CellState, Coord, InferenceKind, InferenceResult};
use crate::solver::{CellProbability, EngineStatistics, InferenceEngine};
use rand::Rng;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Game lifecycle; `Won` and `Lost` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

/// Outcome of a single reveal or flag
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub success: bool,
    pub message: String,
}

impl MoveOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// How one AI turn was decided
#[derive(Debug, Clone)]
pub struct TurnInfo {
    pub kind: InferenceKind,
    pub certainty: f64,
    pub rationale: String,
    /// Cells the turn acted on (reveals counted after propagation)
    pub affected: usize,
}

/// Outcome of one AI turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub success: bool,
    pub message: String,
    pub info: Option<TurnInfo>,
}

/// The authoritative game state machine
///
/// `NotStarted → InProgress → {Won, Lost}`. The controller is the only code
/// that mutates the board; the solver sees it read-only per call and must
/// never interleave with a manual move mid-turn.
#[derive(Debug, Default)]
pub struct GameController {
    board: Option<Board>,
    engine: Option<InferenceEngine>,
    state: GameState,
    first_move_pending: bool,
    total_moves: usize,
    revealed_count: usize,
    flagged_count: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl GameController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh game with mines placed by the thread RNG
    pub fn start_game(&mut self, rows: usize, cols: usize, mines: usize) {
        self.start_game_with_rng(rows, cols, mines, &mut rand::rng());
    }

    /// Start a fresh game with a caller-supplied RNG (seeded runs)
    pub fn start_game_with_rng<R: Rng + ?Sized>(
        &mut self,
        rows: usize,
        cols: usize,
        mines: usize,
        rng: &mut R,
    ) {
        let mut board = Board::new(rows, cols);
        board.place_mines(mines, rng);

        self.board = Some(board);
        self.engine = Some(InferenceEngine::new());
        self.state = GameState::InProgress;
        self.first_move_pending = true;
        self.total_moves = 0;
        self.revealed_count = 0;
        self.flagged_count = 0;
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub const fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    #[must_use]
    pub const fn total_moves(&self) -> usize {
        self.total_moves
    }

    #[must_use]
    pub const fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    #[must_use]
    pub const fn flagged_count(&self) -> usize {
        self.flagged_count
    }

    /// Reveal a cell, propagating through zero-adjacency regions
    ///
    /// Revealing a mine detonates it and loses the game; that is a modeled
    /// terminal transition reported as an unsuccessful outcome, not an
    /// internal error.
    fn reveal_cell(&mut self, row: usize, col: usize) -> MoveOutcome {
        let Some(board) = self.board.as_mut() else {
            return MoveOutcome::fail("No game in progress");
        };
        let Some(index) = board.index_of(row, col) else {
            return MoveOutcome::fail("Invalid coordinates");
        };

        if board.cell(index).is_revealed() {
            return MoveOutcome::fail(format!("({row},{col}) already revealed"));
        }

        if board.cell(index).has_mine() {
            board.cell_mut(index).set_state(CellState::Detonated);
            self.state = GameState::Lost;
            return MoveOutcome::fail(format!("Mine detonated at ({row},{col})"));
        }

        board.cell_mut(index).set_state(CellState::Revealed);
        let adjacent = board.cell(index).adjacent_mines();
        self.revealed_count += 1;

        if adjacent == 0 {
            let propagated = self.propagate_reveal(index);
            return MoveOutcome::ok(format!("({row},{col}) [0] +{propagated} propagated"));
        }

        MoveOutcome::ok(format!("({row},{col}) [{adjacent}]"))
    }

    /// Flood fill from a revealed zero-adjacency cell
    ///
    /// Explicit worklist rather than recursion; the one-way Hidden→Revealed
    /// transition guarantees each cell is visited at most once.
    fn propagate_reveal(&mut self, start: usize) -> usize {
        let Some(board) = self.board.as_mut() else {
            return 0;
        };
        let mut queue = VecDeque::from([start]);
        let mut propagated = 0;

        while let Some(index) = queue.pop_front() {
            let neighbors: Vec<usize> = board.neighbors(index).to_vec();
            for n in neighbors {
                if board.cell(n).is_hidden() && !board.cell(n).has_mine() {
                    board.cell_mut(n).set_state(CellState::Revealed);
                    propagated += 1;
                    if board.cell(n).adjacent_mines() == 0 {
                        queue.push_back(n);
                    }
                }
            }
        }

        self.revealed_count += propagated;
        propagated
    }

    /// Flag a Hidden cell as a mine
    ///
    /// Correctness of the flag is reported in the message for diagnostics
    /// only; the game never verifies flags.
    fn mark_cell(&mut self, row: usize, col: usize) -> MoveOutcome {
        let Some(board) = self.board.as_mut() else {
            return MoveOutcome::fail("No game in progress");
        };
        let Some(index) = board.index_of(row, col) else {
            return MoveOutcome::fail("Invalid coordinates");
        };

        if !board.cell(index).is_hidden() {
            return MoveOutcome::fail(format!("({row},{col}) cannot be flagged"));
        }

        board.cell_mut(index).set_state(CellState::Flagged);
        self.flagged_count += 1;

        let correct = if board.cell(index).has_mine() { "hit" } else { "miss" };
        MoveOutcome::ok(format!("Flagged ({row},{col}) [{correct}]"))
    }

    /// Won iff every non-mine cell is revealed
    fn check_win(&mut self) {
        let Some(board) = self.board.as_ref() else {
            return;
        };
        if self.state == GameState::InProgress
            && self.revealed_count >= board.total_cells() - board.total_mines()
        {
            self.state = GameState::Won;
        }
    }

    /// Run one AI turn: one inference, applied in order
    ///
    /// Returns `None` once the game is over. An exhausted inference cascade
    /// comes back as an unsuccessful outcome telling the driver to stop.
    pub fn run_ai_turn(&mut self) -> Option<TurnOutcome> {
        if self.board.is_none() || self.engine.is_none() || self.state != GameState::InProgress {
            return None;
        }

        if self.first_move_pending {
            return Some(self.first_move());
        }

        let result = {
            let board = self.board.as_ref()?;
            let engine = self.engine.as_mut()?;
            engine.infer(board)
        };

        let Some(result) = result else {
            return Some(TurnOutcome {
                success: false,
                message: "No moves available".into(),
                info: None,
            });
        };

        let applied = self.apply_result(&result);
        self.total_moves += 1;
        self.check_win();

        Some(TurnOutcome {
            success: applied.success,
            message: applied.message,
            info: Some(TurnInfo {
                kind: result.kind,
                certainty: result.certainty,
                rationale: result.rationale.clone(),
                affected: result.targets.len(),
            }),
        })
    }

    /// Opening move: skip inference on a board with zero information
    ///
    /// Prefer any zero-adjacency non-mine cell (safe and propagates); fall
    /// back to a non-mine corner.
    fn first_move(&mut self) -> TurnOutcome {
        self.first_move_pending = false;

        let zero_cell = self.board.as_ref().and_then(|board| {
            board
                .all_cells()
                .find(|cell| !cell.has_mine() && cell.adjacent_mines() == 0)
                .map(crate::core::Cell::coord)
        });

        if let Some(coord) = zero_cell {
            let outcome = self.reveal_cell(coord.row, coord.col);
            self.total_moves += 1;
            self.check_win();
            return TurnOutcome {
                success: outcome.success,
                message: format!("Opening move at ({},{})", coord.row, coord.col),
                info: Some(TurnInfo {
                    kind: InferenceKind::Heuristic,
                    certainty: 1.0,
                    rationale: "Zero-adjacency opening with propagation".into(),
                    affected: self.revealed_count,
                }),
            };
        }

        let corner = self.board.as_ref().and_then(|board| {
            let corners = [
                Coord::new(0, 0),
                Coord::new(0, board.cols().saturating_sub(1)),
                Coord::new(board.rows().saturating_sub(1), 0),
                Coord::new(
                    board.rows().saturating_sub(1),
                    board.cols().saturating_sub(1),
                ),
            ];
            corners
                .into_iter()
                .find(|c| board.cell_at(c.row, c.col).is_some_and(|cell| !cell.has_mine()))
        });

        if let Some(coord) = corner {
            let outcome = self.reveal_cell(coord.row, coord.col);
            self.total_moves += 1;
            self.check_win();
            return TurnOutcome {
                success: outcome.success,
                message: format!("Opening move: corner ({},{})", coord.row, coord.col),
                info: Some(TurnInfo {
                    kind: InferenceKind::Heuristic,
                    certainty: 0.7,
                    rationale: "Corner opening heuristic".into(),
                    affected: 1,
                }),
            };
        }

        // Every zero cell and corner is mined
        TurnOutcome {
            success: false,
            message: "No safe opening found".into(),
            info: None,
        }
    }

    /// Apply an inference's action list through the reveal/flag primitives
    ///
    /// A detonation stops the application early and reports the loss.
    fn apply_result(&mut self, result: &InferenceResult) -> MoveOutcome {
        let mut messages = Vec::with_capacity(result.targets.len());

        for coord in &result.targets {
            match result.action {
                Some(Action::Reveal) => {
                    let outcome = self.reveal_cell(coord.row, coord.col);
                    let lost = !outcome.success && self.state == GameState::Lost;
                    messages.push(outcome.message);
                    if lost {
                        return MoveOutcome::fail(messages.join(" | "));
                    }
                }
                Some(Action::Flag) => {
                    messages.push(self.mark_cell(coord.row, coord.col).message);
                }
                None => {}
            }
        }

        MoveOutcome::ok(format!("{} | {}", result.rationale, messages.join(" | ")))
    }

    /// Reveal on behalf of the player
    ///
    /// Clears the pending first-move heuristic: a manual opening means the
    /// AI no longer gets a free opening turn.
    pub fn reveal_manual(&mut self, row: usize, col: usize) -> MoveOutcome {
        if self.state != GameState::InProgress {
            return MoveOutcome::fail("Game has ended");
        }

        self.first_move_pending = false;
        let outcome = self.reveal_cell(row, col);
        self.check_win();
        if let Some(engine) = self.engine.as_mut() {
            engine.invalidate_probabilities();
        }
        outcome
    }

    /// Flag on behalf of the player
    pub fn mark_manual(&mut self, row: usize, col: usize) -> MoveOutcome {
        if self.state != GameState::InProgress {
            return MoveOutcome::fail("Game has ended");
        }

        self.first_move_pending = false;
        let outcome = self.mark_cell(row, col);
        if let Some(engine) = self.engine.as_mut() {
            engine.invalidate_probabilities();
        }
        outcome
    }

    /// Engine statistics for the current game, if one has started
    #[must_use]
    pub fn statistics(&self) -> Option<EngineStatistics> {
        self.engine.as_ref().map(InferenceEngine::statistics)
    }

    /// Mine probability of every Hidden cell, keyed `"row-col"`
    ///
    /// Also refreshes each Hidden cell's cached `mine_probability` so
    /// renderers can read it from the cell.
    pub fn probability_map(&mut self) -> FxHashMap<String, f64> {
        let entries: Vec<CellProbability> = match (self.board.as_ref(), self.engine.as_mut()) {
            (Some(board), Some(engine)) => engine.probability_map(board),
            _ => Vec::new(),
        };

        if let Some(board) = self.board.as_mut() {
            for entry in &entries {
                if let Some(index) = board.index_of(entry.coord.row, entry.coord.col) {
                    board.cell_mut(index).set_mine_probability(entry.probability);
                }
            }
        }

        entries
            .into_iter()
            .map(|entry| (entry.coord.to_string(), entry.probability))
            .collect()
    }
}
