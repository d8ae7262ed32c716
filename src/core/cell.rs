//! Board cell representation

use super::types::Coord;

/// Lifecycle state of a single cell
///
/// `Hidden` is the only state a cell can leave. `Detonated` is terminal and
/// reachable only from `Hidden` by revealing a mine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
    Detonated,
}

/// One cell of the board
///
/// Adjacency lives in the [`Board`](super::Board) as an index-based neighbor
/// list; the cell itself holds only its own facts.
#[derive(Debug, Clone)]
pub struct Cell {
    row: usize,
    col: usize,
    state: CellState,
    has_mine: bool,
    adjacent_mines: u8,
    mine_probability: f64,
}

impl Cell {
    pub(crate) const fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            state: CellState::Hidden,
            has_mine: false,
            adjacent_mines: 0,
            mine_probability: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    #[inline]
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    #[inline]
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> CellState {
        self.state
    }

    /// Whether this cell holds a mine
    ///
    /// Fixed after placement. Meaningful for rendering only post-loss.
    #[inline]
    #[must_use]
    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    /// Count of mined neighbors, valid only for non-mine cells
    #[inline]
    #[must_use]
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// Last computed mine probability, meaningful while Hidden
    ///
    /// Recomputed on demand by the probability map; stale otherwise.
    #[inline]
    #[must_use]
    pub const fn mine_probability(&self) -> f64 {
        self.mine_probability
    }

    #[inline]
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    #[inline]
    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub(crate) const fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    pub(crate) const fn set_mine(&mut self, has_mine: bool) {
        self.has_mine = has_mine;
    }

    pub(crate) const fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    pub(crate) const fn set_mine_probability(&mut self, probability: f64) {
        self.mine_probability = probability;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_hidden_and_clean() {
        let cell = Cell::new(2, 5);
        assert_eq!(cell.state(), CellState::Hidden);
        assert!(!cell.has_mine());
        assert_eq!(cell.adjacent_mines(), 0);
        assert_eq!(cell.coord(), Coord::new(2, 5));
    }

    #[test]
    fn state_transitions_apply() {
        let mut cell = Cell::new(0, 0);
        assert!(cell.is_hidden());

        cell.set_state(CellState::Flagged);
        assert_eq!(cell.state(), CellState::Flagged);
        assert!(!cell.is_hidden());
        assert!(!cell.is_revealed());

        cell.set_state(CellState::Hidden);
        cell.set_state(CellState::Revealed);
        assert!(cell.is_revealed());
    }
}
