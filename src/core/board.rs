//! Board graph: grid cells with fixed 8-neighbor adjacency
//!
//! Cells live in a flat row-major vector; adjacency is a parallel list of
//! neighbor indices, symmetric by construction. Row-major order doubles as
//! the tie-break order for rule scanning.

use super::cell::{Cell, CellState};
use super::types::Coord;
use rand::Rng;

/// The Minesweeper board graph
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    /// Neighbor indices per cell (Moore neighborhood, fewer at borders)
    neighbors: Vec<Vec<usize>>,
    total_mines: usize,
}

impl Board {
    /// Build a rows × cols board with symmetric 8-directional adjacency
    ///
    /// No mines are placed yet; call [`Board::place_mines`] exactly once
    /// before any reveal.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(row, col));
            }
        }

        let mut neighbors = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let mut adjacent = Vec::with_capacity(8);
                for dr in -1_isize..=1 {
                    for dc in -1_isize..=1 {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        let nr = row as isize + dr;
                        let nc = col as isize + dc;
                        if nr >= 0 && nr < rows as isize && nc >= 0 && nc < cols as isize {
                            adjacent.push(nr as usize * cols + nc as usize);
                        }
                    }
                }
                neighbors.push(adjacent);
            }
        }

        Self {
            rows,
            cols,
            cells,
            neighbors,
            total_mines: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub const fn total_mines(&self) -> usize {
        self.total_mines
    }

    /// Place `count` mines on distinct cells chosen uniformly at random,
    /// then compute every non-mine cell's adjacent count
    ///
    /// `count` is capped at the board size. Uses `rand`'s uniform index
    /// sampling rather than a comparator shuffle, which would bias placement.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        let count = count.min(self.cells.len());
        let picks = rand::seq::index::sample(rng, self.cells.len(), count);
        for index in picks {
            self.cells[index].set_mine(true);
        }
        self.total_mines = count;
        self.compute_adjacent_counts();
    }

    /// Place mines at fixed coordinates (deterministic fixtures and puzzles)
    ///
    /// Out-of-range coordinates are ignored. Recomputes adjacent counts.
    pub fn place_mines_at(&mut self, coords: &[Coord]) {
        let mut placed = 0;
        for coord in coords {
            if let Some(index) = self.index_of(coord.row, coord.col) {
                if !self.cells[index].has_mine() {
                    self.cells[index].set_mine(true);
                    placed += 1;
                }
            }
        }
        self.total_mines += placed;
        self.compute_adjacent_counts();
    }

    fn compute_adjacent_counts(&mut self) {
        for index in 0..self.cells.len() {
            if self.cells[index].has_mine() {
                continue;
            }
            let count = self.neighbors[index]
                .iter()
                .filter(|&&n| self.cells[n].has_mine())
                .count();
            self.cells[index].set_adjacent_mines(count as u8);
        }
    }

    /// Flat index for (row, col), or `None` when out of range
    #[inline]
    #[must_use]
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// The cell at (row, col), or `None` when out of range
    #[must_use]
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index_of(row, col).map(|index| &self.cells[index])
    }

    /// Unchecked-by-contract access for internal scans over valid indices;
    /// external callers go through the total [`Board::cell_at`]
    #[inline]
    pub(crate) fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    /// Neighbor indices of a cell
    #[inline]
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }

    /// All cell indices in row-major order
    pub fn all_indices(&self) -> impl Iterator<Item = usize> + use<> {
        0..self.cells.len()
    }

    /// All cells in row-major order
    pub fn all_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Hidden cells with at least one Revealed neighbor
    ///
    /// The boundary of the search space; bounds the probability engine's
    /// relevant set.
    #[must_use]
    pub fn frontier(&self) -> Vec<usize> {
        self.all_indices()
            .filter(|&index| {
                self.cells[index].is_hidden()
                    && self.neighbors[index]
                        .iter()
                        .any(|&n| self.cells[n].is_revealed())
            })
            .collect()
    }

    /// Neighbor indices of a cell currently in `state`
    #[must_use]
    pub fn neighbors_in_state(&self, index: usize, state: CellState) -> Vec<usize> {
        self.neighbors[index]
            .iter()
            .copied()
            .filter(|&n| self.cells[n].state() == state)
            .collect()
    }

    /// Count of a cell's neighbors currently in `state`
    #[must_use]
    pub fn count_neighbors_in_state(&self, index: usize, state: CellState) -> usize {
        self.neighbors[index]
            .iter()
            .filter(|&&n| self.cells[n].state() == state)
            .count()
    }

    /// Mines a revealed cell still expects among its Hidden neighbors:
    /// adjacent count minus flagged neighbors (negative when over-flagged)
    #[must_use]
    pub fn remaining_mines(&self, index: usize) -> i32 {
        let flagged = self.count_neighbors_in_state(index, CellState::Flagged);
        i32::from(self.cells[index].adjacent_mines()) - flagged as i32
    }

    /// Total Hidden cells on the board
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_hidden()).count()
    }

    /// Total Flagged cells on the board
    #[must_use]
    pub fn flagged_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.state() == CellState::Flagged)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn corner_edge_and_interior_neighbor_counts() {
        let board = Board::new(4, 5);
        // Corner
        assert_eq!(board.neighbors(board.index_of(0, 0).unwrap()).len(), 3);
        // Edge
        assert_eq!(board.neighbors(board.index_of(0, 2).unwrap()).len(), 5);
        // Interior
        assert_eq!(board.neighbors(board.index_of(1, 2).unwrap()).len(), 8);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let board = Board::new(5, 7);
        for a in board.all_indices() {
            for &b in board.neighbors(a) {
                assert!(
                    board.neighbors(b).contains(&a),
                    "asymmetric adjacency between {a} and {b}"
                );
            }
        }
    }

    #[test]
    fn all_indices_are_row_major() {
        let board = Board::new(3, 4);
        let coords: Vec<Coord> = board.all_cells().map(Cell::coord).collect();
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[3], Coord::new(0, 3));
        assert_eq!(coords[4], Coord::new(1, 0));
        assert_eq!(coords[11], Coord::new(2, 3));
    }

    #[test]
    fn place_mines_exact_count() {
        let mut rng = StdRng::seed_from_u64(42);
        for mines in [0, 1, 10, 40] {
            let mut board = Board::new(8, 8);
            board.place_mines(mines, &mut rng);
            let placed = board.all_cells().filter(|c| c.has_mine()).count();
            assert_eq!(placed, mines);
            assert_eq!(board.total_mines(), mines);
        }
    }

    #[test]
    fn place_mines_caps_at_board_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::new(3, 3);
        board.place_mines(100, &mut rng);
        assert_eq!(board.total_mines(), 9);
        assert!(board.all_cells().all(Cell::has_mine));
    }

    #[test]
    fn adjacent_counts_match_mined_neighbors() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut board = Board::new(8, 8);
        board.place_mines(10, &mut rng);

        for index in board.all_indices() {
            if board.cell(index).has_mine() {
                continue;
            }
            let expected = board
                .neighbors(index)
                .iter()
                .filter(|&&n| board.cell(n).has_mine())
                .count();
            assert_eq!(usize::from(board.cell(index).adjacent_mines()), expected);
        }
    }

    #[test]
    fn place_mines_at_fixed_coords() {
        let mut board = Board::new(3, 3);
        board.place_mines_at(&[Coord::new(0, 0), Coord::new(2, 2)]);

        assert_eq!(board.total_mines(), 2);
        assert!(board.cell_at(0, 0).unwrap().has_mine());
        assert!(board.cell_at(2, 2).unwrap().has_mine());
        // Center touches both mines
        assert_eq!(board.cell_at(1, 1).unwrap().adjacent_mines(), 2);
        // (0, 2) touches neither
        assert_eq!(board.cell_at(0, 2).unwrap().adjacent_mines(), 0);
    }

    #[test]
    fn cell_at_rejects_out_of_range() {
        let board = Board::new(4, 4);
        assert!(board.cell_at(4, 0).is_none());
        assert!(board.cell_at(0, 4).is_none());
        assert!(board.cell_at(100, 100).is_none());
        assert!(board.cell_at(3, 3).is_some());
    }

    #[test]
    fn frontier_is_hidden_cells_touching_revealed() {
        let mut board = Board::new(3, 3);
        board.place_mines_at(&[Coord::new(2, 2)]);
        assert!(board.frontier().is_empty());

        let center = board.index_of(1, 1).unwrap();
        board.cell_mut(center).set_state(CellState::Revealed);

        let frontier = board.frontier();
        // Every other cell touches the center
        assert_eq!(frontier.len(), 8);
        assert!(!frontier.contains(&center));
    }

    #[test]
    fn remaining_mines_accounts_for_flags() {
        let mut board = Board::new(3, 3);
        board.place_mines_at(&[Coord::new(0, 0), Coord::new(0, 2)]);

        let center = board.index_of(1, 1).unwrap();
        board.cell_mut(center).set_state(CellState::Revealed);
        assert_eq!(board.remaining_mines(center), 2);

        let corner = board.index_of(0, 0).unwrap();
        board.cell_mut(corner).set_state(CellState::Flagged);
        assert_eq!(board.remaining_mines(center), 1);
    }
}
