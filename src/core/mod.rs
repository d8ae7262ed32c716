//! Core domain types for Minesweeper
//!
//! The board graph, its cells, and the shared inference vocabulary. Types
//! here never mutate themselves mid-game; all game mutation goes through the
//! [`GameController`](crate::game::GameController).

mod board;
mod cell;
mod types;

pub use board::Board;
pub use cell::{Cell, CellState};
pub use types::{Action, Coord, Difficulty, InferenceKind, InferenceResult};
