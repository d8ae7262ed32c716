//! Game orchestration
//!
//! The controller owns the board, routes manual and AI moves through the
//! same primitives, and tracks the win/loss state machine.

mod controller;

pub use controller::{GameController, GameState, MoveOutcome, TurnInfo, TurnOutcome};
