//! Minesweeper AI
//!
//! A minesweeper player that layers three inference phases: deterministic
//! constraint rules, recognized board patterns, and a probability engine
//! that enumerates mine configurations over small constraint sets.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use minesweeper_ai::game::{GameController, GameState};
//!
//! let mut game = GameController::new();
//! game.start_game(8, 8, 10);
//!
//! while game.state() == GameState::InProgress {
//!     match game.run_ai_turn() {
//!         Some(turn) if turn.success => println!("{}", turn.message),
//!         _ => break,
//!     }
//! }
//! println!("Final state: {:?}", game.state());
//! ```

// Core domain types
pub mod core;

// Inference algorithms
pub mod solver;

// Game state machine
pub mod game;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
