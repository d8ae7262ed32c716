//! Minesweeper inference algorithms
//!
//! Deterministic and pattern rules, the probability engine, and the phased
//! orchestrator that combines them.

mod engine;
pub mod probability;
pub mod rules;

pub use engine::{EngineStatistics, InferenceEngine};
pub use probability::{BestMove, CellProbability, ProbabilityEngine};
pub use rules::{Rule, RuleSet, RuleStats, RuleType};
