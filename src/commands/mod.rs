//! Command implementations

pub mod autoplay;
pub mod benchmark;

pub use autoplay::{PlayConfig, PlayReport, run_autoplay};
pub use benchmark::{BenchmarkConfig, BenchmarkResult, GameOutcome, GameRecord, run_benchmark};
