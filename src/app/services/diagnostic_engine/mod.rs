//! Diagnostic engine
//!
//! Ties the risk scorer, Duval classifier and ternary classifier together.
//! Records go in, enriched records come out; the engine holds no state beyond
//! its point table.
//!
//! - [`engine`] - The engine and the standard-table shortcuts
//! - [`stats`] - Batch statistics

pub mod engine;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use engine::{DiagnosticEngine, classify, classify_batch};
pub use stats::{BatchResult, BatchStats};
