//! Risk scoring for transformer oil samples
//!
//! Maps oil quality measurements and condition notes to a bounded integer
//! score and a three-level category.
//!
//! - [`scoring_table`] - The configurable point table (bands, markers, categories)
//! - [`scorer`] - Applying a table to a sample
//!
//! Two built-in tables exist: [`ScoringTable::standard`] and
//! [`ScoringTable::simplified`]. Any other table can be loaded from the
//! `[scoring.table]` section of the configuration file.

pub mod scorer;
pub mod scoring_table;

#[cfg(test)]
pub mod tests;

pub use scorer::{ScoreBreakdown, assess, score_breakdown, score_record};
pub use scoring_table::{Band, Direction, Factor, FactorRule, MarkerRule, ScoringTable};
