//! Parsing statistics and result structures for oil test tables

use crate::app::models::SampleRecord;
use serde::{Deserialize, Serialize};

/// Parsing result with records and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// One record per input row, in row order
    pub records: Vec<SampleRecord>,

    pub stats: ParseStats,
}

/// Parsing statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Number of input rows
    pub total_rows: usize,

    /// Labels matched by the full pattern
    pub primary_labels: usize,

    /// Labels split on whitespace after the full pattern failed
    pub fallback_labels: usize,

    /// Rows with an absent or blank label
    pub missing_labels: usize,

    /// Non-empty numeric cells that could not be parsed
    pub cells_coerced_to_null: usize,

    /// Expected columns absent from the input
    pub missing_columns: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_rows: 0,
            primary_labels: 0,
            fallback_labels: 0,
            missing_labels: 0,
            cells_coerced_to_null: 0,
            missing_columns: Vec::new(),
        }
    }

    /// Fold another table's statistics into this one
    pub fn merge(&mut self, other: &ParseStats) {
        self.total_rows += other.total_rows;
        self.primary_labels += other.primary_labels;
        self.fallback_labels += other.fallback_labels;
        self.missing_labels += other.missing_labels;
        self.cells_coerced_to_null += other.cells_coerced_to_null;
        for column in &other.missing_columns {
            if !self.missing_columns.contains(column) {
                self.missing_columns.push(column.clone());
            }
        }
    }

    /// Share of rows whose label matched the full pattern, as a percentage
    pub fn primary_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.primary_labels as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} rows: {} labels parsed, {} via fallback, {} missing; {} cells coerced to null",
            self.total_rows,
            self.primary_labels,
            self.fallback_labels,
            self.missing_labels,
            self.cells_coerced_to_null
        )
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
