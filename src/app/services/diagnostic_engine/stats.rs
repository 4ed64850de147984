//! Classification statistics and result structures

use crate::app::models::{DuvalZone, EnrichedRecord, RiskFlag, TernaryZone};

/// Classified records with batch statistics
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Enriched records in input order
    pub records: Vec<EnrichedRecord>,

    pub stats: BatchStats,
}

/// Statistics for one classification pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchStats {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Records without a Duval zone
    pub duval_insufficient: usize,
    /// Records without a ternary triple
    pub ternary_insufficient: usize,
}

impl BatchStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified record
    pub fn record(&mut self, record: &EnrichedRecord) {
        self.total += 1;
        match record.risk_flag {
            RiskFlag::High => self.high += 1,
            RiskFlag::Medium => self.medium += 1,
            RiskFlag::Low => self.low += 1,
        }
        if record.duval.zone == DuvalZone::InsufficientData {
            self.duval_insufficient += 1;
        }
        if record.ternary.zone == TernaryZone::InsufficientData {
            self.ternary_insufficient += 1;
        }
    }

    /// Share of records with a Duval zone, as a percentage
    pub fn duval_coverage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            ((self.total - self.duval_insufficient) as f64 / self.total as f64) * 100.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Classified {} records: {} high, {} medium, {} low; Duval coverage {:.1}%",
            self.total,
            self.high,
            self.medium,
            self.low,
            self.duval_coverage()
        )
    }
}
