//! Additive risk scoring of a single sample

use crate::app::models::{RiskFlag, SampleRecord};
use tracing::debug;

use super::scoring_table::ScoringTable;

/// Point breakdown behind a risk score
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreBreakdown {
    /// (factor or marker name, points) for every contributor that scored
    pub contributions: Vec<(String, u32)>,
    /// Sum before clamping
    pub raw_total: u32,
    /// Clamped score
    pub score: u32,
}

/// Score a sample against a point table
///
/// Every factor and marker is evaluated; the sum is clamped to
/// `table.max_score`.
pub fn score_record(record: &SampleRecord, table: &ScoringTable) -> u32 {
    score_breakdown(record, table).score
}

/// Score a sample and categorize it in one step
pub fn assess(record: &SampleRecord, table: &ScoringTable) -> (u32, RiskFlag) {
    let score = score_record(record, table);
    (score, table.category(score))
}

/// Score a sample, keeping the contribution of each rule
pub fn score_breakdown(record: &SampleRecord, table: &ScoringTable) -> ScoreBreakdown {
    let mut contributions = Vec::new();

    for rule in &table.factors {
        let points = rule.points_for(rule.factor.value(&record.oil));
        if points > 0 {
            contributions.push((rule.factor.as_str().to_string(), points));
        }
    }

    if let Some(notes) = record.condition_notes.as_deref() {
        let lowered = notes.to_lowercase();
        for marker in &table.markers {
            if marker.matches(&lowered) {
                contributions.push((marker.name.clone(), marker.points));
            }
        }
    }

    let raw_total = contributions
        .iter()
        .fold(0u32, |acc, (_, points)| acc.saturating_add(*points));
    let score = raw_total.min(table.max_score);

    if raw_total > table.max_score {
        debug!(
            "Risk score for {} clamped from {} to {}",
            record.display_id(),
            raw_total,
            score
        );
    }

    ScoreBreakdown {
        contributions,
        raw_total,
        score,
    }
}
