//! Per-record diagnostic pipeline
//!
//! Each record runs through the risk scorer, the Duval classifier and the
//! ternary ratio classifier. The three steps are independent and pure, so the
//! same record always produces the same result.

use crate::Result;
use crate::app::models::{EnrichedRecord, SampleRecord};
use crate::app::services::duval::classify_duval;
use crate::app::services::risk_scorer::{ScoringTable, assess};
use crate::app::services::ternary::classify_ternary;
use std::sync::LazyLock;
use tracing::{debug, info};

use super::stats::{BatchResult, BatchStats};

static STANDARD_ENGINE: LazyLock<DiagnosticEngine> =
    LazyLock::new(|| DiagnosticEngine::with_table_unchecked(ScoringTable::standard()));

/// Diagnostic engine bound to one point table
///
/// # Example
///
/// ```rust
/// use dga_processor::app::models::SampleRecord;
/// use dga_processor::app::services::diagnostic_engine::DiagnosticEngine;
/// use dga_processor::app::services::risk_scorer::ScoringTable;
///
/// # fn example(records: Vec<SampleRecord>) -> dga_processor::Result<()> {
/// let engine = DiagnosticEngine::new(ScoringTable::simplified())?;
/// let result = engine.classify_batch_with_stats(records);
/// println!("{}", result.stats.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticEngine {
    table: ScoringTable,
}

impl DiagnosticEngine {
    /// Create an engine after validating the point table
    pub fn new(table: ScoringTable) -> Result<Self> {
        table.validate()?;
        Ok(Self { table })
    }

    fn with_table_unchecked(table: ScoringTable) -> Self {
        Self { table }
    }

    /// Shared engine using the standard point table
    pub fn standard() -> &'static DiagnosticEngine {
        &STANDARD_ENGINE
    }

    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Attach every derived field to one record
    pub fn classify(&self, record: SampleRecord) -> EnrichedRecord {
        let (risk_score, risk_flag) = assess(&record, &self.table);
        let duval = classify_duval(&record.gases);
        let ternary = classify_ternary(&record.gases);

        debug!(
            "{}: score {} ({}), Duval {}, ternary {}",
            record.display_id(),
            risk_score,
            risk_flag,
            duval.zone,
            ternary.zone
        );

        EnrichedRecord {
            record,
            risk_score,
            risk_flag,
            duval,
            ternary,
        }
    }

    /// Classify records, preserving input order
    pub fn classify_batch(&self, records: Vec<SampleRecord>) -> Vec<EnrichedRecord> {
        records.into_iter().map(|r| self.classify(r)).collect()
    }

    /// Classify records and collect batch statistics
    pub fn classify_batch_with_stats(&self, records: Vec<SampleRecord>) -> BatchResult {
        info!("Classifying {} records", records.len());

        let records = self.classify_batch(records);

        let mut stats = BatchStats::new();
        for record in &records {
            stats.record(record);
        }

        info!("{}", stats.summary());
        BatchResult { records, stats }
    }
}

/// Classify one record with the standard point table
pub fn classify(record: SampleRecord) -> EnrichedRecord {
    DiagnosticEngine::standard().classify(record)
}

/// Classify records with the standard point table, preserving input order
pub fn classify_batch(records: Vec<SampleRecord>) -> Vec<EnrichedRecord> {
    DiagnosticEngine::standard().classify_batch(records)
}
