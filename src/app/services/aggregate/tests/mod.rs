//! Tests for the aggregate reporting module

pub mod summary_tests;

use crate::app::models::{
    DuvalResult, DuvalZone, EnrichedRecord, OilQuality, RiskFlag, SampleRecord, TernaryResult,
    TernaryZone,
};

/// Create an enriched record with fixed derived fields
pub fn create_enriched(
    station: &str,
    equipment: &str,
    score: u32,
    tcg: Option<f64>,
    duval_zone: DuvalZone,
) -> EnrichedRecord {
    EnrichedRecord {
        record: SampleRecord {
            site_code: Some("0000X".to_string()),
            equipment_id: Some(equipment.to_string()),
            station_name: Some(station.to_string()),
            oil: OilQuality {
                total_combustible_gas: tcg,
                ..Default::default()
            },
            ..Default::default()
        },
        risk_score: score,
        risk_flag: RiskFlag::from_score(score, 60, 35),
        duval: DuvalResult {
            raw_percentages: None,
            percentages: None,
            zone: duval_zone,
        },
        ternary: TernaryResult {
            percentages: None,
            zone: TernaryZone::Unclassified,
        },
    }
}

/// Same as [`create_enriched`] with a label date
pub fn create_dated(score: u32, date: Option<&str>) -> EnrichedRecord {
    let mut record = create_enriched("S", "T1", score, None, DuvalZone::InsufficientData);
    record.record.sample_date = date.map(str::to_string);
    record
}
