//! Tests for the risk scoring module

pub mod scoring_table_tests;

use crate::app::models::{OilQuality, SampleRecord};

/// Create a record with the four scored measurements and optional notes
pub fn create_test_record(
    tcg: Option<f64>,
    tan: Option<f64>,
    breakdown_voltage: Option<f64>,
    water: Option<f64>,
    notes: Option<&str>,
) -> SampleRecord {
    SampleRecord {
        site_code: Some("6515A".to_string()),
        equipment_id: Some("T1".to_string()),
        station_name: Some("SANATI BAHARESTAN".to_string()),
        sample_date: Some("1404-09-29".to_string()),
        oil: OilQuality {
            total_combustible_gas: tcg,
            acid_number: tan,
            breakdown_voltage,
            water_content: water,
            dissipation_factor: None,
        },
        condition_notes: notes.map(str::to_string),
        ..Default::default()
    }
}

/// Record with every measurement missing and no notes
pub fn create_empty_record() -> SampleRecord {
    create_test_record(None, None, None, None, None)
}
