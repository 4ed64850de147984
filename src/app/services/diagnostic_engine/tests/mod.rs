//! Tests for the diagnostic engine module


use crate::app::models::{GasConcentrations, OilQuality, SampleRecord};

/// Record with complete oil data and the given gas set
pub fn create_test_record(site: &str, tcg: f64, gases: GasConcentrations) -> SampleRecord {
    SampleRecord {
        site_code: Some(site.to_string()),
        equipment_id: Some("T1".to_string()),
        station_name: Some("TEST STATION".to_string()),
        sample_date: Some("1404-01-01".to_string()),
        oil: OilQuality {
            total_combustible_gas: Some(tcg),
            acid_number: Some(0.05),
            breakdown_voltage: Some(60.0),
            water_content: Some(20.0),
            dissipation_factor: None,
        },
        gases,
        ..Default::default()
    }
}

/// The reference gas set that falls in the corona zone
pub fn corona_gases() -> GasConcentrations {
    GasConcentrations {
        hydrogen: Some(200.0),
        ..GasConcentrations::duval(1126.0, 525.0, 1669.0, 8.0)
    }
}
