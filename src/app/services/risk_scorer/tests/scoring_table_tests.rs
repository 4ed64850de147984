//! Tests for point table validation

use crate::app::models::{OilQuality, RiskFlag};
use crate::app::services::risk_scorer::{Band, Factor, FactorRule, MarkerRule, ScoringTable};

#[test]
fn test_builtin_tables_are_valid() {
    assert!(ScoringTable::standard().validate().is_ok());
    assert!(ScoringTable::simplified().validate().is_ok());
    assert_eq!(ScoringTable::default(), ScoringTable::standard());
}

#[test]
fn test_category_uses_table_thresholds() {
    let mut table = ScoringTable::standard();
    assert_eq!(table.category(59), RiskFlag::Medium);

    table.high_threshold = 50;
    assert_eq!(table.category(59), RiskFlag::High);
}

#[test]
fn test_rejects_unordered_above_bands() {
    let mut table = ScoringTable::standard();
    table.factors[0] = FactorRule::above(
        Factor::TotalCombustibleGas,
        vec![Band::new(1000.0, 10), Band::new(3000.0, 40)],
    );

    let err = table.validate().unwrap_err();
    assert!(err.to_string().contains("total_combustible_gas"));
}

#[test]
fn test_rejects_unordered_below_bands() {
    let rule = FactorRule::below(
        Factor::BreakdownVoltage,
        vec![Band::new(50.0, 15), Band::new(40.0, 25)],
    );
    assert!(rule.validate().is_err());
}

#[test]
fn test_rejects_points_rising_toward_milder_band() {
    let rule = FactorRule::above(
        Factor::WaterContent,
        vec![Band::new(40.0, 5), Band::new(30.0, 10)],
    );
    assert!(rule.validate().is_err());
}

#[test]
fn test_rejects_empty_bands_and_duplicates() {
    let rule = FactorRule::above(Factor::AcidNumber, Vec::new());
    assert!(rule.validate().is_err());

    let mut table = ScoringTable::standard();
    table.factors.push(FactorRule::above(
        Factor::AcidNumber,
        vec![Band::new(0.5, 30)],
    ));
    assert!(table.validate().is_err());
}

#[test]
fn test_rejects_inverted_category_thresholds() {
    let mut table = ScoringTable::standard();
    table.medium_threshold = 70;
    assert!(table.validate().is_err());

    let mut table = ScoringTable::standard();
    table.high_threshold = 120;
    assert!(table.validate().is_err());
}

#[test]
fn test_rejects_blank_marker_pattern() {
    let mut table = ScoringTable::standard();
    table.markers.push(MarkerRule::new("blank", &["  "], 5));
    assert!(table.validate().is_err());

    let mut table = ScoringTable::standard();
    table.markers.push(MarkerRule {
        name: "none".to_string(),
        patterns: Vec::new(),
        points: 5,
    });
    assert!(table.validate().is_err());
}

#[test]
fn test_factor_reads_matching_measurement() {
    let oil = OilQuality {
        total_combustible_gas: Some(1.0),
        acid_number: Some(2.0),
        breakdown_voltage: Some(3.0),
        water_content: Some(4.0),
        dissipation_factor: Some(5.0),
    };

    assert_eq!(Factor::TotalCombustibleGas.value(&oil), Some(1.0));
    assert_eq!(Factor::AcidNumber.value(&oil), Some(2.0));
    assert_eq!(Factor::BreakdownVoltage.value(&oil), Some(3.0));
    assert_eq!(Factor::WaterContent.value(&oil), Some(4.0));
    assert_eq!(Factor::DissipationFactor.value(&oil), Some(5.0));
}

#[test]
fn test_table_round_trips_through_toml() {
    let table = ScoringTable::simplified();
    let text = toml::to_string(&table).unwrap();
    assert!(text.contains("direction = \"below\""));

    let parsed: ScoringTable = toml::from_str(&text).unwrap();
    assert_eq!(parsed, table);
}
