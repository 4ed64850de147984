//! Tests for cohort summaries

use super::*;
use crate::app::services::aggregate::{summarize, summarize_with_threshold};

fn sample_cohort() -> Vec<EnrichedRecord> {
    vec![
        create_enriched("A", "T1", 100, Some(3500.0), DuvalZone::T2MidTemp),
        create_enriched("A", "T2", 40, Some(1500.0), DuvalZone::D1Corona),
        create_enriched("B", "T1", 10, None, DuvalZone::D1Corona),
        create_enriched("B", "T2", 70, Some(2500.0), DuvalZone::T2MidTemp),
        create_enriched("C", "T1", 0, Some(500.0), DuvalZone::InsufficientData),
    ]
}

#[test]
fn test_empty_input_gives_zeroed_summary() {
    let summary = summarize(&[]);

    assert!(summary.is_empty());
    assert_eq!(summary.high_count, 0);
    assert_eq!(summary.high_share, 0.0);
    assert_eq!(summary.mean_tcg, None);
    assert_eq!(summary.mean_risk_score, None);
    assert_eq!(summary.date_range, None);
    assert_eq!(summary.dominant_duval_zone, None);
    assert!(summary.duval_zones.is_empty());
    assert!(summary.ternary_zones.is_empty());

    assert_eq!(summary.risk_groups.len(), 3);
    assert!(summary.risk_groups.iter().all(|g| g.count == 0));
}

#[test]
fn test_risk_groups() {
    let summary = summarize(&sample_cohort());

    let flags: Vec<RiskFlag> = summary.risk_groups.iter().map(|g| g.flag).collect();
    assert_eq!(flags, vec![RiskFlag::High, RiskFlag::Medium, RiskFlag::Low]);

    let high = summary.risk_group(RiskFlag::High).unwrap();
    assert_eq!(high.count, 2);
    assert_eq!(high.mean_risk_score, Some(85.0));
    assert_eq!(high.mean_tcg, Some(3000.0));
    assert_eq!(high.mean_tan, None);

    let medium = summary.risk_group(RiskFlag::Medium).unwrap();
    assert_eq!(medium.count, 1);
    assert_eq!(medium.mean_risk_score, Some(40.0));

    let low = summary.risk_group(RiskFlag::Low).unwrap();
    assert_eq!(low.count, 2);
    // TCG mean skips the missing value
    assert_eq!(low.mean_tcg, Some(500.0));
}

#[test]
fn test_kpis() {
    let summary = summarize(&sample_cohort());

    assert_eq!(summary.total_records, 5);
    assert_eq!(summary.high_count, 2);
    assert_eq!(summary.medium_count, 1);
    assert_eq!(summary.low_count, 2);
    assert!((summary.high_share - 40.0).abs() < 1e-9);
    assert_eq!(summary.mean_risk_score, Some(44.0));
    assert_eq!(summary.mean_tcg, Some(2000.0));
    assert_eq!(summary.high_tcg_count, 2);

    let strict = summarize_with_threshold(&sample_cohort(), 3000.0);
    assert_eq!(strict.high_tcg_count, 1);
    assert_eq!(strict.high_tcg_threshold, 3000.0);
}

#[test]
fn test_duval_zone_groups_in_first_seen_order() {
    let summary = summarize(&sample_cohort());

    let zones: Vec<DuvalZone> = summary.duval_zones.iter().map(|g| g.zone).collect();
    assert_eq!(
        zones,
        vec![
            DuvalZone::T2MidTemp,
            DuvalZone::D1Corona,
            DuvalZone::InsufficientData
        ]
    );

    let t2 = summary.duval_zone(DuvalZone::T2MidTemp).unwrap();
    assert_eq!(t2.count, 2);
    assert_eq!(t2.mean_risk_score, Some(85.0));
    assert_eq!(t2.mean_tcg, Some(3000.0));

    let corona = summary.duval_zone(DuvalZone::D1Corona).unwrap();
    assert_eq!(corona.mean_tcg, Some(1500.0));
}

#[test]
fn test_dominant_zone_tie_goes_to_first_seen() {
    // T2 and D1 corona both appear twice; T2 appears first
    let summary = summarize(&sample_cohort());
    assert_eq!(summary.dominant_duval_zone, Some(DuvalZone::T2MidTemp));

    let mut reordered = sample_cohort();
    reordered.swap(0, 1);
    let summary = summarize(&reordered);
    assert_eq!(summary.dominant_duval_zone, Some(DuvalZone::D1Corona));
}

#[test]
fn test_dominant_zone_counts_insufficient_data() {
    let records = vec![
        create_enriched("A", "T1", 0, None, DuvalZone::InsufficientData),
        create_enriched("A", "T1", 0, None, DuvalZone::InsufficientData),
        create_enriched("A", "T1", 0, None, DuvalZone::PartialDischarge),
    ];
    assert_eq!(
        summarize(&records).dominant_duval_zone,
        Some(DuvalZone::InsufficientData)
    );

    let only_missing = vec![create_enriched("A", "T1", 0, None, DuvalZone::InsufficientData)];
    assert_eq!(
        summarize(&only_missing).dominant_duval_zone,
        Some(DuvalZone::InsufficientData)
    );

    // Fault zone first, then a missing-data tie: first seen wins
    let tied = vec![
        create_enriched("A", "T1", 0, None, DuvalZone::PartialDischarge),
        create_enriched("A", "T1", 0, None, DuvalZone::InsufficientData),
    ];
    assert_eq!(
        summarize(&tied).dominant_duval_zone,
        Some(DuvalZone::PartialDischarge)
    );
}

#[test]
fn test_date_range_and_ternary_counts() {
    let records = vec![
        create_dated(10, Some("1404-09-28")),
        create_dated(20, None),
        create_dated(30, Some("1404-09-29")),
        create_dated(40, Some("1403-12-01")),
    ];
    let summary = summarize(&records);

    let range = summary.date_range.unwrap();
    assert_eq!(range.first, "1403-12-01");
    assert_eq!(range.last, "1404-09-29");

    assert_eq!(summary.ternary_zones.len(), 1);
    assert_eq!(summary.ternary_zones[0].zone, TernaryZone::Unclassified);
    assert_eq!(summary.ternary_zones[0].count, 4);
}

#[test]
fn test_summarize_does_not_mutate_input() {
    let records = sample_cohort();
    let before = records.clone();
    let _ = summarize(&records);
    assert_eq!(records, before);
}
