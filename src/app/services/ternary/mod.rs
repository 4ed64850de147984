//! Ternary gas-ratio classification
//!
//! Three diagnostic ratios (H2/CH4, C2H4/C2H6, C2H2/C2H4) are normalized to
//! shares of 100 and the record is assigned a coarse category by dominance.
//! Unlike the Duval classifier, a zero ratio total is not a missing result: it
//! yields a fixed even split.

use crate::app::models::{GasConcentrations, TernaryPercentages, TernaryResult, TernaryZone};
use crate::constants::ternary::{DOMINANCE, FALLBACK_PERCENT, MIXED};
use tracing::trace;

/// Classify a gas set by the ternary ratio method
///
/// Any of H2, CH4, C2H6, C2H4 or C2H2 missing gives
/// [`TernaryResult::insufficient`].
pub fn classify_ternary(gases: &GasConcentrations) -> TernaryResult {
    let (Some(h2), Some(ch4), Some(c2h6), Some(c2h4), Some(c2h2)) = (
        gases.hydrogen,
        gases.methane,
        gases.ethane,
        gases.ethylene,
        gases.acetylene,
    ) else {
        return TernaryResult::insufficient();
    };

    let ratios = [
        safe_divide(h2, ch4),
        safe_divide(c2h4, c2h6),
        safe_divide(c2h2, c2h4),
    ];

    let percentages = normalize(ratios);
    let zone = zone_for(&percentages);

    trace!(
        "Ternary shares p1={:.2} p2={:.2} p3={:.2} -> {}",
        percentages.p1, percentages.p2, percentages.p3, zone
    );

    TernaryResult {
        percentages: Some(percentages),
        zone,
    }
}

/// Divide, returning 0 when the denominator is 0
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Shares of the ratio total, normalized twice; fixed split on a zero total
///
/// Ratios are scaled by the largest one before summing so the total cannot
/// overflow. Infinite ratios (a denormal denominator) share 100 between them.
fn normalize(ratios: [f64; 3]) -> TernaryPercentages {
    let ratios = if ratios.iter().any(|r| r.is_infinite()) {
        ratios.map(|r| if r.is_infinite() { 1.0 } else { 0.0 })
    } else {
        let largest = ratios.iter().copied().fold(0.0, f64::max);
        if largest > 0.0 {
            ratios.map(|r| r / largest)
        } else {
            ratios
        }
    };

    let total: f64 = ratios.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return fallback();
    }

    let first = ratios.map(|r| r / total * 100.0);

    let second_total: f64 = first.iter().sum();
    let [p1, p2, p3] = first.map(|p| p / second_total * 100.0);

    TernaryPercentages { p1, p2, p3 }
}

fn fallback() -> TernaryPercentages {
    TernaryPercentages {
        p1: FALLBACK_PERCENT,
        p2: FALLBACK_PERCENT,
        p3: FALLBACK_PERCENT,
    }
}

/// Dominance category, evaluated in order
pub fn zone_for(pct: &TernaryPercentages) -> TernaryZone {
    if pct.p1 > DOMINANCE {
        TernaryZone::PartialDischargeDominant
    } else if pct.p2 > DOMINANCE {
        TernaryZone::ThermalDominant
    } else if pct.p3 > DOMINANCE {
        TernaryZone::HighEnergyDischargeDominant
    } else if pct.p1 > MIXED && pct.p2 > MIXED {
        TernaryZone::MixedDischargeThermal
    } else {
        TernaryZone::Unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PERCENT_TOLERANCE;

    #[test]
    fn test_safe_divide() {
        assert_eq!(safe_divide(10.0, 0.0), 0.0);
        assert_eq!(safe_divide(10.0, 4.0), 2.5);
        assert_eq!(safe_divide(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_all_zero_gases_give_fixed_split() {
        let gases = GasConcentrations::key_gases(0.0, 0.0, 0.0, 0.0, 0.0);
        let result = classify_ternary(&gases);

        let pct = result.percentages.unwrap();
        assert_eq!((pct.p1, pct.p2, pct.p3), (33.33, 33.33, 33.33));
        assert_eq!(result.zone, TernaryZone::Unclassified);
    }

    #[test]
    fn test_missing_gas_gives_null_triple() {
        let mut gases = GasConcentrations::key_gases(10.0, 20.0, 30.0, 40.0, 50.0);
        gases.hydrogen = None;

        let result = classify_ternary(&gases);
        assert!(result.percentages.is_none());
        assert_eq!(result.zone, TernaryZone::InsufficientData);
    }

    #[test]
    fn test_nonzero_total_sums_to_hundred() {
        let samples = [
            (100.0, 10.0, 5.0, 20.0, 1.0),
            (1.0, 1.0, 1.0, 1.0, 1.0),
            (0.0, 3.0, 7.0, 1.0, 9.0),
            (33.0, 0.0, 0.0, 12.0, 0.5),
        ];
        for (h2, ch4, c2h6, c2h4, c2h2) in samples {
            let result = classify_ternary(&GasConcentrations::key_gases(h2, ch4, c2h6, c2h4, c2h2));
            let pct = result.percentages.unwrap();
            assert!((pct.sum() - 100.0).abs() < PERCENT_TOLERANCE);
        }
    }

    #[test]
    fn test_hydrogen_rich_sample_is_partial_discharge() {
        // r1 = 10, r2 = 1, r3 = 0.1
        let gases = GasConcentrations::key_gases(100.0, 10.0, 10.0, 10.0, 1.0);
        assert_eq!(
            classify_ternary(&gases).zone,
            TernaryZone::PartialDischargeDominant
        );
    }

    #[test]
    fn test_ethylene_rich_sample_is_thermal() {
        // r1 = 0.5, r2 = 10, r3 = 0.01
        let gases = GasConcentrations::key_gases(5.0, 10.0, 10.0, 100.0, 1.0);
        assert_eq!(classify_ternary(&gases).zone, TernaryZone::ThermalDominant);
    }

    #[test]
    fn test_acetylene_rich_sample_is_high_energy() {
        // r1 = 0.1, r2 = 0.5, r3 = 5
        let gases = GasConcentrations::key_gases(1.0, 10.0, 20.0, 10.0, 50.0);
        assert_eq!(
            classify_ternary(&gases).zone,
            TernaryZone::HighEnergyDischargeDominant
        );
    }

    #[test]
    fn test_infinite_ratio_dominates() {
        // C2H4 / C2H6 overflows to infinity
        let gases = GasConcentrations::key_gases(1.0, 1.0, 1e-320, 1e10, 0.0);
        let result = classify_ternary(&gases);

        let pct = result.percentages.unwrap();
        assert_eq!((pct.p1, pct.p2, pct.p3), (0.0, 100.0, 0.0));
        assert_eq!(result.zone, TernaryZone::ThermalDominant);
    }

    #[test]
    fn test_large_finite_ratios_do_not_overflow_total() {
        // r1 = r2 = 1.5e308, so their plain sum is infinite
        let gases = GasConcentrations::key_gases(1.5e308, 1.0, 1.0, 1.5e308, 0.0);
        let result = classify_ternary(&gases);

        let pct = result.percentages.unwrap();
        assert!((pct.p1 - 50.0).abs() < PERCENT_TOLERANCE);
        assert!((pct.p2 - 50.0).abs() < PERCENT_TOLERANCE);
        assert_eq!(result.zone, TernaryZone::MixedDischargeThermal);
    }

    #[test]
    fn test_zone_order() {
        let zone = |p1, p2, p3| zone_for(&TernaryPercentages { p1, p2, p3 });

        assert_eq!(zone(45.0, 45.0, 10.0), TernaryZone::MixedDischargeThermal);
        assert_eq!(zone(40.0, 50.0, 10.0), TernaryZone::Unclassified);
        assert_eq!(zone(60.0, 20.0, 20.0), TernaryZone::Unclassified);
        assert_eq!(zone(60.1, 20.0, 19.9), TernaryZone::PartialDischargeDominant);
    }
}
