//! Simplified Duval Triangle 1 classification
//!
//! Shares are taken over CH4 + C2H6 + C2H4 + C2H2 but only the CH4, C2H4 and
//! C2H2 shares form the triangle coordinates. The zone is decided on those raw
//! shares; the reported coordinates are the same shares rescaled to sum to 100.

use crate::app::models::{DuvalPercentages, DuvalResult, DuvalZone, GasConcentrations};
use crate::constants::duval::{
    C2H2_HIGH, C2H2_LOW, C2H2_MID, C2H4_CORONA, C2H4_PD, C2H4_T1, C2H4_T3, CH4_PD,
    TRIANGLE_HEIGHT,
};
use tracing::trace;

/// Classify a gas set on the simplified Duval Triangle 1
///
/// Any of CH4, C2H6, C2H4 or C2H2 missing, or a zero four-gas total, gives
/// [`DuvalResult::insufficient`].
pub fn classify_duval(gases: &GasConcentrations) -> DuvalResult {
    let (Some(ch4), Some(c2h6), Some(c2h4), Some(c2h2)) =
        (gases.methane, gases.ethane, gases.ethylene, gases.acetylene)
    else {
        return DuvalResult::insufficient();
    };

    let total = ch4 + c2h6 + c2h4 + c2h2;
    if total == 0.0 || !total.is_finite() {
        return DuvalResult::insufficient();
    }

    let raw = DuvalPercentages {
        ch4: ch4 / total * 100.0,
        c2h4: c2h4 / total * 100.0,
        c2h2: c2h2 / total * 100.0,
    };
    let zone = zone_for(&raw);

    trace!(
        "Duval raw shares CH4={:.2} C2H4={:.2} C2H2={:.2} -> {}",
        raw.ch4, raw.c2h4, raw.c2h2, zone
    );

    DuvalResult {
        raw_percentages: Some(raw),
        percentages: rescale(&raw),
        zone,
    }
}

/// Zone for a set of shares, first matching rule wins
pub fn zone_for(pct: &DuvalPercentages) -> DuvalZone {
    if pct.c2h2 < C2H2_LOW {
        if pct.c2h4 < C2H4_PD {
            if pct.ch4 < CH4_PD {
                DuvalZone::PartialDischarge
            } else {
                DuvalZone::PartialDischargeWithArcing
            }
        } else if pct.c2h4 < C2H4_CORONA {
            DuvalZone::D1Corona
        } else {
            DuvalZone::D2HighEnergy
        }
    } else if pct.c2h2 < C2H2_MID {
        DuvalZone::D1LowEnergy
    } else if pct.c2h2 < C2H2_HIGH {
        if pct.c2h4 < C2H4_T1 {
            DuvalZone::T1LowTemp
        } else {
            DuvalZone::T2MidTemp
        }
    } else if pct.c2h4 < C2H4_T3 {
        DuvalZone::T3HighTemp
    } else {
        DuvalZone::DtMixed
    }
}

/// Plot position of a triangle point
///
/// `x = 0.5 * C2H4 + C2H2`, `y = 0.866 * C2H4`. The CH4 share does not enter
/// the formula; it is accepted so callers can pass a full triple.
pub fn duval_projection(_ch4_pct: f64, c2h4_pct: f64, c2h2_pct: f64) -> (f64, f64) {
    (0.5 * c2h4_pct + c2h2_pct, TRIANGLE_HEIGHT * c2h4_pct)
}

/// Rescale the three shares so they sum to 100
fn rescale(raw: &DuvalPercentages) -> Option<DuvalPercentages> {
    let sum = raw.sum();
    if sum <= 0.0 {
        // Only ethane present: there is no point on the triangle
        return None;
    }

    let factor = 100.0 / sum;
    Some(DuvalPercentages {
        ch4: raw.ch4 * factor,
        c2h4: raw.c2h4 * factor,
        c2h2: raw.c2h2 * factor,
    })
}
