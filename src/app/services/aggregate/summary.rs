//! Cohort summaries over classified records

use crate::app::models::{DuvalZone, EnrichedRecord, RiskFlag, TernaryZone};
use crate::constants::DEFAULT_HIGH_TCG_THRESHOLD;
use serde::Serialize;

/// Statistics for one risk category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskGroup {
    pub flag: RiskFlag,
    pub count: usize,
    pub mean_risk_score: Option<f64>,
    pub mean_tcg: Option<f64>,
    pub mean_tan: Option<f64>,
    pub mean_breakdown_voltage: Option<f64>,
}

/// Statistics for one Duval zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneGroup {
    pub zone: DuvalZone,
    pub count: usize,
    pub mean_risk_score: Option<f64>,
    pub mean_tcg: Option<f64>,
}

/// Record count for one ternary zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TernaryZoneCount {
    pub zone: TernaryZone,
    pub count: usize,
}

/// Earliest and latest label dates (compared as `YYYY-MM-DD` text)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub first: String,
    pub last: String,
}

/// Summary of a cohort of classified records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub total_records: usize,
    pub high_count: usize,
    /// HIGH records as a percentage of all records
    pub high_share: f64,
    pub medium_count: usize,
    pub low_count: usize,
    pub mean_risk_score: Option<f64>,
    pub mean_tcg: Option<f64>,
    pub high_tcg_threshold: f64,
    /// Records with TCG strictly above `high_tcg_threshold`
    pub high_tcg_count: usize,
    pub date_range: Option<DateRange>,

    /// Always HIGH, MEDIUM, LOW in that order, empty groups included
    pub risk_groups: Vec<RiskGroup>,

    /// Zones in order of first appearance
    pub duval_zones: Vec<ZoneGroup>,

    /// Most frequent Duval zone, INSUFFICIENT_DATA included; ties go to the
    /// zone seen first
    pub dominant_duval_zone: Option<DuvalZone>,

    /// Zones in order of first appearance
    pub ternary_zones: Vec<TernaryZoneCount>,
}

impl AggregateSummary {
    /// Group for a risk category
    pub fn risk_group(&self, flag: RiskFlag) -> Option<&RiskGroup> {
        self.risk_groups.iter().find(|g| g.flag == flag)
    }

    /// Group for a Duval zone, if any record fell in it
    pub fn duval_zone(&self, zone: DuvalZone) -> Option<&ZoneGroup> {
        self.duval_zones.iter().find(|g| g.zone == zone)
    }

    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

/// Summarize records with the default elevated-TCG threshold
pub fn summarize(records: &[EnrichedRecord]) -> AggregateSummary {
    summarize_with_threshold(records, DEFAULT_HIGH_TCG_THRESHOLD)
}

/// Summarize records; never modifies them and accepts an empty slice
pub fn summarize_with_threshold(
    records: &[EnrichedRecord],
    high_tcg_threshold: f64,
) -> AggregateSummary {
    let risk_groups: Vec<RiskGroup> = RiskFlag::all_values()
        .into_iter()
        .map(|flag| risk_group(records, flag))
        .collect();

    let count_of = |flag: RiskFlag| {
        risk_groups
            .iter()
            .find(|g| g.flag == flag)
            .map_or(0, |g| g.count)
    };
    let high_count = count_of(RiskFlag::High);
    let medium_count = count_of(RiskFlag::Medium);
    let low_count = count_of(RiskFlag::Low);

    let total_records = records.len();
    let high_share = if total_records == 0 {
        0.0
    } else {
        high_count as f64 / total_records as f64 * 100.0
    };

    let duval_zones = duval_groups(records);
    let dominant_duval_zone = duval_zones
        .iter()
        .fold(None::<&ZoneGroup>, |best, group| match best {
            Some(b) if b.count >= group.count => Some(b),
            _ => Some(group),
        })
        .map(|g| g.zone);

    AggregateSummary {
        total_records,
        high_count,
        high_share,
        medium_count,
        low_count,
        mean_risk_score: mean(records.iter().map(|r| Some(r.risk_score as f64))),
        mean_tcg: mean(records.iter().map(|r| r.total_combustible_gas())),
        high_tcg_threshold,
        high_tcg_count: records
            .iter()
            .filter(|r| r.total_combustible_gas().is_some_and(|v| v > high_tcg_threshold))
            .count(),
        date_range: date_range(records),
        risk_groups,
        duval_zones,
        dominant_duval_zone,
        ternary_zones: ternary_counts(records),
    }
}

fn risk_group(records: &[EnrichedRecord], flag: RiskFlag) -> RiskGroup {
    let members: Vec<&EnrichedRecord> = records.iter().filter(|r| r.risk_flag == flag).collect();

    RiskGroup {
        flag,
        count: members.len(),
        mean_risk_score: mean(members.iter().map(|r| Some(r.risk_score as f64))),
        mean_tcg: mean(members.iter().map(|r| r.record.oil.total_combustible_gas)),
        mean_tan: mean(members.iter().map(|r| r.record.oil.acid_number)),
        mean_breakdown_voltage: mean(members.iter().map(|r| r.record.oil.breakdown_voltage)),
    }
}

fn duval_groups(records: &[EnrichedRecord]) -> Vec<ZoneGroup> {
    let mut order: Vec<DuvalZone> = Vec::new();
    for record in records {
        if !order.contains(&record.duval.zone) {
            order.push(record.duval.zone);
        }
    }

    order
        .into_iter()
        .map(|zone| {
            let members: Vec<&EnrichedRecord> =
                records.iter().filter(|r| r.duval.zone == zone).collect();
            ZoneGroup {
                zone,
                count: members.len(),
                mean_risk_score: mean(members.iter().map(|r| Some(r.risk_score as f64))),
                mean_tcg: mean(members.iter().map(|r| r.total_combustible_gas())),
            }
        })
        .collect()
}

fn ternary_counts(records: &[EnrichedRecord]) -> Vec<TernaryZoneCount> {
    let mut counts: Vec<TernaryZoneCount> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|c| c.zone == record.ternary.zone) {
            Some(entry) => entry.count += 1,
            None => counts.push(TernaryZoneCount {
                zone: record.ternary.zone,
                count: 1,
            }),
        }
    }
    counts
}

fn date_range(records: &[EnrichedRecord]) -> Option<DateRange> {
    let dates = || {
        records
            .iter()
            .filter_map(|r| r.record.sample_date.as_deref())
    };

    let first = dates().min()?;
    let last = dates().max()?;
    Some(DateRange {
        first: first.to_string(),
        last: last.to_string(),
    })
}

/// Mean of the present values; `None` when there are none
fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
