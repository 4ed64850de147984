//! Cohort filtering and ranking

use crate::app::models::EnrichedRecord;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Conjunctive filter over enriched records; unset criteria match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub station_name: Option<String>,
    pub equipment_id: Option<String>,
    /// Inclusive risk score range
    pub risk_range: Option<RangeInclusive<u32>>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_station(mut self, station: impl Into<String>) -> Self {
        self.station_name = Some(station.into());
        self
    }

    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment_id = Some(equipment.into());
        self
    }

    pub fn with_risk_range(mut self, min: u32, max: u32) -> Self {
        self.risk_range = Some(min..=max);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.station_name.is_none() && self.equipment_id.is_none() && self.risk_range.is_none()
    }

    /// Check one record against every set criterion
    pub fn matches(&self, record: &EnrichedRecord) -> bool {
        let station_ok = self
            .station_name
            .as_deref()
            .is_none_or(|s| record.station_name() == Some(s));
        let equipment_ok = self
            .equipment_id
            .as_deref()
            .is_none_or(|e| record.equipment_id() == Some(e));
        let risk_ok = self
            .risk_range
            .as_ref()
            .is_none_or(|range| range.contains(&record.risk_score));

        station_ok && equipment_ok && risk_ok
    }

    /// Matching records, in input order
    pub fn apply<'a>(&self, records: &'a [EnrichedRecord]) -> Vec<&'a EnrichedRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Sorted distinct station names
pub fn distinct_stations(records: &[EnrichedRecord]) -> Vec<String> {
    distinct(records.iter().filter_map(|r| r.station_name()))
}

/// Sorted distinct equipment ids
pub fn distinct_equipment(records: &[EnrichedRecord]) -> Vec<String> {
    distinct(records.iter().filter_map(|r| r.equipment_id()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Highest risk scores first; equal scores keep input order
pub fn top_by_risk<'a, I>(records: I, n: usize) -> Vec<&'a EnrichedRecord>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    let mut ranked: Vec<&EnrichedRecord> = records.into_iter().collect();
    ranked.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    ranked.truncate(n);
    ranked
}
