//! Aggregate reporting over classified records
//!
//! - [`summary`] - Risk category groups, Duval zone distribution, KPIs
//! - [`filters`] - Cohort filters, filter options and top-N ranking

pub mod filters;
pub mod summary;

#[cfg(test)]
pub mod tests;

pub use filters::{RecordFilter, distinct_equipment, distinct_stations, top_by_risk};
pub use summary::{
    AggregateSummary, DateRange, RiskGroup, TernaryZoneCount, ZoneGroup, summarize,
    summarize_with_threshold,
};
