//! Column mapping for oil test exports
//!
//! Headers are matched against known aliases after normalization (lowercase,
//! separators removed), so `Sample Name`, `sample_name` and `SampleName` all
//! resolve to the same column.

use crate::constants::columns;
use std::collections::HashMap;

/// Canonical column name and its accepted aliases (already normalized)
const ALIASES: &[(&str, &[&str])] = &[
    (columns::SAMPLE_NAME, &["samplename", "sample", "label"]),
    (
        columns::INJ_DATE_TIME,
        &["injdatetime", "injectiondatetime", "injectiondate"],
    ),
    (
        columns::CONDITION_NOTES,
        &["asrog", "conditionnotes", "notes", "diagnosis"],
    ),
    (columns::TCG, &["tcg", "totalcombustiblegas"]),
    (columns::TAN, &["tan", "totalacidnumber", "acidnumber"]),
    (
        columns::BREAKDOWN_VOLTAGE,
        &["breakdownvoltage", "bdv", "dielectricstrength"],
    ),
    (
        columns::WATER_CONTENTS,
        &["watercontents", "watercontent", "water", "moisture"],
    ),
    (columns::DDF, &["ddf", "dissipationfactor", "tandelta"]),
    (columns::HYDROGEN, &["h2", "hydrogen"]),
    (columns::METHANE, &["ch4", "methane"]),
    (columns::ETHANE, &["c2h6", "ethane"]),
    (columns::ETHYLENE, &["c2h4", "ethylene"]),
    (columns::ACETYLENE, &["c2h2", "acetylene"]),
    (columns::CARBON_MONOXIDE, &["co", "carbonmonoxide"]),
    (columns::CARBON_DIOXIDE, &["co2", "carbondioxide"]),
    (columns::PROPANE, &["c3h8", "propane"]),
    (columns::PROPYLENE, &["c3h6", "propylene"]),
];

/// Numeric measurement columns, in output order
pub const MEASUREMENT_COLUMNS: &[&str] = &[
    columns::TCG,
    columns::TAN,
    columns::BREAKDOWN_VOLTAGE,
    columns::WATER_CONTENTS,
    columns::DDF,
    columns::HYDROGEN,
    columns::METHANE,
    columns::ETHANE,
    columns::ETHYLENE,
    columns::ACETYLENE,
    columns::CARBON_MONOXIDE,
    columns::CARBON_DIOXIDE,
    columns::PROPANE,
    columns::PROPYLENE,
];

/// Columns whose absence is worth a warning
pub const EXPECTED_COLUMNS: &[&str] = &[
    columns::INJ_DATE_TIME,
    columns::CONDITION_NOTES,
    columns::TCG,
    columns::TAN,
    columns::BREAKDOWN_VOLTAGE,
    columns::WATER_CONTENTS,
    columns::DDF,
];

/// Resolved mapping from canonical column names to the headers of one table
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    /// Canonical name to the header as it appears in the input
    pub resolved: HashMap<&'static str, String>,

    /// Input headers that matched no known column
    pub unmapped: Vec<String>,
}

impl ColumnMapping {
    /// Analyze headers; the first header matching a canonical column wins
    pub fn analyze<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut resolved: HashMap<&'static str, String> = HashMap::new();
        let mut unmapped = Vec::new();

        for header in headers {
            let header = header.as_ref();
            match canonical_name(header) {
                Some(canonical) => {
                    resolved
                        .entry(canonical)
                        .or_insert_with(|| header.to_string());
                }
                None => unmapped.push(header.to_string()),
            }
        }

        Self { resolved, unmapped }
    }

    /// Input header for a canonical column
    pub fn get(&self, canonical: &str) -> Option<&str> {
        self.resolved.get(canonical).map(String::as_str)
    }

    /// Check if a canonical column is present
    pub fn has_column(&self, canonical: &str) -> bool {
        self.resolved.contains_key(canonical)
    }

    /// Canonical columns from `wanted` that are absent
    pub fn missing(&self, wanted: &[&'static str]) -> Vec<&'static str> {
        wanted
            .iter()
            .copied()
            .filter(|column| !self.has_column(column))
            .collect()
    }
}

/// Canonical column name for an input header, if it is a known alias
pub fn canonical_name(header: &str) -> Option<&'static str> {
    let key = normalize_header(header);
    ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&key.as_str()))
        .map(|(canonical, _)| *canonical)
}

/// Lowercase and strip whitespace, underscores, hyphens and dots
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '_' | '-' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}
