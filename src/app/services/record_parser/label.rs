//! Composite sample label parsing
//!
//! Labels look like `6515A T1 SANATI BAHARESTAN 1404-09-29`: site code,
//! equipment id, a station name that may contain spaces, then the sample date.

use crate::constants::{SAMPLE_DATE_PATTERN, SAMPLE_LABEL_PATTERN};
use crate::{Error, Result};
use regex::Regex;

/// Identity fields carried by the label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFields {
    pub site_code: Option<String>,
    pub equipment_id: Option<String>,
    pub station_name: Option<String>,
    pub sample_date: Option<String>,
}

/// How a label was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelParse {
    /// Full pattern matched
    Primary,
    /// Whitespace split; the station name keeps only its first word
    Fallback,
    /// Label absent or blank
    Missing,
}

/// Parser for composite sample labels
#[derive(Debug, Clone)]
pub struct LabelParser {
    label: Regex,
    date: Regex,
}

impl LabelParser {
    pub fn new() -> Result<Self> {
        let label = Regex::new(SAMPLE_LABEL_PATTERN)
            .map_err(|e| Error::pattern(SAMPLE_LABEL_PATTERN, e))?;
        let date =
            Regex::new(SAMPLE_DATE_PATTERN).map_err(|e| Error::pattern(SAMPLE_DATE_PATTERN, e))?;

        Ok(Self { label, date })
    }

    /// Split a label into identity fields
    pub fn parse(&self, raw: Option<&str>) -> (LabelFields, LabelParse) {
        let Some(label) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return (LabelFields::default(), LabelParse::Missing);
        };

        if let Some(caps) = self.label.captures(label) {
            let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
            let fields = LabelFields {
                site_code: group(1),
                equipment_id: group(2),
                station_name: group(3),
                sample_date: group(4),
            };
            return (fields, LabelParse::Primary);
        }

        (self.parse_fallback(label), LabelParse::Fallback)
    }

    fn parse_fallback(&self, label: &str) -> LabelFields {
        let tokens: Vec<&str> = label.split_whitespace().collect();
        let token = |i: usize| tokens.get(i).map(|t| t.to_string());

        let sample_date = if tokens.len() > 3 {
            tokens
                .last()
                .filter(|last| self.date.is_match(last))
                .map(|last| last.to_string())
        } else {
            None
        };

        LabelFields {
            site_code: token(0),
            equipment_id: token(1),
            station_name: token(2),
            sample_date,
        }
    }
}
