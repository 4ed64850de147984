//! Field parsing utilities for oil test records
//!
//! Every function here is total: a value that cannot be interpreted becomes
//! `None`, never an error.

use crate::constants::{DATE_FORMATS, DATETIME_FORMATS};
use chrono::{NaiveDate, NaiveDateTime};

/// Outcome of coercing one cell to a number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    /// Parsed to a usable value
    Value(f64),
    /// Empty cell
    Empty,
    /// Non-empty cell that could not be used
    Invalid,
}

impl Coerced {
    pub fn value(self) -> Option<f64> {
        match self {
            Coerced::Value(v) => Some(v),
            Coerced::Empty | Coerced::Invalid => None,
        }
    }
}

/// Coerce a cell to a non-negative finite number
///
/// Negative readings are treated as invalid: concentrations, voltages and
/// acid numbers cannot be below zero.
pub fn coerce_numeric(raw: Option<&str>) -> Coerced {
    let Some(text) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Coerced::Empty;
    };

    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Coerced::Value(v),
        _ => Coerced::Invalid,
    }
}

/// Parse an injection timestamp; date-only values are taken at midnight
pub fn parse_datetime(raw: Option<&str>) -> Option<NaiveDateTime> {
    let text = raw.map(str::trim).filter(|s| !s.is_empty())?;

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Trimmed text, `None` when blank
pub fn clean_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
