//! Conversion of a loaded table into sample records

use super::column_mapping::{ColumnMapping, EXPECTED_COLUMNS, MEASUREMENT_COLUMNS};
use super::field_parsers::{Coerced, clean_text, coerce_numeric, parse_datetime};
use super::label::{LabelParse, LabelParser};
use super::stats::{ParseResult, ParseStats};
use crate::app::models::SampleRecord;
use crate::constants::columns;
use crate::{Error, Result};
use polars::prelude::*;
use tracing::{debug, info, warn};

/// Parser turning oil test tables into [`SampleRecord`]s
#[derive(Debug, Clone)]
pub struct RecordParser {
    labels: LabelParser,
}

impl RecordParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            labels: LabelParser::new()?,
        })
    }

    /// Parse every row of a table
    ///
    /// Fails only when the table has no sample label column. Cells that cannot
    /// be interpreted become missing values.
    pub fn parse_frame(&self, df: &DataFrame, source_name: &str) -> Result<ParseResult> {
        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let mapping = ColumnMapping::analyze(headers.as_slice());

        let Some(label_column) = mapping.get(columns::SAMPLE_NAME) else {
            return Err(Error::missing_column(
                columns::SAMPLE_NAME,
                source_name,
                &headers,
            ));
        };

        let mut stats = ParseStats::new();
        stats.total_rows = df.height();

        let missing = mapping.missing(EXPECTED_COLUMNS);
        if !missing.is_empty() {
            debug!(
                "{}: columns not found, values will be missing: {}",
                source_name,
                missing.join(", ")
            );
            stats.missing_columns = missing.iter().map(|c| c.to_string()).collect();
        }
        if !mapping.unmapped.is_empty() {
            debug!(
                "{}: ignoring unrecognised columns: {}",
                source_name,
                mapping.unmapped.join(", ")
            );
        }

        let labels = text_column(df, label_column)?;
        let timestamps = optional_text_column(df, &mapping, columns::INJ_DATE_TIME)?;
        let notes = optional_text_column(df, &mapping, columns::CONDITION_NOTES)?;

        let mut measurements: Vec<(&'static str, Vec<Option<String>>)> = Vec::new();
        for &column in MEASUREMENT_COLUMNS {
            if let Some(values) = optional_text_column(df, &mapping, column)? {
                measurements.push((column, values));
            }
        }

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let (fields, how) = self.labels.parse(labels[row].as_deref());
            match how {
                LabelParse::Primary => stats.primary_labels += 1,
                LabelParse::Fallback => {
                    stats.fallback_labels += 1;
                    debug!(
                        "{} row {}: label '{}' parsed by whitespace split",
                        source_name,
                        row + 1,
                        labels[row].as_deref().unwrap_or_default()
                    );
                }
                LabelParse::Missing => stats.missing_labels += 1,
            }

            let mut record = SampleRecord {
                site_code: fields.site_code,
                equipment_id: fields.equipment_id,
                station_name: fields.station_name,
                sample_date: fields.sample_date,
                sample_datetime: cell(&timestamps, row).and_then(|s| parse_datetime(Some(s))),
                condition_notes: cell(&notes, row).and_then(|s| clean_text(Some(s))),
                ..Default::default()
            };

            for (column, values) in &measurements {
                let coerced = coerce_numeric(values[row].as_deref());
                if coerced == Coerced::Invalid {
                    stats.cells_coerced_to_null += 1;
                }
                assign_measurement(&mut record, column, coerced.value());
            }

            records.push(record);
        }

        if stats.fallback_labels > 0 {
            warn!(
                "{}: {} of {} labels did not match the full pattern; station names may be truncated",
                source_name, stats.fallback_labels, stats.total_rows
            );
        }
        info!("{}: {}", source_name, stats.summary());

        Ok(ParseResult { records, stats })
    }
}

/// Store a coerced value in the field backing a canonical column
fn assign_measurement(record: &mut SampleRecord, column: &str, value: Option<f64>) {
    let slot = match column {
        columns::TCG => &mut record.oil.total_combustible_gas,
        columns::TAN => &mut record.oil.acid_number,
        columns::BREAKDOWN_VOLTAGE => &mut record.oil.breakdown_voltage,
        columns::WATER_CONTENTS => &mut record.oil.water_content,
        columns::DDF => &mut record.oil.dissipation_factor,
        columns::HYDROGEN => &mut record.gases.hydrogen,
        columns::METHANE => &mut record.gases.methane,
        columns::ETHANE => &mut record.gases.ethane,
        columns::ETHYLENE => &mut record.gases.ethylene,
        columns::ACETYLENE => &mut record.gases.acetylene,
        columns::CARBON_MONOXIDE => &mut record.gases.carbon_monoxide,
        columns::CARBON_DIOXIDE => &mut record.gases.carbon_dioxide,
        columns::PROPANE => &mut record.gases.propane,
        columns::PROPYLENE => &mut record.gases.propylene,
        _ => return,
    };
    *slot = value;
}

fn cell(values: &Option<Vec<Option<String>>>, row: usize) -> Option<&str> {
    values.as_ref().and_then(|v| v[row].as_deref())
}

fn optional_text_column(
    df: &DataFrame,
    mapping: &ColumnMapping,
    canonical: &str,
) -> Result<Option<Vec<Option<String>>>> {
    mapping
        .get(canonical)
        .map(|name| text_column(df, name))
        .transpose()
}

/// Read a column as text regardless of its inferred dtype
fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)
        .map_err(|e| Error::table(format!("Failed to read column '{}'", name), e))?
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(|e| Error::table(format!("Failed to read column '{}' as text", name), e))?;

    let values = series
        .str()
        .map_err(|e| Error::table(format!("Column '{}' is not text", name), e))?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();

    Ok(values)
}
