//! Built-in demonstration dataset
//!
//! Three samples from three substations, passed through the same parser as
//! uploaded files so that the demo exercises the full pipeline.

use crate::Result;
use crate::app::models::SampleRecord;
use crate::app::services::record_parser::RecordParser;
use polars::prelude::*;

/// Source name used in log lines for the demo table
pub const DEMO_SOURCE: &str = "demo";

/// Demo table in the layout of an oil test export
pub fn demo_frame() -> Result<DataFrame> {
    let df = df!(
        "SampleName" => [
            "6515A T1 SANATI BAHARESTAN 1404-09-29",
            "5165I T2 ANDISHEH3 1404-09-28",
            "7427T T1 HEMATI 1404-09-27",
        ],
        "TCG" => ["1500", "3500", "800"],
        "TAN" => ["0.05", "0.25", "0.08"],
        "BreakdownVoltage" => ["60", "35", "55"],
        "WaterContents" => ["20", "45", "25"],
        "ASROG" => ["بدون عیب", "حالت 5 : خطای حرارتی", "تخلیه جزیی"],
    )?;
    Ok(df)
}

/// Demo samples as parsed records
pub fn demo_records() -> Result<Vec<SampleRecord>> {
    let parser = RecordParser::new()?;
    Ok(parser.parse_frame(&demo_frame()?, DEMO_SOURCE)?.records)
}
