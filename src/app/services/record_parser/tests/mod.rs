//! Tests for the record parser module


use polars::prelude::*;

/// Table with the three reference rows and the scored columns
pub fn create_reference_frame() -> DataFrame {
    df!(
        "SampleName" => [
            "6515A T1 SANATI BAHARESTAN 1404-09-29",
            "5165I T2 ANDISHEH3 1404-09-28",
            "7427T T1 HEMATI 1404-09-27",
        ],
        "InjDateTime" => ["2025-12-20 10:30:00", "2025-12-19", "not a date"],
        "TCG" => ["1500", "3500", "800"],
        "TAN" => ["0.05", "0.25", "0.08"],
        "BreakdownVoltage" => ["60", "35", "55"],
        "WaterContents" => ["20", "45", "25"],
        "DDF" => ["0.01", "0.02", "0.01"],
        "ASROG" => ["بدون عیب", "حالت 5 : خطای حرارتی", "تخلیه جزیی"],
    )
    .unwrap()
}
