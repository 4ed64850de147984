//! Application constants for the DGA processor
//!
//! This module contains column names, diagnostic thresholds, textual condition
//! markers and default values used throughout the DGA processor.

// =============================================================================
// Input Columns
// =============================================================================

/// Column names recognised in oil test exports
pub mod columns {
    /// Composite label: `<site> <equipment> <station name> <YYYY-MM-DD>`
    pub const SAMPLE_NAME: &str = "SampleName";

    /// Injection timestamp, independent of the label date
    pub const INJ_DATE_TIME: &str = "InjDateTime";

    /// Free-text diagnostic annotation
    pub const CONDITION_NOTES: &str = "ASROG";

    pub const TCG: &str = "TCG";
    pub const TAN: &str = "TAN";
    pub const BREAKDOWN_VOLTAGE: &str = "BreakdownVoltage";
    pub const WATER_CONTENTS: &str = "WaterContents";
    pub const DDF: &str = "DDF";

    pub const HYDROGEN: &str = "H2";
    pub const METHANE: &str = "CH4";
    pub const ETHANE: &str = "C2H6";
    pub const ETHYLENE: &str = "C2H4";
    pub const ACETYLENE: &str = "C2H2";
    pub const CARBON_MONOXIDE: &str = "CO";
    pub const CARBON_DIOXIDE: &str = "CO2";
    pub const PROPANE: &str = "C3H8";
    pub const PROPYLENE: &str = "C3H6";
}

/// Pattern for the composite sample label, anchored at both ends
///
/// Example: `6515A T1 SANATI BAHARESTAN 1404-09-29`
pub const SAMPLE_LABEL_PATTERN: &str = r"^(\S+)\s+(\S+)\s+(.+?)\s+(\d{4}-\d{2}-\d{2})$";

/// Pattern a fallback-parsed date token must match
pub const SAMPLE_DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

/// Timestamp layouts accepted for the injection timestamp column
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts accepted for the injection timestamp column (midnight assumed)
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

// =============================================================================
// Risk Scoring
// =============================================================================

/// Category boundaries and clamp for the additive risk score
pub mod risk {
    /// Scores at or above this are HIGH
    pub const HIGH_THRESHOLD: u32 = 60;

    /// Scores at or above this (and below HIGH) are MEDIUM
    pub const MEDIUM_THRESHOLD: u32 = 35;

    /// Hard upper bound of the score
    pub const MAX_SCORE: u32 = 100;
}

/// Substrings in condition notes that escalate risk
///
/// Each marker lists the source-language wording first, then the English one.
pub mod markers {
    pub const MODE_FIVE: &[&str] = &["حالت 5", "mode 5"];
    pub const THERMAL_DECOMPOSITION: &[&str] = &["تجزیه حرارتی", "thermal decomposition"];
    pub const PARTIAL_DISCHARGE: &[&str] = &["تخلیه جزیی", "partial discharge"];
}

// =============================================================================
// Fault Classification
// =============================================================================

/// Decision boundaries of the simplified Duval Triangle 1
pub mod duval {
    pub const C2H2_LOW: f64 = 4.0;
    pub const C2H2_MID: f64 = 13.0;
    pub const C2H2_HIGH: f64 = 29.0;

    pub const C2H4_PD: f64 = 23.0;
    pub const C2H4_CORONA: f64 = 40.0;
    pub const C2H4_T1: f64 = 13.0;
    pub const C2H4_T3: f64 = 15.0;

    pub const CH4_PD: f64 = 50.0;

    /// Height factor of the unit triangle used for plotting (rounded sin 60°)
    pub const TRIANGLE_HEIGHT: f64 = 0.866;
}

/// Dominance thresholds of the ternary gas-ratio method
pub mod ternary {
    /// Fixed triple reported when every ratio is undefined
    pub const FALLBACK_PERCENT: f64 = 33.33;

    /// A single ratio share above this dominates
    pub const DOMINANCE: f64 = 60.0;

    /// Two ratio shares both above this are mixed
    pub const MIXED: f64 = 40.0;
}

/// Tolerance used when checking that percentages add up to 100
pub const PERCENT_TOLERANCE: f64 = 1e-6;

// =============================================================================
// Reporting, Export and Runtime Defaults
// =============================================================================

/// Number of records in the top-risk listing
pub const DEFAULT_TOP_N: usize = 10;

/// TCG level counted as "high TCG" in the KPI block (ppm)
pub const DEFAULT_HIGH_TCG_THRESHOLD: f64 = 2000.0;

/// Concurrent file loads
pub const DEFAULT_WORKERS: usize = 4;

/// Directory under the user config dir holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "dga-processor";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// File extension of tabular inputs discovered in directories
pub const INPUT_EXTENSION: &str = "csv";
