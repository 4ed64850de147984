//! Data models for DGA processing
//!
//! This module contains the core data structures for transformer oil sample
//! records and the diagnostic results derived from them: risk categories,
//! Duval Triangle zones and ternary gas-ratio zones.

use crate::constants::columns;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Measurements
// =============================================================================

/// Oil quality measurements, each optional
///
/// Units: TCG in ppm, TAN in mg KOH/g, breakdown voltage in kV,
/// water content in ppm, DDF dimensionless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OilQuality {
    /// Total combustible gas
    pub total_combustible_gas: Option<f64>,

    /// Total acid number
    pub acid_number: Option<f64>,

    /// Dielectric breakdown voltage
    pub breakdown_voltage: Option<f64>,

    /// Dissolved water content
    pub water_content: Option<f64>,

    /// Dielectric dissipation factor
    pub dissipation_factor: Option<f64>,
}

/// Dissolved gas concentrations in ppm, each optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GasConcentrations {
    pub hydrogen: Option<f64>,
    pub methane: Option<f64>,
    pub ethane: Option<f64>,
    pub ethylene: Option<f64>,
    pub acetylene: Option<f64>,
    pub carbon_monoxide: Option<f64>,
    pub carbon_dioxide: Option<f64>,
    pub propane: Option<f64>,
    pub propylene: Option<f64>,
}

impl GasConcentrations {
    /// Gas set with only the four Duval hydrocarbons populated
    pub fn duval(methane: f64, ethane: f64, ethylene: f64, acetylene: f64) -> Self {
        Self {
            methane: Some(methane),
            ethane: Some(ethane),
            ethylene: Some(ethylene),
            acetylene: Some(acetylene),
            ..Default::default()
        }
    }

    /// Gas set with the five key gases used by the ratio methods
    pub fn key_gases(
        hydrogen: f64,
        methane: f64,
        ethane: f64,
        ethylene: f64,
        acetylene: f64,
    ) -> Self {
        Self {
            hydrogen: Some(hydrogen),
            ..Self::duval(methane, ethane, ethylene, acetylene)
        }
    }

    /// Look up a concentration by its column name (formula spelling)
    pub fn get(&self, column: &str) -> Option<f64> {
        match column {
            columns::HYDROGEN => self.hydrogen,
            columns::METHANE => self.methane,
            columns::ETHANE => self.ethane,
            columns::ETHYLENE => self.ethylene,
            columns::ACETYLENE => self.acetylene,
            columns::CARBON_MONOXIDE => self.carbon_monoxide,
            columns::CARBON_DIOXIDE => self.carbon_dioxide,
            columns::PROPANE => self.propane,
            columns::PROPYLENE => self.propylene,
            _ => None,
        }
    }
}

// =============================================================================
// Sample Record
// =============================================================================

/// One oil/gas test result for one transformer at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Equipment site identifier, first label token
    pub site_code: Option<String>,

    /// Transformer identifier, second label token
    pub equipment_id: Option<String>,

    /// Station name, may contain spaces
    pub station_name: Option<String>,

    /// Label date as written (`YYYY-MM-DD`, calendar not interpreted)
    pub sample_date: Option<String>,

    /// Independently sourced injection timestamp
    pub sample_datetime: Option<NaiveDateTime>,

    pub oil: OilQuality,

    pub gases: GasConcentrations,

    /// Free-text diagnostic annotation
    pub condition_notes: Option<String>,
}

impl SampleRecord {
    /// Identity string for log lines
    pub fn display_id(&self) -> String {
        format!(
            "{}/{}",
            self.site_code.as_deref().unwrap_or("?"),
            self.equipment_id.as_deref().unwrap_or("?")
        )
    }
}

// =============================================================================
// Risk Category
// =============================================================================

/// Three-level risk category derived from the risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskFlag {
    Low,
    Medium,
    High,
}

impl RiskFlag {
    /// Map a score onto a category using inclusive lower bounds
    pub fn from_score(score: u32, high_threshold: u32, medium_threshold: u32) -> Self {
        if score >= high_threshold {
            RiskFlag::High
        } else if score >= medium_threshold {
            RiskFlag::Medium
        } else {
            RiskFlag::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskFlag::Low => "LOW",
            RiskFlag::Medium => "MEDIUM",
            RiskFlag::High => "HIGH",
        }
    }

    /// Traffic-light symbol used by dashboards
    pub fn symbol(self) -> &'static str {
        match self {
            RiskFlag::Low => "🟢",
            RiskFlag::Medium => "🟡",
            RiskFlag::High => "🔴",
        }
    }

    /// Categories from most to least severe
    pub fn all_values() -> [RiskFlag; 3] {
        [RiskFlag::High, RiskFlag::Medium, RiskFlag::Low]
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskFlag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(RiskFlag::Low),
            "MEDIUM" => Ok(RiskFlag::Medium),
            "HIGH" => Ok(RiskFlag::High),
            _ => Err(Error::data_validation(format!(
                "Invalid risk flag '{}': must be LOW, MEDIUM or HIGH",
                s
            ))),
        }
    }
}

// =============================================================================
// Duval Triangle
// =============================================================================

/// Fault zones of the simplified Duval Triangle 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuvalZone {
    #[serde(rename = "PD")]
    PartialDischarge,
    #[serde(rename = "PD_with_arcing")]
    PartialDischargeWithArcing,
    #[serde(rename = "D1_corona")]
    D1Corona,
    #[serde(rename = "D2_high_energy")]
    D2HighEnergy,
    #[serde(rename = "D1_low_energy")]
    D1LowEnergy,
    #[serde(rename = "T1_low_temp")]
    T1LowTemp,
    #[serde(rename = "T2_mid_temp")]
    T2MidTemp,
    #[serde(rename = "T3_high_temp")]
    T3HighTemp,
    #[serde(rename = "DT_mixed")]
    DtMixed,
    #[serde(rename = "INSUFFICIENT_DATA")]
    InsufficientData,
}

impl DuvalZone {
    pub fn as_str(self) -> &'static str {
        match self {
            DuvalZone::PartialDischarge => "PD",
            DuvalZone::PartialDischargeWithArcing => "PD_with_arcing",
            DuvalZone::D1Corona => "D1_corona",
            DuvalZone::D2HighEnergy => "D2_high_energy",
            DuvalZone::D1LowEnergy => "D1_low_energy",
            DuvalZone::T1LowTemp => "T1_low_temp",
            DuvalZone::T2MidTemp => "T2_mid_temp",
            DuvalZone::T3HighTemp => "T3_high_temp",
            DuvalZone::DtMixed => "DT_mixed",
            DuvalZone::InsufficientData => "INSUFFICIENT_DATA",
        }
    }

    /// True for every zone except the insufficient-data sentinel
    pub fn is_fault_zone(self) -> bool {
        self != DuvalZone::InsufficientData
    }
}

impl fmt::Display for DuvalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative shares of CH4, C2H4 and C2H2 in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuvalPercentages {
    pub ch4: f64,
    pub c2h4: f64,
    pub c2h2: f64,
}

impl DuvalPercentages {
    pub fn sum(&self) -> f64 {
        self.ch4 + self.c2h4 + self.c2h2
    }
}

/// Outcome of the Duval classification for one record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuvalResult {
    /// Shares over the four-gas total (ethane included in the denominator).
    /// These drive the zone decision.
    pub raw_percentages: Option<DuvalPercentages>,

    /// Reported triangle coordinates, rescaled to sum to 100
    pub percentages: Option<DuvalPercentages>,

    pub zone: DuvalZone,
}

impl DuvalResult {
    pub fn insufficient() -> Self {
        Self {
            raw_percentages: None,
            percentages: None,
            zone: DuvalZone::InsufficientData,
        }
    }
}

// =============================================================================
// Ternary Ratio Method
// =============================================================================

/// Coarse fault categories of the ternary ratio method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TernaryZone {
    PartialDischargeDominant,
    ThermalDominant,
    HighEnergyDischargeDominant,
    MixedDischargeThermal,
    Unclassified,
    #[serde(rename = "INSUFFICIENT_DATA")]
    InsufficientData,
}

impl TernaryZone {
    pub fn as_str(self) -> &'static str {
        match self {
            TernaryZone::PartialDischargeDominant => "partial_discharge_dominant",
            TernaryZone::ThermalDominant => "thermal_dominant",
            TernaryZone::HighEnergyDischargeDominant => "high_energy_discharge_dominant",
            TernaryZone::MixedDischargeThermal => "mixed_discharge_thermal",
            TernaryZone::Unclassified => "unclassified",
            TernaryZone::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

impl fmt::Display for TernaryZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized shares of the three diagnostic ratios
///
/// `p1` is H2/CH4, `p2` is C2H4/C2H6, `p3` is C2H2/C2H4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TernaryPercentages {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
}

impl TernaryPercentages {
    pub fn sum(&self) -> f64 {
        self.p1 + self.p2 + self.p3
    }
}

/// Outcome of the ternary ratio classification for one record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TernaryResult {
    pub percentages: Option<TernaryPercentages>,
    pub zone: TernaryZone,
}

impl TernaryResult {
    pub fn insufficient() -> Self {
        Self {
            percentages: None,
            zone: TernaryZone::InsufficientData,
        }
    }
}

// =============================================================================
// Enriched Record
// =============================================================================

/// A sample record together with every derived diagnostic field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub record: SampleRecord,
    pub risk_score: u32,
    pub risk_flag: RiskFlag,
    pub duval: DuvalResult,
    pub ternary: TernaryResult,
}

impl EnrichedRecord {
    pub fn duval_zone(&self) -> DuvalZone {
        self.duval.zone
    }

    pub fn ternary_zone(&self) -> TernaryZone {
        self.ternary.zone
    }

    pub fn station_name(&self) -> Option<&str> {
        self.record.station_name.as_deref()
    }

    pub fn equipment_id(&self) -> Option<&str> {
        self.record.equipment_id.as_deref()
    }

    pub fn total_combustible_gas(&self) -> Option<f64> {
        self.record.oil.total_combustible_gas
    }
}
