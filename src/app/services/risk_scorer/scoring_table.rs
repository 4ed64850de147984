//! Point table for the additive risk score
//!
//! The table is a plain data structure so that it can be supplied from a
//! configuration file. Each measured factor carries an ordered list of bands,
//! most severe first; the first band the value falls into awards its points.
//! Textual markers in the condition notes add fixed points and stack.

use crate::app::models::{OilQuality, RiskFlag};
use crate::constants::{markers, risk};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Measurement a factor rule reads from a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    TotalCombustibleGas,
    AcidNumber,
    BreakdownVoltage,
    WaterContent,
    DissipationFactor,
}

impl Factor {
    /// Read the factor's measurement from a sample
    pub fn value(self, oil: &OilQuality) -> Option<f64> {
        match self {
            Factor::TotalCombustibleGas => oil.total_combustible_gas,
            Factor::AcidNumber => oil.acid_number,
            Factor::BreakdownVoltage => oil.breakdown_voltage,
            Factor::WaterContent => oil.water_content,
            Factor::DissipationFactor => oil.dissipation_factor,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Factor::TotalCombustibleGas => "total_combustible_gas",
            Factor::AcidNumber => "acid_number",
            Factor::BreakdownVoltage => "breakdown_voltage",
            Factor::WaterContent => "water_content",
            Factor::DissipationFactor => "dissipation_factor",
        }
    }
}

/// Which side of a threshold is the failing side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Values strictly above the threshold fail (gas levels, acidity, water)
    Above,
    /// Values strictly below the threshold fail (breakdown voltage)
    Below,
}

impl Direction {
    fn fails(self, value: f64, threshold: f64) -> bool {
        match self {
            Direction::Above => value > threshold,
            Direction::Below => value < threshold,
        }
    }
}

/// One threshold band of a factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub threshold: f64,
    pub points: u32,
}

impl Band {
    pub fn new(threshold: f64, points: u32) -> Self {
        Self { threshold, points }
    }
}

/// Ordered bands for one factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRule {
    pub factor: Factor,
    pub direction: Direction,
    /// Most severe band first
    pub bands: Vec<Band>,
}

impl FactorRule {
    pub fn above(factor: Factor, bands: Vec<Band>) -> Self {
        Self {
            factor,
            direction: Direction::Above,
            bands,
        }
    }

    pub fn below(factor: Factor, bands: Vec<Band>) -> Self {
        Self {
            factor,
            direction: Direction::Below,
            bands,
        }
    }

    /// Points awarded for a measurement; a missing value scores nothing
    pub fn points_for(&self, value: Option<f64>) -> u32 {
        let Some(value) = value else {
            return 0;
        };

        self.bands
            .iter()
            .find(|band| self.direction.fails(value, band.threshold))
            .map_or(0, |band| band.points)
    }

    /// Check band ordering so that the first matching band is the most severe
    /// and points never drop as severity rises
    pub fn validate(&self) -> Result<()> {
        if self.bands.is_empty() {
            return Err(Error::configuration(format!(
                "Factor '{}' has no bands",
                self.factor.as_str()
            )));
        }

        for band in &self.bands {
            if !band.threshold.is_finite() {
                return Err(Error::configuration(format!(
                    "Factor '{}' has a non-finite threshold",
                    self.factor.as_str()
                )));
            }
        }

        for pair in self.bands.windows(2) {
            let (severe, milder) = (&pair[0], &pair[1]);

            let ordered = match self.direction {
                Direction::Above => severe.threshold > milder.threshold,
                Direction::Below => severe.threshold < milder.threshold,
            };
            if !ordered {
                return Err(Error::configuration(format!(
                    "Factor '{}' bands must be ordered most severe first \
                     ({} then {} is not {})",
                    self.factor.as_str(),
                    severe.threshold,
                    milder.threshold,
                    match self.direction {
                        Direction::Above => "descending",
                        Direction::Below => "ascending",
                    }
                )));
            }

            if severe.points < milder.points {
                return Err(Error::configuration(format!(
                    "Factor '{}' awards {} points for threshold {} but {} for the milder threshold {}",
                    self.factor.as_str(),
                    severe.points,
                    severe.threshold,
                    milder.points,
                    milder.threshold
                )));
            }
        }

        Ok(())
    }
}

/// Fixed points for a textual marker in the condition notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRule {
    pub name: String,
    /// Any of these substrings triggers the marker (case-insensitive)
    pub patterns: Vec<String>,
    pub points: u32,
}

impl MarkerRule {
    pub fn new(name: impl Into<String>, patterns: &[&str], points: u32) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            points,
        }
    }

    /// True if any pattern occurs in the notes. Expects lowercased notes.
    pub fn matches(&self, lowered_notes: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| lowered_notes.contains(&pattern.to_lowercase()))
    }
}

/// Complete point table plus category boundaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTable {
    /// Inclusive lower bound of HIGH
    pub high_threshold: u32,
    /// Inclusive lower bound of MEDIUM
    pub medium_threshold: u32,
    /// Hard clamp of the accumulated score
    pub max_score: u32,
    pub factors: Vec<FactorRule>,
    pub markers: Vec<MarkerRule>,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScoringTable {
    /// Full table with three TCG bands and the partial discharge marker
    pub fn standard() -> Self {
        Self {
            high_threshold: risk::HIGH_THRESHOLD,
            medium_threshold: risk::MEDIUM_THRESHOLD,
            max_score: risk::MAX_SCORE,
            factors: vec![
                FactorRule::above(
                    Factor::TotalCombustibleGas,
                    vec![
                        Band::new(3000.0, 40),
                        Band::new(2000.0, 25),
                        Band::new(1000.0, 10),
                    ],
                ),
                FactorRule::above(
                    Factor::AcidNumber,
                    vec![Band::new(0.2, 25), Band::new(0.1, 15)],
                ),
                FactorRule::below(
                    Factor::BreakdownVoltage,
                    vec![Band::new(40.0, 25), Band::new(50.0, 15)],
                ),
                FactorRule::above(
                    Factor::WaterContent,
                    vec![Band::new(40.0, 20), Band::new(30.0, 10)],
                ),
            ],
            markers: vec![
                MarkerRule::new("mode_5", markers::MODE_FIVE, 30),
                MarkerRule::new("thermal_decomposition", markers::THERMAL_DECOMPOSITION, 10),
                MarkerRule::new("partial_discharge", markers::PARTIAL_DISCHARGE, 10),
            ],
        }
    }

    /// Lighter single-band table used by the quick-look dashboard
    pub fn simplified() -> Self {
        Self {
            high_threshold: risk::HIGH_THRESHOLD,
            medium_threshold: risk::MEDIUM_THRESHOLD,
            max_score: risk::MAX_SCORE,
            factors: vec![
                FactorRule::above(Factor::TotalCombustibleGas, vec![Band::new(2000.0, 30)]),
                FactorRule::above(Factor::AcidNumber, vec![Band::new(0.1, 15)]),
                FactorRule::below(Factor::BreakdownVoltage, vec![Band::new(50.0, 20)]),
                FactorRule::above(Factor::WaterContent, vec![Band::new(30.0, 15)]),
            ],
            markers: vec![
                MarkerRule::new("mode_5", markers::MODE_FIVE, 20),
                MarkerRule::new("thermal_decomposition", markers::THERMAL_DECOMPOSITION, 10),
            ],
        }
    }

    /// Category for a (clamped) score
    pub fn category(&self, score: u32) -> RiskFlag {
        RiskFlag::from_score(score, self.high_threshold, self.medium_threshold)
    }

    /// Validate every rule and the category boundaries
    pub fn validate(&self) -> Result<()> {
        if self.medium_threshold > self.high_threshold {
            return Err(Error::configuration(format!(
                "medium_threshold ({}) must not exceed high_threshold ({})",
                self.medium_threshold, self.high_threshold
            )));
        }

        if self.high_threshold > self.max_score {
            return Err(Error::configuration(format!(
                "high_threshold ({}) must not exceed max_score ({})",
                self.high_threshold, self.max_score
            )));
        }

        for rule in &self.factors {
            rule.validate()?;
        }

        for (i, rule) in self.factors.iter().enumerate() {
            if self.factors[..i].iter().any(|r| r.factor == rule.factor) {
                return Err(Error::configuration(format!(
                    "Factor '{}' is listed more than once",
                    rule.factor.as_str()
                )));
            }
        }

        for marker in &self.markers {
            if marker.patterns.is_empty() || marker.patterns.iter().any(|p| p.trim().is_empty()) {
                return Err(Error::configuration(format!(
                    "Marker '{}' needs at least one non-empty pattern",
                    marker.name
                )));
            }
        }

        Ok(())
    }
}
