#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Water-risk scoring configuration and result types.
//!
//! A [`ScoreConfiguration`] describes a hypothetical facility (capacity and
//! cooling technology). Scoring it against a project's baseline water
//! stress yields a [`ScoreResult`]; applying it to every project in a
//! county yields a [`CountySummary`]. Results are recomputed per request
//! and never stored.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Formula echoed in every [`ScoreAssumptions`].
pub const IMPACT_FORMULA: &str = "Impact Score = 100 x (Normalized Water Demand x Water Stress)";

/// Data-center cooling technology.
///
/// Each variant has a fixed water-use efficiency (liters consumed per kWh).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CoolingType {
    /// Evaporative cooling towers: highest water draw.
    Evaporative,
    /// Hybrid wet/dry cooling.
    Hybrid,
    /// Closed-loop air cooling: negligible water draw.
    #[serde(rename = "air", alias = "air-cooled", alias = "air_cooled")]
    #[strum(to_string = "air", serialize = "air-cooled", serialize = "air_cooled")]
    AirCooled,
}

impl CoolingType {
    /// Water-use efficiency in liters per kWh.
    #[must_use]
    pub const fn wue_l_per_kwh(self) -> f64 {
        match self {
            Self::Evaporative => 1.5,
            Self::Hybrid => 0.7,
            Self::AirCooled => 0.05,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Evaporative, Self::Hybrid, Self::AirCooled]
    }
}

/// Coarse bucketing of an impact score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Tier {
    /// Score at most 30.
    Low,
    /// Score above 30 and at most 60.
    Moderate,
    /// Score above 60.
    High,
}

/// A hypothetical facility applied to one or more projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreConfiguration {
    /// Facility capacity in megawatts. Must be positive.
    pub size_mw: i64,
    /// Cooling technology.
    pub cooling_type: CoolingType,
}

impl ScoreConfiguration {
    /// Creates a configuration. Validation happens when it is scored.
    #[must_use]
    pub const fn new(size_mw: i64, cooling_type: CoolingType) -> Self {
        Self {
            size_mw,
            cooling_type,
        }
    }
}

impl Default for ScoreConfiguration {
    /// 50 MW with hybrid cooling.
    fn default() -> Self {
        Self::new(50, CoolingType::Hybrid)
    }
}

/// Inputs and formula behind a [`ScoreResult`], echoed for auditing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAssumptions {
    /// Facility capacity in megawatts.
    pub size_mw: i64,
    /// Cooling technology.
    pub cooling_type: CoolingType,
    /// Water-use efficiency used, liters per kWh.
    pub wue_l_per_kwh: f64,
    /// Human-readable scoring formula.
    pub formula: String,
}

/// Water impact of one facility configuration on one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Energy drawn over a non-leap year.
    pub annual_energy_kwh: f64,
    /// Water consumed over a non-leap year.
    pub annual_water_liters: f64,
    /// Water volume in 2,500,000-liter Olympic pools.
    pub olympic_pools: f64,
    /// Baseline water stress of the project, copied through.
    pub water_stress_normalized: f64,
    /// Impact score in `[0, 100]`, rounded to 2 decimals.
    pub impact_score: f64,
    /// Tier of [`Self::impact_score`].
    pub tier: Tier,
    /// Inputs and formula used.
    pub assumptions: ScoreAssumptions,
}

/// Per-county statistics and projected risk under one shared configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountySummary {
    /// County label.
    pub county: String,
    /// Number of projects in the county.
    pub project_count: usize,
    /// Sum of detected land-use change, square meters.
    pub total_change_area_m2: f64,
    /// Mean baseline water stress.
    pub avg_stress: f64,
    /// Mean intensity score.
    pub avg_intensity: f64,
    /// Total projected annual water use across the county's projects.
    pub projected_annual_water_liters: f64,
    /// Mean of the per-project impact scores.
    pub projected_impact_score: f64,
    /// Tier of [`Self::projected_impact_score`].
    pub projected_tier: Tier,
}
