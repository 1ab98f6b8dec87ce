//! Per-project water impact scoring.

use std::str::FromStr as _;

use terrapulse_project_models::Project;
use terrapulse_risk_models::{
    CoolingType, IMPACT_FORMULA, ScoreAssumptions, ScoreConfiguration, ScoreResult, Tier,
};

use crate::RiskError;

/// Hours in a non-leap year.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Kilowatts per megawatt.
pub const KW_PER_MW: f64 = 1000.0;

/// Liters in one Olympic swimming pool.
pub const LITERS_PER_OLYMPIC_POOL: f64 = 2_500_000.0;

/// Annual water use of a 100 MW evaporative facility, the demand that maps
/// to a normalized value of 1.0. A calibration point, not a physical limit.
pub const REFERENCE_ANNUAL_WATER_LITERS: f64 =
    100.0 * KW_PER_MW * HOURS_PER_YEAR * CoolingType::Evaporative.wue_l_per_kwh();

/// Highest score still classified [`Tier::Low`].
pub const LOW_TIER_MAX: f64 = 30.0;

/// Highest score still classified [`Tier::Moderate`].
pub const MODERATE_TIER_MAX: f64 = 60.0;

/// Rounds `value` to `decimals` decimal places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Parses a cooling type name (`evaporative`, `hybrid`, `air`).
///
/// # Errors
///
/// Returns [`RiskError::UnknownCoolingType`] for any other value.
pub fn parse_cooling_type(value: &str) -> Result<CoolingType, RiskError> {
    CoolingType::from_str(value.trim()).map_err(|_| RiskError::UnknownCoolingType {
        value: value.to_string(),
    })
}

/// Checks that a facility size is positive.
///
/// # Errors
///
/// Returns [`RiskError::InvalidSize`] if `size_mw <= 0`.
pub fn validate_size(size_mw: i64) -> Result<(), RiskError> {
    if size_mw <= 0 {
        return Err(RiskError::InvalidSize { size_mw });
    }
    Ok(())
}

/// Builds a validated configuration from raw caller input.
///
/// # Errors
///
/// Returns [`RiskError`] if the size is not positive or the cooling type
/// is unknown.
pub fn parse_configuration(
    size_mw: i64,
    cooling_type: &str,
) -> Result<ScoreConfiguration, RiskError> {
    validate_size(size_mw)?;
    let cooling_type = parse_cooling_type(cooling_type)?;
    Ok(ScoreConfiguration::new(size_mw, cooling_type))
}

/// Annual energy in kWh for a facility running at capacity all year.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn annual_energy_kwh(size_mw: i64) -> f64 {
    size_mw as f64 * KW_PER_MW * HOURS_PER_YEAR
}

/// Normalizes annual water use against [`REFERENCE_ANNUAL_WATER_LITERS`],
/// saturating into `[0, 1]`.
#[must_use]
pub fn normalize_water_demand(annual_water_liters: f64) -> f64 {
    (annual_water_liters / REFERENCE_ANNUAL_WATER_LITERS).clamp(0.0, 1.0)
}

/// Classifies a score. Boundaries belong to the lower tier.
#[must_use]
pub fn tier_for_score(score: f64) -> Tier {
    if score <= LOW_TIER_MAX {
        Tier::Low
    } else if score <= MODERATE_TIER_MAX {
        Tier::Moderate
    } else {
        Tier::High
    }
}

/// Scores one facility configuration against a project's water stress.
///
/// `impact_score = 100 × normalized_demand × water_stress`, rounded to two
/// decimals. A project with zero water stress always scores zero.
///
/// # Errors
///
/// Returns [`RiskError::InvalidSize`] if `size_mw <= 0`.
pub fn calculate_score(
    project: &Project,
    size_mw: i64,
    cooling_type: CoolingType,
) -> Result<ScoreResult, RiskError> {
    validate_size(size_mw)?;

    let wue = cooling_type.wue_l_per_kwh();
    let annual_energy_kwh = annual_energy_kwh(size_mw);
    let annual_water_liters = annual_energy_kwh * wue;
    let demand_norm = normalize_water_demand(annual_water_liters);
    let impact_score = round_to(100.0 * demand_norm * project.water_stress_normalized, 2);

    Ok(ScoreResult {
        annual_energy_kwh,
        annual_water_liters,
        olympic_pools: annual_water_liters / LITERS_PER_OLYMPIC_POOL,
        water_stress_normalized: project.water_stress_normalized,
        impact_score,
        tier: tier_for_score(impact_score),
        assumptions: ScoreAssumptions {
            size_mw,
            cooling_type,
            wue_l_per_kwh: wue,
            formula: IMPACT_FORMULA.to_string(),
        },
    })
}

/// [`calculate_score`] with a bundled configuration.
///
/// # Errors
///
/// Returns [`RiskError::InvalidSize`] if the configured size is not positive.
pub fn score(project: &Project, config: &ScoreConfiguration) -> Result<ScoreResult, RiskError> {
    calculate_score(project, config.size_mw, config.cooling_type)
}
