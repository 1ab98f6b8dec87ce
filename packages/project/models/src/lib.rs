#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data-center construction project record types.
//!
//! A [`Project`] is one detected construction site: its identity, the
//! county it falls in, the size of the land-use change, and the baseline
//! water stress of its region. Projects are loaded once at startup and
//! never mutated afterwards.
//!
//! Field names serialize in `snake_case` because that is the JSON contract
//! consumed by the map frontend.

use geojson::Geometry;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Highest allowed [`Project::intensity_score`].
pub const MAX_INTENSITY_SCORE: u8 = 100;

/// A longitude/latitude pair, serialized as a `[lon, lat]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat(pub f64, pub f64);

impl LngLat {
    /// Creates a point from longitude and latitude in degrees.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self(lon, lat)
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(self) -> f64 {
        self.0
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.1
    }
}

/// Where the in-memory project set came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DataSource {
    /// Built-in sample projects, used when no feature file could be read.
    Sample,
    /// Projects parsed from the external `GeoJSON` feature file.
    Geojson,
}

/// A data-center construction project with its boundary geometry.
///
/// This is also the detail representation returned for a single project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier (e.g. `"nova-001"`).
    pub project_id: String,
    /// Human-readable project name.
    pub name: String,
    /// County label, kept verbatim from the source.
    pub county: String,
    /// Site footprint in acres.
    pub footprint_acres: f64,
    /// Area of detected land-use change in square meters.
    pub change_area_m2: f64,
    /// Construction intensity score (0-100).
    pub intensity_score: u8,
    /// Free-text observation window (e.g. `"2024-03 to 2025-10"`).
    pub date_range: String,
    /// Baseline regional water scarcity in `[0, 1]`.
    pub water_stress_normalized: f64,
    /// Representative point for map markers.
    pub center: LngLat,
    /// Boundary polygon, `None` when the source geometry was unusable.
    pub geometry: Option<Geometry>,
}

impl Project {
    /// Forces every bounded field into its allowed range.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.footprint_acres = self.footprint_acres.max(0.0);
        self.change_area_m2 = self.change_area_m2.max(0.0);
        self.intensity_score = self.intensity_score.min(MAX_INTENSITY_SCORE);
        self.water_stress_normalized = clamp_unit(self.water_stress_normalized);
        self
    }
}

/// Clamps a value into `[0, 1]`.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Clamps a raw intensity into `0..=100`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_intensity(value: i64) -> u8 {
    value.clamp(0, i64::from(MAX_INTENSITY_SCORE)) as u8
}

/// A project without its boundary geometry, used for list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Unique project identifier.
    pub project_id: String,
    /// Human-readable project name.
    pub name: String,
    /// County label.
    pub county: String,
    /// Site footprint in acres.
    pub footprint_acres: f64,
    /// Area of detected land-use change in square meters.
    pub change_area_m2: f64,
    /// Construction intensity score (0-100).
    pub intensity_score: u8,
    /// Free-text observation window.
    pub date_range: String,
    /// Baseline regional water scarcity in `[0, 1]`.
    pub water_stress_normalized: f64,
    /// Representative point for map markers.
    pub center: LngLat,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            project_id: project.project_id.clone(),
            name: project.name.clone(),
            county: project.county.clone(),
            footprint_acres: project.footprint_acres,
            change_area_m2: project.change_area_m2,
            intensity_score: project.intensity_score,
            date_range: project.date_range.clone(),
            water_stress_normalized: project.water_stress_normalized,
            center: project.center,
        }
    }
}
