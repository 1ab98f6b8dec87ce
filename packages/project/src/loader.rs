//! Converts a `GeoJSON` feature file into [`Project`] records.
//!
//! Every property is optional. Missing or non-numeric values fall back to
//! fixed defaults, a missing identifier is synthesized from the feature's
//! position, and a missing center is derived from the boundary geometry.

use std::path::Path;

use geojson::Geometry;
use serde_json::{Map, Value};
use terrapulse_geometry::derive_center;
use terrapulse_project_models::{DataSource, LngLat, Project, clamp_intensity, clamp_unit};

use crate::ProjectError;
use crate::sample::sample_projects;

/// Property keys tried, in order, for the project identifier.
pub const IDENTIFIER_KEYS: &[&str] = &["project_id", "id"];

/// Intensity score used when the property is missing or non-numeric.
pub const DEFAULT_INTENSITY_SCORE: f64 = 50.0;

/// Water stress used when the property is missing or non-numeric.
pub const DEFAULT_WATER_STRESS: f64 = 0.5;

/// Label used for missing `county` and `date_range` properties.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Loads projects from the feature file at `path`.
///
/// Never fails. A missing file, unreadable file, invalid JSON, or a
/// collection without usable features all yield the built-in sample set
/// tagged [`DataSource::Sample`]; the reason is logged.
#[must_use]
pub fn load_projects(path: &Path) -> (Vec<Project>, DataSource) {
    match read_feature_file(path) {
        Ok(projects) => {
            log::info!(
                "Loaded {} projects from {}",
                projects.len(),
                path.display()
            );
            (projects, DataSource::Geojson)
        }
        Err(e) => {
            log::warn!("Using built-in sample projects: {e}");
            (sample_projects(), DataSource::Sample)
        }
    }
}

/// Reads and converts every feature in the file at `path`.
///
/// # Errors
///
/// Returns [`ProjectError`] if the file is missing, cannot be read, is not
/// valid JSON, or contains no usable features.
pub fn read_feature_file(path: &Path) -> Result<Vec<Project>, ProjectError> {
    if !path.exists() {
        return Err(ProjectError::Missing {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let payload: Value = serde_json::from_str(&contents)?;
    let projects = parse_feature_collection(&payload);

    if projects.is_empty() {
        return Err(ProjectError::NoFeatures {
            path: path.to_path_buf(),
        });
    }

    Ok(projects)
}

/// Converts the `features` array of a feature collection.
///
/// Entries that are not JSON objects are skipped, but still count towards
/// the 1-based position used for synthesized identifiers.
#[must_use]
pub fn parse_feature_collection(payload: &Value) -> Vec<Project> {
    payload
        .get("features")
        .and_then(Value::as_array)
        .map(|features| {
            features
                .iter()
                .enumerate()
                .filter(|(_, feature)| feature.is_object())
                .map(|(i, feature)| project_from_feature(feature, i + 1))
                .collect()
        })
        .unwrap_or_default()
}

/// Converts a single feature. `position` is 1-based.
#[must_use]
pub fn project_from_feature(feature: &Value, position: usize) -> Project {
    let empty = Map::new();
    let props = feature
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let geometry = parse_geometry(feature.get("geometry"), position);

    let project_id = IDENTIFIER_KEYS
        .iter()
        .find_map(|key| prop_string(props, key))
        .unwrap_or_else(|| defaulted(position, "project_id", format!("project-{position:03}")));

    let center = prop_center(props).unwrap_or_else(|| {
        let point = derive_center(geometry.as_ref());
        LngLat::new(point.x(), point.y())
    });

    #[allow(clippy::cast_possible_truncation)]
    let intensity_score = clamp_intensity(
        prop_f64(props, "intensity_score")
            .unwrap_or_else(|| defaulted(position, "intensity_score", DEFAULT_INTENSITY_SCORE))
            .trunc() as i64,
    );

    let water_stress_normalized = clamp_unit(
        prop_f64(props, "water_stress_normalized").unwrap_or_else(|| {
            defaulted(position, "water_stress_normalized", DEFAULT_WATER_STRESS)
        }),
    );

    Project {
        name: prop_string(props, "name")
            .unwrap_or_else(|| defaulted(position, "name", format!("Project {position}"))),
        county: prop_string(props, "county")
            .unwrap_or_else(|| defaulted(position, "county", UNKNOWN_LABEL.to_string())),
        footprint_acres: prop_f64(props, "footprint_acres")
            .unwrap_or_else(|| defaulted(position, "footprint_acres", 0.0)),
        change_area_m2: prop_f64(props, "change_area_m2")
            .unwrap_or_else(|| defaulted(position, "change_area_m2", 0.0)),
        intensity_score,
        date_range: prop_string(props, "date_range")
            .unwrap_or_else(|| defaulted(position, "date_range", UNKNOWN_LABEL.to_string())),
        water_stress_normalized,
        project_id,
        center,
        geometry,
    }
    .clamped()
}

fn defaulted<T: std::fmt::Debug>(position: usize, key: &str, value: T) -> T {
    log::debug!("Feature {position}: no usable '{key}', defaulting to {value:?}");
    value
}

fn parse_geometry(value: Option<&Value>, position: usize) -> Option<Geometry> {
    let value = value.filter(|v| !v.is_null())?;
    match serde_json::from_value::<Geometry>(value.clone()) {
        Ok(geometry) => Some(geometry),
        Err(e) => {
            log::debug!("Feature {position} has unusable geometry: {e}");
            None
        }
    }
}

/// Reads a non-empty string property verbatim. Numbers are stringified.
fn prop_string(props: &Map<String, Value>, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a finite numeric property from a JSON number or numeric string.
fn prop_f64(props: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match props.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// Reads an explicit `[lon, lat]` center property.
fn prop_center(props: &Map<String, Value>) -> Option<LngLat> {
    match props.get("center")?.as_array()?.as_slice() {
        [lon, lat] => Some(LngLat::new(lon.as_f64()?, lat.as_f64()?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write as _;

    fn square_feature(props: Value) -> Value {
        json!({
            "type": "Feature",
            "properties": props,
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [-77.4, 38.9], [-77.3, 38.9], [-77.3, 39.0], [-77.4, 39.0], [-77.4, 38.9]
                ]]
            }
        })
    }

    #[test]
    fn converts_complete_feature() {
        let feature = square_feature(json!({
            "project_id": "nova-100",
            "name": "Ashburn North",
            "county": "Loudoun",
            "footprint_acres": 40.5,
            "change_area_m2": 163_900.0,
            "intensity_score": 72,
            "date_range": "2024-01 to 2025-06",
            "water_stress_normalized": 0.66,
            "center": [-77.45, 39.02]
        }));

        let p = project_from_feature(&feature, 1);
        assert_eq!(p.project_id, "nova-100");
        assert_eq!(p.name, "Ashburn North");
        assert_eq!(p.county, "Loudoun");
        assert_eq!(p.intensity_score, 72);
        assert!((p.water_stress_normalized - 0.66).abs() < f64::EPSILON);
        assert_eq!(p.center, LngLat::new(-77.45, 39.02));
        assert!(p.geometry.is_some());
    }

    #[test]
    fn falls_back_to_defaults() {
        let p = project_from_feature(&square_feature(json!({})), 7);
        assert_eq!(p.project_id, "project-007");
        assert_eq!(p.name, "Project 7");
        assert_eq!(p.county, UNKNOWN_LABEL);
        assert_eq!(p.date_range, UNKNOWN_LABEL);
        assert_eq!(p.intensity_score, 50);
        assert!((p.water_stress_normalized - 0.5).abs() < f64::EPSILON);
        assert!(p.footprint_acres.abs() < f64::EPSILON);
        assert!((p.center.lon() - -77.35).abs() < 1e-9);
        assert!((p.center.lat() - 38.95).abs() < 1e-9);
    }

    #[test]
    fn defaulted_returns_fallback_unchanged() {
        assert_eq!(defaulted(3, "county", UNKNOWN_LABEL.to_string()), UNKNOWN_LABEL);
        let stress = defaulted(3, "water_stress_normalized", DEFAULT_WATER_STRESS);
        assert!((stress - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn whitespace_labels_are_kept_verbatim() {
        let p = project_from_feature(&square_feature(json!({ "county": "  ", "name": " " })), 1);
        assert_eq!(p.county, "  ");
        assert_eq!(p.name, " ");

        let p = project_from_feature(&square_feature(json!({ "county": "" })), 1);
        assert_eq!(p.county, UNKNOWN_LABEL);
    }

    #[test]
    fn identifier_falls_through_candidate_keys() {
        let p = project_from_feature(&square_feature(json!({ "project_id": "", "id": 42 })), 1);
        assert_eq!(p.project_id, "42");
    }

    #[test]
    fn non_numeric_values_use_defaults() {
        let p = project_from_feature(
            &square_feature(json!({
                "intensity_score": "high",
                "water_stress_normalized": null,
                "change_area_m2": "12.5"
            })),
            1,
        );
        assert_eq!(p.intensity_score, 50);
        assert!((p.water_stress_normalized - 0.5).abs() < f64::EPSILON);
        assert!((p.change_area_m2 - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let p = project_from_feature(
            &square_feature(json!({
                "intensity_score": 140.9,
                "water_stress_normalized": -0.2,
                "footprint_acres": -4
            })),
            1,
        );
        assert_eq!(p.intensity_score, 100);
        assert!(p.water_stress_normalized.abs() < f64::EPSILON);
        assert!(p.footprint_acres.abs() < f64::EPSILON);
    }

    #[test]
    fn missing_geometry_uses_default_center() {
        let feature = json!({ "type": "Feature", "properties": { "name": "Bare" } });
        let p = project_from_feature(&feature, 1);
        assert!(p.geometry.is_none());
        assert_eq!(p.center, LngLat::new(-77.44, 38.92));
    }

    #[test]
    fn malformed_center_is_derived_instead() {
        let p = project_from_feature(&square_feature(json!({ "center": [1.0] })), 1);
        assert!((p.center.lon() - -77.35).abs() < 1e-9);
    }

    #[test]
    fn collection_skips_non_object_features() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [42, square_feature(json!({}))]
        });
        let projects = parse_feature_collection(&payload);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].project_id, "project-002");
    }

    #[test]
    fn missing_file_uses_sample_set() {
        let dir = tempfile::tempdir().unwrap();
        let (projects, source) = load_projects(&dir.path().join("projects.geojson"));
        assert_eq!(source, DataSource::Sample);
        assert_eq!(projects, sample_projects());
    }

    #[test]
    fn invalid_json_uses_sample_set() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let (projects, source) = load_projects(file.path());
        assert_eq!(source, DataSource::Sample);
        assert_eq!(projects.len(), sample_projects().len());
    }

    #[test]
    fn empty_collection_uses_sample_set() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        let (_, source) = load_projects(file.path());
        assert_eq!(source, DataSource::Sample);
        assert!(matches!(
            read_feature_file(file.path()),
            Err(ProjectError::NoFeatures { .. })
        ));
    }

    #[test]
    fn valid_file_is_tagged_geojson() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [square_feature(json!({ "project_id": "x-1", "county": "Fairfax" }))]
        });
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(payload.to_string().as_bytes()).unwrap();

        let (projects, source) = load_projects(file.path());
        assert_eq!(source, DataSource::Geojson);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].project_id, "x-1");
    }
}
