//! Rebuilds project geometries as square polygons.
//!
//! Each feature gets a closed five-point square centered on
//! `properties.center` whose area matches the project's recorded change
//! area. Used when an export only carried point or empty geometries.

use std::collections::BTreeMap;
use std::path::Path;

use geo::Point;
use serde_json::{Map, Value};
use terrapulse_geometry::{default_center, square_polygon};

use crate::export::SQUARE_METERS_PER_ACRE;
use crate::{PrepareError, read_collection, write_collection};

/// Area used when a feature records neither a change area nor a footprint.
pub const FALLBACK_AREA_M2: f64 = 10_000.0;

/// Outcome of a repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairStats {
    /// Features rewritten.
    pub repaired: usize,
    /// Geometry type counts after the repair.
    pub geometry_types: BTreeMap<String, usize>,
}

fn nonzero(props: &Map<String, Value>, key: &str) -> Option<f64> {
    props
        .get(key)
        .and_then(Value::as_f64)
        .filter(|v| *v != 0.0 && v.is_finite())
}

/// Square meters the rebuilt polygon should cover.
///
/// Uses `change_area_m2`, then `footprint_acres`, then
/// [`FALLBACK_AREA_M2`]. Non-positive results also fall back.
#[must_use]
pub fn repair_area_m2(props: &Map<String, Value>) -> f64 {
    let area = nonzero(props, "change_area_m2")
        .or_else(|| nonzero(props, "footprint_acres").map(|acres| acres * SQUARE_METERS_PER_ACRE))
        .unwrap_or(FALLBACK_AREA_M2);

    if area > 0.0 { area } else { FALLBACK_AREA_M2 }
}

/// Center from `properties.center` when it holds exactly two numbers,
/// otherwise the default region center.
#[must_use]
pub fn repair_center(props: &Map<String, Value>) -> Point<f64> {
    match props.get("center").and_then(Value::as_array).map(Vec::as_slice) {
        Some([lon, lat]) => match (lon.as_f64(), lat.as_f64()) {
            (Some(lon), Some(lat)) => Point::new(lon, lat),
            _ => default_center(),
        },
        _ => default_center(),
    }
}

/// Returns `feature` with its geometry replaced by a square polygon.
/// Other members are kept as-is.
///
/// # Errors
///
/// Returns [`PrepareError::Json`] if the polygon cannot be serialized.
pub fn repair_feature(feature: &Value) -> Result<Value, PrepareError> {
    let Some(object) = feature.as_object() else {
        return Ok(feature.clone());
    };

    let empty = Map::new();
    let props = object
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let polygon = square_polygon(repair_center(props), repair_area_m2(props));

    let mut repaired = object.clone();
    repaired.insert("geometry".to_string(), serde_json::to_value(polygon)?);
    Ok(Value::Object(repaired))
}

fn geometry_type(feature: &Value) -> String {
    feature
        .get("geometry")
        .and_then(|g| g.get("type"))
        .and_then(Value::as_str)
        .unwrap_or("None")
        .to_string()
}

/// Repairs every feature of the collection at `path` and writes it back
/// in place.
///
/// # Errors
///
/// Returns [`PrepareError`] if the file cannot be read, parsed, or
/// written.
pub fn run(path: &Path) -> Result<RepairStats, PrepareError> {
    let (mut payload, features) = read_collection(path)?;

    let repaired = features
        .iter()
        .map(repair_feature)
        .collect::<Result<Vec<_>, _>>()?;

    let mut stats = RepairStats {
        repaired: repaired.len(),
        ..RepairStats::default()
    };
    for feature in &repaired {
        *stats.geometry_types.entry(geometry_type(feature)).or_default() += 1;
    }

    payload["features"] = Value::Array(repaired);
    write_collection(path, &payload)?;

    log::info!(
        "Repaired {} features -> Polygon. Geometry types: {:?}",
        stats.repaired,
        stats.geometry_types
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use terrapulse_geometry::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON, geometry_area_m2};

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn area_prefers_change_area_then_acres() {
        let both = props(json!({ "change_area_m2": 500.0, "footprint_acres": 2 }));
        assert!((repair_area_m2(&both) - 500.0).abs() < 1e-9);
        assert!(
            (repair_area_m2(&props(json!({ "change_area_m2": 0, "footprint_acres": 2 })))
                - 2.0 * SQUARE_METERS_PER_ACRE)
                .abs()
                < 1e-9
        );
        assert!((repair_area_m2(&props(json!({}))) - FALLBACK_AREA_M2).abs() < 1e-9);
        let negative = props(json!({ "change_area_m2": -40 }));
        assert!((repair_area_m2(&negative) - FALLBACK_AREA_M2).abs() < 1e-9);
    }

    #[test]
    fn center_falls_back_unless_two_numbers() {
        let c = repair_center(&props(json!({ "center": [-77.5, 39.0] })));
        assert!((c.x() + 77.5).abs() < 1e-12 && (c.y() - 39.0).abs() < 1e-12);

        for bad in [json!({}), json!({ "center": [1.0] }), json!({ "center": ["a", "b"] })] {
            let c = repair_center(&props(bad));
            assert!((c.x() - DEFAULT_CENTER_LON).abs() < 1e-12);
            assert!((c.y() - DEFAULT_CENTER_LAT).abs() < 1e-12);
        }
    }

    #[test]
    fn replaces_point_geometry_with_square() {
        let feature = json!({
            "type": "Feature",
            "properties": { "project_id": "x", "center": [-77.5, 39.0], "change_area_m2": 40_000 },
            "geometry": { "type": "MultiPoint", "coordinates": [[-77.5, 39.0]] }
        });
        let out = repair_feature(&feature).unwrap();

        assert_eq!(out["properties"]["project_id"], "x");
        assert_eq!(out["geometry"]["type"], "Polygon");
        let ring = out["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);

        let geometry: geojson::Geometry = serde_json::from_value(out["geometry"].clone()).unwrap();
        let area = geometry_area_m2(&geometry);
        assert!((area - 40_000.0).abs() / 40_000.0 < 0.01, "area {area}");
    }

    #[test]
    fn run_rewrites_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.geojson");
        let collection = json!({
            "type": "FeatureCollection",
            "name": "projects",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": null },
                { "type": "Feature", "properties": { "footprint_acres": 3 },
                  "geometry": { "type": "Point", "coordinates": [-77.4, 38.9] } }
            ]
        });
        std::fs::write(&path, collection.to_string()).unwrap();

        let stats = run(&path).unwrap();
        assert_eq!(stats.repaired, 2);
        assert_eq!(stats.geometry_types.get("Polygon"), Some(&2));

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["name"], "projects");
        assert_eq!(written["features"][1]["geometry"]["type"], "Polygon");
    }

    #[test]
    fn run_requires_features_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.geojson");
        std::fs::write(&path, "{\"type\":\"FeatureCollection\"}").unwrap();
        assert!(matches!(run(&path), Err(PrepareError::MissingFeatures { .. })));
    }
}
