//! Converts a raw OSM-style export into the project property schema.
//!
//! Keeps each feature's geometry, estimates its area from the exterior
//! rings, and fills the scoring fields with neutral placeholders
//! (`intensity_score` 50, `water_stress_normalized` 0.5) that are refined
//! by hand later.

use std::path::Path;
use std::sync::LazyLock;

use geojson::Geometry;
use regex::Regex;
use serde_json::{Map, Value, json};
use terrapulse_geometry::geometry_area_m2;

use crate::{PrepareError, read_collection, write_collection};

/// Square meters per acre.
pub const SQUARE_METERS_PER_ACRE: f64 = 4_046.856_422_4;

/// Placeholder observation window written for every exported feature.
pub const DEFAULT_DATE_RANGE: &str = "2024-01 to 2025-10";

const ID_PREFIX: &str = "nova-";

static INVALID_ID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\-_]").unwrap_or_else(|_| unreachable!()));

/// Feature counts before and after an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    /// Features in the input collection.
    pub read: usize,
    /// Features written (those with a usable geometry).
    pub written: usize,
}

/// Turns a raw OSM identifier (e.g. `way/45583050`) into a project id
/// (`nova-way-45583050`). `position` is 1-based.
#[must_use]
pub fn sanitize_project_id(raw: &str, position: usize) -> String {
    if raw.is_empty() {
        return format!("{ID_PREFIX}{position:04}");
    }

    let replaced = INVALID_ID_CHARS.replace_all(raw, "-");
    let trimmed = replaced.trim_matches('-');

    let id = if trimmed.is_empty() {
        format!("id-{position}")
    } else {
        trimmed.to_string()
    };

    if id.starts_with(ID_PREFIX) {
        id
    } else {
        format!("{ID_PREFIX}{id}")
    }
}

/// Reads a non-empty identifier from a string or number value.
fn id_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-blank string property among `keys`, trimmed.
fn first_text(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| props.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn has_coordinates(geometry: &Value) -> bool {
    match geometry.get("coordinates") {
        Some(Value::Array(coords)) => !coords.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

/// Converts one raw feature. Returns `None` when it has no geometry or
/// empty coordinates. `position` is 1-based.
#[must_use]
pub fn transform_feature(feature: &Value, position: usize) -> Option<Value> {
    let geometry = feature.get("geometry").filter(|g| has_coordinates(g))?;

    let empty = Map::new();
    let props = feature
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let area_m2 = serde_json::from_value::<Geometry>(geometry.clone())
        .map_or(0.0, |g| geometry_area_m2(&g));

    let footprint_acres = if area_m2 > 0.0 {
        (area_m2 / SQUARE_METERS_PER_ACRE * 100.0).round() / 100.0
    } else {
        0.0
    };

    let raw_id = id_value(props.get("@id"))
        .or_else(|| id_value(feature.get("id")))
        .or_else(|| id_value(props.get("id")))
        .unwrap_or_default();

    let name = first_text(props, &["name", "ref", "operator"])
        .unwrap_or_else(|| format!("Project {position}"));
    let county = first_text(props, &["addr:city", "county"]).unwrap_or_else(|| "Unknown".into());

    #[allow(clippy::cast_possible_truncation)]
    let change_area_m2 = area_m2.round() as i64;

    Some(json!({
        "type": "Feature",
        "properties": {
            "project_id": sanitize_project_id(&raw_id, position),
            "name": name,
            "county": county,
            "footprint_acres": footprint_acres,
            "change_area_m2": change_area_m2,
            "intensity_score": 50,
            "date_range": DEFAULT_DATE_RANGE,
            "water_stress_normalized": 0.5,
        },
        "geometry": geometry,
    }))
}

/// Converts every feature of `input` and writes the result to `output`.
///
/// # Errors
///
/// Returns [`PrepareError`] if the input cannot be read or parsed, or the
/// output cannot be written.
pub fn run(input: &Path, output: &Path) -> Result<ExportStats, PrepareError> {
    let (_, features) = read_collection(input)?;

    let converted: Vec<Value> = features
        .iter()
        .enumerate()
        .filter_map(|(i, feature)| transform_feature(feature, i + 1))
        .collect();

    let stats = ExportStats {
        read: features.len(),
        written: converted.len(),
    };

    write_collection(
        output,
        &json!({ "type": "FeatureCollection", "features": converted }),
    )?;

    log::info!(
        "Transformed {} features -> {}. Wrote {}",
        stats.read,
        stats.written,
        output.display()
    );

    Ok(stats)
}
