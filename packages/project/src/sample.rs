//! Built-in sample projects used when no feature file is available.

use geojson::{Geometry, Value};
use terrapulse_project_models::{LngLat, Project};

/// Axis-aligned rectangle polygon, closed (last point equals first).
fn rectangle(west: f64, south: f64, east: f64, north: f64) -> Geometry {
    Geometry::new(Value::Polygon(vec![vec![
        vec![west, south],
        vec![east, south],
        vec![east, north],
        vec![west, north],
        vec![west, south],
    ]]))
}

/// Returns the fixed Northern Virginia sample set.
#[must_use]
pub fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            project_id: "nova-001".to_string(),
            name: "Loudoun East Cluster".to_string(),
            county: "Loudoun".to_string(),
            footprint_acres: 128.4,
            change_area_m2: 426_000.0,
            intensity_score: 89,
            date_range: "2024-03 to 2025-10".to_string(),
            water_stress_normalized: 0.78,
            center: LngLat::new(-77.539, 39.078),
            geometry: Some(rectangle(-77.553, 39.071, -77.525, 39.086)),
        },
        Project {
            project_id: "nova-002".to_string(),
            name: "Prince William West Expansion".to_string(),
            county: "Prince William".to_string(),
            footprint_acres: 92.7,
            change_area_m2: 311_500.0,
            intensity_score: 74,
            date_range: "2024-05 to 2025-11".to_string(),
            water_stress_normalized: 0.62,
            center: LngLat::new(-77.484, 38.792),
            geometry: Some(rectangle(-77.497, 38.785, -77.468, 38.8)),
        },
        Project {
            project_id: "nova-003".to_string(),
            name: "Fairfax Utility Corridor Buildout".to_string(),
            county: "Fairfax".to_string(),
            footprint_acres: 57.9,
            change_area_m2: 194_000.0,
            intensity_score: 61,
            date_range: "2024-02 to 2025-09".to_string(),
            water_stress_normalized: 0.43,
            center: LngLat::new(-77.368, 38.91),
            geometry: Some(rectangle(-77.378, 38.903, -77.353, 38.918)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn sample_ids_are_unique() {
        let projects = sample_projects();
        let ids: BTreeSet<&str> = projects.iter().map(|p| p.project_id.as_str()).collect();
        assert_eq!(ids.len(), projects.len());
    }

    #[test]
    fn sample_values_are_in_range() {
        for p in sample_projects() {
            assert_eq!(p.clone().clamped(), p, "{} out of range", p.project_id);
        }
    }

    #[test]
    fn sample_rings_are_closed() {
        for p in sample_projects() {
            let Some(Geometry {
                value: Value::Polygon(rings),
                ..
            }) = &p.geometry
            else {
                panic!("{} has no polygon", p.project_id);
            };
            for ring in rings {
                assert_eq!(ring.first(), ring.last());
            }
        }
    }
}
