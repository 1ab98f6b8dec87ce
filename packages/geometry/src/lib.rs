#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Planar geometry helpers for project boundaries.
//!
//! Project boundaries arrive as `GeoJSON` `Polygon` or `MultiPolygon`
//! geometries in longitude/latitude degrees. This crate derives a display
//! center for each boundary and estimates its area with the shoelace
//! formula on a flat-degree grid scaled to meters. It also builds the
//! square polygons used to repair point-only geometries.
//!
//! None of these functions fail: malformed input degrades to the default
//! region center or to an area of zero.

use geo::{BoundingRect, Coord, MultiPoint, Point};
use geojson::{Geometry, PolygonType, Position, Value};

/// Longitude of the fallback center (Northern Virginia).
pub const DEFAULT_CENTER_LON: f64 = -77.44;

/// Latitude of the fallback center (Northern Virginia).
pub const DEFAULT_CENTER_LAT: f64 = 38.92;

/// Meters spanned by one degree of latitude.
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Returns the fallback region center used when a geometry has no points.
#[must_use]
pub fn default_center() -> Point<f64> {
    Point::new(DEFAULT_CENTER_LON, DEFAULT_CENTER_LAT)
}

/// Converts a `GeoJSON` position into a coordinate, skipping positions
/// with fewer than two ordinates.
fn to_coord(position: &Position) -> Option<Coord<f64>> {
    match position.as_slice() {
        [x, y, ..] => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

fn ring_coords(ring: &[Position]) -> Vec<Coord<f64>> {
    ring.iter().filter_map(to_coord).collect()
}

/// Returns every ring of a polygon or multi-polygon, holes included.
fn all_rings(geometry: &Geometry) -> Vec<&[Position]> {
    match &geometry.value {
        Value::Polygon(rings) => rings.iter().map(Vec::as_slice).collect(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .flat_map(|polygon| polygon.iter().map(Vec::as_slice))
            .collect(),
        _ => Vec::new(),
    }
}

/// Returns the exterior (first) ring of a polygon or of every constituent
/// polygon of a multi-polygon.
fn exterior_rings(geometry: &Geometry) -> Vec<&[Position]> {
    match &geometry.value {
        Value::Polygon(rings) => exterior(rings).into_iter().collect(),
        Value::MultiPolygon(polygons) => polygons.iter().filter_map(exterior).collect(),
        _ => Vec::new(),
    }
}

fn exterior(polygon: &PolygonType) -> Option<&[Position]> {
    polygon.first().map(Vec::as_slice)
}

/// Derives a representative center for a boundary.
///
/// Flattens every ring point (holes and every constituent polygon
/// included) and returns the midpoint of their bounding box. This is not
/// the area centroid. Absent geometries, non-polygon types and geometries
/// without usable points return [`default_center`].
#[must_use]
pub fn derive_center(geometry: Option<&Geometry>) -> Point<f64> {
    let Some(geometry) = geometry else {
        return default_center();
    };

    let points: Vec<Point<f64>> = all_rings(geometry)
        .into_iter()
        .flat_map(|ring| ring.iter().filter_map(to_coord))
        .map(Point::from)
        .collect();

    MultiPoint::new(points)
        .bounding_rect()
        .map_or_else(default_center, |rect| Point::from(rect.center()))
}

/// Planar shoelace area of a ring, in squared degrees.
///
/// Index arithmetic wraps, so closed and open rings give the same result.
/// Rings with fewer than three points have no area.
#[must_use]
pub fn ring_area(ring: &[Coord<f64>]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let twice_area: f64 = (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x.mul_add(b.y, -(b.x * a.y))
        })
        .sum();

    twice_area.abs() / 2.0
}

/// Approximate area of a boundary in square meters.
///
/// Only exterior rings count: holes are ignored for `Polygon`s, and a
/// `MultiPolygon` sums the exterior ring of each member. Squared degrees
/// are converted with `111_320² · cos(lat)`, where `lat` is the mean
/// latitude of the first exterior ring. The single scale factor applies to
/// the whole total.
#[must_use]
pub fn geometry_area_m2(geometry: &Geometry) -> f64 {
    let rings: Vec<Vec<Coord<f64>>> = exterior_rings(geometry)
        .into_iter()
        .map(ring_coords)
        .collect();

    let total_deg2: f64 = rings
        .iter()
        .filter(|ring| ring.len() >= 3)
        .map(|ring| ring_area(ring))
        .sum();

    if total_deg2 <= 0.0 {
        return 0.0;
    }

    let lat_rad = rings
        .first()
        .filter(|ring| !ring.is_empty())
        .map_or(0.0, |ring| mean_latitude(ring).to_radians());

    total_deg2 * METERS_PER_DEGREE_LAT.powi(2) * lat_rad.cos()
}

#[allow(clippy::cast_precision_loss)]
fn mean_latitude(ring: &[Coord<f64>]) -> f64 {
    ring.iter().map(|c| c.y).sum::<f64>() / ring.len() as f64
}

/// Converts a distance in meters to `(degrees longitude, degrees latitude)`
/// at the given latitude.
#[must_use]
pub fn meters_to_degrees(meters: f64, lat: f64) -> (f64, f64) {
    let m_per_deg_lon = METERS_PER_DEGREE_LAT * lat.to_radians().cos();
    (meters / m_per_deg_lon, meters / METERS_PER_DEGREE_LAT)
}

/// Builds a closed, axis-aligned square `Polygon` centered on `center`
/// covering roughly `area_m2` square meters.
#[must_use]
pub fn square_polygon(center: Point<f64>, area_m2: f64) -> Geometry {
    let (lon, lat) = (center.x(), center.y());
    let half_side_m = area_m2.sqrt() / 2.0;
    let (d_lon, d_lat) = meters_to_degrees(half_side_m, lat);

    let ring = vec![
        vec![lon - d_lon, lat - d_lat],
        vec![lon + d_lon, lat - d_lat],
        vec![lon + d_lon, lat + d_lat],
        vec![lon - d_lon, lat + d_lat],
        vec![lon - d_lon, lat - d_lat],
    ];

    Geometry::new(Value::Polygon(vec![ring]))
}
