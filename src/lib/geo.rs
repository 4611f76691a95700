use super::error::Error;
use super::geojson::{Geometry, Position};
use geo::prelude::*;
use geo_types::{Coordinate, MultiPoint, Point, Rect};
use serde::Deserialize;
use std::str::FromStr;
use tracing::warn;

/// Ordinates are compared in units of the sixth decimal place.
const PRECISION: f64 = 1_000_000.0;
/// Largest raw difference between two equal ordinates, `1e-6` plus float noise.
const TOLERANCE: f64 = 1e-6 + 1e-9;

/// A candidate coordinate, longitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Result<Self, Error> {
        if !lng.is_finite() || !lat.is_finite() {
            return Err(Error::InvalidCoordinate(format!("{},{}", lng, lat)));
        }
        Ok(LngLat { lng, lat })
    }
}

impl From<Coordinate<f64>> for LngLat {
    fn from(coordinate: Coordinate<f64>) -> Self {
        LngLat {
            lng: coordinate.x,
            lat: coordinate.y,
        }
    }
}

impl From<Point<f64>> for LngLat {
    fn from(point: Point<f64>) -> Self {
        LngLat {
            lng: point.lng(),
            lat: point.lat(),
        }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(lnglat: LngLat) -> Self {
        [lnglat.lng, lnglat.lat]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JSONLngLat {
    Object { lng: f64, lat: f64 },
    Pair([f64; 2]),
}

/// Parse `"lng,lat"`, `{"lng":..,"lat":..}` or `[lng, lat]`.
///
/// # Example
///
/// ```
/// use map_draw_features::LngLat;
///
/// let lnglat: LngLat = "10.5, 50.25".parse().unwrap();
/// assert_eq!(lnglat, LngLat { lng: 10.5, lat: 50.25 });
/// let lnglat: LngLat = r#"{"lat": 50.25, "lng": 10.5}"#.parse().unwrap();
/// assert_eq!(lnglat, LngLat { lng: 10.5, lat: 50.25 });
/// ```
impl FromStr for LngLat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('{') || s.starts_with('[') {
            let (lng, lat) = match serde_json::from_str::<JSONLngLat>(s)
                .map_err(|_| Error::InvalidCoordinate(s.into()))?
            {
                JSONLngLat::Object { lng, lat } => (lng, lat),
                JSONLngLat::Pair([lng, lat]) => (lng, lat),
            };
            return LngLat::new(lng, lat);
        }
        let ordinates = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidCoordinate(s.into()))?;
        match ordinates.as_slice() {
            [lng, lat] => LngLat::new(*lng, *lat),
            _ => Err(Error::InvalidCoordinate(s.into())),
        }
    }
}

// Within one unit of the sixth decimal after rounding, and never more than
// 1e-6 apart before it.
fn same_ordinate(a: f64, b: f64) -> bool {
    ((a * PRECISION).round() - (b * PRECISION).round()).abs() <= 1.0
        && (a - b).abs() <= TOLERANCE
}

/// Does the position coincide with the candidate?
///
/// Both ordinates are rounded to six decimals and may differ by at most one
/// unit in that place. Positions without exactly two ordinates never match.
pub fn same_position(candidate: &LngLat, position: &[f64]) -> bool {
    match position {
        [lng, lat] => same_ordinate(candidate.lng, *lng) && same_ordinate(candidate.lat, *lat),
        _ => false,
    }
}

fn any_vertex(candidate: &LngLat, positions: &[Position]) -> bool {
    positions
        .iter()
        .any(|position| same_position(candidate, position))
}

/// Is the candidate the Point, or any point of the MultiPoint?
pub fn is_point(candidate: &LngLat, point: &Geometry) -> bool {
    match point {
        Geometry::Point { coordinates } => same_position(candidate, coordinates),
        Geometry::MultiPoint { coordinates } => any_vertex(candidate, coordinates),
        _ => false,
    }
}

/// Is the candidate on the LineString or MultiLineString?
///
/// Only vertices are considered, a candidate lying on a segment between two
/// vertices does not match.
pub fn on_line_string(candidate: &LngLat, line_string: &Geometry) -> bool {
    match line_string {
        Geometry::LineString { coordinates } => any_vertex(candidate, coordinates),
        Geometry::MultiLineString { coordinates } => coordinates
            .iter()
            .any(|line| any_vertex(candidate, line)),
        _ => false,
    }
}

/// Is the candidate inside the Polygon, or inside any polygon of the
/// MultiPolygon? Only the exterior ring is tested, holes are ignored.
pub fn in_polygon(candidate: &LngLat, polygon: &Geometry) -> bool {
    match polygon {
        Geometry::Polygon { coordinates } => polygon_contains(candidate, coordinates),
        Geometry::MultiPolygon { coordinates } => coordinates
            .iter()
            .any(|rings| polygon_contains(candidate, rings)),
        _ => false,
    }
}

fn polygon_contains(candidate: &LngLat, rings: &[Vec<Position>]) -> bool {
    match rings.first() {
        Some(exterior) => ring_contains(candidate, exterior),
        None => {
            warn!("invalid polygon: no rings");
            false
        }
    }
}

/// Even-odd ray casting over a single ring.
///
/// The ring is read as (lat, lng) pairs; a vertex with fewer than two
/// ordinates makes the ring invalid and the result `false`.
pub fn ring_contains(candidate: &LngLat, ring: &[Position]) -> bool {
    let vertices: Option<Vec<(f64, f64)>> = ring
        .iter()
        .map(|position| match position.as_slice() {
            [lng, lat, ..] => Some((*lat, *lng)),
            _ => None,
        })
        .collect();
    let vertices = match vertices {
        Some(vertices) if !vertices.is_empty() => vertices,
        _ => {
            warn!(vertices = ring.len(), "invalid polygon ring: {:?}", ring);
            return false;
        }
    };

    let (x, y) = (candidate.lat, candidate.lng);
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for (i, &(xi, yi)) in vertices.iter().enumerate() {
        let (xj, yj) = vertices[j];
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

pub trait Matches {
    fn matches(&self, candidate: &LngLat) -> bool;
}

/// The predicate is chosen by the geometry's own type.
impl Matches for Geometry {
    fn matches(&self, candidate: &LngLat) -> bool {
        match self {
            Geometry::Point { .. } | Geometry::MultiPoint { .. } => is_point(candidate, self),
            Geometry::LineString { .. } | Geometry::MultiLineString { .. } => {
                on_line_string(candidate, self)
            }
            Geometry::Polygon { .. } | Geometry::MultiPolygon { .. } => {
                in_polygon(candidate, self)
            }
            Geometry::GeometryCollection { geometries } => geometries
                .iter()
                .any(|geometry| geometry.matches(candidate)),
        }
    }
}

pub fn get_bounding_rect<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<Rect<f64>> {
    let points: Vec<(f64, f64)> = positions
        .into_iter()
        .filter_map(|position| match position.as_slice() {
            [lng, lat, ..] => Some((*lng, *lat)),
            _ => None,
        })
        .collect();
    let multi_point: MultiPoint<f64> = points.into();
    multi_point.bounding_rect()
}
