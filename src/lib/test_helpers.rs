use super::geo::LngLat;
use super::geojson::{Feature, Geometry, Position};

#[allow(dead_code)]
pub fn lnglat(lng: f64, lat: f64) -> LngLat {
    LngLat { lng, lat }
}

#[allow(dead_code)]
pub fn create_feature(geometry: Geometry) -> Feature {
    Feature::new(geometry)
}

/// A closed ring from its corners, the first corner is repeated at the end.
#[allow(dead_code)]
pub fn create_ring(corners: &[[f64; 2]]) -> Vec<Position> {
    corners
        .iter()
        .chain(corners.first())
        .map(|corner| corner.to_vec())
        .collect()
}
