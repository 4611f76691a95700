use super::geo::{get_bounding_rect, LngLat};
use super::geojson::FeatureCollection;
use itertools::Itertools;
use serde_json::Value;

pub const DEFAULT_ZOOM: f64 = 12.0;

/// Map viewport of a field value.
///
/// A bound of `0.0` means "unset", so a box touching the equator or the prime
/// meridian cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            south: 0.0,
            west: 0.0,
            north: 0.0,
            east: 0.0,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Reads `[west, south, east, north]` or `[[west, south], [east, north]]`.
fn parse_bounds(value: &Value) -> Option<[f64; 4]> {
    let number = |value: &Value| value.as_f64().filter(|n| *n != 0.0 && n.is_finite());
    let values = value.as_array()?;
    let [west, south, east, north] = match values.first()? {
        Value::Array(sw) => {
            let ne = values.get(1)?.as_array()?;
            [sw.get(0)?, sw.get(1)?, ne.get(0)?, ne.get(1)?]
        }
        _ => [values.get(0)?, values.get(1)?, values.get(2)?, values.get(3)?],
    };
    Some([number(west)?, number(south)?, number(east)?, number(north)?])
}

impl Viewport {
    /// `[[west, south], [east, north]]`
    pub fn bounds(&self) -> [[f64; 2]; 2] {
        [[self.west, self.south], [self.east, self.north]]
    }

    pub fn center(&self) -> LngLat {
        LngLat {
            lng: (self.west + self.east) / 2.0,
            lat: (self.south + self.north) / 2.0,
        }
    }

    /// The center as `lng,lat`.
    pub fn lnglat(&self) -> String {
        let center: [f64; 2] = self.center().into();
        center.iter().join(",")
    }

    pub fn has_bounds(&self) -> bool {
        self.south != 0.0 && self.west != 0.0 && self.north != 0.0 && self.east != 0.0
    }

    /// Set the bounds from a flat or nested JSON array.
    ///
    /// Input with a missing, non-numeric or zero value is ignored and the
    /// current bounds are kept.
    pub fn set_bounds(&mut self, value: &Value) {
        if let Some([west, south, east, north]) = parse_bounds(value) {
            self.west = west;
            self.south = south;
            self.east = east;
            self.north = north;
        }
    }

    /// Like [`set_bounds`](Self::set_bounds), for a JSON string. Unparsable
    /// input is ignored as well.
    pub fn set_bounds_str(&mut self, raw: &str) {
        if let Ok(value) = serde_json::from_str::<Value>(raw) {
            self.set_bounds(&value);
        }
    }

    /// Set the bounds to the box enclosing every position of the collection.
    pub fn fit(&mut self, collection: &FeatureCollection) {
        if let Some(rect) = get_bounding_rect(collection.positions()) {
            let sw: LngLat = rect.min().into();
            let ne: LngLat = rect.max().into();
            let nested = serde_json::json!([[sw.lng, sw.lat], [ne.lng, ne.lat]]);
            self.set_bounds(&nested);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::normalize;
    use approx::*;
    use serde_json::json;

    fn create_viewport() -> Viewport {
        let mut viewport = Viewport::default();
        viewport.set_bounds(&json!([1.0, 2.0, 3.0, 4.0]));
        viewport
    }

    #[test]
    fn defaults() {
        let viewport = Viewport::default();
        assert!(!viewport.has_bounds());
        assert_relative_eq!(viewport.zoom, 12.0);
        assert_eq!(viewport.bounds(), [[0., 0.], [0., 0.]]);
    }

    #[test]
    fn flat_bounds() {
        let viewport = create_viewport();
        assert!(viewport.has_bounds());
        assert_eq!(viewport.bounds(), [[1., 2.], [3., 4.]]);
        let center: [f64; 2] = viewport.center().into();
        assert_eq!(center, [2., 3.]);
        assert_eq!(viewport.lnglat(), "2,3");
    }

    #[test]
    fn nested_bounds() {
        let mut viewport = Viewport::default();
        viewport.set_bounds_str("[[-1.5, 50.5], [1.5, 52.5]]");
        assert_eq!(viewport.bounds(), [[-1.5, 50.5], [1.5, 52.5]]);
        let center = viewport.center();
        assert_relative_eq!(center.lng, 0.);
        assert_relative_eq!(center.lat, 51.5);
    }

    #[test]
    fn zero_bound_is_ignored() {
        let mut viewport = create_viewport();
        viewport.set_bounds(&json!([0, 2.0, 3.0, 4.0]));
        assert_eq!(viewport.bounds(), [[1., 2.], [3., 4.]]);
    }

    #[test]
    fn partial_bounds_are_ignored() {
        let mut viewport = create_viewport();
        viewport.set_bounds(&json!([5.0, 6.0, 7.0]));
        viewport.set_bounds(&json!([[5.0, 6.0]]));
        viewport.set_bounds(&json!([[5.0, 6.0], [7.0, "north"]]));
        viewport.set_bounds(&json!({"west": 5.0}));
        viewport.set_bounds(&json!([]));
        viewport.set_bounds_str("not json");
        assert_eq!(viewport.bounds(), [[1., 2.], [3., 4.]]);
    }

    #[test]
    fn fit_to_features() {
        let raw = json!([
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-1.0, 51.0]}},
            {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[-2.0, 52.0], [1.0, 53.0]]}}
        ])
        .to_string();
        let collection = normalize(Some(&raw)).unwrap();
        let mut viewport = Viewport::default();
        viewport.fit(&collection);
        assert_eq!(viewport.bounds(), [[-2., 51.], [1., 53.]]);

        let mut viewport = create_viewport();
        viewport.fit(&Default::default());
        assert_eq!(viewport.bounds(), [[1., 2.], [3., 4.]]);
    }
}
