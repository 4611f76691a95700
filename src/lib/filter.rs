use super::geo::{LngLat, Matches};
use super::geojson::{Feature, FeatureCollection, GeometryType};
use tracing::debug;

pub const POINTS: &[GeometryType] = &[GeometryType::Point, GeometryType::MultiPoint];
pub const LINE_STRINGS: &[GeometryType] =
    &[GeometryType::LineString, GeometryType::MultiLineString];
pub const POLYGONS: &[GeometryType] = &[GeometryType::Polygon, GeometryType::MultiPolygon];

/// Parse a selector into a list of geometry types
///
/// Types are separated by `|` (`Point|MultiPoint`) and matched
/// case-insensitively. Names that are not a geometry type are skipped. An
/// empty selector yields an empty list, which selects every type.
///
/// # Example
///
/// ```
/// use map_draw_features::filter::parse;
/// use map_draw_features::GeometryType;
///
/// let types = parse("polygon|MultiPolygon|Circle");
/// assert_eq!(types, vec![GeometryType::Polygon, GeometryType::MultiPolygon]);
/// ```
pub fn parse(selector: &str) -> Vec<GeometryType> {
    selector
        .split('|')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| match name.parse() {
            Ok(geometry_type) => Some(geometry_type),
            Err(_) => {
                debug!(name, "skipping unknown geometry type");
                None
            }
        })
        .collect()
}

pub trait Filter {
    fn filter(&self, types: &[GeometryType], candidate: Option<&LngLat>) -> bool;
}

impl Filter for Feature {
    fn filter(&self, types: &[GeometryType], candidate: Option<&LngLat>) -> bool {
        let geometry = match &self.geometry {
            Some(geometry) => geometry,
            None => return false,
        };
        if !types.is_empty() && !types.contains(&geometry.geometry_type()) {
            return false;
        }
        candidate.map_or(true, |candidate| geometry.matches(candidate))
    }
}

impl FeatureCollection {
    fn matching<'a: 'b, 'b>(
        &'a self,
        types: &'b [GeometryType],
        candidate: Option<&'b LngLat>,
    ) -> impl Iterator<Item = &'a Feature> + 'b {
        let unfiltered = types.is_empty() && candidate.is_none();
        self.features
            .iter()
            .filter(move |feature| unfiltered || feature.filter(types, candidate))
    }

    /// Features of the given types which match the candidate, in order.
    ///
    /// Without types and candidate every feature is returned. A candidate on
    /// the equator or the prime meridian (a zero ordinate) is matched like
    /// any other coordinate; zero only means "unset" for viewport bounds.
    pub fn query(&self, types: &[GeometryType], candidate: Option<&LngLat>) -> Vec<&Feature> {
        self.matching(types, candidate).collect()
    }

    /// The `index`-th feature of [`query`](Self::query), if there is one.
    pub fn feature(
        &self,
        types: &[GeometryType],
        index: usize,
        candidate: Option<&LngLat>,
    ) -> Option<&Feature> {
        self.matching(types, candidate).nth(index)
    }

    pub fn points(&self, candidate: Option<&LngLat>) -> Vec<&Feature> {
        self.query(POINTS, candidate)
    }

    pub fn line_strings(&self, candidate: Option<&LngLat>) -> Vec<&Feature> {
        self.query(LINE_STRINGS, candidate)
    }

    pub fn polygons(&self, candidate: Option<&LngLat>) -> Vec<&Feature> {
        self.query(POLYGONS, candidate)
    }

    pub fn point(&self, index: usize, candidate: Option<&LngLat>) -> Option<&Feature> {
        self.feature(POINTS, index, candidate)
    }

    pub fn line_string(&self, index: usize, candidate: Option<&LngLat>) -> Option<&Feature> {
        self.feature(LINE_STRINGS, index, candidate)
    }

    pub fn polygon(&self, index: usize, candidate: Option<&LngLat>) -> Option<&Feature> {
        self.feature(POLYGONS, index, candidate)
    }
}
