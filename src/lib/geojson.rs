use super::error::Error;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{to_string, Map, Value};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A GeoJSON position, `[lng, lat]` with an optional altitude.
pub type Position = Vec<f64>;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type tags are matched case-insensitively.
impl FromStr for GeometryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let geometry_type = match s.to_ascii_lowercase().as_str() {
            "point" => GeometryType::Point,
            "linestring" => GeometryType::LineString,
            "polygon" => GeometryType::Polygon,
            "multipoint" => GeometryType::MultiPoint,
            "multilinestring" => GeometryType::MultiLineString,
            "multipolygon" => GeometryType::MultiPolygon,
            "geometrycollection" => GeometryType::GeometryCollection,
            _ => return Err(Error::InvalidGeometry(format!("unknown type '{}'", s))),
        };
        Ok(geometry_type)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point { .. } => GeometryType::Point,
            Geometry::LineString { .. } => GeometryType::LineString,
            Geometry::Polygon { .. } => GeometryType::Polygon,
            Geometry::MultiPoint { .. } => GeometryType::MultiPoint,
            Geometry::MultiLineString { .. } => GeometryType::MultiLineString,
            Geometry::MultiPolygon { .. } => GeometryType::MultiPolygon,
            Geometry::GeometryCollection { .. } => GeometryType::GeometryCollection,
        }
    }

    /// All positions of the geometry, flattened in document order.
    pub fn positions(&self) -> Vec<&Position> {
        match self {
            Geometry::Point { coordinates } => vec![coordinates],
            Geometry::LineString { coordinates } | Geometry::MultiPoint { coordinates } => {
                coordinates.iter().collect()
            }
            Geometry::Polygon { coordinates } | Geometry::MultiLineString { coordinates } => {
                coordinates.iter().flatten().collect()
            }
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().flatten().flatten().collect()
            }
            Geometry::GeometryCollection { geometries } => geometries
                .iter()
                .flat_map(|geometry| geometry.positions())
                .collect(),
        }
    }
}

fn parse_coordinates<T: DeserializeOwned>(
    coordinates: Option<Value>,
    geometry_type: GeometryType,
) -> Result<T, Error> {
    let coordinates = coordinates.ok_or_else(|| {
        Error::InvalidGeometry(format!("{} without coordinates", geometry_type))
    })?;
    serde_json::from_value(coordinates)
        .map_err(|e| Error::InvalidGeometry(format!("{} coordinates: {}", geometry_type, e)))
}

impl TryFrom<Value> for Geometry {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut object = match value {
            Value::Object(object) => object,
            other => return Err(Error::InvalidGeometry(other.to_string())),
        };
        let geometry_type: GeometryType = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidGeometry("missing type".into()))?
            .parse()?;
        let coordinates = object.remove("coordinates");
        let geometry = match geometry_type {
            GeometryType::Point => Geometry::Point {
                coordinates: parse_coordinates(coordinates, geometry_type)?,
            },
            GeometryType::LineString => Geometry::LineString {
                coordinates: parse_coordinates(coordinates, geometry_type)?,
            },
            GeometryType::Polygon => Geometry::Polygon {
                coordinates: parse_coordinates(coordinates, geometry_type)?,
            },
            GeometryType::MultiPoint => Geometry::MultiPoint {
                coordinates: parse_coordinates(coordinates, geometry_type)?,
            },
            GeometryType::MultiLineString => Geometry::MultiLineString {
                coordinates: parse_coordinates(coordinates, geometry_type)?,
            },
            GeometryType::MultiPolygon => Geometry::MultiPolygon {
                coordinates: parse_coordinates(coordinates, geometry_type)?,
            },
            GeometryType::GeometryCollection => {
                let geometries = match object.remove("geometries") {
                    Some(Value::Array(values)) => values
                        .into_iter()
                        .map(Geometry::try_from)
                        .collect::<Result<_, _>>()?,
                    _ => {
                        return Err(Error::InvalidGeometry(
                            "GeometryCollection without geometries".into(),
                        ))
                    }
                };
                Geometry::GeometryCollection { geometries }
            }
        };
        Ok(geometry)
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Geometry::try_from(value).map_err(de::Error::custom)
    }
}

/// A drawn feature.
///
/// `geometry` is `None` for an empty geometry object. A geometry that cannot
/// be read (unknown type, wrong coordinate nesting) is kept verbatim in
/// `raw_geometry` instead; such a feature is written back unchanged but never
/// matches a type or a coordinate. Both `geometry` and `properties` are always
/// emitted as JSON objects, never as `[]`. Any other members (`type`, `id`,
/// ...) are kept verbatim in `foreign_members`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub raw_geometry: Option<Value>,
    pub properties: Map<String, Value>,
    pub foreign_members: Map<String, Value>,
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.foreign_members.len()))?;
        match (&self.geometry, &self.raw_geometry) {
            (Some(geometry), _) => map.serialize_entry("geometry", geometry)?,
            (None, Some(raw)) => map.serialize_entry("geometry", raw)?,
            (None, None) => map.serialize_entry("geometry", &Map::new())?,
        }
        map.serialize_entry("properties", &self.properties)?;
        for (key, value) in &self.foreign_members {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(array) => array.is_empty(),
        Value::Object(object) => object.is_empty(),
        _ => false,
    }
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        let mut foreign_members = Map::new();
        foreign_members.insert("type".into(), "Feature".into());
        Feature {
            geometry: Some(geometry),
            properties: Map::new(),
            foreign_members,
            ..Default::default()
        }
    }

    pub fn geometry_type(&self) -> Option<GeometryType> {
        self.geometry.as_ref().map(Geometry::geometry_type)
    }
}

impl TryFrom<Value> for Feature {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut foreign_members = match value {
            Value::Object(object) => object,
            other => return Err(Error::InvalidFeature(other.to_string())),
        };
        let (geometry, raw_geometry) = match foreign_members.remove("geometry") {
            Some(value) if !is_empty(&value) => match Geometry::try_from(value.clone()) {
                Ok(geometry) => (Some(geometry), None),
                Err(err) => {
                    warn!("keeping unreadable geometry as is: {}", err);
                    (None, Some(value))
                }
            },
            _ => (None, None),
        };
        let properties = match foreign_members.remove("properties") {
            Some(Value::Object(properties)) => properties,
            Some(value) if !is_empty(&value) => {
                return Err(Error::InvalidProperties(value.to_string()))
            }
            _ => Map::new(),
        };
        Ok(Feature {
            geometry,
            raw_geometry,
            properties,
            foreign_members,
        })
    }
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Feature::try_from(value).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn positions(&self) -> Vec<&Position> {
        self.features
            .iter()
            .filter_map(|feature| feature.geometry.as_ref())
            .flat_map(Geometry::positions)
            .collect()
    }
}

/// Accepts the stored form (an array of features) as well as a full
/// `FeatureCollection` object. `null` is an empty collection.
impl TryFrom<Value> for FeatureCollection {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let values = match value {
            Value::Null => vec![],
            Value::Array(values) => values,
            Value::Object(mut object) => match object.remove("features") {
                Some(Value::Array(values)) => values,
                _ => return Err(Error::InvalidFeature("object without features".into())),
            },
            other => return Err(Error::InvalidFeature(other.to_string())),
        };
        let features = values
            .into_iter()
            .map(Feature::try_from)
            .collect::<Result<_, _>>()?;
        Ok(FeatureCollection { features })
    }
}

impl FromStr for FeatureCollection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(Some(s))
    }
}

/// Parse a raw features payload into a [`FeatureCollection`].
///
/// Missing or blank input yields an empty collection. Empty `geometry` and
/// `properties` members become empty objects, and geometry type tags are read
/// case-insensitively. A geometry which cannot be read does not fail the
/// payload, see [`Feature`].
///
/// # Example
///
/// ```
/// use map_draw_features::normalize;
///
/// let raw = r#"[{"type":"Feature","geometry":{"type":"point","coordinates":[10.0,50.0]},"properties":[]}]"#;
/// let collection = normalize(Some(raw)).unwrap();
/// assert_eq!(collection.len(), 1);
/// assert!(collection.features[0].properties.is_empty());
/// ```
pub fn normalize(raw: Option<&str>) -> Result<FeatureCollection, Error> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(FeatureCollection::default()),
    };
    let value: Value = serde_json::from_str(raw)?;
    FeatureCollection::try_from(value)
}

/// Serialize a collection into the stored form, a JSON array of features.
pub fn serialize(collection: &FeatureCollection) -> Result<String, Error> {
    Ok(to_string(&collection.features)?)
}
