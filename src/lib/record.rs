use super::error::Error;
use super::geojson::{normalize, serialize, Feature, FeatureCollection};
use super::output::feature_collection;
use super::viewport::{Viewport, DEFAULT_ZOOM};
use serde::{Deserialize, Serialize};
use serde_json::{to_string, Value};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// The value of a map field: a viewport plus the drawn features.
///
/// Features are replaced as a whole, never edited in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapDrawFeatures {
    pub viewport: Viewport,
    features: FeatureCollection,
}

#[derive(Serialize)]
struct JSONRecord<'a> {
    bounds: [[f64; 2]; 2],
    features: &'a [Feature],
    zoom: f64,
}

#[derive(Deserialize)]
struct JSONStoredRecord {
    #[serde(default)]
    bounds: Value,
    #[serde(default)]
    features: Value,
    zoom: Option<f64>,
}

impl MapDrawFeatures {
    pub fn new(viewport: Viewport, features: FeatureCollection) -> Self {
        MapDrawFeatures { viewport, features }
    }

    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    /// Replace the features with a raw payload.
    ///
    /// A payload which cannot be parsed leaves an empty collection behind and
    /// the error is returned to the caller.
    pub fn set_features(&mut self, raw: &str) -> Result<(), Error> {
        match normalize(Some(raw)) {
            Ok(features) => {
                self.features = features;
                Ok(())
            }
            Err(e) => {
                warn!("discarding features: {}", e);
                self.features = FeatureCollection::default();
                Err(e)
            }
        }
    }

    pub fn replace_features(&mut self, features: FeatureCollection) {
        self.features = features;
    }

    /// The stored form of the features, a JSON array.
    pub fn features_json(&self) -> Result<String, Error> {
        serialize(&self.features)
    }

    /// The features wrapped in a `FeatureCollection` object.
    pub fn feature_collection(&self) -> Result<String, Error> {
        feature_collection(&self.features.features)
    }

    fn to_json_string(&self) -> Result<String, Error> {
        let record = JSONRecord {
            bounds: self.viewport.bounds(),
            features: &self.features.features,
            zoom: self.viewport.zoom,
        };
        Ok(to_string(&record)?)
    }
}

/// Writes `{"bounds":..,"features":..,"zoom":..}`.
impl fmt::Display for MapDrawFeatures {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let string = self.to_json_string().map_err(|_| fmt::Error)?;
        f.write_str(&string)
    }
}

/// Reads back the string written by `Display`.
impl FromStr for MapDrawFeatures {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stored: JSONStoredRecord = serde_json::from_str(s)?;
        let mut viewport = Viewport::default();
        viewport.set_bounds(&stored.bounds);
        viewport.zoom = stored.zoom.unwrap_or(DEFAULT_ZOOM);
        let features = FeatureCollection::try_from(stored.features)?;
        Ok(MapDrawFeatures { viewport, features })
    }
}
