//! Drawn map features stored as GeoJSON, with a viewport.
//!
//! Features are normalized once into typed geometries and can then be
//! queried by geometry type and by a candidate coordinate:
//!
//! ```
//! use map_draw_features::{LngLat, MapDrawFeatures};
//!
//! let mut record = MapDrawFeatures::default();
//! record
//!     .set_features(r#"[{"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[9.0,50.0],[10.0,50.0],[10.0,51.0],[9.0,51.0],[9.0,50.0]]]},"properties":{}}]"#)
//!     .unwrap();
//! let candidate = LngLat::new(9.5, 50.5).unwrap();
//! assert_eq!(record.features().polygons(Some(&candidate)).len(), 1);
//! ```

pub use self::error::Error;
pub use self::geo::LngLat;
pub use self::geojson::{
    normalize, serialize, Feature, FeatureCollection, Geometry, GeometryType, Position,
};
pub use self::record::MapDrawFeatures;
pub use self::viewport::Viewport;

mod error;
pub mod filter;
pub mod geo;
pub mod geojson;
pub mod output;
mod record;
#[cfg(test)]
mod test_helpers;
pub mod viewport;
