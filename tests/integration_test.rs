extern crate map_draw_features;

use approx::assert_relative_eq;
use geojson::GeoJson;
use map_draw_features::filter::{parse, POLYGONS};
use map_draw_features::output::Output;
use map_draw_features::{normalize, serialize, Feature, FeatureCollection, LngLat, MapDrawFeatures};
use std::fs;

fn load_features() -> FeatureCollection {
    let raw = fs::read_to_string("./tests/data/features.geojson").unwrap();
    normalize(Some(&raw)).unwrap()
}

fn ids(features: &[&Feature]) -> Vec<String> {
    features
        .iter()
        .map(|feature| feature.foreign_members["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn all_features_without_filter() {
    let collection = load_features();
    let features = collection.query(&[], None);
    assert_eq!(
        ids(&features),
        vec!["cafe", "kiosks", "route", "river", "park", "estates", "draft"]
    );
}

#[test]
fn features_by_type() {
    let collection = load_features();
    assert_eq!(ids(&collection.points(None)), vec!["cafe", "kiosks"]);
    assert_eq!(ids(&collection.line_strings(None)), vec!["route", "river"]);
    assert_eq!(ids(&collection.polygons(None)), vec!["park", "estates"]);
    let types = parse("multipoint|MULTIPOLYGON");
    assert_eq!(ids(&collection.query(&types, None)), vec!["kiosks", "estates"]);
}

#[test]
fn features_at_coordinate() {
    let collection = load_features();
    let candidate: LngLat = "-1.61,54.97".parse().unwrap();
    let features = collection.query(&[], Some(&candidate));
    assert_eq!(ids(&features), vec!["cafe", "route", "park"]);

    let features = collection.query(POLYGONS, Some(&candidate));
    assert_eq!(ids(&features), vec!["park"]);

    let candidate: LngLat = r#"{"lng": -1.54, "lat": 55.01}"#.parse().unwrap();
    let features = collection.polygons(Some(&candidate));
    assert_eq!(ids(&features), vec!["estates"]);

    let candidate: LngLat = "-1.62,54.96".parse().unwrap();
    let feature = collection.point(0, Some(&candidate)).unwrap();
    assert_eq!(feature.foreign_members["id"], "kiosks");
    assert!(collection.point(1, Some(&candidate)).is_none());
}

#[test]
fn output_is_valid_geojson() {
    let collection = load_features();
    let mut writer: Vec<u8> = vec![];
    collection.polygons(None).write_geojson(&mut writer).unwrap();
    let string = String::from_utf8(writer).unwrap();
    match string.trim().parse::<GeoJson>().unwrap() {
        GeoJson::FeatureCollection(feature_collection) => {
            assert_eq!(feature_collection.features.len(), 2)
        }
        _ => panic!("expected a FeatureCollection"),
    }
}

#[test]
fn stored_form_round_trip() {
    let collection = load_features();
    let string = serialize(&collection).unwrap();
    assert!(!string.contains("[]"));
    assert_eq!(normalize(Some(&string)).unwrap(), collection);
}

#[test]
fn stored_record() {
    let raw = fs::read_to_string("./tests/data/record.json").unwrap();
    let record: MapDrawFeatures = raw.parse().unwrap();
    assert!(record.viewport.has_bounds());
    assert_eq!(record.viewport.bounds(), [[-1.7, 54.95], [-1.5, 55.02]]);
    assert_eq!(record.viewport.zoom, 14.0);
    let center = record.viewport.center();
    assert_relative_eq!(center.lng, -1.6, epsilon = 1e-9);
    assert_relative_eq!(center.lat, 54.985, epsilon = 1e-9);
    assert_eq!(record.features().len(), 1);

    let reparsed: MapDrawFeatures = record.to_string().parse().unwrap();
    assert_eq!(reparsed, record);
}
