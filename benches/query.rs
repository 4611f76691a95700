use criterion::{criterion_group, criterion_main, Criterion};
use map_draw_features::{normalize, FeatureCollection, LngLat};
use serde_json::json;

fn create_features(count: usize) -> FeatureCollection {
    let features: Vec<_> = (0..count)
        .map(|i| {
            let west = (i % 100) as f64 * 0.01;
            let south = 50. + (i / 100) as f64 * 0.01;
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [west, south],
                        [west + 0.01, south],
                        [west + 0.01, south + 0.01],
                        [west, south + 0.01],
                        [west, south]
                    ]]
                },
                "properties": {}
            })
        })
        .collect();
    let raw = json!(features).to_string();
    normalize(Some(&raw)).unwrap()
}

pub fn normalize_bench(c: &mut Criterion) {
    let feature = json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [10., 50.]}, "properties": []});
    let raw = json!(vec![feature; 1000]).to_string();
    let mut group = c.benchmark_group("features");
    group.bench_function("normalize", |b| b.iter(|| normalize(Some(&raw)).unwrap()));
    group.finish();
}

pub fn query_bench(c: &mut Criterion) {
    let collection = create_features(10_000);
    let candidate = LngLat::new(0.505, 50.505).unwrap();
    let mut group = c.benchmark_group("features");
    group.sample_size(10);
    group.bench_function("polygons", |b| {
        b.iter(|| collection.polygons(Some(&candidate)).len())
    });
    group.finish();
}

criterion_group!(benches, normalize_bench, query_bench);
criterion_main!(benches);
