use map_draw_features::filter::parse;
use map_draw_features::output::Output;
use map_draw_features::{LngLat, MapDrawFeatures};
use serde_json::json;
use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[derive(StructOpt, Debug)]
#[structopt(name = "map_draw_features")]
enum Opt {
    /// Print the features matching a geometry type and/or a coordinate
    Query {
        /// Geometry types separated by `|`, e.g. `Polygon|MultiPolygon`
        #[structopt(short, long, default_value = "")]
        types: String,
        /// Coordinate to match, as `lng,lat` or `{"lng":..,"lat":..}`
        #[structopt(short, long)]
        lnglat: Option<LngLat>,
        /// Only print the n-th matching feature
        #[structopt(short, long)]
        index: Option<usize>,
        /// Print one feature per line instead of a FeatureCollection
        #[structopt(short, long)]
        json_lines: bool,
        /// Stored field value or GeoJSON, stdin if omitted
        #[structopt(parse(from_os_str))]
        input: Option<PathBuf>,
    },
    /// Print bounds, center and zoom of a stored field value
    Bounds {
        /// Fit the bounds to the stored features
        #[structopt(short, long)]
        fit: bool,
        #[structopt(parse(from_os_str))]
        input: Option<PathBuf>,
    },
}

fn read_input(input: Option<PathBuf>) -> Result<String, Box<dyn Error>> {
    if let Some(path) = input {
        return Ok(fs::read_to_string(path)?);
    }
    let mut string = String::new();
    io::stdin().read_to_string(&mut string)?;
    Ok(string)
}

/// Accepts a stored field value, a FeatureCollection or an array of features.
fn load(input: Option<PathBuf>) -> Result<MapDrawFeatures, Box<dyn Error>> {
    let raw = read_input(input)?;
    if let Ok(record) = raw.parse::<MapDrawFeatures>() {
        return Ok(record);
    }
    let mut record = MapDrawFeatures::default();
    record.set_features(&raw)?;
    Ok(record)
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut writer = stdout.lock();

    match Opt::from_args() {
        Opt::Query {
            types,
            lnglat,
            index,
            json_lines,
            input,
        } => {
            let record = load(input)?;
            let types = parse(&types);
            let features = match index {
                Some(index) => record
                    .features()
                    .feature(&types, index, lnglat.as_ref())
                    .into_iter()
                    .collect(),
                None => record.features().query(&types, lnglat.as_ref()),
            };
            if json_lines {
                features.write_json_lines(&mut writer)?;
            } else {
                features.write_geojson(&mut writer)?;
            }
        }
        Opt::Bounds { fit, input } => {
            let record = load(input)?;
            let mut viewport = record.viewport;
            if fit {
                viewport.fit(record.features());
            }
            let center: [f64; 2] = viewport.center().into();
            let json = json!({
                "bounds": viewport.bounds(),
                "center": center,
                "zoom": viewport.zoom,
                "hasBounds": viewport.has_bounds(),
            });
            writeln!(writer, "{}", json)?;
        }
    }
    Ok(())
}
