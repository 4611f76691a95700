use super::error::Error;
use super::geojson::Feature;
use serde::Serialize;
use serde_json::to_string;
use std::io::Write;

pub trait Output {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<(), Error>;
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Error>;
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum Entity<'a> {
    FeatureCollection { features: Vec<&'a Feature> },
}

/// Wrap features in a `{"type":"FeatureCollection","features":[..]}` object.
pub fn feature_collection<'a>(
    features: impl IntoIterator<Item = &'a Feature>,
) -> Result<String, Error> {
    let features = features.into_iter().collect();
    let entity = Entity::FeatureCollection { features };
    Ok(to_string(&entity)?)
}

impl Output for Vec<&Feature> {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<(), Error> {
        let string = feature_collection(self.iter().copied())?;
        writeln!(writer, "{}", string)?;
        Ok(())
    }

    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Error> {
        for feature in self.iter() {
            let json = to_string(feature)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }
}
