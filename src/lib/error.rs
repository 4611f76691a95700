use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid feature: {0}")]
    InvalidFeature(String),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("invalid properties: {0}")]
    InvalidProperties(String),
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
