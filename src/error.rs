use thiserror::Error;
use xmlmap_core::TransformError;
use xmlmap_mapping::MappingError;

/// Errors surfaced by [`Converter`](crate::Converter) and the command line tool.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Transformation error: {0}")]
    Transform(#[from] TransformError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
