use thiserror::Error;

/// Failures that abort a whole transformation. Per-entry problems such as an
/// unresolved key are logged and skipped instead.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Subtree copy could not be parsed: {0}")]
    Subtree(String),
}
