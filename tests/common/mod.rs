pub mod fixtures;

use std::io::Write;
use tempfile::NamedTempFile;
use xmlmap::{Converter, ConverterBuilder, Error};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a converter for `schema` from the shared fixture mapping.
pub fn converter(schema: &str) -> Result<Converter, Error> {
    ConverterBuilder::new()
        .with_mapping_source(fixtures::FIELDMAP)
        .with_schema(schema)
        .build()
}

/// Writes `contents` to a temporary file that lives as long as the handle.
pub fn temp_file(contents: &str) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
