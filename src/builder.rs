use crate::converter::Converter;
use crate::error::Error;
use std::fs;
use std::io;
use std::path::Path;
use xmlmap_mapping::MappingCompiler;

/// A builder for creating a `Converter`.
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    compiler: MappingCompiler,
    mapping_source: Option<String>,
    schema: Option<String>,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads the mapping specification from a file.
    pub fn with_mapping_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, Error> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            Error::Io(io::Error::new(
                e.kind(),
                format!("Failed to read mapping from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.mapping_source = Some(source);
        Ok(self)
    }

    pub fn with_mapping_source(mut self, source: impl Into<String>) -> Self {
        self.mapping_source = Some(source.into());
        self
    }

    /// Selects the `Mapping` section to compile.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Accepts mapping files whose document element has a different name.
    pub fn with_root_tag(mut self, root_tag: impl Into<String>) -> Self {
        self.compiler = self.compiler.with_root_tag(root_tag);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.compiler = self.compiler.with_version(version);
        self
    }

    /// The names of every mapping section in the configured specification.
    pub fn schema_names(&self) -> Result<Vec<String>, Error> {
        let doc = roxmltree::Document::parse(self.source()?)?;
        let names = self.compiler.schema_names(&doc)?;
        Ok(names.into_iter().map(str::to_string).collect())
    }

    /// Compiles the selected mapping section.
    pub fn build(self) -> Result<Converter, Error> {
        let schema = self.schema.as_deref().ok_or_else(|| {
            Error::Config("No schema has been selected. Use `with_schema`.".to_string())
        })?;
        let tree = self.compiler.compile_str(self.source()?, schema)?;
        log::info!("Compiled mapping '{}' ({} rules)", schema, tree.rules.len());
        Ok(Converter::new(tree))
    }

    fn source(&self) -> Result<&str, Error> {
        self.mapping_source.as_deref().ok_or_else(|| {
            Error::Config(
                "No mapping has been configured. Use `with_mapping_file` or `with_mapping_source`."
                    .to_string(),
            )
        })
    }
}
