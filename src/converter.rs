use crate::error::Error;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use xmlmap_core::{transform_document, transform_subtree};
use xmlmap_mapping::MappingTree;
use xmlmap_types::Dict;
use xmlmap_xpath1::XmlDocument;

/// Converts XML documents with one compiled mapping.
///
/// The mapping is shared, so clones are cheap and can be moved to other threads.
#[derive(Debug, Clone)]
pub struct Converter {
    tree: Arc<MappingTree>,
}

impl Converter {
    pub fn new(tree: MappingTree) -> Self {
        Self {
            tree: Arc::new(tree),
        }
    }

    pub fn mapping(&self) -> &MappingTree {
        &self.tree
    }

    pub fn convert_str(&self, xml: &str) -> Result<Dict, Error> {
        let doc = XmlDocument::parse(xml)?;
        Ok(transform_document(&self.tree, &doc))
    }

    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<Dict, Error> {
        let xml = fs::read_to_string(path)?;
        self.convert_str(&xml)
    }

    /// Converts the subtree rooted at `node` as if it were a document of its own.
    pub fn convert_node(&self, node: roxmltree::Node<'_, '_>) -> Result<Dict, Error> {
        Ok(transform_subtree(&self.tree, node)?)
    }
}

/// Renders a converted dictionary, or any other serializable output such as a
/// list of schema names, as JSON. Dictionaries keep their key order.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, Error> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
