//! Compiles a mapping specification document into a [`MappingTree`].
//!
//! A mapping file looks like this:
//!
//! ```xml
//! <dmidecode_fieldmap version="1">
//!   <Mapping name="bios">
//!     <Map>
//!       <Map keytype="constant" key="Vendor" valuetype="string" value="/bios/vendor"/>
//!     </Map>
//!   </Mapping>
//! </dmidecode_fieldmap>
//! ```
//!
//! Elements carrying a `key` attribute are rules. Elements without one only
//! group rules and are compiled as if their children stood in their place.

use crate::error::MappingError;
use crate::rule::{Filter, MappingRule, MappingTree, RuleValue};
use crate::tags;
use roxmltree::{Document, Node};
use xmlmap_types::{ScalarKind, ValueKind};

pub const DEFAULT_ROOT_TAG: &str = "dmidecode_fieldmap";
pub const SUPPORTED_VERSION: &str = "1";

const SECTION_TAG: &str = "Mapping";

/// Compiler settings. The defaults accept `dmidecode_fieldmap` documents at version 1.
#[derive(Debug, Clone)]
pub struct MappingCompiler {
    root_tag: String,
    version: String,
}

impl Default for MappingCompiler {
    fn default() -> Self {
        Self {
            root_tag: DEFAULT_ROOT_TAG.to_string(),
            version: SUPPORTED_VERSION.to_string(),
        }
    }
}

impl MappingCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_tag(mut self, root_tag: impl Into<String>) -> Self {
        self.root_tag = root_tag.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Compiles the `Mapping` section named `schema`. The first section with
    /// that exact name wins.
    pub fn compile(&self, doc: &Document<'_>, schema: &str) -> Result<MappingTree, MappingError> {
        let root = self.checked_root(doc)?;
        let section = sections(root)
            .find(|s| s.attribute("name") == Some(schema))
            .ok_or_else(|| MappingError::SchemaNotFound(schema.to_string()))?;

        let rules = compile_forest(section)?;
        if rules.is_empty() {
            log::warn!("Mapping '{}' contains no rules", schema);
        }
        log::debug!("Compiled mapping '{}' with {} top-level rules", schema, rules.len());
        Ok(MappingTree {
            schema: schema.to_string(),
            rules,
        })
    }

    pub fn compile_str(&self, text: &str, schema: &str) -> Result<MappingTree, MappingError> {
        let doc = Document::parse(text)?;
        self.compile(&doc, schema)
    }

    /// The names of every `Mapping` section, in document order.
    pub fn schema_names<'d>(&self, doc: &'d Document<'_>) -> Result<Vec<&'d str>, MappingError> {
        let root = self.checked_root(doc)?;
        Ok(sections(root).filter_map(|s| s.attribute("name")).collect())
    }

    fn checked_root<'a, 'input>(
        &self,
        doc: &'a Document<'input>,
    ) -> Result<Node<'a, 'input>, MappingError> {
        let root = doc.root_element();
        if root.tag_name().name() != self.root_tag {
            return Err(MappingError::invalid_at(
                root,
                format_args!(
                    "root element is '{}', expected '{}'",
                    root.tag_name().name(),
                    self.root_tag
                ),
            ));
        }
        match root.attribute("version") {
            Some(version) if version == self.version => Ok(root),
            Some(version) => Err(MappingError::invalid_at(
                root,
                format_args!("unsupported version '{}', expected '{}'", version, self.version),
            )),
            None => Err(MappingError::invalid_at(root, "missing version attribute")),
        }
    }
}

/// Compiles section `schema` with the default settings.
pub fn compile_mapping(doc: &Document<'_>, schema: &str) -> Result<MappingTree, MappingError> {
    MappingCompiler::default().compile(doc, schema)
}

/// Parses `text` and compiles section `schema` with the default settings.
pub fn compile_mapping_str(text: &str, schema: &str) -> Result<MappingTree, MappingError> {
    MappingCompiler::default().compile_str(text, schema)
}

fn sections<'a, 'input>(root: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    root.children()
        .filter(|n| n.is_element() && n.tag_name().name() == SECTION_TAG)
}

fn compile_forest(parent: Node<'_, '_>) -> Result<Vec<MappingRule>, MappingError> {
    let mut rules = Vec::new();
    for child in parent.children().filter(Node::is_element) {
        if child.attribute("key").is_none() {
            rules.extend(compile_forest(child)?);
        } else if let Some(rule) = compile_rule(child)? {
            rules.push(rule);
        }
    }
    Ok(rules)
}

fn compile_rule(node: Node<'_, '_>) -> Result<Option<MappingRule>, MappingError> {
    let key = node.attribute("key").unwrap_or_default();
    let key_kind = tags::key_kind(node.attribute("keytype"), key);
    let value_kind = tags::value_kind(node.attribute("valuetype"), key);

    let value = match value_kind {
        ValueKind::Dict => {
            let children = compile_forest(node)?;
            if children.is_empty() {
                log::debug!("Skipping dict '{}' without child rules", key);
                return Ok(None);
            }
            RuleValue::Dict(children)
        }
        ValueKind::Constant => RuleValue::Constant(required_value(node, key)?),
        kind => {
            let scalar = kind.scalar().unwrap_or(ScalarKind::String);
            let expr = required_value(node, key)?;
            if kind.is_list() {
                RuleValue::List { kind: scalar, expr }
            } else {
                RuleValue::Scalar { kind: scalar, expr }
            }
        }
    };

    let filter = match (node.attribute("filter"), node.attribute("filtervalue")) {
        (Some(expr), Some(value)) => Some(Filter {
            expr: expr.to_string(),
            value: value.to_string(),
        }),
        (Some(expr), None) => {
            log::warn!(
                "Filter '{}' on key '{}' has no filtervalue, ignoring it",
                expr,
                key
            );
            None
        }
        (None, _) => None,
    };

    Ok(Some(MappingRule {
        key_kind,
        key_expr: key.to_string(),
        value,
        filter,
    }))
}

fn required_value(node: Node<'_, '_>, key: &str) -> Result<String, MappingError> {
    node.attribute("value")
        .map(str::to_string)
        .ok_or_else(|| MappingError::invalid_at(node, format_args!("key '{}' has no value", key)))
}
