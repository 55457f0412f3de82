//! The read-only node abstraction the XPath engine evaluates against.

pub mod xml;

use std::hash::Hash;

/// A qualified name, consisting of an optional prefix and a local part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QName<'a> {
    pub prefix: Option<&'a str>,
    pub local_part: &'a str,
}

/// The kind of a node, aligned with the XPath 1.0 data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Root,
    Element,
    Attribute,
    Text,
    Comment,
    ProcessingInstruction,
}

/// A node in a read-only, hierarchical document.
///
/// The engine only ever navigates through this trait. `Ord` must follow
/// document order: node-sets are sorted with it after every step.
///
/// `'a` is the lifetime of the underlying document.
pub trait DataSourceNode<'a>:
    std::fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + PartialOrd + Ord
{
    fn node_type(&self) -> NodeType;

    /// The element, attribute or processing-instruction name. `None` for
    /// text, comment and root nodes.
    fn name(&self) -> Option<QName<'a>>;

    /// The XPath string value: the concatenated descendant text for elements
    /// and the root, the value for attributes, the content for everything else.
    fn string_value(&self) -> String;

    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// `None` only for the root node.
    fn parent(&self) -> Option<Self>;
}
