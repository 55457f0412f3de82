//! Transformations over whole documents and over detached subtrees.

use crate::context::XPathContext;
use crate::engine::transform;
use crate::error::TransformError;
use xmlmap_mapping::MappingTree;
use xmlmap_types::Dict;
use xmlmap_xpath1::{SubtreeCopy, XmlDocument};

/// Transforms a parsed document, evaluating every rule from its root node.
pub fn transform_document(tree: &MappingTree, doc: &XmlDocument<'_>) -> Dict {
    transform(tree, &XPathContext::new(doc.root_node()))
}

/// Transforms a copy of the subtree rooted at `node`.
///
/// The copy becomes the document element of a private document, so absolute
/// paths like `/Device/Size` address the subtree rather than the document it
/// came from. The copy is dropped before returning.
pub fn transform_subtree(
    tree: &MappingTree,
    node: roxmltree::Node<'_, '_>,
) -> Result<Dict, TransformError> {
    let copy = SubtreeCopy::of(node);
    let doc = copy
        .parse()
        .map_err(|e| TransformError::Subtree(e.to_string()))?;
    log::debug!("Transforming subtree <{}>", node.tag_name().name());
    Ok(transform_document(tree, &doc))
}
