//! Node collection along each XPath axis.
//!
//! Every function returns the axis in its own direction: forward axes in
//! document order, reverse axes nearest node first. Proximity positions in
//! predicates are indexes into these vectors.

use crate::ast::Axis;
use crate::datasource::{DataSourceNode, NodeType};

pub fn collect<'a, N: DataSourceNode<'a>>(axis: Axis, node: N) -> Vec<N> {
    match axis {
        Axis::Child => node.children().collect(),
        Axis::Attribute => node.attributes().collect(),
        Axis::Descendant => descendants(node),
        Axis::DescendantOrSelf => {
            let mut out = vec![node];
            out.extend(descendants(node));
            out
        }
        Axis::Parent => node.parent().into_iter().collect(),
        Axis::Ancestor => ancestors(node),
        Axis::AncestorOrSelf => {
            let mut out = vec![node];
            out.extend(ancestors(node));
            out
        }
        Axis::SelfAxis => vec![node],
        Axis::FollowingSibling => following_siblings(node),
        Axis::PrecedingSibling => preceding_siblings(node),
        Axis::Following => following(node),
        Axis::Preceding => preceding(node),
    }
}

/// Pre-order traversal of everything below `node`, excluding attributes.
fn descendants<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    let mut out = Vec::new();
    let mut stack: Vec<N> = node.children().collect();
    stack.reverse();
    while let Some(current) = stack.pop() {
        out.push(current);
        let mut kids: Vec<N> = current.children().collect();
        kids.reverse();
        stack.extend(kids);
    }
    out
}

fn ancestors<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    let mut out = Vec::new();
    let mut current = node.parent();
    while let Some(p) = current {
        out.push(p);
        current = p.parent();
    }
    out
}

fn siblings_of<'a, N: DataSourceNode<'a>>(node: N) -> Option<(Vec<N>, usize)> {
    // Attributes have a parent but are not among its children.
    if node.node_type() == NodeType::Attribute {
        return None;
    }
    let parent = node.parent()?;
    let all: Vec<N> = parent.children().collect();
    let index = all.iter().position(|&n| n == node)?;
    Some((all, index))
}

fn following_siblings<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    match siblings_of(node) {
        Some((all, index)) => all[index + 1..].to_vec(),
        None => vec![],
    }
}

fn preceding_siblings<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    match siblings_of(node) {
        Some((all, index)) => all[..index].iter().rev().copied().collect(),
        None => vec![],
    }
}

fn following<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    let start = if node.node_type() == NodeType::Attribute {
        match node.parent() {
            Some(p) => {
                // An attribute's following nodes start with its element's descendants.
                let mut out = descendants(p);
                out.extend(following(p));
                return out;
            }
            None => return vec![],
        }
    } else {
        node
    };

    let mut out = Vec::new();
    let mut current = Some(start);
    while let Some(c) = current {
        for sibling in following_siblings(c) {
            out.push(sibling);
            out.extend(descendants(sibling));
        }
        current = c.parent();
    }
    out
}

fn preceding<'a, N: DataSourceNode<'a>>(node: N) -> Vec<N> {
    let start = if node.node_type() == NodeType::Attribute {
        match node.parent() {
            Some(p) => p,
            None => return vec![],
        }
    } else {
        node
    };

    // Collected in document order, then reversed so the nearest node comes first.
    // Ancestors are not part of the preceding axis.
    let mut chain = Vec::new();
    let mut current = Some(start);
    while let Some(c) = current {
        chain.push(c);
        current = c.parent();
    }

    let mut out = Vec::new();
    for c in chain.iter().rev() {
        if let Some((all, index)) = siblings_of(*c) {
            for &sibling in &all[..index] {
                out.push(sibling);
                out.extend(descendants(sibling));
            }
        }
    }
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::xml::XmlDocument;

    const XML: &str = "<root><a><a1/><a2/></a><b id='x'><b1/></b><c/></root>";

    fn names<'a, N: DataSourceNode<'a>>(nodes: &[N]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| n.name().map(|q| q.local_part.to_string()).unwrap_or_default())
            .collect()
    }

    fn find<'a, N: DataSourceNode<'a>>(from: N, name: &str) -> N {
        descendants(from)
            .into_iter()
            .find(|n| n.name().is_some_and(|q| q.local_part == name))
            .unwrap()
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = XmlDocument::parse(XML).unwrap();
        let root = doc.root_node();
        assert_eq!(
            names(&collect(Axis::Descendant, root)),
            vec!["root", "a", "a1", "a2", "b", "b1", "c"]
        );
    }

    #[test]
    fn test_reverse_axes_nearest_first() {
        let doc = XmlDocument::parse(XML).unwrap();
        let root = doc.root_node();
        let b1 = find(root, "b1");
        assert_eq!(names(&collect(Axis::Ancestor, b1)), vec!["b", "root", ""]);

        let c = find(root, "c");
        assert_eq!(names(&collect(Axis::PrecedingSibling, c)), vec!["b", "a"]);
        assert_eq!(
            names(&collect(Axis::Preceding, c)),
            vec!["b1", "b", "a2", "a1", "a"]
        );
    }

    #[test]
    fn test_following_axes() {
        let doc = XmlDocument::parse(XML).unwrap();
        let root = doc.root_node();
        let a1 = find(root, "a1");
        assert_eq!(names(&collect(Axis::FollowingSibling, a1)), vec!["a2"]);
        assert_eq!(
            names(&collect(Axis::Following, a1)),
            vec!["a2", "b", "b1", "c"]
        );
    }

    #[test]
    fn test_attribute_axis_and_siblings() {
        let doc = XmlDocument::parse(XML).unwrap();
        let root = doc.root_node();
        let b = find(root, "b");
        let attrs = collect(Axis::Attribute, b);
        assert_eq!(names(&attrs), vec!["id"]);
        assert!(collect(Axis::FollowingSibling, attrs[0]).is_empty());
        assert_eq!(names(&collect(Axis::Parent, attrs[0])), vec!["b"]);
    }
}
