//! `DataSourceNode` over roxmltree documents, plus deep copies of subtrees.

use super::{DataSourceNode, NodeType, QName};
use roxmltree::Node;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A parsed XML document that XPath expressions can be evaluated against.
pub struct XmlDocument<'input> {
    doc: roxmltree::Document<'input>,
}

impl<'input> XmlDocument<'input> {
    pub fn parse(text: &'input str) -> Result<Self, roxmltree::Error> {
        let doc = roxmltree::Document::parse(text)?;
        Ok(Self { doc })
    }

    /// The document (root) node, parent of the document element.
    pub fn root_node(&self) -> XmlNode<'_, '_> {
        XmlNode::Element(self.doc.root())
    }

    pub fn document(&self) -> &roxmltree::Document<'input> {
        &self.doc
    }
}

impl<'input> From<roxmltree::Document<'input>> for XmlDocument<'input> {
    fn from(doc: roxmltree::Document<'input>) -> Self {
        Self { doc }
    }
}

/// Either a tree node (element, text, comment, ...) or an attribute.
/// roxmltree stores attributes as data on their element, so an attribute is
/// addressed by its element and its index.
#[derive(Debug, Clone, Copy)]
pub enum XmlNode<'a, 'input> {
    Element(Node<'a, 'input>),
    Attribute { parent: Node<'a, 'input>, index: usize },
}

impl<'a, 'input> XmlNode<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        XmlNode::Element(node)
    }

    /// The underlying tree node, or `None` for an attribute.
    pub fn inner(&self) -> Option<Node<'a, 'input>> {
        match self {
            XmlNode::Element(node) => Some(*node),
            XmlNode::Attribute { .. } => None,
        }
    }

    fn anchor(&self) -> Node<'a, 'input> {
        match self {
            XmlNode::Element(node) => *node,
            XmlNode::Attribute { parent, .. } => *parent,
        }
    }
}

impl PartialEq for XmlNode<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for XmlNode<'_, '_> {}

impl PartialOrd for XmlNode<'_, '_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Document order: node ids follow document order in roxmltree, and an
/// element's attributes sort directly after the element, before its children.
impl Ord for XmlNode<'_, '_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_anchor = self.anchor().id().get().cmp(&other.anchor().id().get());
        match (self, other) {
            (XmlNode::Element(_), XmlNode::Element(_)) => by_anchor,
            (XmlNode::Attribute { index: i1, .. }, XmlNode::Attribute { index: i2, .. }) => {
                by_anchor.then(i1.cmp(i2))
            }
            (XmlNode::Element(_), XmlNode::Attribute { .. }) => by_anchor.then(Ordering::Less),
            (XmlNode::Attribute { .. }, XmlNode::Element(_)) => by_anchor.then(Ordering::Greater),
        }
    }
}

impl Hash for XmlNode<'_, '_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            XmlNode::Element(node) => {
                0u8.hash(state);
                node.id().hash(state);
            }
            XmlNode::Attribute { parent, index } => {
                1u8.hash(state);
                parent.id().hash(state);
                index.hash(state);
            }
        }
    }
}

impl<'a> DataSourceNode<'a> for XmlNode<'a, 'a> {
    fn node_type(&self) -> NodeType {
        match self {
            XmlNode::Element(node) => {
                if node.is_root() {
                    NodeType::Root
                } else if node.is_text() {
                    NodeType::Text
                } else if node.is_comment() {
                    NodeType::Comment
                } else if node.is_pi() {
                    NodeType::ProcessingInstruction
                } else {
                    NodeType::Element
                }
            }
            XmlNode::Attribute { .. } => NodeType::Attribute,
        }
    }

    fn name(&self) -> Option<QName<'a>> {
        match self {
            XmlNode::Element(node) => {
                if node.is_element() {
                    Some(QName {
                        prefix: None,
                        local_part: node.tag_name().name(),
                    })
                } else {
                    node.pi().map(|pi| QName {
                        prefix: None,
                        local_part: pi.target,
                    })
                }
            }
            XmlNode::Attribute { parent, index } => {
                parent.attributes().nth(*index).map(|attr| QName {
                    prefix: (attr.namespace() == Some(XML_NAMESPACE)).then_some("xml"),
                    local_part: attr.name(),
                })
            }
        }
    }

    fn string_value(&self) -> String {
        match self {
            XmlNode::Element(node) => {
                if node.is_element() || node.is_root() {
                    node.descendants()
                        .filter(|n| n.is_text())
                        .filter_map(|n| n.text())
                        .collect()
                } else if node.is_pi() {
                    node.pi()
                        .and_then(|pi| pi.value)
                        .unwrap_or_default()
                        .to_string()
                } else {
                    node.text().unwrap_or_default().to_string()
                }
            }
            XmlNode::Attribute { parent, index } => parent
                .attributes()
                .nth(*index)
                .map(|attr| attr.value().to_string())
                .unwrap_or_default(),
        }
    }

    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        match self {
            XmlNode::Element(node) if node.is_element() => {
                let parent = *node;
                let count = node.attributes().len();
                Box::new((0..count).map(move |index| XmlNode::Attribute { parent, index }))
            }
            _ => Box::new(std::iter::empty()),
        }
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        match self {
            XmlNode::Element(node) => Box::new(node.children().map(XmlNode::Element)),
            XmlNode::Attribute { .. } => Box::new(std::iter::empty()),
        }
    }

    fn parent(&self) -> Option<Self> {
        match self {
            XmlNode::Element(node) => node.parent().map(XmlNode::Element),
            XmlNode::Attribute { parent, .. } => Some(XmlNode::Element(*parent)),
        }
    }
}

/// An owned, standalone copy of a subtree, serialized as XML text.
///
/// The copy keeps elements, attributes, text, comments and processing
/// instructions. Namespace prefixes and declarations are dropped, since name
/// tests only compare local names. Copying the document node copies its
/// document element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtreeCopy {
    text: String,
}

impl SubtreeCopy {
    pub fn of(node: Node<'_, '_>) -> Self {
        let mut text = String::new();
        let start = if node.is_root() {
            node.children().find(|n| n.is_element())
        } else {
            Some(node)
        };
        if let Some(start) = start {
            write_node(&mut text, start);
        }
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parses the copy into a fresh document whose document element is the
    /// copied node.
    pub fn parse(&self) -> Result<XmlDocument<'_>, roxmltree::Error> {
        XmlDocument::parse(&self.text)
    }
}

fn write_node(out: &mut String, node: Node<'_, '_>) {
    if node.is_element() {
        let name = node.tag_name().name();
        out.push('<');
        out.push_str(name);
        let mut seen: Vec<&str> = Vec::new();
        for attr in node.attributes() {
            // Local names of namespaced attributes may collide once prefixes are gone.
            if seen.contains(&attr.name()) {
                continue;
            }
            seen.push(attr.name());
            out.push(' ');
            out.push_str(attr.name());
            out.push_str("=\"");
            escape_into(out, attr.value(), true);
            out.push('"');
        }
        if node.has_children() {
            out.push('>');
            for child in node.children() {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        } else {
            out.push_str("/>");
        }
    } else if node.is_text() {
        escape_into(out, node.text().unwrap_or_default(), false);
    } else if node.is_comment() {
        out.push_str(&format!("<!--{}-->", node.text().unwrap_or_default()));
    } else if let Some(pi) = node.pi() {
        match pi.value {
            Some(value) => out.push_str(&format!("<?{} {}?>", pi.target, value)),
            None => out.push_str(&format!("<?{}?>", pi.target)),
        }
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\t' if attribute => out.push_str("&#9;"),
            '\r' => out.push_str("&#13;"),
            c => out.push(c),
        }
    }
}
