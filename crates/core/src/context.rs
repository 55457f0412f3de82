//! The evaluation context rules are resolved against.

use xmlmap_xpath1::{DataSourceNode, select};

/// A document or subtree node that every rule expression is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct XPathContext<N> {
    node: N,
}

impl<'a, N: DataSourceNode<'a> + 'a> XPathContext<N> {
    pub fn new(node: N) -> Self {
        Self { node }
    }

    pub fn node(&self) -> N {
        self.node
    }

    /// Selects the nodes matched by `expr`, in document order.
    ///
    /// Expressions that fail to parse or do not yield a node-set are logged
    /// and treated as matching nothing.
    pub fn query(&self, expr: &str) -> Vec<N> {
        match select(expr, self.node) {
            Ok(nodes) => nodes,
            Err(e) => {
                log::warn!("Ignoring XPath '{}': {}", expr, e);
                Vec::new()
            }
        }
    }
}

/// The text content of a node, or `None` when it is empty.
pub fn text_content<'a, N: DataSourceNode<'a>>(node: &N) -> Option<String> {
    Some(node.string_value()).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlmap_xpath1::XmlDocument;

    #[test]
    fn test_query_and_text_content() {
        let doc = XmlDocument::parse("<r><a>x</a><a/><a k='v'>y<b>z</b></a></r>").unwrap();
        let ctx = XPathContext::new(doc.root_node());
        let nodes = ctx.query("/r/a");
        let texts: Vec<_> = nodes.iter().map(text_content).collect();
        assert_eq!(
            texts,
            vec![Some("x".to_string()), None, Some("yz".to_string())]
        );
        assert_eq!(text_content(&ctx.query("//@k")[0]).as_deref(), Some("v"));
    }

    #[test]
    fn test_bad_expressions_match_nothing() {
        let doc = XmlDocument::parse("<r><a>1</a></r>").unwrap();
        let ctx = XPathContext::new(doc.root_node());
        assert!(ctx.query("/r/a[").is_empty());
        assert!(ctx.query("count(/r/a)").is_empty());
        assert!(ctx.query("nosuch(/r)").is_empty());
    }
}
