//! A self-contained XPath 1.0 engine.
//!
//! Expressions are parsed with `nom` into an [`Expression`] tree and evaluated
//! against any tree implementing [`DataSourceNode`]. The roxmltree adapter in
//! [`datasource::xml`] is the one used for mapping files and input documents.

pub mod ast;
pub mod axes;
pub mod datasource;
pub mod engine;
pub mod error;
pub mod functions;
pub mod operators;
pub mod parser;

pub use ast::{Axis, BinaryOperator, Expression, LocationPath, NodeTest, Step};
pub use datasource::xml::{SubtreeCopy, XmlDocument, XmlNode};
pub use datasource::{DataSourceNode, NodeType, QName};
pub use engine::{EvaluationContext, XPathValue, evaluate, select};
pub use error::XPathError;
pub use parser::parse_expression;
