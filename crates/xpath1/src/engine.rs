//! Evaluation of parsed expressions against a `DataSourceNode` tree.

use super::ast::{Axis, Expression, LocationPath, NodeTest, NodeTypeTest, Step};
use super::parser::parse_expression;
use super::{axes, functions, operators};
use crate::datasource::{DataSourceNode, NodeType};
use crate::error::XPathError;
use std::fmt;

/// The result of evaluating an expression.
#[derive(Debug, Clone)]
pub enum XPathValue<N> {
    /// Nodes in document order, without duplicates.
    NodeSet(Vec<N>),
    String(String),
    Number(f64),
    Boolean(bool),
}

impl<'a, N: DataSourceNode<'a>> XPathValue<N> {
    pub fn to_bool(&self) -> bool {
        match self {
            XPathValue::NodeSet(nodes) => !nodes.is_empty(),
            XPathValue::String(s) => !s.is_empty(),
            XPathValue::Number(n) => *n != 0.0 && !n.is_nan(),
            XPathValue::Boolean(b) => *b,
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            XPathValue::Number(n) => *n,
            XPathValue::Boolean(b) => f64::from(u8::from(*b)),
            XPathValue::String(_) | XPathValue::NodeSet(_) => {
                string_to_number(&self.to_string())
            }
        }
    }

    /// The node-set, or a type error for any other kind of value.
    pub fn into_nodes(self) -> Result<Vec<N>, XPathError> {
        match self {
            XPathValue::NodeSet(nodes) => Ok(nodes),
            other => Err(XPathError::TypeError(format!(
                "Expected a node-set, got {}",
                other.type_name()
            ))),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            XPathValue::NodeSet(_) => "node-set",
            XPathValue::String(_) => "string",
            XPathValue::Number(_) => "number",
            XPathValue::Boolean(_) => "boolean",
        }
    }
}

/// XPath 1.0 `number()` conversion of a string: optional whitespace, an
/// optional minus sign, then digits with an optional fraction. Anything else,
/// including exponents, `+5` and `inf`, is NaN.
pub fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r'));
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let valid = all_digits(int_part)
        && frac_part.is_none_or(all_digits)
        && (!int_part.is_empty() || frac_part.is_some_and(|f| !f.is_empty()));
    if valid {
        trimmed.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// XPath 1.0 string conversion. A node-set converts to the string value of its
/// first node.
impl<'a, N: DataSourceNode<'a>> fmt::Display for XPathValue<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XPathValue::NodeSet(nodes) => match nodes.first() {
                Some(node) => f.write_str(&node.string_value()),
                None => Ok(()),
            },
            XPathValue::String(s) => f.write_str(s),
            XPathValue::Number(n) if n.is_nan() => f.write_str("NaN"),
            XPathValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            XPathValue::Number(n) => write!(f, "{}", n),
            XPathValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// The dynamic context of an evaluation: the context node, its proximity
/// position and size, and the root node absolute paths start from.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<N> {
    pub context_node: N,
    pub root_node: N,
    /// 1-based.
    pub context_position: usize,
    pub context_size: usize,
}

impl<'a, N: DataSourceNode<'a>> EvaluationContext<N> {
    /// A context positioned on `node`; the root is found by walking up its ancestors.
    pub fn new(node: N) -> Self {
        let mut root_node = node;
        while let Some(parent) = root_node.parent() {
            root_node = parent;
        }
        Self {
            context_node: node,
            root_node,
            context_position: 1,
            context_size: 1,
        }
    }

    fn focus(&self, node: N, position: usize, size: usize) -> Self {
        Self {
            context_node: node,
            root_node: self.root_node,
            context_position: position,
            context_size: size,
        }
    }
}

/// Parses `expr` and evaluates it with `context` as the context node,
/// requiring a node-set result.
pub fn select<'a, N>(expr: &str, context: N) -> Result<Vec<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    let parsed = parse_expression(expr)?;
    let nodes = evaluate(&parsed, &EvaluationContext::new(context))?.into_nodes()?;
    log::trace!("'{}' selected {} node(s)", expr, nodes.len());
    Ok(nodes)
}

pub fn evaluate<'a, N>(
    expr: &Expression,
    e_ctx: &EvaluationContext<N>,
) -> Result<XPathValue<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    match expr {
        Expression::Literal(s) => Ok(XPathValue::String(s.clone())),
        Expression::Number(n) => Ok(XPathValue::Number(*n)),
        Expression::LocationPath(path) => {
            Ok(XPathValue::NodeSet(evaluate_location_path(path, e_ctx)?))
        }
        Expression::FunctionCall { name, args } => {
            let evaluated = args
                .iter()
                .map(|arg| evaluate(arg, e_ctx))
                .collect::<Result<Vec<_>, _>>()?;
            functions::evaluate_function(name, evaluated, e_ctx)
        }
        Expression::BinaryOp { left, op, right } => {
            let left_val = evaluate(left, e_ctx)?;
            let right_val = evaluate(right, e_ctx)?;
            operators::evaluate(*op, left_val, right_val)
        }
        Expression::Negate(expr) => Ok(XPathValue::Number(-evaluate(expr, e_ctx)?.to_number())),
        Expression::Filter {
            primary,
            predicates,
        } => {
            // Filter predicates count positions in document order.
            let nodes = evaluate(primary, e_ctx)?.into_nodes()?;
            Ok(XPathValue::NodeSet(apply_predicates(nodes, predicates, e_ctx)?))
        }
    }
}

fn evaluate_location_path<'a, N>(
    path: &LocationPath,
    e_ctx: &EvaluationContext<N>,
) -> Result<Vec<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    let mut current = if let Some(start_expr) = &path.start_point {
        evaluate(start_expr, e_ctx)?.into_nodes()?
    } else if path.is_absolute {
        vec![e_ctx.root_node]
    } else {
        vec![e_ctx.context_node]
    };

    for step in &path.steps {
        current = evaluate_step(step, &current, e_ctx)?;
        if current.is_empty() {
            break;
        }
    }
    Ok(current)
}

/// Applies one step to every context node. Predicates see each context node's
/// candidates separately, so `item[1]` picks the first item of every parent.
fn evaluate_step<'a, N>(
    step: &Step,
    context_nodes: &[N],
    e_ctx: &EvaluationContext<N>,
) -> Result<Vec<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    let mut result = Vec::new();
    for &node in context_nodes {
        let candidates: Vec<N> = axes::collect(step.axis, node)
            .into_iter()
            .filter(|n| matches_node_test(n, &step.node_test, step.axis))
            .collect();
        result.extend(apply_predicates(candidates, &step.predicates, e_ctx)?);
    }
    result.sort();
    result.dedup();
    Ok(result)
}

fn matches_node_test<'a, N: DataSourceNode<'a>>(node: &N, test: &NodeTest, axis: Axis) -> bool {
    let principal = if axis == Axis::Attribute {
        NodeType::Attribute
    } else {
        NodeType::Element
    };
    match test {
        NodeTest::Wildcard => node.node_type() == principal,
        NodeTest::Name(name) => {
            node.node_type() == principal && node.name().is_some_and(|q| q.local_part == name)
        }
        NodeTest::NodeType(NodeTypeTest::Node) => true,
        NodeTest::NodeType(NodeTypeTest::Text) => node.node_type() == NodeType::Text,
        NodeTest::NodeType(NodeTypeTest::Comment) => node.node_type() == NodeType::Comment,
        NodeTest::NodeType(NodeTypeTest::ProcessingInstruction) => {
            node.node_type() == NodeType::ProcessingInstruction
        }
    }
}

fn apply_predicates<'a, N>(
    mut nodes: Vec<N>,
    predicates: &[Expression],
    e_ctx: &EvaluationContext<N>,
) -> Result<Vec<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    for predicate in predicates {
        let size = nodes.len();
        let mut kept = Vec::with_capacity(size);
        for (i, node) in nodes.into_iter().enumerate() {
            let result = evaluate(predicate, &e_ctx.focus(node, i + 1, size))?;
            let keep = match result {
                XPathValue::Number(n) => n == (i + 1) as f64,
                other => other.to_bool(),
            };
            if keep {
                kept.push(node);
            }
        }
        nodes = kept;
    }
    Ok(nodes)
}
