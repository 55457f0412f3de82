//! The compiled form of one mapping section.

use std::fmt;
use xmlmap_types::{KeyKind, ScalarKind, ValueKind};

/// Keeps an entry only when `expr` selects a node whose text is exactly `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub expr: String,
    pub value: String,
}

/// Where a rule's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValue {
    /// A literal emitted as a string.
    Constant(String),
    /// One entry per node selected by `expr`, each coerced to `kind`.
    Scalar { kind: ScalarKind, expr: String },
    /// One entry holding every selected node coerced to `kind`.
    List { kind: ScalarKind, expr: String },
    /// A nested dictionary built from a non-empty rule forest.
    Dict(Vec<MappingRule>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRule {
    pub key_kind: KeyKind,
    /// The literal key for `KeyKind::Constant`, an XPath expression otherwise.
    pub key_expr: String,
    pub value: RuleValue,
    pub filter: Option<Filter>,
}

impl MappingRule {
    pub fn value_kind(&self) -> ValueKind {
        match &self.value {
            RuleValue::Constant(_) => ValueKind::Constant,
            RuleValue::Scalar { kind, .. } => kind.value_kind(),
            RuleValue::List { kind, .. } => kind.list_kind(),
            RuleValue::Dict(_) => ValueKind::Dict,
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        write!(f, "{}[{}] {}", pad, self.key_kind, self.key_expr)?;
        match &self.value {
            RuleValue::Constant(literal) => write!(f, " => [constant] {}", literal)?,
            RuleValue::Scalar { kind, expr } => write!(f, " => [{}] {}", kind.value_kind(), expr)?,
            RuleValue::List { kind, expr } => write!(f, " => [{}] {}", kind.list_kind(), expr)?,
            RuleValue::Dict(_) => f.write_str(" => [dict]")?,
        }
        if let Some(filter) = &self.filter {
            write!(f, " (filter: {} == '{}')", filter.expr, filter.value)?;
        }
        writeln!(f)?;
        if let RuleValue::Dict(children) = &self.value {
            for child in children {
                child.write_indented(f, depth + 1)?;
            }
        }
        Ok(())
    }
}

/// The rules of one named mapping section, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTree {
    pub schema: String,
    pub rules: Vec<MappingRule>,
}

impl MappingTree {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// An indented listing of every rule, one per line.
impl fmt::Display for MappingTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mapping '{}'", self.schema)?;
        for rule in &self.rules {
            rule.write_indented(f, 1)?;
        }
        Ok(())
    }
}
