//! Applies a compiled [`MappingTree`] to a document.

use crate::context::{XPathContext, text_content};
use xmlmap_mapping::{MappingRule, MappingTree, RuleValue};
use xmlmap_types::{Dict, KeyKind, Value, coerce_scalar};
use xmlmap_xpath1::DataSourceNode;

/// Builds the dictionary described by `tree` from the document behind `ctx`.
///
/// Entries are inserted in rule order, then in match order. A later entry
/// with the same key replaces the earlier value in place.
pub fn transform<'a, N>(tree: &MappingTree, ctx: &XPathContext<N>) -> Dict
where
    N: DataSourceNode<'a> + 'a,
{
    log::debug!("Transforming with mapping '{}'", tree.schema);
    transform_rules(&tree.rules, ctx, 0)
}

fn transform_rules<'a, N>(rules: &[MappingRule], ctx: &XPathContext<N>, level: usize) -> Dict
where
    N: DataSourceNode<'a> + 'a,
{
    let mut dict = Dict::new();
    for rule in rules {
        apply_rule(rule, ctx, level, &mut dict);
    }
    dict
}

fn apply_rule<'a, N>(rule: &MappingRule, ctx: &XPathContext<N>, level: usize, out: &mut Dict)
where
    N: DataSourceNode<'a> + 'a,
{
    log::debug!(
        "{:indent$}{} [{}] => [{}]",
        "",
        rule.key_expr,
        rule.key_kind,
        rule.value_kind(),
        indent = level * 2
    );

    if !passes_filter(rule, ctx) {
        log::debug!("Filter excluded key '{}'", rule.key_expr);
        return;
    }

    match &rule.value {
        RuleValue::Constant(literal) => {
            if let Some(key) = resolve_key(rule, ctx, 0) {
                out.set(key, Value::String(literal.clone()));
            }
        }
        RuleValue::Scalar { kind, expr } => {
            let nodes = ctx.query(expr);
            if nodes.is_empty() {
                log::debug!("No value for key '{}' at '{}'", rule.key_expr, expr);
                return;
            }
            for (index, node) in nodes.iter().enumerate() {
                if let Some(key) = resolve_key(rule, ctx, index) {
                    out.set(key, coerce_scalar(*kind, text_content(node).as_deref()));
                }
            }
        }
        RuleValue::List { kind, expr } => {
            let nodes = ctx.query(expr);
            if nodes.is_empty() {
                log::debug!("No values for list '{}' at '{}'", rule.key_expr, expr);
                return;
            }
            if let Some(key) = resolve_key(rule, ctx, 0) {
                let items = nodes
                    .iter()
                    .map(|node| coerce_scalar(*kind, text_content(node).as_deref()))
                    .collect();
                out.set(key, Value::List(items));
            }
        }
        RuleValue::Dict(children) => {
            if let Some(key) = resolve_key(rule, ctx, 0) {
                out.set(key, Value::Dict(transform_rules(children, ctx, level + 1)));
            }
        }
    }
}

/// Resolves the key of the entry produced by the `index`-th value match.
///
/// Constant keys are returned as written. Otherwise the key expression is
/// evaluated and the text of its `index`-th node is used. `None` when that
/// node does not exist or has no text.
pub fn resolve_key<'a, N>(rule: &MappingRule, ctx: &XPathContext<N>, index: usize) -> Option<String>
where
    N: DataSourceNode<'a> + 'a,
{
    if rule.key_kind == KeyKind::Constant {
        return Some(rule.key_expr.clone());
    }

    let nodes = ctx.query(&rule.key_expr);
    if nodes.is_empty() {
        log::warn!("Could not resolve key '{}'", rule.key_expr);
        return None;
    }
    let Some(node) = nodes.get(index) else {
        log::warn!(
            "Key '{}' has {} matches, no key for value #{}",
            rule.key_expr,
            nodes.len(),
            index + 1
        );
        return None;
    };
    let key = text_content(node);
    if key.is_none() {
        log::warn!("Key '{}' match #{} has no text", rule.key_expr, index + 1);
    }
    key
}

/// Whether the rule's filter, if any, selects a node whose text equals the
/// filter value.
pub fn passes_filter<'a, N>(rule: &MappingRule, ctx: &XPathContext<N>) -> bool
where
    N: DataSourceNode<'a> + 'a,
{
    let Some(filter) = &rule.filter else {
        return true;
    };
    ctx.query(&filter.expr)
        .iter()
        .any(|node| node.string_value() == filter.value)
}
