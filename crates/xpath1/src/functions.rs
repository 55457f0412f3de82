//! The XPath 1.0 core function library.

use super::engine::{EvaluationContext, XPathValue, string_to_number};
use crate::datasource::DataSourceNode;
use crate::error::XPathError;

/// Dispatches a function call to its implementation.
pub fn evaluate_function<'a, N: DataSourceNode<'a>>(
    name: &str,
    args: Vec<XPathValue<N>>,
    e_ctx: &EvaluationContext<N>,
) -> Result<XPathValue<N>, XPathError> {
    match name {
        // Node-set
        "last" => no_args(name, &args).map(|_| XPathValue::Number(e_ctx.context_size as f64)),
        "position" => {
            no_args(name, &args).map(|_| XPathValue::Number(e_ctx.context_position as f64))
        }
        "count" => func_count(args),
        "local-name" | "name" => func_name(name, args, e_ctx),

        // String
        "string" => {
            let s = optional_arg(name, args, e_ctx)?.to_string();
            Ok(XPathValue::String(s))
        }
        "concat" => func_concat(args),
        "starts-with" => {
            let [s, prefix] = strings::<2, N>(name, args)?;
            Ok(XPathValue::Boolean(s.starts_with(&prefix)))
        }
        "contains" => {
            let [s, needle] = strings::<2, N>(name, args)?;
            Ok(XPathValue::Boolean(s.contains(&needle)))
        }
        "substring-before" => {
            let [s, sep] = strings::<2, N>(name, args)?;
            let before = s.find(&sep).map(|i| &s[..i]).unwrap_or_default();
            Ok(XPathValue::String(before.to_string()))
        }
        "substring-after" => {
            let [s, sep] = strings::<2, N>(name, args)?;
            let after = s.find(&sep).map(|i| &s[i + sep.len()..]).unwrap_or_default();
            Ok(XPathValue::String(after.to_string()))
        }
        "substring" => func_substring(args),
        "string-length" => {
            let s = optional_arg(name, args, e_ctx)?.to_string();
            Ok(XPathValue::Number(s.chars().count() as f64))
        }
        "normalize-space" => {
            let s = optional_arg(name, args, e_ctx)?.to_string();
            Ok(XPathValue::String(s.split_whitespace().collect::<Vec<_>>().join(" ")))
        }
        "translate" => func_translate(args),

        // Boolean
        "boolean" => {
            let [v] = exact::<1, N>(name, args)?;
            Ok(XPathValue::Boolean(v.to_bool()))
        }
        "not" => {
            let [v] = exact::<1, N>(name, args)?;
            Ok(XPathValue::Boolean(!v.to_bool()))
        }
        "true" => no_args(name, &args).map(|_| XPathValue::Boolean(true)),
        "false" => no_args(name, &args).map(|_| XPathValue::Boolean(false)),

        // Number
        "number" => {
            let n = optional_arg(name, args, e_ctx)?.to_number();
            Ok(XPathValue::Number(n))
        }
        "sum" => func_sum(args),
        "floor" => unary_number(name, args, f64::floor),
        "ceiling" => unary_number(name, args, f64::ceil),
        "round" => unary_number(name, args, |n| (n + 0.5).floor()),

        _ => {
            log::debug!("Call to unknown XPath function '{}'", name);
            Err(XPathError::FunctionError {
                function: name.to_string(),
                message: "Unknown XPath function".to_string(),
            })
        }
    }
}

// --- Argument helpers ---

fn no_args<N>(name: &str, args: &[XPathValue<N>]) -> Result<(), XPathError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(XPathError::arity(name, "0"))
    }
}

fn exact<const K: usize, N>(
    name: &str,
    args: Vec<XPathValue<N>>,
) -> Result<[XPathValue<N>; K], XPathError> {
    args.try_into()
        .map_err(|_| XPathError::arity(name, &K.to_string()))
}

fn strings<'a, const K: usize, N: DataSourceNode<'a>>(
    name: &str,
    args: Vec<XPathValue<N>>,
) -> Result<[String; K], XPathError> {
    Ok(exact::<K, N>(name, args)?.map(|v| v.to_string()))
}

/// The single argument, or the context node as a node-set when omitted.
fn optional_arg<'a, N: DataSourceNode<'a>>(
    name: &str,
    mut args: Vec<XPathValue<N>>,
    e_ctx: &EvaluationContext<N>,
) -> Result<XPathValue<N>, XPathError> {
    match args.len() {
        0 => Ok(XPathValue::NodeSet(vec![e_ctx.context_node])),
        1 => Ok(args.remove(0)),
        _ => Err(XPathError::arity(name, "0 or 1")),
    }
}

fn unary_number<'a, N: DataSourceNode<'a>>(
    name: &str,
    args: Vec<XPathValue<N>>,
    op: impl Fn(f64) -> f64,
) -> Result<XPathValue<N>, XPathError> {
    let [v] = exact::<1, N>(name, args)?;
    Ok(XPathValue::Number(op(v.to_number())))
}

// --- Implementations ---

fn func_count<'a, N: DataSourceNode<'a>>(
    args: Vec<XPathValue<N>>,
) -> Result<XPathValue<N>, XPathError> {
    let [v] = exact::<1, N>("count", args)?;
    let nodes = v.into_nodes()?;
    Ok(XPathValue::Number(nodes.len() as f64))
}

fn func_name<'a, N: DataSourceNode<'a>>(
    name: &str,
    args: Vec<XPathValue<N>>,
    e_ctx: &EvaluationContext<N>,
) -> Result<XPathValue<N>, XPathError> {
    let nodes = optional_arg(name, args, e_ctx)?.into_nodes()?;
    let qualified = nodes.first().and_then(|n| n.name()).map(|q| match q.prefix {
        Some(prefix) if name == "name" => format!("{}:{}", prefix, q.local_part),
        _ => q.local_part.to_string(),
    });
    Ok(XPathValue::String(qualified.unwrap_or_default()))
}

fn func_concat<'a, N: DataSourceNode<'a>>(
    args: Vec<XPathValue<N>>,
) -> Result<XPathValue<N>, XPathError> {
    if args.len() < 2 {
        return Err(XPathError::arity("concat", "2 or more"));
    }
    Ok(XPathValue::String(args.iter().map(|a| a.to_string()).collect()))
}

/// `substring(s, start, len?)` with XPath's 1-based, rounded positions.
fn func_substring<'a, N: DataSourceNode<'a>>(
    args: Vec<XPathValue<N>>,
) -> Result<XPathValue<N>, XPathError> {
    if !(2..=3).contains(&args.len()) {
        return Err(XPathError::arity("substring", "2 or 3"));
    }
    let s = args[0].to_string();
    let round = |n: f64| (n + 0.5).floor();
    let start = round(args[1].to_number());
    let end = match args.get(2) {
        Some(len) => start + round(len.to_number()),
        None => f64::INFINITY,
    };

    let result = s
        .chars()
        .enumerate()
        .filter(|(i, _)| {
            let pos = (*i + 1) as f64;
            pos >= start && pos < end
        })
        .map(|(_, c)| c)
        .collect();
    Ok(XPathValue::String(result))
}

fn func_translate<'a, N: DataSourceNode<'a>>(
    args: Vec<XPathValue<N>>,
) -> Result<XPathValue<N>, XPathError> {
    let [s, from, to] = strings::<3, N>("translate", args)?;
    let to: Vec<char> = to.chars().collect();
    let result = s
        .chars()
        .filter_map(|c| match from.chars().position(|f| f == c) {
            Some(i) => to.get(i).copied(),
            None => Some(c),
        })
        .collect();
    Ok(XPathValue::String(result))
}

fn func_sum<'a, N: DataSourceNode<'a>>(
    args: Vec<XPathValue<N>>,
) -> Result<XPathValue<N>, XPathError> {
    let [v] = exact::<1, N>("sum", args)?;
    let total = v
        .into_nodes()?
        .iter()
        .map(|n| string_to_number(&n.string_value()))
        .sum();
    Ok(XPathValue::Number(total))
}
