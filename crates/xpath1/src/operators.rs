//! Binary operator evaluation, including XPath 1.0's existential node-set comparisons.

use super::ast::BinaryOperator;
use super::engine::{XPathValue, string_to_number};
use crate::datasource::DataSourceNode;
use crate::error::XPathError;

pub fn evaluate<'a, N: DataSourceNode<'a> + 'a>(
    op: BinaryOperator,
    left: XPathValue<N>,
    right: XPathValue<N>,
) -> Result<XPathValue<N>, XPathError> {
    use BinaryOperator::*;
    let value = match op {
        Or => XPathValue::Boolean(left.to_bool() || right.to_bool()),
        And => XPathValue::Boolean(left.to_bool() && right.to_bool()),
        Equals | NotEquals | LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual => {
            XPathValue::Boolean(compare(op, &left, &right))
        }
        Plus => XPathValue::Number(left.to_number() + right.to_number()),
        Minus => XPathValue::Number(left.to_number() - right.to_number()),
        Multiply => XPathValue::Number(left.to_number() * right.to_number()),
        Divide => XPathValue::Number(left.to_number() / right.to_number()),
        Modulo => XPathValue::Number(left.to_number() % right.to_number()),
        Union => return union(left, right),
    };
    Ok(value)
}

fn union<'a, N: DataSourceNode<'a> + 'a>(
    left: XPathValue<N>,
    right: XPathValue<N>,
) -> Result<XPathValue<N>, XPathError> {
    match (left, right) {
        (XPathValue::NodeSet(mut merged), XPathValue::NodeSet(r_nodes)) => {
            merged.extend(r_nodes);
            merged.sort();
            merged.dedup();
            Ok(XPathValue::NodeSet(merged))
        }
        _ => Err(XPathError::TypeError(
            "Both operands of '|' must be node-sets".to_string(),
        )),
    }
}

/// A comparison operand after node-sets have been expanded to their members'
/// string values.
enum Atom {
    Str(String),
    Num(f64),
    Bool(bool),
}

fn compare_atoms(op: BinaryOperator, l: &Atom, r: &Atom) -> bool {
    use BinaryOperator::*;
    let as_num = |a: &Atom| match a {
        Atom::Num(n) => *n,
        Atom::Bool(b) => f64::from(u8::from(*b)),
        Atom::Str(s) => string_to_number(s),
    };
    let as_bool = |a: &Atom| match a {
        Atom::Num(n) => *n != 0.0 && !n.is_nan(),
        Atom::Bool(b) => *b,
        Atom::Str(s) => !s.is_empty(),
    };

    match op {
        Equals | NotEquals => {
            let equal = match (l, r) {
                (Atom::Bool(_), _) | (_, Atom::Bool(_)) => as_bool(l) == as_bool(r),
                (Atom::Num(_), _) | (_, Atom::Num(_)) => as_num(l) == as_num(r),
                (Atom::Str(a), Atom::Str(b)) => a == b,
            };
            if op == Equals { equal } else { !equal }
        }
        LessThan => as_num(l) < as_num(r),
        LessThanOrEqual => as_num(l) <= as_num(r),
        GreaterThan => as_num(l) > as_num(r),
        GreaterThanOrEqual => as_num(l) >= as_num(r),
        _ => false,
    }
}

fn atoms<'a, N: DataSourceNode<'a>>(value: &XPathValue<N>) -> Vec<Atom> {
    match value {
        XPathValue::NodeSet(nodes) => nodes.iter().map(|n| Atom::Str(n.string_value())).collect(),
        XPathValue::String(s) => vec![Atom::Str(s.clone())],
        XPathValue::Number(n) => vec![Atom::Num(*n)],
        XPathValue::Boolean(b) => vec![Atom::Bool(*b)],
    }
}

/// A comparison involving a node-set is true if it holds for any member.
/// Against a boolean, the node-set is converted to a boolean first.
fn compare<'a, N: DataSourceNode<'a>>(
    op: BinaryOperator,
    left: &XPathValue<N>,
    right: &XPathValue<N>,
) -> bool {
    let l_set = matches!(left, XPathValue::NodeSet(_));
    let r_set = matches!(right, XPathValue::NodeSet(_));
    if (l_set && matches!(right, XPathValue::Boolean(_)))
        || (r_set && matches!(left, XPathValue::Boolean(_)))
    {
        return compare_atoms(op, &Atom::Bool(left.to_bool()), &Atom::Bool(right.to_bool()));
    }

    let l_atoms = atoms(left);
    let r_atoms = atoms(right);
    l_atoms
        .iter()
        .any(|l| r_atoms.iter().any(|r| compare_atoms(op, l, r)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::xml::{XmlDocument, XmlNode};

    type V<'a> = XPathValue<XmlNode<'a, 'a>>;

    #[test]
    fn test_logical_and_arithmetic() {
        let t: V = XPathValue::Boolean(true);
        let f: V = XPathValue::Boolean(false);
        assert!(evaluate(BinaryOperator::Or, t.clone(), f.clone()).unwrap().to_bool());
        assert!(!evaluate(BinaryOperator::And, t, f).unwrap().to_bool());

        let ten: V = XPathValue::Number(10.0);
        let three: V = XPathValue::Number(3.0);
        assert_eq!(
            evaluate(BinaryOperator::Modulo, ten.clone(), three.clone()).unwrap().to_number(),
            1.0
        );
        assert_eq!(
            evaluate(BinaryOperator::Minus, ten, three).unwrap().to_number(),
            7.0
        );
    }

    #[test]
    fn test_node_set_comparisons_are_existential() {
        let doc = XmlDocument::parse("<r><v>1</v><v>5</v><v>yes</v></r>").unwrap();
        let r = doc.root_node().children().next().unwrap();
        let set: V = XPathValue::NodeSet(r.children().collect());

        let yes: V = XPathValue::String("yes".into());
        let no: V = XPathValue::String("no".into());
        assert!(compare(BinaryOperator::Equals, &set, &yes));
        assert!(!compare(BinaryOperator::Equals, &set, &no));
        assert!(compare(BinaryOperator::NotEquals, &set, &yes));

        let four: V = XPathValue::Number(4.0);
        assert!(compare(BinaryOperator::GreaterThan, &set, &four));
        assert!(compare(BinaryOperator::LessThan, &set, &four));

        let empty: V = XPathValue::NodeSet(vec![]);
        assert!(!compare(BinaryOperator::Equals, &empty, &yes));
        assert!(!compare(BinaryOperator::NotEquals, &empty, &yes));
        assert!(compare(BinaryOperator::Equals, &empty, &XPathValue::Boolean(false)));
    }

    #[test]
    fn test_union_requires_node_sets() {
        let s: V = XPathValue::String("a".into());
        let empty: V = XPathValue::NodeSet(vec![]);
        assert!(matches!(
            evaluate(BinaryOperator::Union, s, empty),
            Err(XPathError::TypeError(_))
        ));
    }

    #[test]
    fn test_union_sorts_and_dedups() {
        let doc = XmlDocument::parse("<r><a/><b/></r>").unwrap();
        let r = doc.root_node().children().next().unwrap();
        let kids: Vec<_> = r.children().collect();
        let left: V = XPathValue::NodeSet(vec![kids[1], kids[0]]);
        let right: V = XPathValue::NodeSet(vec![kids[1]]);
        match evaluate(BinaryOperator::Union, left, right).unwrap() {
            XPathValue::NodeSet(nodes) => assert_eq!(nodes, vec![kids[0], kids[1]]),
            other => panic!("Expected a node-set, got {:?}", other),
        }
    }
}
