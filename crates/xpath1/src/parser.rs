//! A `nom`-based parser for the XPath 1.0 expression language.

use super::ast::*;
use crate::error::XPathError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit0, digit1, multispace0, satisfy},
    combinator::{map, map_res, not, opt, peek, recognize},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, terminated},
};

// --- Main Public Parser ---

/// Parses a complete expression. Trailing input that does not belong to the
/// expression is an error.
pub fn parse_expression(input: &str) -> Result<Expression, XPathError> {
    match expression(input.trim()) {
        Ok(("", expr)) => Ok(expr),
        Ok((rem, _)) => Err(XPathError::XPathParse(
            input.to_string(),
            format!("Unexpected trailing input: '{}'", rem),
        )),
        Err(e) => Err(XPathError::XPathParse(input.to_string(), e.to_string())),
    }
}

// --- Combinators & Helpers ---

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}

/// Matches an operator name such as `and` or `div` only when it is not the
/// prefix of a longer name.
fn keyword<'a>(kw: &'static str) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    terminated(tag(kw), not(peek(satisfy(is_name_char))))
}

fn build_binary_expr_parser<'a, F, G>(
    sub_expr_parser: F,
    op_parser: G,
) -> impl FnMut(&'a str) -> IResult<&'a str, Expression>
where
    F: Parser<&'a str, Output = Expression, Error = nom::error::Error<&'a str>> + Clone,
    G: Parser<&'a str, Output = BinaryOperator, Error = nom::error::Error<&'a str>> + Clone,
{
    move |input: &str| {
        let (input, mut left) = sub_expr_parser.clone().parse(input)?;
        let (input, remainder) =
            many0(pair(ws(op_parser.clone()), sub_expr_parser.clone())).parse(input)?;

        for (op, right) in remainder {
            left = Expression::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok((input, left))
    }
}

// --- Expression Parsers (lowest precedence first) ---

fn expression(input: &str) -> IResult<&str, Expression> {
    or_expr(input)
}

fn or_op(input: &str) -> IResult<&str, BinaryOperator> {
    map(keyword("or"), |_| BinaryOperator::Or).parse(input)
}

fn and_op(input: &str) -> IResult<&str, BinaryOperator> {
    map(keyword("and"), |_| BinaryOperator::And).parse(input)
}

fn equality_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        map(tag("!="), |_| BinaryOperator::NotEquals),
        map(tag("="), |_| BinaryOperator::Equals),
    ))
    .parse(input)
}

fn relational_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        map(alt((tag("<="), tag("&lt;="))), |_| BinaryOperator::LessThanOrEqual),
        map(alt((tag(">="), tag("&gt;="))), |_| BinaryOperator::GreaterThanOrEqual),
        map(alt((tag("<"), tag("&lt;"))), |_| BinaryOperator::LessThan),
        map(alt((tag(">"), tag("&gt;"))), |_| BinaryOperator::GreaterThan),
    ))
    .parse(input)
}

fn additive_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        map(char('+'), |_| BinaryOperator::Plus),
        map(char('-'), |_| BinaryOperator::Minus),
    ))
    .parse(input)
}

fn multiplicative_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        map(char('*'), |_| BinaryOperator::Multiply),
        map(keyword("div"), |_| BinaryOperator::Divide),
        map(keyword("mod"), |_| BinaryOperator::Modulo),
    ))
    .parse(input)
}

fn union_op(input: &str) -> IResult<&str, BinaryOperator> {
    map(char('|'), |_| BinaryOperator::Union).parse(input)
}

fn or_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(and_expr, or_op)(input)
}

fn and_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(equality_expr, and_op)(input)
}

fn equality_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(relational_expr, equality_op)(input)
}

fn relational_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(additive_expr, relational_op)(input)
}

fn additive_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(multiplicative_expr, additive_op)(input)
}

fn multiplicative_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(unary_expr, multiplicative_op)(input)
}

fn unary_expr(input: &str) -> IResult<&str, Expression> {
    let (i, neg) = opt(ws(char('-'))).parse(input)?;
    let (i, expr) = union_expr(i)?;
    match neg {
        Some(_) => Ok((i, Expression::Negate(Box::new(expr)))),
        None => Ok((i, expr)),
    }
}

fn union_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(path_expr, union_op)(input)
}

/// A primary expression optionally continued by further steps (`(a|b)/c`),
/// or a plain location path.
fn path_expr(input: &str) -> IResult<&str, Expression> {
    // Primary expressions go first so that `position()` is not taken for a
    // step named `position`.
    let (i, start_expr) = alt((
        filter_expr,
        map(ws(location_path), Expression::LocationPath),
    ))
    .parse(input)?;

    let (i, remainder_steps) = many0(pair(ws(alt((tag("//"), tag("/")))), step)).parse(i)?;
    if remainder_steps.is_empty() {
        return Ok((i, start_expr));
    }

    let (start_point, is_absolute, mut steps) = match start_expr {
        Expression::LocationPath(lp) => (lp.start_point, lp.is_absolute, lp.steps),
        other => (Some(Box::new(other)), false, vec![]),
    };
    push_steps(&mut steps, remainder_steps);

    Ok((
        i,
        Expression::LocationPath(LocationPath {
            start_point,
            is_absolute,
            steps,
        }),
    ))
}

/// A primary expression with optional predicates over its node-set.
fn filter_expr(input: &str) -> IResult<&str, Expression> {
    let (i, primary) = primary_expr(input)?;
    let (i, predicates) = many0(ws(predicate)).parse(i)?;
    if predicates.is_empty() {
        return Ok((i, primary));
    }
    Ok((
        i,
        Expression::Filter {
            primary: Box::new(primary),
            predicates,
        },
    ))
}

fn push_steps(steps: &mut Vec<Step>, remainder: Vec<(&str, Step)>) {
    for (sep, next_step) in remainder {
        if sep == "//" {
            steps.push(Step::descendant_or_self());
        }
        steps.push(next_step);
    }
}

fn primary_expr(input: &str) -> IResult<&str, Expression> {
    ws(alt((
        map(number, Expression::Number),
        map(string_literal, Expression::Literal),
        function_call,
        delimited(ws(char('(')), expression, ws(char(')'))),
    )))
    .parse(input)
}

// --- Literal Parsers ---

/// Digits with an optional fraction, or a bare fraction. Names such as `Info`
/// or `nan` are never numbers.
fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        str::parse::<f64>,
    )
    .parse(input)
}

fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        alt((
            delimited(char('\''), take_while(|c| c != '\''), char('\'')),
            delimited(char('"'), take_while(|c| c != '"'), char('"')),
        )),
        |s: &str| s.to_string(),
    )
    .parse(input)
}

// --- Name and NodeTest Parsers ---

fn nc_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(take_while1(is_name_start), take_while(is_name_char))).parse(input)
}

fn q_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(nc_name, opt(pair(char(':'), nc_name)))).parse(input)
}

fn node_type_test(input: &str) -> IResult<&str, NodeTest> {
    map(
        terminated(
            alt((
                tag("text"),
                tag("node"),
                tag("comment"),
                tag("processing-instruction"),
            )),
            pair(ws(char('(')), char(')')),
        ),
        |node_type: &str| match node_type {
            "text" => NodeTest::NodeType(NodeTypeTest::Text),
            "comment" => NodeTest::NodeType(NodeTypeTest::Comment),
            "processing-instruction" => NodeTest::NodeType(NodeTypeTest::ProcessingInstruction),
            _ => NodeTest::NodeType(NodeTypeTest::Node),
        },
    )
    .parse(input)
}

fn node_test(input: &str) -> IResult<&str, NodeTest> {
    alt((
        map(char('*'), |_| NodeTest::Wildcard),
        node_type_test,
        // Namespace prefixes are dropped: name tests compare local names.
        map(q_name, |name: &str| {
            let local = name.rsplit(':').next().unwrap_or(name);
            NodeTest::Name(local.to_string())
        }),
    ))
    .parse(input)
}

// --- Path Parsers ---

fn axis(input: &str) -> IResult<&str, Axis> {
    terminated(
        alt((
            map(tag("child"), |_| Axis::Child),
            map(tag("descendant-or-self"), |_| Axis::DescendantOrSelf),
            map(tag("descendant"), |_| Axis::Descendant),
            map(tag("attribute"), |_| Axis::Attribute),
            map(tag("parent"), |_| Axis::Parent),
            map(tag("ancestor-or-self"), |_| Axis::AncestorOrSelf),
            map(tag("ancestor"), |_| Axis::Ancestor),
            map(tag("self"), |_| Axis::SelfAxis),
            map(tag("following-sibling"), |_| Axis::FollowingSibling),
            map(tag("preceding-sibling"), |_| Axis::PrecedingSibling),
            map(tag("following"), |_| Axis::Following),
            map(tag("preceding"), |_| Axis::Preceding),
        )),
        tag("::"),
    )
    .parse(input)
}

fn predicate(input: &str) -> IResult<&str, Expression> {
    delimited(ws(char('[')), expression, ws(char(']'))).parse(input)
}

fn step(input: &str) -> IResult<&str, Step> {
    let any_node = NodeTest::NodeType(NodeTypeTest::Node);
    let (i, (axis, node_test)) = alt((
        map(tag(".."), |_| (Axis::Parent, any_node.clone())),
        map(char('.'), |_| (Axis::SelfAxis, any_node.clone())),
        map(preceded(char('@'), node_test), |nt| (Axis::Attribute, nt)),
        map(pair(opt(axis), node_test), |(ax, nt)| (ax.unwrap_or(Axis::Child), nt)),
    ))
    .parse(input)?;
    let (i, predicates) = many0(predicate).parse(i)?;
    Ok((
        i,
        Step {
            axis,
            node_test,
            predicates,
        },
    ))
}

fn location_path(input: &str) -> IResult<&str, LocationPath> {
    let (i, (is_absolute, mut steps)) = if let Ok((rem, _)) =
        tag::<&str, &str, nom::error::Error<&str>>("//").parse(input)
    {
        let (rem, first) = step(rem)?;
        (rem, (true, vec![Step::descendant_or_self(), first]))
    } else if let Ok((rem, _)) = char::<&str, nom::error::Error<&str>>('/').parse(input) {
        match step(rem) {
            Ok((rem, first)) => (rem, (true, vec![first])),
            // A lone `/` selects the root node.
            Err(_) => (rem, (true, vec![])),
        }
    } else {
        let (rem, first) = step(input)?;
        (rem, (false, vec![first]))
    };

    let (i, remainder) = many0(pair(alt((tag("//"), tag("/"))), step)).parse(i)?;
    push_steps(&mut steps, remainder);

    Ok((
        i,
        LocationPath {
            start_point: None,
            is_absolute,
            steps,
        },
    ))
}

// --- Function Call Parser ---

fn function_call(input: &str) -> IResult<&str, Expression> {
    let (i, name) = q_name(input)?;
    let (i, _) = peek(ws(char('('))).parse(i)?;

    // Node-type tests like text() belong to the step parser.
    if matches!(name, "text" | "node" | "comment" | "processing-instruction") {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    let (i, args) = delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), expression),
        ws(char(')')),
    )
    .parse(i)?;

    Ok((
        i,
        Expression::FunctionCall {
            name: name.to_string(),
            args,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(name: &str) -> Step {
        Step {
            axis: Axis::Child,
            node_test: NodeTest::Name(name.into()),
            predicates: vec![],
        }
    }

    fn relative(steps: Vec<Step>) -> Expression {
        Expression::LocationPath(LocationPath {
            start_point: None,
            is_absolute: false,
            steps,
        })
    }

    #[test]
    fn test_parse_simple_path() {
        let result = parse_expression("foo/bar").unwrap();
        assert_eq!(result, relative(vec![child("foo"), child("bar")]));
    }

    #[test]
    fn test_parse_absolute_path() {
        let result = parse_expression("/dmidecode/BIOSinfo/Vendor").unwrap();
        assert_eq!(
            result,
            Expression::LocationPath(LocationPath {
                start_point: None,
                is_absolute: true,
                steps: vec![child("dmidecode"), child("BIOSinfo"), child("Vendor")],
            })
        );
    }

    #[test]
    fn test_names_that_look_like_numbers_or_keywords() {
        // `Info` starts with "inf" and `order` with "or"; both are plain names.
        assert_eq!(parse_expression("Info").unwrap(), relative(vec![child("Info")]));
        assert_eq!(parse_expression("order").unwrap(), relative(vec![child("order")]));
        assert_eq!(parse_expression("nan").unwrap(), relative(vec![child("nan")]));
        assert_eq!(
            parse_expression("divider/mode").unwrap(),
            relative(vec![child("divider"), child("mode")])
        );
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_expression("42").unwrap(), Expression::Number(42.0));
        assert_eq!(parse_expression(".5").unwrap(), Expression::Number(0.5));
        assert_eq!(parse_expression("3.").unwrap(), Expression::Number(3.0));
    }

    #[test]
    fn test_parse_negation() {
        assert_eq!(
            parse_expression("-5").unwrap(),
            Expression::Negate(Box::new(Expression::Number(5.0)))
        );
        assert!(matches!(
            parse_expression("10 - -5").unwrap(),
            Expression::BinaryOp {
                op: BinaryOperator::Minus,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_abbreviated_steps() {
        let result = parse_expression("../sibling/.").unwrap();
        if let Expression::LocationPath(lp) = result {
            assert_eq!(lp.steps.len(), 3);
            assert_eq!(lp.steps[0].axis, Axis::Parent);
            assert_eq!(lp.steps[2].axis, Axis::SelfAxis);
            assert_eq!(lp.steps[2].node_test, NodeTest::NodeType(NodeTypeTest::Node));
        } else {
            panic!("Expected location path");
        }
    }

    #[test]
    fn test_parse_attribute_predicate() {
        let result = parse_expression("flag[@enabled = '1']").unwrap();
        let attr = relative(vec![Step {
            axis: Axis::Attribute,
            node_test: NodeTest::Name("enabled".into()),
            predicates: vec![],
        }]);
        assert_eq!(
            result,
            relative(vec![Step {
                axis: Axis::Child,
                node_test: NodeTest::Name("flag".into()),
                predicates: vec![Expression::BinaryOp {
                    left: Box::new(attr),
                    op: BinaryOperator::Equals,
                    right: Box::new(Expression::Literal("1".into())),
                }],
            }])
        );
    }

    #[test]
    fn test_parse_axes() {
        for (text, expected) in [
            ("following-sibling::foo", Axis::FollowingSibling),
            ("ancestor-or-self::*", Axis::AncestorOrSelf),
            ("preceding::*", Axis::Preceding),
            ("descendant::x", Axis::Descendant),
        ] {
            match parse_expression(text).unwrap() {
                Expression::LocationPath(lp) => assert_eq!(lp.steps[0].axis, expected),
                other => panic!("Expected location path, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_descendant_or_self() {
        let result = parse_expression("//foo").unwrap();
        assert_eq!(
            result,
            Expression::LocationPath(LocationPath {
                start_point: None,
                is_absolute: true,
                steps: vec![Step::descendant_or_self(), child("foo")],
            })
        );
    }

    #[test]
    fn test_parse_function_calls() {
        let result = parse_expression("concat( name , 'x')").unwrap();
        if let Expression::FunctionCall { name, args } = result {
            assert_eq!(name, "concat");
            assert_eq!(args.len(), 2);
            assert!(args[0].is_location_path());
        } else {
            panic!("Expected function call");
        }

        let result = parse_expression("item[position() = last()]").unwrap();
        assert!(result.is_location_path());
    }

    #[test]
    fn test_parse_filtered_union_path() {
        let result = parse_expression("(a | b)/c").unwrap();
        if let Expression::LocationPath(lp) = result {
            assert!(lp.start_point.is_some());
            assert_eq!(lp.steps, vec![child("c")]);
        } else {
            panic!("Expected location path");
        }
    }

    #[test]
    fn test_parse_operator_precedence() {
        let result = parse_expression("1 + 2 * 3").unwrap();
        assert_eq!(
            result,
            Expression::BinaryOp {
                left: Box::new(Expression::Number(1.0)),
                op: BinaryOperator::Plus,
                right: Box::new(Expression::BinaryOp {
                    left: Box::new(Expression::Number(2.0)),
                    op: BinaryOperator::Multiply,
                    right: Box::new(Expression::Number(3.0)),
                }),
            }
        );
    }

    #[test]
    fn test_parse_escaped_relational() {
        let result = parse_expression("a &gt;= b").unwrap();
        assert!(matches!(
            result,
            Expression::BinaryOp {
                op: BinaryOperator::GreaterThanOrEqual,
                ..
            }
        ));
    }

    #[test]
    fn test_namespace_prefix_is_dropped() {
        assert_eq!(parse_expression("ns:item").unwrap(), relative(vec![child("item")]));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_expression("foo["),
            Err(XPathError::XPathParse(..))
        ));
        assert!(parse_expression("a b").is_err());
        assert!(parse_expression("").is_err());
    }

    #[test]
    fn test_parse_filter_expression_with_predicates() {
        let result = parse_expression("(//n)[2]").unwrap();
        let Expression::Filter {
            primary,
            predicates,
        } = result
        else {
            panic!("expected filter expression, got {:?}", result);
        };
        assert!(primary.is_location_path());
        assert_eq!(predicates, vec![Expression::Number(2.0)]);

        let result = parse_expression("(//g)[last()] / n").unwrap();
        let Expression::LocationPath(lp) = result else {
            panic!("expected location path");
        };
        assert!(matches!(lp.start_point.as_deref(), Some(Expression::Filter { .. })));
        assert_eq!(lp.steps, vec![child("n")]);
    }
}
