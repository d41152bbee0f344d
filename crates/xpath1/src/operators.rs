//! Implements the binary operators of the XPath 1.0 expression language.

use super::ast::BinaryOperator;
use super::engine::XPathValue;
use crate::datasource::DataSourceNode;
use crate::error::XPathError;
use std::collections::HashSet;

/// Applies a binary operator to two already-evaluated operands.
pub fn evaluate<'a, N>(
    op: BinaryOperator,
    left: XPathValue<N>,
    right: XPathValue<N>,
) -> Result<XPathValue<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    match op {
        BinaryOperator::Or => Ok(XPathValue::Boolean(left.to_bool() || right.to_bool())),
        BinaryOperator::And => Ok(XPathValue::Boolean(left.to_bool() && right.to_bool())),
        BinaryOperator::Equals => Ok(XPathValue::Boolean(compare_equality(&left, &right, true))),
        BinaryOperator::NotEquals => {
            Ok(XPathValue::Boolean(compare_equality(&left, &right, false)))
        }
        BinaryOperator::LessThan => Ok(XPathValue::Boolean(compare_relational(
            &left,
            &right,
            |a, b| a < b,
        ))),
        BinaryOperator::LessThanOrEqual => Ok(XPathValue::Boolean(compare_relational(
            &left,
            &right,
            |a, b| a <= b,
        ))),
        BinaryOperator::GreaterThan => Ok(XPathValue::Boolean(compare_relational(
            &left,
            &right,
            |a, b| a > b,
        ))),
        BinaryOperator::GreaterThanOrEqual => Ok(XPathValue::Boolean(compare_relational(
            &left,
            &right,
            |a, b| a >= b,
        ))),
        BinaryOperator::Plus => Ok(XPathValue::Number(left.to_number() + right.to_number())),
        BinaryOperator::Minus => Ok(XPathValue::Number(left.to_number() - right.to_number())),
        BinaryOperator::Multiply => Ok(XPathValue::Number(left.to_number() * right.to_number())),
        BinaryOperator::Divide => Ok(XPathValue::Number(left.to_number() / right.to_number())),
        BinaryOperator::Modulo => Ok(XPathValue::Number(left.to_number() % right.to_number())),
        BinaryOperator::Union => union(left, right),
    }
}

/// XPath 1.0 `=`/`!=` comparison rules (section 3.4 of the spec). When either
/// side is a node-set, the comparison holds if it holds for *any* node in the
/// set (converted to the type of the other operand); otherwise both sides are
/// coerced to a common type before comparing.
fn compare_equality<'a, N>(left: &XPathValue<N>, right: &XPathValue<N>, want_equal: bool) -> bool
where
    N: DataSourceNode<'a> + 'a,
{
    use XPathValue::*;

    match (left, right) {
        (NodeSet(a), NodeSet(b)) => a.iter().any(|na| {
            let sa = na.string_value();
            b.iter().any(|nb| (sa == nb.string_value()) == want_equal)
        }),
        (NodeSet(nodes), other) | (other, NodeSet(nodes)) => nodes.iter().any(|n| {
            let node_as_other_type = match other {
                Number(_) => Number(n.string_value().trim().parse().unwrap_or(f64::NAN)),
                Boolean(_) => Boolean(!n.string_value().is_empty()),
                _ => String(n.string_value()),
            };
            scalar_eq(&node_as_other_type, other) == want_equal
        }),
        (Boolean(_), _) | (_, Boolean(_)) => (left.to_bool() == right.to_bool()) == want_equal,
        (Number(_), _) | (_, Number(_)) => (left.to_number() == right.to_number()) == want_equal,
        _ => (left.to_string() == right.to_string()) == want_equal,
    }
}

fn scalar_eq<'a, N>(a: &XPathValue<N>, b: &XPathValue<N>) -> bool
where
    N: DataSourceNode<'a> + 'a,
{
    match (a, b) {
        (XPathValue::Number(_), _) | (_, XPathValue::Number(_)) => a.to_number() == b.to_number(),
        (XPathValue::Boolean(_), _) | (_, XPathValue::Boolean(_)) => a.to_bool() == b.to_bool(),
        _ => a.to_string() == b.to_string(),
    }
}

/// XPath 1.0 relational comparisons always compare numerically, except that a
/// node-set operand contributes every one of its member's numeric string
/// values, and the comparison holds if it holds for any pairing.
fn compare_relational<'a, N, F>(left: &XPathValue<N>, right: &XPathValue<N>, cmp: F) -> bool
where
    N: DataSourceNode<'a> + 'a,
    F: Fn(f64, f64) -> bool,
{
    use XPathValue::*;

    match (left, right) {
        (NodeSet(a), NodeSet(b)) => a.iter().any(|na| {
            let x = na.string_value().trim().parse().unwrap_or(f64::NAN);
            b.iter().any(|nb| {
                let y = nb.string_value().trim().parse().unwrap_or(f64::NAN);
                cmp(x, y)
            })
        }),
        (NodeSet(nodes), _) => nodes.iter().any(|n| {
            let x = n.string_value().trim().parse().unwrap_or(f64::NAN);
            cmp(x, right.to_number())
        }),
        (_, NodeSet(nodes)) => nodes.iter().any(|n| {
            let y = n.string_value().trim().parse().unwrap_or(f64::NAN);
            cmp(left.to_number(), y)
        }),
        _ => cmp(left.to_number(), right.to_number()),
    }
}

/// The `|` operator: the union of two node-sets, deduplicated and returned in
/// document order.
fn union<'a, N>(left: XPathValue<N>, right: XPathValue<N>) -> Result<XPathValue<N>, XPathError>
where
    N: DataSourceNode<'a> + 'a,
{
    match (left, right) {
        (XPathValue::NodeSet(a), XPathValue::NodeSet(b)) => {
            let mut seen = HashSet::new();
            let mut combined: Vec<N> = Vec::with_capacity(a.len() + b.len());
            for node in a.into_iter().chain(b) {
                if seen.insert(node) {
                    combined.push(node);
                }
            }
            combined.sort();
            Ok(XPathValue::NodeSet(combined))
        }
        _ => Err(XPathError::TypeError(
            "union operator '|' requires both operands to be node-sets".to_string(),
        )),
    }
}
