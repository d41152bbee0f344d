//! Wraps `uast_xpath1` to run one query against one projected document and expose
//! a typed, expected-kind-checked result.

use std::collections::HashMap;

use uast_xpath1::functions::FunctionRegistry;
use uast_xpath1::{EvaluationContext, XPathValue};

use crate::error::{self, UastError};
use crate::host::UastNode;
use crate::roles::RoleResolver;
use crate::xml::projector::Projector;

/// Runs `query` against a freshly projected view of `root` and returns the raw
/// XPath result, already detached from the document's lifetime.
///
/// The evaluator's lifecycle -- build document, build XPath context, evaluate,
/// tear everything down -- happens entirely within this function: the
/// `VirtualDocument` never escapes it.
fn run<H: UastNode>(root: H, resolver: &impl RoleResolver, query: &str) -> Result<RawResult<H>, UastError> {
    if query.is_empty() {
        return Err(UastError::EmptyQuery);
    }

    let expr = uast_xpath1::parse_expression(query).map_err(UastError::Query)?;

    let document = Projector::project(root, resolver)?;
    // The context node is the projected host root itself; the engine's absolute-path
    // anchor is the synthetic document root one level above it, so that `//*`
    // (`/descendant-or-self::node()/child::*`) also re-selects the context node --
    // it would otherwise have no parent to be reachable through a `child::` step.
    let context_node = document.root();
    let document_root = document.document_root();
    let functions = FunctionRegistry::default();
    let variables = HashMap::new();
    let key_indexes = HashMap::new();
    let e_ctx = EvaluationContext::new(
        context_node,
        document_root,
        &functions,
        1,
        1,
        &variables,
        &key_indexes,
        false,
    );

    let value = uast_xpath1::evaluate(&expr, &e_ctx).map_err(UastError::Query)?;
    Ok(into_raw(value))
}

enum RawResult<H> {
    NodeSet(Vec<H>),
    Boolean(bool),
    Number(f64),
    String(String),
}

impl<H> RawResult<H> {
    fn kind_name(&self) -> &'static str {
        match self {
            RawResult::NodeSet(_) => "NODESET",
            RawResult::Boolean(_) => "BOOLEAN",
            RawResult::Number(_) => "NUMBER",
            RawResult::String(_) => "STRING",
        }
    }
}

/// Converts the XPath engine's node-set, if that's what was returned, into
/// document-order host-node references: sorted by the virtual elements' document
/// order, deduplicated, and filtered to drop any node without a host
/// back-reference (attribute nodes a query selected directly, e.g. `//@role`).
///
/// The engine's axis collectors do not all guarantee document order on their own
/// (`uast_xpath1`'s own tests re-sort several axis results before comparing), so
/// this sort is load-bearing for callers who rely on `filter_nodes` returning
/// document order, not a defensive extra.
fn into_raw<'doc, H: Copy>(value: XPathValue<crate::xml::VirtualNode<'doc, H>>) -> RawResult<H> {
    match value {
        XPathValue::NodeSet(mut nodes) => {
            nodes.sort();
            nodes.dedup();
            RawResult::NodeSet(nodes.into_iter().filter_map(|n| n.host_ref()).collect())
        }
        XPathValue::Boolean(b) => RawResult::Boolean(b),
        XPathValue::Number(n) => RawResult::Number(n),
        XPathValue::String(s) => RawResult::String(s),
    }
}

fn record_failure(err: UastError) -> UastError {
    error::set_last_error(&err);
    err
}

/// The node-set `query` selects, in document order, host nodes only.
pub fn filter_nodes<H: UastNode>(root: H, resolver: &impl RoleResolver, query: &str) -> Result<Vec<H>, UastError> {
    match run(root, resolver, query) {
        Ok(RawResult::NodeSet(nodes)) => Ok(nodes),
        Ok(other) => Err(record_failure(UastError::ResultKindMismatch {
            expected: "NODESET",
            actual: other.kind_name(),
        })),
        Err(e) => Err(record_failure(e)),
    }
}

pub fn filter_bool<H: UastNode>(root: H, resolver: &impl RoleResolver, query: &str) -> Result<bool, UastError> {
    match run(root, resolver, query) {
        Ok(RawResult::Boolean(b)) => Ok(b),
        Ok(other) => Err(record_failure(UastError::ResultKindMismatch {
            expected: "BOOLEAN",
            actual: other.kind_name(),
        })),
        Err(e) => Err(record_failure(e)),
    }
}

/// IEEE-754 double, `NaN` for undefined, as the underlying XPath 1.0 number
/// type defines.
pub fn filter_number<H: UastNode>(root: H, resolver: &impl RoleResolver, query: &str) -> Result<f64, UastError> {
    match run(root, resolver, query) {
        Ok(RawResult::Number(n)) => Ok(n),
        Ok(other) => Err(record_failure(UastError::ResultKindMismatch {
            expected: "NUMBER",
            actual: other.kind_name(),
        })),
        Err(e) => Err(record_failure(e)),
    }
}

pub fn filter_string<H: UastNode>(root: H, resolver: &impl RoleResolver, query: &str) -> Result<String, UastError> {
    match run(root, resolver, query) {
        Ok(RawResult::String(s)) => Ok(s),
        Ok(other) => Err(record_failure(UastError::ResultKindMismatch {
            expected: "STRING",
            actual: other.kind_name(),
        })),
        Err(e) => Err(record_failure(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, ROLE_IDENTIFIER};
    use crate::roles::MapRoleResolver;

    fn resolver() -> MapRoleResolver {
        MapRoleResolver::new()
            .with(ROLE_IDENTIFIER, "Identifier")
            .with(fixtures::ROLE_LITERAL, "Literal")
    }

    #[test]
    fn filter_string_reads_token_through_role_predicate() {
        let tree = fixtures::sample();
        let value = filter_string(tree.root(), &resolver(), "string(//Identifier[@Identifier]/@token)").unwrap();
        assert_eq!(value, "x");
    }

    #[test]
    fn filter_nodes_returns_every_node_in_document_order() {
        let tree = fixtures::sample();
        let nodes = filter_nodes(tree.root(), &resolver(), "//*").unwrap();
        assert_eq!(nodes.len(), 4); // Module, Identifier, BinaryOp, Literal
        assert_eq!(nodes[0], tree.root());
    }

    #[test]
    fn filter_bool_on_nodeset_query_is_kind_mismatch() {
        let tree = fixtures::sample();
        let err = filter_bool(tree.root(), &resolver(), "//*").unwrap_err();
        assert!(matches!(err, UastError::ResultKindMismatch { .. }));
        assert_eq!(crate::error::last_error().unwrap(), err.to_string());
    }

    #[test]
    fn filter_number_counts_nodes() {
        let tree = fixtures::sample();
        let count = filter_number(tree.root(), &resolver(), "count(//*)").unwrap();
        assert_eq!(count, 4.0);
    }

    #[test]
    fn empty_query_fails_and_records_last_error() {
        let tree = fixtures::sample();
        let err = filter_nodes(tree.root(), &resolver(), "").unwrap_err();
        assert!(matches!(err, UastError::EmptyQuery));
        assert!(crate::error::last_error().is_some());
    }

    #[test]
    fn successful_call_leaves_last_error_untouched() {
        let tree = fixtures::sample();
        let _ = filter_nodes(tree.root(), &resolver(), "").unwrap_err();
        let _ = filter_string(tree.root(), &resolver(), "string(//Identifier/@token)").unwrap();
        assert!(crate::error::last_error().is_some());
    }
}
