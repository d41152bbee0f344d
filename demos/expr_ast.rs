//! Worked example: a tiny expression-language AST implementing `UastNode`, queried
//! and traversed through the full public surface of this crate.
//!
//! Run with `cargo run --example expr_ast`.

use std::env;

use uast::{MapRoleResolver, TraversalOrder, UastContext, UastNode};

const ROLE_IDENTIFIER: u16 = 1;
const ROLE_LITERAL: u16 = 2;
const ROLE_OPERATOR: u16 = 3;

/// One node of the expression tree: `x + 5`.
struct ExprNode {
    kind: &'static str,
    token: Option<&'static str>,
    roles: &'static [u16],
    properties: &'static [(&'static str, &'static str)],
    children: &'static [usize],
    start_offset: Option<u32>,
}

/// `x + 5`, parsed into:
/// ```text
/// BinaryOp{op="+"}
///   Identifier{token="x", role=Identifier}
///   Literal{token="5", role=Literal, startOffset=4}
/// ```
static NODES: &[ExprNode] = &[
    ExprNode {
        kind: "BinaryOp",
        token: None,
        roles: &[ROLE_OPERATOR],
        properties: &[("op", "+")],
        children: &[1, 2],
        start_offset: Some(0),
    },
    ExprNode {
        kind: "Identifier",
        token: Some("x"),
        roles: &[ROLE_IDENTIFIER],
        properties: &[],
        children: &[],
        start_offset: Some(0),
    },
    ExprNode {
        kind: "Literal",
        token: Some("5"),
        roles: &[ROLE_LITERAL],
        properties: &[],
        children: &[],
        start_offset: Some(4),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Node(usize);

impl UastNode for Node {
    fn internal_type(&self) -> &str {
        NODES[self.0].kind
    }

    fn token(&self) -> Option<&str> {
        NODES[self.0].token
    }

    fn children_size(&self) -> usize {
        NODES[self.0].children.len()
    }

    fn child_at(&self, index: usize) -> Self {
        Node(NODES[self.0].children[index])
    }

    fn roles_size(&self) -> usize {
        NODES[self.0].roles.len()
    }

    fn role_at(&self, index: usize) -> u16 {
        NODES[self.0].roles[index]
    }

    fn properties_size(&self) -> usize {
        NODES[self.0].properties.len()
    }

    fn property_key_at(&self, index: usize) -> &str {
        NODES[self.0].properties[index].0
    }

    fn property_value_at(&self, index: usize) -> &str {
        NODES[self.0].properties[index].1
    }

    fn has_start_offset(&self) -> bool {
        NODES[self.0].start_offset.is_some()
    }

    fn start_offset(&self) -> u32 {
        NODES[self.0].start_offset.unwrap_or(0)
    }

    fn has_start_line(&self) -> bool {
        false
    }
    fn start_line(&self) -> u32 {
        0
    }
    fn has_start_col(&self) -> bool {
        false
    }
    fn start_col(&self) -> u32 {
        0
    }
    fn has_end_offset(&self) -> bool {
        false
    }
    fn end_offset(&self) -> u32 {
        0
    }
    fn has_end_line(&self) -> bool {
        false
    }
    fn end_line(&self) -> u32 {
        0
    }
    fn has_end_col(&self) -> bool {
        false
    }
    fn end_col(&self) -> u32 {
        0
    }
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "uast_core=debug");
    }
    env_logger::init();

    println!("Running expr_ast Example...");

    let resolver = MapRoleResolver::new()
        .with(ROLE_IDENTIFIER, "Identifier")
        .with(ROLE_LITERAL, "Literal")
        .with(ROLE_OPERATOR, "Operator");
    let ctx = UastContext::new(resolver);
    let root = Node(0);

    let token = ctx
        .filter_string(root, "string(//Identifier[@Identifier]/@token)")
        .expect("query should succeed");
    println!("✓ Identifier token via FilterString: {token}");

    let count = ctx
        .filter_number(root, "count(//*)")
        .expect("query should succeed");
    println!("✓ Node count via FilterNumber: {count}");

    let nodes = ctx.filter_nodes(root, "//*").expect("query should succeed");
    let types: Vec<_> = nodes.iter().map(|n| n.internal_type()).collect();
    println!("✓ FilterNodes(\"//*\") in document order: {types:?}");

    let pre_order: Vec<_> = ctx
        .iter(root, TraversalOrder::PreOrder)
        .map(|n| n.internal_type())
        .collect();
    println!("✓ Pre-order traversal: {pre_order:?}");

    let post_order: Vec<_> = ctx
        .iter(root, TraversalOrder::PostOrder)
        .map(|n| n.internal_type())
        .collect();
    println!("✓ Post-order traversal: {post_order:?}");

    let position_order: Vec<_> = ctx
        .iter(root, TraversalOrder::PositionOrder)
        .map(|n| n.internal_type())
        .collect();
    println!("✓ Position-order traversal: {position_order:?}");

    match ctx.filter_bool(root, "//*") {
        Ok(_) => unreachable!("a node-set routed through FilterBool should mismatch"),
        Err(e) => println!("✓ FilterBool on a node-set query correctly fails: {e}"),
    }

    println!("\nSuccess!");
}
