//! End-to-end exercise of the full filter/iterator surface against a small
//! expression-language host tree.

use uast::{MapRoleResolver, TraversalOrder, UastContext, UastNode};

const ROLE_IDENTIFIER: u16 = 1;
const ROLE_LITERAL: u16 = 2;

struct NodeData {
    kind: &'static str,
    token: Option<&'static str>,
    roles: Vec<u16>,
    children: Vec<usize>,
    start_offset: Option<u32>,
}

struct Tree {
    nodes: Vec<NodeData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Node<'a> {
    tree: &'a Tree,
    id: usize,
}

impl Tree {
    fn root(&self) -> Node<'_> {
        Node { tree: self, id: 0 }
    }

    fn get(&self, id: usize) -> &NodeData {
        &self.nodes[id]
    }
}

impl<'a> UastNode for Node<'a> {
    fn internal_type(&self) -> &str {
        self.tree.get(self.id).kind
    }
    fn token(&self) -> Option<&str> {
        self.tree.get(self.id).token
    }
    fn children_size(&self) -> usize {
        self.tree.get(self.id).children.len()
    }
    fn child_at(&self, index: usize) -> Self {
        Node {
            tree: self.tree,
            id: self.tree.get(self.id).children[index],
        }
    }
    fn roles_size(&self) -> usize {
        self.tree.get(self.id).roles.len()
    }
    fn role_at(&self, index: usize) -> u16 {
        self.tree.get(self.id).roles[index]
    }
    fn properties_size(&self) -> usize {
        0
    }
    fn property_key_at(&self, _index: usize) -> &str {
        unreachable!("this fixture carries no properties")
    }
    fn property_value_at(&self, _index: usize) -> &str {
        unreachable!("this fixture carries no properties")
    }
    fn has_start_offset(&self) -> bool {
        self.tree.get(self.id).start_offset.is_some()
    }
    fn start_offset(&self) -> u32 {
        self.tree.get(self.id).start_offset.unwrap_or(0)
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

fn leaf(kind: &'static str) -> NodeData {
    NodeData {
        kind,
        token: None,
        roles: Vec::new(),
        children: Vec::new(),
        start_offset: None,
    }
}

/// `A{token="x"}` with role-id 1 -> "Identifier".
fn identifier_tree() -> Tree {
    let mut a = leaf("A");
    a.token = Some("x");
    a.roles.push(ROLE_IDENTIFIER);
    Tree { nodes: vec![a] }
}

fn resolver() -> MapRoleResolver {
    MapRoleResolver::new()
        .with(ROLE_IDENTIFIER, "Identifier")
        .with(ROLE_LITERAL, "Literal")
}

#[test]
fn token_readable_through_role_predicate() {
    let tree = identifier_tree();
    let ctx = UastContext::new(resolver());
    let value = ctx
        .filter_string(tree.root(), "string(//A[@Identifier]/@token)")
        .unwrap();
    assert_eq!(value, "x");
}

/// `Root -> [Lit{startOffset=10}, Lit{startOffset=5}, Lit{}]`.
fn position_tree() -> Tree {
    let mut lit_10 = leaf("Lit");
    lit_10.start_offset = Some(10);
    let mut lit_5 = leaf("Lit");
    lit_5.start_offset = Some(5);
    let lit_none = leaf("Lit");
    Tree {
        nodes: vec![leaf("Root"), lit_10, lit_5, lit_none],
    }
    .with_children(0, vec![1, 2, 3])
}

impl Tree {
    fn with_children(mut self, parent: usize, children: Vec<usize>) -> Self {
        self.nodes[parent].children = children;
        self
    }
}

#[test]
fn position_order_sorts_by_start_offset_with_fallback_to_zero() {
    let tree = position_tree();
    let ctx = UastContext::new(resolver());
    let offsets: Vec<_> = ctx
        .iter(tree.root(), TraversalOrder::PositionOrder)
        .map(|n| n.start_offset())
        .collect();
    assert_eq!(offsets, vec![0, 5, 10, 0]);
}

/// `A -> B -> C`.
fn chain_tree() -> Tree {
    Tree {
        nodes: vec![leaf("A"), leaf("B"), leaf("C")],
    }
    .with_children(0, vec![1])
    .with_children(1, vec![2])
}

#[test]
fn chain_traversal_orders_agree_on_strictly_ordered_tree() {
    let tree = chain_tree();
    let ctx = UastContext::new(resolver());

    let post: Vec<_> = ctx
        .iter(tree.root(), TraversalOrder::PostOrder)
        .map(|n| n.internal_type())
        .collect();
    assert_eq!(post, vec!["C", "B", "A"]);

    let level: Vec<_> = ctx
        .iter(tree.root(), TraversalOrder::LevelOrder)
        .map(|n| n.internal_type())
        .collect();
    assert_eq!(level, vec!["A", "B", "C"]);

    let pre: Vec<_> = ctx
        .iter(tree.root(), TraversalOrder::PreOrder)
        .map(|n| n.internal_type())
        .collect();
    assert_eq!(pre, vec!["A", "B", "C"]);
}

#[test]
fn empty_query_fails_with_non_empty_last_error() {
    let tree = chain_tree();
    let ctx = UastContext::new(resolver());
    let err = ctx.filter_nodes(tree.root(), "").unwrap_err();
    assert_eq!(err.to_string(), "query string is empty");
    assert!(uast::last_error().unwrap().contains("empty"));
}

#[test]
fn count_routed_through_filter_nodes_is_kind_mismatch_but_filter_number_succeeds() {
    let tree = chain_tree();
    let ctx = UastContext::new(resolver());

    let err = ctx.filter_nodes(tree.root(), "count(//*)").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Result of expression is not NODESET (is: NUMBER)"
    );

    let count = ctx.filter_number(tree.root(), "count(//*)").unwrap();
    assert_eq!(count, 3.0);
}

#[test]
fn empty_string_token_is_distinct_from_absent_token() {
    let mut with_empty_token = leaf("Tok");
    with_empty_token.token = Some("");
    let tree = Tree {
        nodes: vec![with_empty_token],
    };
    let ctx = UastContext::new(resolver());

    let has_token_attr = ctx.filter_bool(tree.root(), "not(not(//Tok/@token))").unwrap();
    assert!(
        has_token_attr,
        "an empty-string token must still produce a token attribute"
    );
    let value = ctx.filter_string(tree.root(), "string(//Tok/@token)").unwrap();
    assert_eq!(value, "");
}

#[test]
fn filter_nodes_preserves_host_identity_in_document_order() {
    let tree = chain_tree();
    let ctx = UastContext::new(resolver());
    let nodes = ctx.filter_nodes(tree.root(), "//*").unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0], tree.root());
    assert_eq!(nodes[0].internal_type(), "A");
    assert_eq!(nodes[1].internal_type(), "B");
    assert_eq!(nodes[2].internal_type(), "C");
}
