//! `UastContext`, the engine handle.

use crate::error::UastError;
use crate::host::UastNode;
use crate::iterator::{NodeIterator, TraversalOrder};
use crate::query;
use crate::roles::RoleResolver;

/// The engine handle: a host's [`RoleResolver`], held for the lifetime of every
/// filter call and iterator the context creates.
///
/// This is a plain owned value with no explicit teardown: there is no global
/// XML/XPath parser to release (`uast_xpath1` carries no process-global init
/// state), so `Drop` needs nothing beyond what Rust already does for `R`.
///
/// No tree is ever owned by the context: every method takes the host subtree's
/// root node by value on each call.
pub struct UastContext<R: RoleResolver> {
    resolver: R,
}

impl<R: RoleResolver> UastContext<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// The node-set `query` selects, in document order, as host-node references.
    pub fn filter_nodes<H: UastNode>(&self, root: H, query: &str) -> Result<Vec<H>, UastError> {
        query::filter_nodes(root, &self.resolver, query)
    }

    pub fn filter_bool<H: UastNode>(&self, root: H, query: &str) -> Result<bool, UastError> {
        query::filter_bool(root, &self.resolver, query)
    }

    pub fn filter_number<H: UastNode>(&self, root: H, query: &str) -> Result<f64, UastError> {
        query::filter_number(root, &self.resolver, query)
    }

    pub fn filter_string<H: UastNode>(&self, root: H, query: &str) -> Result<String, UastError> {
        query::filter_string(root, &self.resolver, query)
    }

    /// A traversal over `root` with no transform.
    pub fn iter<H: UastNode>(&self, root: H, order: TraversalOrder) -> NodeIterator<H> {
        NodeIterator::new(root, order)
    }

    pub fn iter_with_transform<H: UastNode, F: Fn(H) -> H>(
        &self,
        root: H,
        order: TraversalOrder,
        transform: F,
    ) -> NodeIterator<H, F> {
        NodeIterator::with_transform(root, order, transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, ROLE_IDENTIFIER};
    use crate::roles::MapRoleResolver;

    fn ctx() -> UastContext<MapRoleResolver> {
        UastContext::new(MapRoleResolver::new().with(ROLE_IDENTIFIER, "Identifier"))
    }

    #[test]
    fn filter_and_iterate_through_the_same_context() {
        let tree = fixtures::sample();
        let ctx = ctx();

        let nodes = ctx.filter_nodes(tree.root(), "//*").unwrap();
        assert_eq!(nodes.len(), 4);

        let via_iter: Vec<_> = ctx.iter(tree.root(), TraversalOrder::PreOrder).collect();
        assert_eq!(nodes, via_iter);
    }

    #[test]
    fn filter_string_through_context() {
        let tree = fixtures::sample();
        let ctx = ctx();
        let value = ctx
            .filter_string(tree.root(), "string(//Identifier/@token)")
            .unwrap();
        assert_eq!(value, "x");
    }
}
