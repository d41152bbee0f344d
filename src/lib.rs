// --- Module Structure ---
// This crate is a thin facade over `uast-core`: the virtual XML projection,
// XPath filter API, and traversal iterators over a host-supplied Universal AST
// all live there, split from the generic XPath 1.0 engine in `uast-xpath1` so
// that engine can be reused against any `DataSourceNode` tree, not just this
// one's virtual XML projection.
//
// --- Public API ---
// By re-exporting only these top-level items, we provide a clean and focused
// public interface for users of the library.

pub use uast_core::{
    MapRoleResolver, NodeIterator, RoleResolver, TraversalOrder, UastChildren, UastContext,
    UastError, UastNode, VirtualDocument, VirtualNode, last_error,
};
