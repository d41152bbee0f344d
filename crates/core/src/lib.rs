//! Virtual XML projection, XPath filter API, and traversal iterators over a
//! host-supplied Universal AST.
//!
//! A host implements [`UastNode`] over its own tree type; this crate builds a
//! transient virtual XML document mirroring that tree (`xml`), evaluates XPath 1.0
//! queries against it (`query`), and exposes four traversal orders decoupled from
//! querying (`iterator`). [`UastContext`] ties a host's [`RoleResolver`] to all of
//! the above.

pub mod context;
pub mod error;
#[cfg(test)]
mod fixtures;
pub mod host;
pub mod iterator;
pub mod query;
pub mod roles;
pub mod xml;

pub use context::UastContext;
pub use error::{UastError, last_error};
pub use host::{UastChildren, UastNode};
pub use iterator::{NodeIterator, TraversalOrder};
pub use roles::{MapRoleResolver, RoleResolver};
pub use xml::{VirtualDocument, VirtualNode};
