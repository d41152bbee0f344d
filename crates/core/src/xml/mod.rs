//! The virtual XML document that a [`crate::xml::projector::Projector`] builds over
//! one host subtree, and the `uast_xpath1::DataSourceNode` view onto it.

mod document;
mod node;
pub mod projector;

pub use document::VirtualDocument;
pub use node::VirtualNode;
