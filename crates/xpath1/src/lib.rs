//! A generic XPath 1.0 expression parser and evaluation engine.
//!
//! The engine is written exclusively against the [`DataSourceNode`] trait, so
//! it can evaluate queries over any tree that implements it -- in this
//! workspace, the virtual XML projection built by `uast-core` over a host's
//! own tree.

pub mod ast;
pub mod axes;
pub mod datasource;
pub mod engine;
pub mod error;
pub mod functions;
pub mod operators;
pub mod parser;

pub use ast::{Axis, BinaryOperator, Expression, LocationPath, NodeTest, Step};
pub use datasource::{DataSourceNode, NodeType, QName};
pub use engine::{EvaluationContext, XPathValue, evaluate};

// Re-exported so downstream crates can build their own node trees against
// the same mock fixtures used by this crate's tests.
pub use datasource::tests;
pub use error::XPathError;
pub use parser::parse_expression;
