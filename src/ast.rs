//! Node model for parsed expressions
//!
//! A parsed expression is an arena of [`Node`]s addressed by [`NodeId`]. The root is
//! always a [`GroupNode`] at id [`ROOT`] with no parent and no grouping.
//!
//! ## Types
//!
//! - [`Grouping`] - A pair of start/end delimiters
//! - [`Operator`] - A token bound to a unary or binary combining function
//! - [`Node`] - Group, Value or Operator, the three node kinds a parse produces
//! - [`Expression`] - The arena plus everything needed to evaluate it
//!
//! The fourth node kind, the resolved result, only exists while reducing; see
//! [`crate::evaluation::Resolved`].

pub mod expression;
pub mod grouping;
pub mod node;
pub mod operator;
pub mod snapshot;

pub use expression::Expression;
pub use grouping::Grouping;
pub use node::{GroupNode, Node, NodeId, OperatorNode, ValueNode, ROOT};
pub use operator::{Combine, Leaf, Operator, OperatorKind};
pub use snapshot::{snapshot_from_expression, ExprSnapshot};
