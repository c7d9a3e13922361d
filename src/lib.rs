//! # nestex
//!
//! A generic expression engine. The caller registers operator tokens, grouping
//! delimiters and a leaf evaluation function; the engine scans a flat string into
//! a tree and reduces that tree to a single value.
//!
//! File Layout
//!
//! src/
//!   ├── ast          Node model: groupings, operators, the node arena and snapshots
//!   ├── parsing      Parser configuration and the left-to-right scanner
//!   ├── evaluation   The reducer that collapses a tree into a `Resolved` value
//!   ├── error        Parse and evaluation errors, source context rendering
//!   ├── formats      treeviz / json / yaml renderings of a parsed tree
//!   ├── config       Layered configuration for the search preset
//!   └── search       A keyword search language built on the engine
//!
//! The flow is parse once, evaluate many times:
//!
//! ```text
//! let parser = Parser::with_leaf(|word: &str| target.contains(word))
//!     .binary("&&", |a, b| a && b)
//!     .binary("||", |a, b| a || b)
//!     .unary("!", |a: bool| !a)
//!     .grouping("(", ")");
//! let expression = parser.parse("marley && !(ziggy || damian)")?;
//! let resolved = expression.evaluate()?;
//! ```
//!
//! Nesting is the only precedence. There is no precedence table: a flat run of binary
//! operators folds according to the parser's [`Associativity`].

pub mod ast;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod formats;
pub mod parsing;
pub mod search;

pub use ast::{Combine, Expression, Grouping, Leaf, Operator, OperatorKind};
pub use error::{Error, EvalError, OperandFault, ParseError};
pub use evaluation::{Associativity, Resolved};
pub use parsing::Parser;
