//! Output formats for parsed expressions
//!
//! All formatters consume an [`ExprSnapshot`](crate::ast::ExprSnapshot), never the arena.

pub mod registry;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter, JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
