//! Grouping delimiters

use serde::{Deserialize, Serialize};
use std::fmt;

/// A caller-defined delimiter pair, e.g. `(` and `)`.
///
/// Two groupings with equal strings are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grouping {
    pub start: String,
    pub end: String,
}

impl Grouping {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Characters taken by both delimiters together
    pub fn delimiter_len(&self) -> usize {
        self.start.chars().count() + self.end.chars().count()
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}…{}", self.start, self.end)
    }
}
