//! Reduction of parsed expressions
//!
//! Every node kind shares one contract: consume the slot at index `i` of a working
//! sequence and leave a [`Resolved`] in its place, possibly absorbing neighbors. A group
//! consumes by folding its own children; values call the leaf function; operators
//! consume their operands and combine them.
//!
//! ## Folding
//!
//! A fold walks a group's slots from the left. The first slot must resolve in place at
//! index 0; after that the next slot must be a binary operator that absorbs the resolved
//! prefix. Two resolved operands next to each other are a missing operator.
//!
//! ## Associativity
//!
//! There is no precedence table, only nesting. [`Associativity`] decides what a binary
//! operator takes as its right operand:
//!
//! - `Right` folds everything to its right first, so `a - b - c` is `a - (b - c)`.
//! - `Left` takes just the neighbor, so `a - b - c` is `(a - b) - c`.
//!
//! Unary operators always take their immediate right neighbor.

pub mod reducer;

pub(crate) use reducer::Reducer;

use serde::{Deserialize, Serialize};

/// A fully reduced node: the value plus how many source characters it accounts for.
///
/// The consumed length of a reduced root equals the character length of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    value: T,
    consumed: usize,
    /// Character index where the reduced span begins
    start: usize,
}

impl<T> Resolved<T> {
    pub(crate) fn new(value: T, consumed: usize, start: usize) -> Self {
        Self {
            value,
            consumed,
            start,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn consumed_length(&self) -> usize {
        self.consumed
    }

    pub(crate) fn start(&self) -> usize {
        self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Associativity {
    /// `a op b op c` is `a op (b op c)`
    #[default]
    Right,
    /// `a op b op c` is `(a op b) op c`
    Left,
}
