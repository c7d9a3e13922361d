//! Operator definitions and leaf functions

use std::fmt;
use std::sync::Arc;

/// Evaluation function applied to the trimmed text of every value
pub type Leaf<T> = Arc<dyn Fn(&str) -> T + Send + Sync>;

/// The combining function an operator applies to its resolved operands
pub enum Combine<T> {
    /// Takes the right-hand neighbor
    Unary(Arc<dyn Fn(T) -> T + Send + Sync>),
    /// Takes the left-hand and right-hand neighbors
    Binary(Arc<dyn Fn(T, T) -> T + Send + Sync>),
}

impl<T> Clone for Combine<T> {
    fn clone(&self) -> Self {
        match self {
            Combine::Unary(f) => Combine::Unary(Arc::clone(f)),
            Combine::Binary(f) => Combine::Binary(Arc::clone(f)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Unary,
    Binary,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorKind::Unary => write!(f, "unary"),
            OperatorKind::Binary => write!(f, "binary"),
        }
    }
}

/// A caller-defined operator token.
///
/// Operators hold no position state; the scanner records where each occurrence was
/// found on the [`OperatorNode`](super::OperatorNode) that refers back to it.
pub struct Operator<T> {
    token: String,
    combine: Combine<T>,
}

impl<T> Operator<T> {
    pub fn unary<F>(token: impl Into<String>, f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self {
            token: token.into(),
            combine: Combine::Unary(Arc::new(f)),
        }
    }

    pub fn binary<F>(token: impl Into<String>, f: F) -> Self
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        Self {
            token: token.into(),
            combine: Combine::Binary(Arc::new(f)),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Length of the token in characters
    pub fn token_len(&self) -> usize {
        self.token.chars().count()
    }

    pub fn combine(&self) -> &Combine<T> {
        &self.combine
    }

    pub fn kind(&self) -> OperatorKind {
        match self.combine {
            Combine::Unary(_) => OperatorKind::Unary,
            Combine::Binary(_) => OperatorKind::Binary,
        }
    }
}

impl<T> Clone for Operator<T> {
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
            combine: self.combine.clone(),
        }
    }
}

impl<T> fmt::Debug for Operator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("token", &self.token)
            .field("kind", &self.kind())
            .finish()
    }
}
