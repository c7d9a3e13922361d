//! Parser configuration and entry points
//!
//! A [`Parser`] holds the operator table, the groupings, the default leaf function and
//! the associativity used to fold flat runs of binary operators. Parsing only builds the
//! tree; no function is called until the expression is evaluated.
//!
//! # Registration order
//!
//! Tokens are matched in registration order, not by longest match. When one token is a
//! prefix of another (`|` and `||`), register the longer one first or it will never be
//! recognized.
//!
//! ```text
//! let parser = Parser::new()
//!     .binary("||", |a, b| format!("{a} or {b}"))
//!     .binary("|", |a, b| format!("{a} pipe {b}"))
//!     .grouping("(", ")");
//! ```

pub mod scanner;

use crate::ast::{Expression, Grouping, Leaf, Operator};
use crate::error::ParseError;
use crate::evaluation::Associativity;
use scanner::Scanner;
use std::fmt;
use std::sync::Arc;

pub struct Parser<T> {
    operators: Vec<Operator<T>>,
    groupings: Vec<Grouping>,
    leaf: Leaf<T>,
    associativity: Associativity,
}

impl Parser<String> {
    /// A parser whose values evaluate to their own text
    pub fn new() -> Self {
        Self::with_leaf(|text: &str| text.to_string())
    }
}

impl Default for Parser<String> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Parser<T> {
    pub fn with_leaf<F>(leaf: F) -> Self
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
    {
        Self {
            operators: Vec::new(),
            groupings: Vec::new(),
            leaf: Arc::new(leaf),
            associativity: Associativity::default(),
        }
    }

    pub fn operator(mut self, operator: Operator<T>) -> Self {
        self.operators.push(operator);
        self
    }

    pub fn unary<F>(self, token: impl Into<String>, f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.operator(Operator::unary(token, f))
    }

    pub fn binary<F>(self, token: impl Into<String>, f: F) -> Self
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        self.operator(Operator::binary(token, f))
    }

    pub fn grouping(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.groupings.push(Grouping::new(start, end));
        self
    }

    pub fn associativity(mut self, associativity: Associativity) -> Self {
        self.associativity = associativity;
        self
    }

    pub fn operators(&self) -> &[Operator<T>] {
        &self.operators
    }

    pub fn groupings(&self) -> &[Grouping] {
        &self.groupings
    }

    /// Build the tree for `input`, binding values to the parser's leaf function
    pub fn parse(&self, input: &str) -> Result<Expression<T>, ParseError> {
        self.build(input, Arc::clone(&self.leaf))
    }

    /// Build the tree for `input`, binding values to `leaf` instead
    pub fn parse_with<F>(&self, input: &str, leaf: F) -> Result<Expression<T>, ParseError>
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
    {
        self.build(input, Arc::new(leaf))
    }

    fn build(&self, input: &str, leaf: Leaf<T>) -> Result<Expression<T>, ParseError> {
        self.validate()?;
        let nodes = Scanner::new(&self.operators, &self.groupings).scan(input)?;
        Ok(Expression::new(
            input.to_string(),
            nodes,
            self.operators.iter().cloned().collect(),
            leaf,
            self.associativity,
        ))
    }

    /// Empty tokens would match at every position without advancing
    fn validate(&self) -> Result<(), ParseError> {
        if self.operators.iter().any(|op| op.token().is_empty()) {
            return Err(ParseError::EmptyToken {
                what: "operator".to_string(),
            });
        }
        if self
            .groupings
            .iter()
            .any(|g| g.start().is_empty() || g.end().is_empty())
        {
            return Err(ParseError::EmptyToken {
                what: "grouping delimiter".to_string(),
            });
        }
        Ok(())
    }
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            operators: self.operators.clone(),
            groupings: self.groupings.clone(),
            leaf: Arc::clone(&self.leaf),
            associativity: self.associativity,
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("operators", &self.operators)
            .field("groupings", &self.groupings)
            .field("associativity", &self.associativity)
            .finish()
    }
}
