//! Parsed expressions
//!
//! An [`Expression`] is the immutable result of a parse. Evaluating it never touches
//! the arena: the reducer works on its own slots, so the same expression can be
//! evaluated any number of times, from any number of threads, with different leaf
//! functions.

use super::node::{GroupNode, Node, NodeId, OperatorNode, ROOT};
use super::operator::{Leaf, Operator};
use crate::error::EvalError;
use crate::evaluation::{Associativity, Reducer, Resolved};
use crate::formats::treeviz::to_treeviz_str;
use std::fmt;
use std::sync::Arc;

pub struct Expression<T> {
    source: String,
    nodes: Vec<Node>,
    operators: Arc<[Operator<T>]>,
    leaf: Leaf<T>,
    associativity: Associativity,
}

impl<T> Expression<T> {
    pub(crate) fn new(
        source: String,
        nodes: Vec<Node>,
        operators: Arc<[Operator<T>]>,
        leaf: Leaf<T>,
        associativity: Associativity,
    ) -> Self {
        Self {
            source,
            nodes,
            operators,
            leaf,
            associativity,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> &GroupNode {
        match self.nodes.first() {
            Some(Node::Group(root)) => root,
            _ => unreachable!("the scanner always places the root group first"),
        }
    }

    pub fn root_id(&self) -> NodeId {
        ROOT
    }

    pub fn group(&self, id: NodeId) -> Option<&GroupNode> {
        self.node(id).and_then(Node::as_group)
    }

    /// The operator definition an operator node refers to
    pub fn operator(&self, node: &OperatorNode) -> &Operator<T> {
        &self.operators[node.operator]
    }

    pub fn operators(&self) -> &[Operator<T>] {
        &self.operators
    }

    pub fn associativity(&self) -> Associativity {
        self.associativity
    }

    /// Reduce the expression with the leaf function bound at parse time
    pub fn evaluate(&self) -> Result<Resolved<T>, EvalError> {
        Reducer::new(self, self.leaf.as_ref()).reduce()
    }

    /// Reduce the expression, applying `leaf` to every value instead of the bound function.
    ///
    /// The override lasts for this call only.
    pub fn evaluate_with<F>(&self, leaf: F) -> Result<Resolved<T>, EvalError>
    where
        F: Fn(&str) -> T,
    {
        Reducer::new(self, &leaf).reduce()
    }
}

impl<T> Clone for Expression<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            nodes: self.nodes.clone(),
            operators: Arc::clone(&self.operators),
            leaf: Arc::clone(&self.leaf),
            associativity: self.associativity,
        }
    }
}

impl<T> fmt::Debug for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("source", &self.source)
            .field("nodes", &self.nodes)
            .field("operators", &self.operators)
            .field("associativity", &self.associativity)
            .finish()
    }
}

impl<T> fmt::Display for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_treeviz_str(self))
    }
}
