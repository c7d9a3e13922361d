//! Expression Snapshot - a normalized, serializable view of the parsed tree
//!
//! The snapshot captures node types, labels, attributes and children so that every
//! formatter (treeviz, JSON, YAML) can focus on presentation without walking the arena
//! itself. Function references are not part of a snapshot; operators appear by token
//! and kind only.

use super::expression::Expression;
use super::node::{GroupNode, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

/// A snapshot of a tree node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExprSnapshot {
    /// "Root", "Group", "Value" or "Operator"
    pub node_type: String,

    /// Group delimiters, value text or operator token
    pub label: String,

    /// Additional attributes specific to the node type
    pub attributes: BTreeMap<String, String>,

    /// Child nodes in the tree
    pub children: Vec<ExprSnapshot>,
}

impl ExprSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<ExprSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Build the snapshot of a whole expression, starting at the root group
pub fn snapshot_from_expression<T>(expression: &Expression<T>) -> ExprSnapshot {
    snapshot_node(expression, expression.root_id())
}

fn snapshot_node<T>(expression: &Expression<T>, id: NodeId) -> ExprSnapshot {
    match &expression.nodes()[id] {
        Node::Group(group) => snapshot_group(expression, group),
        Node::Value(value) => ExprSnapshot::new("Value", value.text.clone())
            .with_attribute("span", span_attribute(&value.span)),
        Node::Operator(node) => {
            let operator = expression.operator(node);
            ExprSnapshot::new("Operator", operator.token())
                .with_attribute("kind", operator.kind().to_string())
                .with_attribute("span", span_attribute(&node.span))
        }
    }
}

fn snapshot_group<T>(expression: &Expression<T>, group: &GroupNode) -> ExprSnapshot {
    let children = group
        .children
        .iter()
        .map(|&child| snapshot_node(expression, child))
        .collect();

    let snapshot = match &group.grouping {
        None => ExprSnapshot::new("Root", format!("Root ({} items)", group.children.len())),
        Some(grouping) => ExprSnapshot::new("Group", grouping.to_string())
            .with_attribute("start", grouping.start())
            .with_attribute("end", grouping.end()),
    };

    snapshot
        .with_attribute("span", span_attribute(&group.span))
        .with_children(children)
}

fn span_attribute(span: &Range<usize>) -> String {
    format!("{}..{}", span.start, span.end)
}
