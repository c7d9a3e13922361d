//! Arena nodes produced by the scanner
//!
//! Groups refer to their children and parent by [`NodeId`] instead of holding
//! references, so the tree has no ownership cycles and copying it is a plain clone
//! of the arena.
//!
//! All spans are character ranges into the source string.

use super::grouping::Grouping;
use std::ops::Range;

/// Index of a node in an [`Expression`](super::Expression) arena
pub type NodeId = usize;

/// The root group always sits at the start of the arena
pub const ROOT: NodeId = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Group(GroupNode),
    Value(ValueNode),
    Operator(OperatorNode),
}

impl Node {
    pub fn span(&self) -> &Range<usize> {
        match self {
            Node::Group(group) => &group.span,
            Node::Value(value) => &value.span,
            Node::Operator(operator) => &operator.span,
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Node::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&ValueNode> {
        match self {
            Node::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<&OperatorNode> {
        match self {
            Node::Operator(operator) => Some(operator),
            _ => None,
        }
    }
}

/// An ordered run of children, optionally enclosed by a grouping.
///
/// Only the root has neither parent nor grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    pub parent: Option<NodeId>,
    pub grouping: Option<Grouping>,
    pub children: Vec<NodeId>,
    /// From the first character of the start delimiter to the last of the end delimiter
    pub span: Range<usize>,
    /// Whitespace characters between tokens that produced no value
    pub padding: usize,
}

impl GroupNode {
    pub(crate) fn root() -> Self {
        Self {
            parent: None,
            grouping: None,
            children: Vec::new(),
            span: 0..0,
            padding: 0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Characters taken by the enclosing delimiters, zero for the root
    pub fn delimiter_len(&self) -> usize {
        self.grouping.as_ref().map_or(0, Grouping::delimiter_len)
    }
}

/// A literal run of text between tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueNode {
    /// Accumulated text with surrounding whitespace trimmed
    pub text: String,
    /// Characters accumulated before trimming
    pub raw_len: usize,
    /// Span of the trimmed text
    pub span: Range<usize>,
}

/// One occurrence of a registered operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorNode {
    /// Index into the operator table of the expression
    pub operator: usize,
    pub span: Range<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_parent_or_grouping() {
        let root = GroupNode::root();
        assert!(root.is_root());
        assert!(root.grouping.is_none());
        assert_eq!(root.delimiter_len(), 0);
    }

    #[test]
    fn test_node_accessors() {
        let node = Node::Value(ValueNode {
            text: "bob".to_string(),
            raw_len: 4,
            span: 1..4,
        });

        assert_eq!(node.span(), &(1..4));
        assert_eq!(node.as_value().map(|v| v.text.as_str()), Some("bob"));
        assert!(node.as_group().is_none());
        assert!(node.as_operator().is_none());
    }
}
