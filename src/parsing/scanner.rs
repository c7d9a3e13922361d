//! Left-to-right scanner that builds the node arena
//!
//! At each position, in strict priority order:
//!
//! 1. A registered start delimiter opens a child group.
//! 2. The current group's end delimiter closes it.
//! 3. Any other registered end delimiter is unbalanced.
//! 4. A registered operator is appended to the current group.
//! 5. Otherwise the character is appended to the pending value.
//!
//! Every token flushes the pending value first. Flushed text is trimmed; whitespace-only
//! runs produce no node but are counted as padding on the enclosing group so that
//! consumed-length accounting still covers every character.

use crate::ast::{Grouping, GroupNode, Node, NodeId, Operator, OperatorNode, ValueNode, ROOT};
use crate::error::ParseError;

/// Text accumulated since the last token
#[derive(Debug, Default)]
struct Pending {
    text: String,
    /// Character index of the first accumulated character
    start: usize,
    len: usize,
}

pub(crate) struct Scanner<'p, T> {
    operators: &'p [Operator<T>],
    groupings: &'p [Grouping],
    nodes: Vec<Node>,
    current: NodeId,
    pending: Pending,
    /// Byte offset into the input
    pos: usize,
    /// Character offset into the input
    index: usize,
}

impl<'p, T> Scanner<'p, T> {
    pub(crate) fn new(operators: &'p [Operator<T>], groupings: &'p [Grouping]) -> Self {
        Self {
            operators,
            groupings,
            nodes: vec![Node::Group(GroupNode::root())],
            current: ROOT,
            pending: Pending::default(),
            pos: 0,
            index: 0,
        }
    }

    pub(crate) fn scan(mut self, input: &str) -> Result<Vec<Node>, ParseError> {
        let (operators, groupings) = (self.operators, self.groupings);

        while self.pos < input.len() {
            let rest = &input[self.pos..];

            if let Some(grouping) = groupings.iter().find(|g| rest.starts_with(g.start())) {
                self.flush();
                self.open(grouping);
                self.advance(grouping.start());
                continue;
            }

            if let Some(end) = self.current_end() {
                if rest.starts_with(end.as_str()) {
                    self.flush();
                    self.advance(&end);
                    self.close();
                    continue;
                }
            }

            if let Some(grouping) = groupings.iter().find(|g| rest.starts_with(g.end())) {
                return Err(ParseError::UnbalancedEnd {
                    delimiter: grouping.end().to_string(),
                    index: self.index,
                });
            }

            if let Some((slot, operator)) = operators
                .iter()
                .enumerate()
                .find(|(_, op)| rest.starts_with(op.token()))
            {
                self.flush();
                let start = self.index;
                self.advance(operator.token());
                self.push(Node::Operator(OperatorNode {
                    operator: slot,
                    span: start..self.index,
                }));
                continue;
            }

            if let Some(ch) = rest.chars().next() {
                self.accumulate(ch);
            }
        }

        self.flush();
        self.finish()
    }

    fn advance(&mut self, token: &str) {
        self.pos += token.len();
        self.index += token.chars().count();
    }

    fn accumulate(&mut self, ch: char) {
        if self.pending.len == 0 {
            self.pending.start = self.index;
        }
        self.pending.text.push(ch);
        self.pending.len += 1;
        self.pos += ch.len_utf8();
        self.index += 1;
    }

    fn current_group(&mut self) -> &mut GroupNode {
        match &mut self.nodes[self.current] {
            Node::Group(group) => group,
            _ => unreachable!("the current node is always a group"),
        }
    }

    fn current_end(&self) -> Option<String> {
        match &self.nodes[self.current] {
            Node::Group(group) => group.grouping.as_ref().map(|g| g.end().to_string()),
            _ => None,
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        self.current_group().children.push(id);
        id
    }

    fn open(&mut self, grouping: &Grouping) {
        let id = self.push(Node::Group(GroupNode {
            parent: Some(self.current),
            grouping: Some(grouping.clone()),
            children: Vec::new(),
            span: self.index..self.index,
            padding: 0,
        }));
        self.current = id;
    }

    /// Called after the end delimiter has been consumed
    fn close(&mut self) {
        let end = self.index;
        let group = self.current_group();
        group.span.end = end;
        let parent = group.parent;
        self.current = parent.unwrap_or(ROOT);
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if pending.len == 0 {
            return;
        }

        let trimmed = pending.text.trim();
        if trimmed.is_empty() {
            self.current_group().padding += pending.len;
            return;
        }

        let leading = pending.text.chars().take_while(|c| c.is_whitespace()).count();
        let start = pending.start + leading;
        let span = start..start + trimmed.chars().count();
        self.push(Node::Value(ValueNode {
            text: trimmed.to_string(),
            raw_len: pending.len,
            span,
        }));
    }

    fn finish(mut self) -> Result<Vec<Node>, ParseError> {
        if self.current != ROOT {
            let group = self.current_group();
            let delimiter = group
                .grouping
                .as_ref()
                .map(|g| g.start().to_string())
                .unwrap_or_default();
            return Err(ParseError::UnclosedGroup {
                delimiter,
                index: group.span.start,
            });
        }

        let end = self.index;
        self.current_group().span = 0..end;
        Ok(self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Result<Vec<Node>, ParseError> {
        let operators = vec![
            Operator::binary("&&", |a: bool, b: bool| a && b),
            Operator::binary("||", |a: bool, b: bool| a || b),
            Operator::unary("!", |a: bool| !a),
        ];
        let groupings = vec![Grouping::new("(", ")"), Grouping::new("[", "]")];
        Scanner::new(&operators, &groupings).scan(input)
    }

    fn root(nodes: &[Node]) -> &GroupNode {
        nodes[ROOT].as_group().unwrap()
    }

    #[test]
    fn test_flat_sequence() {
        let nodes = scan("a && b").unwrap();
        let root = root(&nodes);

        assert_eq!(root.children, vec![1, 2, 3]);
        assert_eq!(nodes[1].as_value().unwrap().text, "a");
        assert_eq!(nodes[1].as_value().unwrap().raw_len, 2);
        assert_eq!(nodes[2].as_operator().unwrap().span, 2..4);
        assert_eq!(nodes[3].as_value().unwrap().text, "b");
        assert_eq!(nodes[3].as_value().unwrap().span, 5..6);
    }

    #[test]
    fn test_nested_groups_link_to_parent() {
        let nodes = scan("(a || [b])").unwrap();
        let outer = nodes[1].as_group().unwrap();

        assert_eq!(outer.parent, Some(ROOT));
        assert_eq!(outer.grouping, Some(Grouping::new("(", ")")));
        assert_eq!(outer.span, 0..10);

        let inner_id = outer.children[2];
        let inner = nodes[inner_id].as_group().unwrap();
        assert_eq!(inner.parent, Some(1));
        assert_eq!(inner.span, 6..9);
    }

    #[test]
    fn test_whitespace_between_tokens_is_padding() {
        let nodes = scan("a && ( b )").unwrap();
        let root = root(&nodes);

        // "a ", "&&", then a lone space before the group
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.padding, 1);
        let group = nodes[root.children[2]].as_group().unwrap();
        assert_eq!(group.padding, 0);
        assert_eq!(nodes[group.children[0]].as_value().unwrap().raw_len, 3);
    }

    #[test]
    fn test_delimiters_never_reach_values() {
        let nodes = scan("(ziggy)").unwrap();
        let texts: Vec<_> = nodes
            .iter()
            .filter_map(Node::as_value)
            .map(|v| v.text.as_str())
            .collect();
        assert_eq!(texts, vec!["ziggy"]);
    }

    #[test]
    fn test_unbalanced_end_at_root() {
        assert_eq!(
            scan("a) && b").unwrap_err(),
            ParseError::UnbalancedEnd {
                delimiter: ")".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn test_mismatched_end_inside_group() {
        assert_eq!(
            scan("(a]").unwrap_err(),
            ParseError::UnbalancedEnd {
                delimiter: "]".to_string(),
                index: 2
            }
        );
    }

    #[test]
    fn test_unclosed_group() {
        assert_eq!(
            scan("a && (b || (c)").unwrap_err(),
            ParseError::UnclosedGroup {
                delimiter: "(".to_string(),
                index: 5
            }
        );
    }

    #[test]
    fn test_multibyte_positions_are_characters() {
        let nodes = scan("é && ü").unwrap();
        assert_eq!(nodes[2].as_operator().unwrap().span, 2..4);
        assert_eq!(nodes[3].as_value().unwrap().span, 5..6);
    }
}
