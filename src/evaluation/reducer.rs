//! The fold that collapses a tree into one [`Resolved`]
//!
//! The arena is never mutated. Each group is reduced over a fresh vector of slots built
//! from its child ids; slots start out pending and are replaced by resolved values as
//! they are consumed.
//!
//! Errors are raised without a position. The fold that catches one fills in the start
//! of the slot it was consuming; errors that already carry a position pass through.

use super::{Associativity, Resolved};
use crate::ast::{Combine, Expression, GroupNode, Node, NodeId};
use crate::error::{EvalError, OperandFault};

enum Slot<T> {
    Pending(NodeId),
    Resolved(Resolved<T>),
}

pub(crate) struct Reducer<'e, T> {
    expression: &'e Expression<T>,
    leaf: &'e dyn Fn(&str) -> T,
}

impl<'e, T> Reducer<'e, T> {
    pub(crate) fn new(expression: &'e Expression<T>, leaf: &'e dyn Fn(&str) -> T) -> Self {
        Self { expression, leaf }
    }

    pub(crate) fn reduce(&self) -> Result<Resolved<T>, EvalError> {
        self.reduce_group(self.expression.root())
            .map_err(|err| err.or_at(0))
    }

    fn reduce_group(&self, group: &GroupNode) -> Result<Resolved<T>, EvalError> {
        if group.children.is_empty() {
            return Err(EvalError::invalid_operand(OperandFault::EmptyGroup));
        }

        let mut slots: Vec<Slot<T>> = group.children.iter().map(|&id| Slot::Pending(id)).collect();
        let inner = self.fold(&mut slots)?;

        // Delimiters and discarded whitespace belong to the group, not to any child
        let consumed = inner.consumed + group.delimiter_len() + group.padding;
        Ok(Resolved::new(inner.value, consumed, group.span.start))
    }

    fn fold(&self, slots: &mut Vec<Slot<T>>) -> Result<Resolved<T>, EvalError> {
        if slots.is_empty() {
            return Err(EvalError::invalid_operand(OperandFault::EmptyGroup));
        }

        let mut cursor = 0;
        loop {
            let failure_at = self.start_of(&slots[cursor]);
            let at = self
                .consume(slots, cursor)
                .map_err(|err| err.or_at(failure_at))?;

            // Anything resolved left of `at` is an operand nothing will combine with
            if at != 0 {
                return Err(EvalError::MissingOperator {
                    index: Some(self.start_of(&slots[at])),
                });
            }
            if slots.len() == 1 {
                break;
            }
            cursor = at + 1;
        }

        take_resolved(slots, 0)
    }

    /// Consume the slot at `i`, returning the index of the resulting resolved slot
    fn consume(&self, slots: &mut Vec<Slot<T>>, i: usize) -> Result<usize, EvalError> {
        let id = match slots[i] {
            Slot::Resolved(_) => return Ok(i),
            Slot::Pending(id) => id,
        };

        match &self.expression.nodes()[id] {
            Node::Value(value) => {
                let resolved = Resolved::new((self.leaf)(&value.text), value.raw_len, value.span.start);
                slots[i] = Slot::Resolved(resolved);
                Ok(i)
            }
            Node::Group(group) => {
                slots[i] = Slot::Resolved(self.reduce_group(group)?);
                Ok(i)
            }
            Node::Operator(node) => {
                let operator = self.expression.operator(node);
                let token_len = operator.token_len();
                match operator.combine() {
                    Combine::Unary(f) => {
                        self.consume_unary(slots, i, f.as_ref(), token_len, node.span.start)
                    }
                    Combine::Binary(f) => self.consume_binary(slots, i, f.as_ref(), token_len),
                }
            }
        }
    }

    fn consume_unary(
        &self,
        slots: &mut Vec<Slot<T>>,
        i: usize,
        f: &dyn Fn(T) -> T,
        token_len: usize,
        start: usize,
    ) -> Result<usize, EvalError> {
        if i + 1 >= slots.len() {
            return Err(EvalError::invalid_operand(OperandFault::MissingRight));
        }

        let at = self.consume(slots, i + 1)?;
        let operand = take_resolved(slots, at)?;
        let consumed = token_len + operand.consumed;
        slots[i] = Slot::Resolved(Resolved::new(f(operand.value), consumed, start));
        Ok(i)
    }

    fn consume_binary(
        &self,
        slots: &mut Vec<Slot<T>>,
        i: usize,
        f: &dyn Fn(T, T) -> T,
        token_len: usize,
    ) -> Result<usize, EvalError> {
        if i == 0 {
            return Err(EvalError::invalid_operand(OperandFault::MissingLeft));
        }
        if !matches!(slots[i - 1], Slot::Resolved(_)) {
            return Err(EvalError::invalid_operand(OperandFault::UnresolvedLeft));
        }
        if i + 1 >= slots.len() {
            return Err(EvalError::invalid_operand(OperandFault::MissingRight));
        }

        let right = match self.expression.associativity() {
            Associativity::Left => {
                let at = self.consume(slots, i + 1)?;
                take_resolved(slots, at)?
            }
            Associativity::Right => {
                let mut tail = slots.split_off(i + 1);
                self.fold(&mut tail)?
            }
        };

        slots.remove(i);
        let left = take_resolved(slots, i - 1)?;
        let consumed = left.consumed + token_len + right.consumed;
        let start = left.start;
        let combined = Resolved::new(f(left.value, right.value), consumed, start);
        slots.insert(i - 1, Slot::Resolved(combined));
        Ok(i - 1)
    }

    fn start_of(&self, slot: &Slot<T>) -> usize {
        match slot {
            Slot::Pending(id) => self.expression.nodes()[*id].span().start,
            Slot::Resolved(resolved) => resolved.start(),
        }
    }
}

fn take_resolved<T>(slots: &mut Vec<Slot<T>>, i: usize) -> Result<Resolved<T>, EvalError> {
    match slots.remove(i) {
        Slot::Resolved(resolved) => Ok(resolved),
        Slot::Pending(_) => Err(EvalError::invalid_operand(OperandFault::UnresolvedOperand)),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{EvalError, OperandFault};
    use crate::evaluation::Associativity;
    use crate::parsing::Parser;

    fn calculator(associativity: Associativity) -> Parser<i64> {
        Parser::with_leaf(|text: &str| text.parse::<i64>().unwrap_or(0))
            .binary("-", |a, b| a - b)
            .binary("*", |a, b| a * b)
            .unary("~", |a: i64| -a)
            .grouping("(", ")")
            .associativity(associativity)
    }

    fn eval(associativity: Associativity, input: &str) -> Result<i64, EvalError> {
        calculator(associativity)
            .parse(input)
            .unwrap()
            .evaluate()
            .map(|r| r.into_value())
    }

    #[test]
    fn test_single_value() {
        assert_eq!(eval(Associativity::Right, "42"), Ok(42));
        assert_eq!(eval(Associativity::Right, "(((7)))"), Ok(7));
    }

    #[test]
    fn test_right_associative_run() {
        assert_eq!(eval(Associativity::Right, "8 - 4 - 2"), Ok(6));
        assert_eq!(eval(Associativity::Right, "2 * 3 - 4"), Ok(-2));
    }

    #[test]
    fn test_left_associative_run() {
        assert_eq!(eval(Associativity::Left, "8 - 4 - 2"), Ok(2));
        assert_eq!(eval(Associativity::Left, "2 * 3 - 4"), Ok(2));
    }

    #[test]
    fn test_grouping_sets_precedence() {
        assert_eq!(eval(Associativity::Right, "(8 - 4) - 2"), Ok(2));
        assert_eq!(eval(Associativity::Left, "8 - (4 - 2)"), Ok(6));
    }

    #[test]
    fn test_unary_binds_to_neighbor() {
        assert_eq!(eval(Associativity::Right, "~3 - 1"), Ok(-4));
        assert_eq!(eval(Associativity::Right, "~~3"), Ok(3));
        assert_eq!(eval(Associativity::Left, "10 - ~(2 * 3)"), Ok(16));
    }

    #[test]
    fn test_missing_operator_between_values() {
        assert_eq!(
            eval(Associativity::Right, "1 (2)"),
            Err(EvalError::MissingOperator { index: Some(2) })
        );
        assert_eq!(
            eval(Associativity::Left, "1 - 2 (3)"),
            Err(EvalError::MissingOperator { index: Some(6) })
        );
    }

    #[test]
    fn test_unary_after_operand_is_missing_operator() {
        assert_eq!(
            eval(Associativity::Right, "1 ~2"),
            Err(EvalError::MissingOperator { index: Some(2) })
        );
    }

    #[test]
    fn test_trailing_binary_operator() {
        assert_eq!(
            eval(Associativity::Right, "1 -"),
            Err(EvalError::InvalidOperand {
                fault: OperandFault::MissingRight,
                index: Some(2)
            })
        );
    }

    #[test]
    fn test_leading_binary_operator() {
        assert_eq!(
            eval(Associativity::Left, "* 2"),
            Err(EvalError::InvalidOperand {
                fault: OperandFault::MissingLeft,
                index: Some(0)
            })
        );
    }

    #[test]
    fn test_consecutive_binary_operators() {
        // Right: the tail "* 2" is folded on its own and fails at its first slot
        assert_eq!(
            eval(Associativity::Right, "1 - * 2"),
            Err(EvalError::InvalidOperand {
                fault: OperandFault::MissingLeft,
                index: Some(4)
            })
        );
        // Left: "*" is consumed as the right neighbor of "-" and its left is unresolved
        assert_eq!(
            eval(Associativity::Left, "1 - * 2"),
            Err(EvalError::InvalidOperand {
                fault: OperandFault::UnresolvedLeft,
                index: Some(2)
            })
        );
    }

    #[test]
    fn test_unary_without_operand() {
        assert_eq!(
            eval(Associativity::Right, "1 - ~"),
            Err(EvalError::InvalidOperand {
                fault: OperandFault::MissingRight,
                index: Some(4)
            })
        );
    }

    #[test]
    fn test_empty_group_and_empty_input() {
        assert_eq!(
            eval(Associativity::Right, "1 - ()"),
            Err(EvalError::InvalidOperand {
                fault: OperandFault::EmptyGroup,
                index: Some(4)
            })
        );
        assert_eq!(
            eval(Associativity::Right, "   "),
            Err(EvalError::InvalidOperand {
                fault: OperandFault::EmptyGroup,
                index: Some(0)
            })
        );
    }

    #[test]
    fn test_nested_error_keeps_inner_position() {
        assert_eq!(
            eval(Associativity::Right, "1 - (2 - (3 (4)))"),
            Err(EvalError::MissingOperator { index: Some(12) })
        );
    }

    #[test]
    fn test_consumed_length_covers_input() {
        let input = "  8 - ( 4 -~2 )  ";
        let resolved = calculator(Associativity::Right)
            .parse(input)
            .unwrap()
            .evaluate()
            .unwrap();
        assert_eq!(resolved.consumed_length(), input.chars().count());
        assert_eq!(*resolved.value(), 2);
    }
}
