//! Error types for parsing and evaluation
//!
//! Evaluation errors start out without a position and have one filled in by the first
//! enclosing fold that sees them, see [`EvalError::or_at`]. All positions are character
//! indices into the source string.

use crate::formats::FormatError;
use std::fmt;

/// Why an operator could not collect its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandFault {
    /// Binary operator at the start of a group
    MissingLeft,
    /// Operator at the end of a group
    MissingRight,
    /// Binary operator whose left neighbor is another operator
    UnresolvedLeft,
    /// An operand that did not reduce to a value
    UnresolvedOperand,
    /// A group (or the whole input) with nothing in it
    EmptyGroup,
}

impl fmt::Display for OperandFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            OperandFault::MissingLeft => "operator has no left operand",
            OperandFault::MissingRight => "operator has no right operand",
            OperandFault::UnresolvedLeft => "left operand of operator is another operator",
            OperandFault::UnresolvedOperand => "operand did not resolve to a value",
            OperandFault::EmptyGroup => "group is empty",
        };
        f.write_str(text)
    }
}

/// Errors raised while reducing an expression.
///
/// Both kinds abort the evaluation in progress; there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Two operands ended up next to each other with nothing to combine them
    #[error("missing operator between operands{}", at_character(.index))]
    MissingOperator { index: Option<usize> },

    /// An operator is missing an operand, or an operand is not a value
    #[error("invalid operand: {fault}{}", at_character(.index))]
    InvalidOperand {
        fault: OperandFault,
        index: Option<usize>,
    },
}

impl EvalError {
    pub(crate) fn invalid_operand(fault: OperandFault) -> Self {
        EvalError::InvalidOperand { fault, index: None }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            EvalError::MissingOperator { index } | EvalError::InvalidOperand { index, .. } => {
                *index
            }
        }
    }

    /// Fill in the position if the error does not carry one yet
    pub fn or_at(self, at: usize) -> Self {
        match self {
            EvalError::MissingOperator { index: None } => EvalError::MissingOperator {
                index: Some(at),
            },
            EvalError::InvalidOperand { fault, index: None } => EvalError::InvalidOperand {
                fault,
                index: Some(at),
            },
            positioned => positioned,
        }
    }

    /// The error message followed by the source lines around its position
    pub fn with_source_context(&self, source: &str) -> String {
        with_context(&self.to_string(), source, self.index())
    }
}

/// Structural problems found while scanning
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// An end delimiter with no matching group open
    #[error("unbalanced end delimiter {delimiter:?} at character {index}")]
    UnbalancedEnd { delimiter: String, index: usize },

    /// Input ended inside a group
    #[error("group opened with {delimiter:?} at character {index} is never closed")]
    UnclosedGroup { delimiter: String, index: usize },

    /// An operator or delimiter registered as the empty string
    #[error("empty {what} token")]
    EmptyToken { what: String },
}

impl ParseError {
    pub fn index(&self) -> Option<usize> {
        match self {
            ParseError::UnbalancedEnd { index, .. } | ParseError::UnclosedGroup { index, .. } => {
                Some(*index)
            }
            ParseError::EmptyToken { .. } => None,
        }
    }

    /// The error message followed by the source lines around its position
    pub fn with_source_context(&self, source: &str) -> String {
        with_context(&self.to_string(), source, self.index())
    }
}

/// Any error the crate's convenience layers can produce
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

fn at_character(index: &Option<usize>) -> String {
    index
        .map(|index| format!(" at character {index}"))
        .unwrap_or_default()
}

fn with_context(message: &str, source: &str, index: Option<usize>) -> String {
    match index {
        Some(index) => format!("{message}\n\n{}", format_source_context(source, index)),
        None => message.to_string(),
    }
}

/// Line (0-indexed) and column of a character index
fn line_and_column(source: &str, index: usize) -> (usize, usize) {
    let mut line = 0;
    let mut column = 0;
    for ch in source.chars().take(index) {
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// Format source code context around an error position
///
/// Shows 2 lines before the error, the error line with >> marker and a caret under the
/// column, and 2 lines after. All lines are numbered for easy reference.
pub fn format_source_context(source: &str, index: usize) -> String {
    let (error_line, column) = line_and_column(source, index);
    let lines: Vec<&str> = source.lines().collect();

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        let display_line_num = line_num + 1; // 1-indexed for display

        context.push_str(&format!("{} {:3} | {}\n", marker, display_line_num, line));
        if line_num == error_line {
            context.push_str(&format!("{:6} | {}^\n", "", " ".repeat(column)));
        }
    }

    context
}
