//! Treeviz formatter for parsed expressions
//!
//! One line per node, with the nesting drawn as box connectors two characters wide per
//! level. Each line is `<prefix><connector> <icon> <label>`, labels truncated to 30
//! characters.
//!
//! Example for `marley && (stephen || !bob)`:
//!
//! ```text
//! ⧉ Root (3 items)
//! ├─ ◦ marley
//! ├─ ƒ &&
//! └─ ⊏ (…)
//!   ├─ ◦ stephen
//!   ├─ ƒ ||
//!   ├─ ƒ !
//!   └─ ◦ bob
//! ```
//!
//! Icons
//!     Root: ⧉
//!     Group: ⊏
//!     Value: ◦
//!     Operator: ƒ

use super::registry::{FormatError, Formatter};
use crate::ast::{snapshot_from_expression, ExprSnapshot, Expression};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Get the icon for a node type
fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Root" => "⧉",
        "Group" => "⊏",
        "Value" => "◦",
        "Operator" => "ƒ",
        _ => "○",
    }
}

fn format_snapshot(
    snapshot: &ExprSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(&snapshot.node_type);
    let truncated_label = truncate(&snapshot.label, 30);

    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix, connector, icon, truncated_label
    ));

    if !snapshot.children.is_empty() {
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let child_count = snapshot.children.len();

        for (i, child) in snapshot.children.iter().enumerate() {
            output.push_str(&format_snapshot(child, &child_prefix, i, child_count));
        }
    }

    output
}

/// Render a snapshot whose top node is drawn without a connector
pub fn snapshot_to_treeviz(snapshot: &ExprSnapshot) -> String {
    let icon = get_icon(&snapshot.node_type);
    let truncated_label = truncate(&snapshot.label, 30);
    let mut output = format!("{} {}\n", icon, truncated_label);

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count));
    }

    output
}

pub fn to_treeviz_str<T>(expression: &Expression<T>) -> String {
    snapshot_to_treeviz(&snapshot_from_expression(expression))
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, snapshot: &ExprSnapshot) -> Result<String, FormatError> {
        Ok(snapshot_to_treeviz(snapshot))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
