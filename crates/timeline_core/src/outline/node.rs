//! Outline node model.

use serde::Serialize;

const INDENT: char = '\t';

/// One line of a tab-indented outline and its nested lines.
///
/// `line` keeps the raw source text, including leading tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutlineNode {
    pub line: String,
    /// Free-text notes attached to this node. Empty when none.
    pub notes: String,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Creates a leaf node without notes.
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            notes: String::new(),
            children: Vec::new(),
        }
    }

    /// Creates a node with children in the given order.
    pub fn with_children(
        line: impl Into<String>,
        children: impl IntoIterator<Item = OutlineNode>,
    ) -> Self {
        Self {
            line: line.into(),
            notes: String::new(),
            children: children.into_iter().collect(),
        }
    }

    /// Creates a node carrying notes and children.
    pub fn with_notes(
        line: impl Into<String>,
        notes: impl Into<String>,
        children: impl IntoIterator<Item = OutlineNode>,
    ) -> Self {
        Self {
            line: line.into(),
            notes: notes.into(),
            children: children.into_iter().collect(),
        }
    }

    /// Synthetic empty-line node wrapping several top-level nodes.
    pub fn synthetic_root(children: impl IntoIterator<Item = OutlineNode>) -> Self {
        Self::with_children(String::new(), children)
    }

    /// Line text without its indentation prefix.
    pub fn content(&self) -> &str {
        self.line.trim_start_matches(INDENT)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(OutlineNode::subtree_len)
            .sum::<usize>()
    }
}

/// Outline depth of a raw line: leading tab count plus one.
pub fn indent_depth(line: &str) -> usize {
    line.chars().take_while(|c| *c == INDENT).count() + 1
}
