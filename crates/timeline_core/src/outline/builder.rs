//! Indentation-driven outline builder.
//!
//! # Responsibility
//! - Turn an ordered line sequence into an `OutlineNode` tree in one pass.
//!
//! # Invariants
//! - Depth of a node equals the tab-count prefix of its line plus one.
//! - Children keep source order.
//! - Depth may grow by at most one level per line; it may shrink by at most
//!   one level per line. Any other jump is `MalformedOutline`.
//! - Only leading blank lines are skipped; no other preprocessing happens.

use crate::outline::node::{indent_depth, OutlineNode};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from outline construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    /// Indentation changed by more than one level between two lines.
    MalformedOutline {
        /// 1-based line number in the caller's input.
        line_number: usize,
        line: String,
        depth: usize,
        previous_depth: usize,
    },
}

impl Display for OutlineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedOutline {
                line_number,
                line,
                depth,
                previous_depth,
            } => write!(
                f,
                "invalid line: \"{line}\" line number {line_number} (depth {depth} after depth {previous_depth})"
            ),
        }
    }
}

impl Error for OutlineError {}

struct ArenaNode {
    line: String,
    children: Vec<usize>,
}

/// Builds an outline tree from raw lines.
///
/// Returns the single top-level node when there is exactly one, otherwise a
/// synthetic empty-line root holding every top-level node (none for an input
/// made only of blank lines).
///
/// # Errors
/// - `MalformedOutline` naming the first line whose depth jumps by more than
///   one level.
pub fn build_outline<I, S>(lines: I) -> Result<OutlineNode, OutlineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut arena: Vec<ArenaNode> = Vec::new();
    let mut roots: Vec<usize> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    let content = lines
        .into_iter()
        .enumerate()
        .skip_while(|(_, line)| line.as_ref().trim().is_empty());

    for (index, line) in content {
        let line = line.as_ref();
        let current_depth = stack.len();
        let next_depth = indent_depth(line);

        let closed = if next_depth == current_depth + 1 {
            0
        } else if next_depth == current_depth {
            1
        } else if next_depth + 1 == current_depth {
            2
        } else {
            return Err(OutlineError::MalformedOutline {
                line_number: index + 1,
                line: line.to_string(),
                depth: next_depth,
                previous_depth: current_depth,
            });
        };
        stack.truncate(current_depth - closed);

        let node_index = arena.len();
        arena.push(ArenaNode {
            line: line.to_string(),
            children: Vec::new(),
        });
        match stack.last() {
            Some(parent) => arena[*parent].children.push(node_index),
            None => roots.push(node_index),
        }
        stack.push(node_index);
    }

    debug!(
        "event=outline_build module=outline status=ok nodes={} roots={}",
        arena.len(),
        roots.len()
    );

    let mut built = assemble(arena);
    let mut top_level: Vec<OutlineNode> = roots
        .into_iter()
        .filter_map(|index| built[index].take())
        .collect();

    if top_level.len() == 1 {
        if let Some(node) = top_level.pop() {
            return Ok(node);
        }
    }
    Ok(OutlineNode::synthetic_root(top_level))
}

// Children are always pushed after their parent, so walking the arena
// backwards finishes every subtree before its parent needs it.
fn assemble(arena: Vec<ArenaNode>) -> Vec<Option<OutlineNode>> {
    let mut built: Vec<Option<OutlineNode>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);

    for (index, node) in arena.into_iter().enumerate().rev() {
        let children = node
            .children
            .iter()
            .filter_map(|child| built[*child].take())
            .collect::<Vec<_>>();
        built[index] = Some(OutlineNode::with_children(node.line, children));
    }
    built
}
