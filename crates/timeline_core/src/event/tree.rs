//! Hierarchical event tree and date rollup.
//!
//! # Responsibility
//! - Build an `Event` tree from an `OutlineNode` tree.
//! - Derive start/end/duration for events without explicit dates from their
//!   children, recursively.
//!
//! # Invariants
//! - Explicit dates always override derived ones.
//! - Derived start is the earliest child start; derived end is the latest
//!   child end, falling back to the event's own start.
//! - Ties between children resolve to the first one in source order.
//! - Rollup never recurses deeper than the configured depth limit.
//! - Events own their children; there are no back-references.

use crate::event::extract::extract;
use crate::event::validate::{validate_with_limit, ValidationReport};
use crate::model::date::CalendarDate;
use crate::model::period::Period;
use crate::outline::node::OutlineNode;
use serde::Serialize;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default bound on event nesting for reads and rollups.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Result of reading a derived event field.
pub type FieldResult<T> = Result<T, FieldAccessError>;

/// Failure while computing a derived event field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAccessError {
    /// Rollup needed to descend past the depth limit.
    DepthLimitExceeded { event: String, limit: usize },
}

impl Display for FieldAccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepthLimitExceeded { event, limit } => write!(
                f,
                "rollup for event \"{event}\" exceeds depth limit {limit}"
            ),
        }
    }
}

impl Error for FieldAccessError {}

/// Errors from event tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTreeError {
    /// The root node line could not be read as an event.
    InvalidNode { line: String },
    /// A descendant node line could not be read as an event.
    InvalidChildNode { line: String },
    /// Outline nesting is deeper than the configured limit.
    DepthLimitExceeded { line: String, limit: usize },
}

impl Display for EventTreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNode { line } => write!(f, "invalid node \"{line}\""),
            Self::InvalidChildNode { line } => write!(f, "invalid child node \"{line}\""),
            Self::DepthLimitExceeded { line, limit } => write!(
                f,
                "node \"{line}\" is nested deeper than limit {limit}"
            ),
        }
    }
}

impl Error for EventTreeError {}

/// Dates written on the event's own line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ExplicitDates {
    pub start: Option<CalendarDate>,
    pub end: Option<CalendarDate>,
}

impl ExplicitDates {
    pub fn new(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// How an event gets its dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Carries at least one explicit date, or has nothing to derive from.
    Leaf,
    /// Has no explicit dates and derives them from children.
    Group,
}

/// One timeline event with its nested sub-events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Event {
    name: String,
    notes: String,
    explicit: ExplicitDates,
    children: Vec<Event>,
}

impl Event {
    pub fn new(name: impl Into<String>, explicit: ExplicitDates, children: Vec<Event>) -> Self {
        Self {
            name: name.into(),
            notes: String::new(),
            explicit,
            children,
        }
    }

    /// Event with explicit dates and no children.
    pub fn leaf(
        name: impl Into<String>,
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
    ) -> Self {
        Self::new(name, ExplicitDates::new(start, end), Vec::new())
    }

    /// Event without explicit dates whose dates come from `children`.
    pub fn group(name: impl Into<String>, children: Vec<Event>) -> Self {
        Self::new(name, ExplicitDates::default(), children)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn notes(&self) -> &str {
        self.notes.as_str()
    }

    pub fn explicit_dates(&self) -> ExplicitDates {
        self.explicit
    }

    pub fn children(&self) -> &[Event] {
        self.children.as_slice()
    }

    pub fn kind(&self) -> EventKind {
        if self.explicit.is_empty() && !self.children.is_empty() {
            EventKind::Group
        } else {
            EventKind::Leaf
        }
    }

    /// Number of events in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Event::subtree_len).sum::<usize>()
    }

    /// Effective start using `DEFAULT_MAX_DEPTH`.
    pub fn start(&self) -> FieldResult<Option<CalendarDate>> {
        self.start_with_limit(DEFAULT_MAX_DEPTH)
    }

    /// Effective end using `DEFAULT_MAX_DEPTH`.
    pub fn end(&self) -> FieldResult<Option<CalendarDate>> {
        self.end_with_limit(DEFAULT_MAX_DEPTH)
    }

    /// Effective duration using `DEFAULT_MAX_DEPTH`.
    pub fn duration(&self) -> FieldResult<Option<Period>> {
        self.duration_with_limit(DEFAULT_MAX_DEPTH)
    }

    /// Explicit start, or the earliest child start.
    pub fn start_with_limit(&self, max_depth: usize) -> FieldResult<Option<CalendarDate>> {
        self.rollup_start(0, max_depth)
    }

    /// Explicit end, or the latest child end, or the effective start.
    pub fn end_with_limit(&self, max_depth: usize) -> FieldResult<Option<CalendarDate>> {
        self.rollup_end(0, max_depth)
    }

    /// Calendar period from effective start to effective end.
    ///
    /// `None` when either endpoint is absent.
    pub fn duration_with_limit(&self, max_depth: usize) -> FieldResult<Option<Period>> {
        let start = self.start_with_limit(max_depth)?;
        let end = self.end_with_limit(max_depth)?;
        Ok(start
            .zip(end)
            .map(|(start, end)| Period::between(start.to_ordinal_date(), end.to_ordinal_date())))
    }

    /// Forces every derived field in the tree and collects failures.
    pub fn validate(&self) -> ValidationReport {
        validate_with_limit(self, DEFAULT_MAX_DEPTH)
    }

    fn rollup_start(&self, depth: usize, limit: usize) -> FieldResult<Option<CalendarDate>> {
        if let Some(start) = self.explicit.start {
            return Ok(Some(start));
        }
        self.ensure_can_descend(depth, limit)?;

        let mut earliest: Option<CalendarDate> = None;
        for child in &self.children {
            let Some(candidate) = child.rollup_start(depth + 1, limit)? else {
                continue;
            };
            let replaces = earliest
                .map_or(true, |current| candidate.cmp_ordinal(&current) == Ordering::Less);
            if replaces {
                earliest = Some(candidate);
            }
        }
        Ok(earliest)
    }

    fn rollup_end(&self, depth: usize, limit: usize) -> FieldResult<Option<CalendarDate>> {
        if let Some(end) = self.explicit.end {
            return Ok(Some(end));
        }
        self.ensure_can_descend(depth, limit)?;

        let mut latest: Option<CalendarDate> = None;
        for child in &self.children {
            let Some(candidate) = child.rollup_end(depth + 1, limit)? else {
                continue;
            };
            let replaces = latest
                .map_or(true, |current| candidate.cmp_ordinal(&current) == Ordering::Greater);
            if replaces {
                latest = Some(candidate);
            }
        }
        match latest {
            Some(end) => Ok(Some(end)),
            // TODO: distinguish a same-day event from an unknown end once the
            // export format can carry that difference.
            None => self.rollup_start(depth, limit),
        }
    }

    fn ensure_can_descend(&self, depth: usize, limit: usize) -> FieldResult<()> {
        if !self.children.is_empty() && depth >= limit {
            return Err(FieldAccessError::DepthLimitExceeded {
                event: self.name.clone(),
                limit,
            });
        }
        Ok(())
    }
}

/// Reads an outline tree into an event tree using `DEFAULT_MAX_DEPTH`.
///
/// # Errors
/// - `InvalidNode` / `InvalidChildNode` when a node line cannot be read.
/// - `DepthLimitExceeded` when nesting exceeds the limit.
pub fn read_event(node: &OutlineNode) -> Result<Event, EventTreeError> {
    read_event_with_limit(node, DEFAULT_MAX_DEPTH)
}

/// Reads an outline tree into an event tree, bounding nesting by `max_depth`.
pub fn read_event_with_limit(
    node: &OutlineNode,
    max_depth: usize,
) -> Result<Event, EventTreeError> {
    let event = extract(node).ok_or_else(|| EventTreeError::InvalidNode {
        line: node.line.clone(),
    })?;
    read_children(event, node, 0, max_depth)
}

fn read_children(
    mut event: Event,
    node: &OutlineNode,
    depth: usize,
    limit: usize,
) -> Result<Event, EventTreeError> {
    if !node.children.is_empty() && depth >= limit {
        return Err(EventTreeError::DepthLimitExceeded {
            line: node.line.clone(),
            limit,
        });
    }

    event.children.reserve(node.children.len());
    for child_node in &node.children {
        let child = extract(child_node).ok_or_else(|| EventTreeError::InvalidChildNode {
            line: child_node.line.clone(),
        })?;
        event
            .children
            .push(read_children(child, child_node, depth + 1, limit)?);
    }
    Ok(event)
}
