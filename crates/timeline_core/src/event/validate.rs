//! Eager validation of derived event fields.
//!
//! # Responsibility
//! - Force start/end/duration on every event in a tree. Names are stored
//!   values and cannot fail.
//! - Collect every failure into one report instead of stopping at the first.
//!
//! # Invariants
//! - Children are visited before their parent, siblings in source order.
//! - `is_valid` is true exactly when `errors` is empty.

use crate::event::tree::{Event, FieldAccessError};
use log::{debug, warn};
use std::fmt::{Display, Formatter};

/// Derived event field checked by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Start,
    End,
    Duration,
}

impl EventField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Duration => "duration",
        }
    }
}

/// One field that could not be computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub event_name: String,
    pub field: EventField,
    pub message: String,
    pub cause: FieldAccessError,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.message, self.cause)
    }
}

/// Outcome of validating one event tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for error in &self.errors {
            writeln!(f, "{error}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Validates `root` and all of its descendants.
///
/// Each event's rollup is bounded by `max_depth` counted from that event.
pub fn validate_with_limit(root: &Event, max_depth: usize) -> ValidationReport {
    let mut errors = Vec::new();
    let mut visited = 0usize;

    // Explicit post-order walk: (event, children already pushed).
    let mut stack: Vec<(&Event, bool)> = vec![(root, false)];
    while let Some((event, expanded)) = stack.pop() {
        if !expanded {
            stack.push((event, true));
            for child in event.children().iter().rev() {
                stack.push((child, false));
            }
            continue;
        }
        visited += 1;
        check_event(event, max_depth, &mut errors);
    }

    if errors.is_empty() {
        debug!("event=validate module=event status=ok events={visited}");
    } else {
        warn!(
            "event=validate module=event status=invalid events={} errors={}",
            visited,
            errors.len()
        );
    }
    ValidationReport::from_errors(errors)
}

fn check_event(event: &Event, max_depth: usize, errors: &mut Vec<ValidationError>) {
    let name = event.name();

    let mut record = |field: EventField, cause: FieldAccessError| {
        errors.push(ValidationError {
            event_name: name.to_string(),
            field,
            message: format!("cannot compute {} for event \"{name}\"", field.as_str()),
            cause,
        });
    };

    if let Err(cause) = event.start_with_limit(max_depth) {
        record(EventField::Start, cause);
    }
    if let Err(cause) = event.end_with_limit(max_depth) {
        record(EventField::End, cause);
    }
    if let Err(cause) = event.duration_with_limit(max_depth) {
        record(EventField::Duration, cause);
    }
}
