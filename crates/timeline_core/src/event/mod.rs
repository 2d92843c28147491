//! Timeline events read from outline nodes.
//!
//! # Responsibility
//! - Parse each node line into a name and optional explicit dates.
//! - Assemble the event tree and derive group dates from children.
//! - Validate derived fields eagerly before export.
//!
//! # Invariants
//! - Event trees are derived once from an outline tree and never point back
//!   to it.

pub mod extract;
pub mod tree;
pub mod validate;

pub use extract::{candidate_date, extract, split_line, LineParts};
pub use tree::{
    read_event, read_event_with_limit, Event, EventKind, EventTreeError, ExplicitDates,
    FieldAccessError, FieldResult, DEFAULT_MAX_DEPTH,
};
pub use validate::{validate_with_limit, EventField, ValidationError, ValidationReport};
