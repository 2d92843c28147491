//! Core logic for converting tab-indented event outlines into timelines.
//! This crate owns every parsing, rollup and export invariant; the CLI only
//! wires files and flags to it.

pub mod event;
pub mod export;
pub mod logging;
pub mod model;
pub mod outline;
pub mod pipeline;

pub use event::{
    read_event, read_event_with_limit, validate_with_limit, Event, EventField, EventKind,
    EventTreeError, ExplicitDates, FieldAccessError, FieldResult, ValidationError,
    ValidationReport, DEFAULT_MAX_DEPTH,
};
pub use export::{write_csv, ExportError, TimelineRow, TimelineTable, CSV_HEADER};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::date::{days_in_month, is_leap_year, CalendarDate, DateParseError, OrdinalDate};
pub use model::period::Period;
pub use outline::{build_outline, OutlineError, OutlineNode};
pub use pipeline::{
    convert_file, convert_lines, read_outline_file, PipelineError, PipelineOptions, Timeline,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
