//! End-to-end outline to timeline conversion.
//!
//! # Responsibility
//! - Read outline files into lines.
//! - Run outline building, event reading, validation and export in order.
//! - Emit stage-level logging events with duration and status.
//!
//! # Invariants
//! - The whole input is held in memory; there is no partial output.
//! - Any fatal stage error discards all work for that input.
//! - An invalid validation report blocks export unless validation is off.

use crate::event::tree::{read_event_with_limit, Event, EventTreeError, DEFAULT_MAX_DEPTH};
use crate::event::validate::{validate_with_limit, ValidationReport};
use crate::export::table::{ExportError, TimelineTable};
use crate::outline::builder::{build_outline, OutlineError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Pipeline tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Maximum event nesting for reads and rollups.
    pub max_depth: usize,
    /// Run the validator and refuse to export invalid trees.
    pub validate: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            validate: true,
        }
    }
}

/// Errors from the conversion pipeline.
#[derive(Debug)]
pub enum PipelineError {
    /// Input file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Outline indentation is malformed.
    Outline(OutlineError),
    /// Event tree could not be assembled.
    EventTree(EventTreeError),
    /// Validation collected at least one error.
    Invalid(ValidationReport),
    /// Export failed.
    Export(ExportError),
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read `{}`: {source}", path.display()),
            Self::Outline(err) => write!(f, "{err}"),
            Self::EventTree(err) => write!(f, "{err}"),
            Self::Invalid(report) => write!(
                f,
                "event tree failed validation with {} error(s):\n{report}",
                report.errors.len()
            ),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Outline(err) => Some(err),
            Self::EventTree(err) => Some(err),
            Self::Invalid(_) => None,
            Self::Export(err) => Some(err),
        }
    }
}

impl From<OutlineError> for PipelineError {
    fn from(value: OutlineError) -> Self {
        Self::Outline(value)
    }
}

impl From<EventTreeError> for PipelineError {
    fn from(value: EventTreeError) -> Self {
        Self::EventTree(value)
    }
}

impl From<ExportError> for PipelineError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Converted timeline: the event tree and its flat rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub root: Event,
    pub table: TimelineTable,
}

/// Reads a UTF-8 outline file into lines.
///
/// A leading byte order mark and trailing `\r` on each line are dropped.
pub fn read_outline_file(path: impl AsRef<Path>) -> Result<Vec<String>, PipelineError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(split_lines(text.as_str()))
}

/// Builds, validates and flattens an event tree from outline lines.
///
/// # Errors
/// - `Outline` / `EventTree` for structural failures.
/// - `Invalid` when validation is on and reports errors.
/// - `Export` when rows cannot be computed.
pub fn convert_lines<S: AsRef<str>>(
    lines: &[S],
    options: PipelineOptions,
) -> Result<Timeline, PipelineError> {
    let started_at = Instant::now();
    info!(
        "event=convert module=pipeline status=start lines={}",
        lines.len()
    );

    let result = run_stages(lines, options);
    match &result {
        Ok(timeline) => info!(
            "event=convert module=pipeline status=ok duration_ms={} events={}",
            started_at.elapsed().as_millis(),
            timeline.table.rows.len()
        ),
        Err(err) => error!(
            "event=convert module=pipeline status=error duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            error_code(err),
            err
        ),
    }
    result
}

/// Reads `input`, converts it and writes CSV to `output`.
///
/// With `output = None` nothing is written (check mode).
pub fn convert_file(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    options: PipelineOptions,
) -> Result<Timeline, PipelineError> {
    let lines = read_outline_file(input)?;
    let timeline = convert_lines(&lines, options)?;
    if let Some(output) = output {
        timeline.table.write_to_path(output)?;
        info!(
            "event=export module=pipeline status=ok rows={} path={}",
            timeline.table.rows.len(),
            output.display()
        );
    }
    Ok(timeline)
}

fn run_stages<S: AsRef<str>>(
    lines: &[S],
    options: PipelineOptions,
) -> Result<Timeline, PipelineError> {
    let outline = build_outline(lines)?;
    let root = read_event_with_limit(&outline, options.max_depth)?;

    if options.validate {
        let report = validate_with_limit(&root, options.max_depth);
        if !report.is_valid {
            return Err(PipelineError::Invalid(report));
        }
    }

    let table = TimelineTable::from_event_with_limit(&root, options.max_depth)?;
    Ok(Timeline { root, table })
}

fn split_lines(text: &str) -> Vec<String> {
    text.strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(text)
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

fn error_code(err: &PipelineError) -> &'static str {
    match err {
        PipelineError::Io { .. } => "input_unreadable",
        PipelineError::Outline(_) => "malformed_outline",
        PipelineError::EventTree(_) => "invalid_event_tree",
        PipelineError::Invalid(_) => "validation_failed",
        PipelineError::Export(_) => "export_failed",
    }
}
