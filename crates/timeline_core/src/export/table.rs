//! Event tree to row projection.

use crate::event::tree::{Event, FieldAccessError, DEFAULT_MAX_DEPTH};
use crate::export::writer::write_csv;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Errors from exporting an event tree.
#[derive(Debug)]
pub enum ExportError {
    /// A derived field could not be computed for a row.
    Field {
        event_id: String,
        source: FieldAccessError,
    },
    /// Output file could not be created.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Rows could not be written as CSV.
    Csv { path: PathBuf, source: csv::Error },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field { event_id, source } => {
                write!(f, "cannot export event {event_id}: {source}")
            }
            Self::Io { path, source } => {
                write!(f, "cannot create `{}`: {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "cannot write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
        }
    }
}

/// One exported event. Serialized names are the CSV column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    #[serde(rename = "EventId")]
    pub event_id: String,
    /// Empty for the root event.
    #[serde(rename = "ParentId")]
    pub parent_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Start")]
    pub start: String,
    /// `"<days> Days"`, or empty when the event has no dates.
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "End")]
    pub end: String,
}

impl TimelineRow {
    fn from_event(event: &Event, path: &[u32], max_depth: usize) -> Result<Self, ExportError> {
        let event_id = dotted_id(path);
        let field_error = |source| ExportError::Field {
            event_id: event_id.clone(),
            source,
        };

        let start = event.start_with_limit(max_depth).map_err(field_error)?;
        let end = event.end_with_limit(max_depth).map_err(field_error)?;
        let duration = event.duration_with_limit(max_depth).map_err(field_error)?;

        Ok(Self {
            parent_id: dotted_id(&path[..path.len().saturating_sub(1)]),
            title: event.name().to_string(),
            start: start.map(|date| date.format()).unwrap_or_default(),
            duration: duration.map(|period| period.to_string()).unwrap_or_default(),
            end: end.map(|date| date.format()).unwrap_or_default(),
            event_id,
        })
    }
}

/// Rows of one exported event tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimelineTable {
    pub rows: Vec<TimelineRow>,
}

impl TimelineTable {
    /// Flattens `root` using `DEFAULT_MAX_DEPTH` for rollups.
    pub fn from_event(root: &Event) -> Result<Self, ExportError> {
        Self::from_event_with_limit(root, DEFAULT_MAX_DEPTH)
    }

    /// Flattens `root` depth-first, assigning dotted ids.
    ///
    /// # Errors
    /// - `Field` when a row's start/end/duration cannot be computed.
    pub fn from_event_with_limit(root: &Event, max_depth: usize) -> Result<Self, ExportError> {
        let mut rows = Vec::with_capacity(root.subtree_len());
        let mut stack: Vec<(&Event, Vec<u32>)> = vec![(root, vec![1])];

        while let Some((event, path)) = stack.pop() {
            rows.push(TimelineRow::from_event(event, &path, max_depth)?);
            for (index, child) in event.children().iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(index as u32 + 1);
                stack.push((child, child_path));
            }
        }
        Ok(Self { rows })
    }

    /// Writes the table as CSV to `path`, replacing any existing file.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        write_csv(self, file).map_err(|source| ExportError::Csv {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn dotted_id(path: &[u32]) -> String {
    path.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::{dotted_id, TimelineTable};
    use crate::event::tree::Event;
    use crate::model::date::CalendarDate;

    #[test]
    fn dotted_id_joins_segments() {
        assert_eq!(dotted_id(&[1, 2, 1]), "1.2.1");
        assert_eq!(dotted_id(&[]), "");
    }

    #[test]
    fn ids_follow_depth_first_order() {
        let root = Event::group(
            "root",
            vec![
                Event::group("a", vec![Event::leaf("a1", None, None)]),
                Event::leaf("b", CalendarDate::parse("1898"), None),
            ],
        );
        let table = TimelineTable::from_event(&root).expect("export");
        let ids: Vec<(&str, &str)> = table
            .rows
            .iter()
            .map(|row| (row.event_id.as_str(), row.parent_id.as_str()))
            .collect();
        assert_eq!(ids, vec![("1", ""), ("1.1", "1"), ("1.1.1", "1.1"), ("1.2", "1")]);
        assert_eq!(table.rows[3].duration, "0 Days");
        assert_eq!(table.rows[2].start, "");
    }

    #[test]
    fn field_failure_names_the_row() {
        let root = Event::group(
            "root",
            vec![Event::group("a", vec![Event::leaf("a1", CalendarDate::parse("2000"), None)])],
        );
        let err = TimelineTable::from_event_with_limit(&root, 1).expect_err("too deep");
        assert!(err.to_string().starts_with("cannot export event 1:"));
    }
}
