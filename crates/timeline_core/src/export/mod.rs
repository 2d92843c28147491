//! Flat tabular export of an event tree.
//!
//! # Responsibility
//! - Flatten an event tree into rows with dotted hierarchical ids.
//! - Write rows as CSV.
//!
//! # Invariants
//! - Rows follow depth-first pre-order: parent row before its children.
//! - Root id is `1`; the n-th child of `P` is `P.n`; root parent id is empty.

pub mod table;
pub mod writer;

pub use writer::{write_csv, CSV_HEADER};
pub use table::{ExportError, TimelineRow, TimelineTable};
