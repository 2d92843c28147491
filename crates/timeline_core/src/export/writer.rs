//! CSV serialization of timeline rows.

use crate::export::table::TimelineTable;
use csv::{Terminator, WriterBuilder};
use std::io::Write;

/// Header record, in column order.
pub const CSV_HEADER: [&str; 6] = ["EventId", "ParentId", "Title", "Start", "Duration", "End"];

/// Writes `table` with a header record and `\n` record terminators.
///
/// The header comes from the row's serialized column names; an empty table
/// still gets one.
pub fn write_csv<W: Write>(table: &TimelineTable, writer: W) -> csv::Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    if table.rows.is_empty() {
        csv_writer.write_record(CSV_HEADER)?;
    }
    for row in &table.rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_csv, CSV_HEADER};
    use crate::export::table::{TimelineRow, TimelineTable};

    fn row(event_id: &str, title: &str) -> TimelineRow {
        TimelineRow {
            event_id: event_id.to_string(),
            parent_id: String::new(),
            title: title.to_string(),
            start: "01/01/2014".to_string(),
            duration: "0 Days".to_string(),
            end: "01/01/2014".to_string(),
        }
    }

    fn render(table: &TimelineTable) -> String {
        let mut out = Vec::new();
        write_csv(table, &mut out).expect("write to vec");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn header_matches_row_columns() {
        let table = TimelineTable {
            rows: vec![row("1", "Solo")],
        };
        let text = render(&table);
        assert_eq!(text.lines().next(), Some(CSV_HEADER.join(",").as_str()));
    }

    #[test]
    fn empty_table_still_has_header() {
        assert_eq!(render(&TimelineTable::default()), format!("{}\n", CSV_HEADER.join(",")));
    }

    #[test]
    fn quotes_only_when_needed() {
        let table = TimelineTable {
            rows: vec![
                row("1", "World War II (WWII WW2)"),
                row("2", "Peace, at last"),
                row("3", "say \"hi\""),
            ],
        };
        let text = render(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "1,,World War II (WWII WW2),01/01/2014,0 Days,01/01/2014");
        assert_eq!(lines[2], "2,,\"Peace, at last\",01/01/2014,0 Days,01/01/2014");
        assert_eq!(lines[3], "3,,\"say \"\"hi\"\"\",01/01/2014,0 Days,01/01/2014");
    }
}
