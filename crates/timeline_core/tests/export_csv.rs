use timeline_core::{build_outline, read_event, write_csv, TimelineTable, CSV_HEADER};

fn table_for(lines: &[&str]) -> TimelineTable {
    let outline = build_outline(lines).expect("valid outline");
    let root = read_event(&outline).expect("valid event tree");
    TimelineTable::from_event(&root).expect("exportable tree")
}

#[test]
fn rows_carry_ids_dates_and_durations() {
    let table = table_for(&[
        "01 - Peace",
        "\t2018.06.01 - 2020.09.17 - Peace Demonstrations",
        "\t\t2018.06.01 - 2018.06.14 - Two Weeks of Peace",
        "\t2021.05.13 - World Integration Declaration",
        "\t2025.02.27 - Articles of World Cooperation",
    ]);

    let ids: Vec<(&str, &str)> = table
        .rows
        .iter()
        .map(|row| (row.event_id.as_str(), row.parent_id.as_str()))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("1", ""),
            ("1.1", "1"),
            ("1.1.1", "1.1"),
            ("1.2", "1"),
            ("1.3", "1"),
        ]
    );

    let peace = &table.rows[0];
    assert_eq!(peace.title, "Peace");
    assert_eq!(peace.start, "06/01/2018");
    assert_eq!(peace.end, "02/27/2025");
    assert_eq!(peace.duration, "2463 Days");

    let demonstrations = &table.rows[1];
    assert_eq!(demonstrations.duration, "839 Days");
    assert_eq!(table.rows[3].duration, "0 Days");
}

#[test]
fn undated_rows_have_empty_date_columns() {
    let table = table_for(&["Someday"]);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].start, "");
    assert_eq!(table.rows[0].duration, "");
    assert_eq!(table.rows[0].end, "");
}

#[test]
fn csv_has_header_and_quoted_fields() {
    let table = table_for(&["01 - Wars", "\t-0264 - (0241) - Punic War, First"]);
    let mut out = Vec::new();
    write_csv(&table, &mut out).expect("write to vec");
    let text = String::from_utf8(out).expect("utf8");

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(CSV_HEADER.join(",").as_str()));
    assert_eq!(
        lines.next(),
        Some("1,,Wars,01/01/0264 BC,8400 Days,01/01/0241 BC")
    );
    assert_eq!(
        lines.next(),
        Some("1.1,1,\"Punic War, First\",01/01/0264 BC,8400 Days,01/01/0241 BC")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn table_serializes_rows() {
    let table = table_for(&["2014 - Solo"]);
    let json = serde_json::to_value(&table).expect("serialize");
    assert_eq!(json["rows"][0]["EventId"], "1");
    assert_eq!(json["rows"][0]["Start"], "01/01/2014");
}
