use timeline_core::event::extract;
use timeline_core::{
    build_outline, read_event, read_event_with_limit, CalendarDate, Event, EventKind,
    EventTreeError, OutlineNode,
};

const PEACE_OUTLINE: &[&str] = &[
    "01 - Peace",
    "\t2018.06.01 - 2020.09.17 - Peace Demonstrations",
    "\t\t2018.06.01 - 2018.06.14 - Two Weeks of Peace",
    "\t\t2018.09.19 - 2018.09.29 - Remember Peace",
    "\t\t2019.10.03 - 2019.11.03 - Know the Peace",
    "\t\t2020.08.15 - 2020.09.17 - Peace as a Way of Life",
    "\t2021.05.13 - World Integration Declaration",
    "\t2025.02.27 - Articles of World Cooperation",
    "02 - Reconciling History",
    "\t2022.08.02 - Forgetting the Dogma of the Past",
    "\t2023.07.23 - Scientific Common Ground",
    "\t2025.11.19 - Integrating the Real Past",
];

fn date(text: &str) -> CalendarDate {
    CalendarDate::parse(text).expect("valid test date")
}

fn peace_events() -> Event {
    let outline = build_outline(PEACE_OUTLINE).expect("valid outline");
    read_event(&outline).expect("valid event tree")
}

#[test]
fn numbered_group_line_has_name_only() {
    let event = extract(&OutlineNode::new("01 - Peace")).expect("event");
    assert_eq!(event.name(), "Peace");
    assert!(event.explicit_dates().is_empty());
}

#[test]
fn range_line_has_both_dates_and_duration() {
    let node = OutlineNode::new("\t2018.06.01 - 2020.09.17 - Peace Demonstrations");
    let event = extract(&node).expect("event");
    assert_eq!(event.name(), "Peace Demonstrations");
    assert_eq!(event.start().expect("start"), Some(date("2018.06.01")));
    assert_eq!(event.end().expect("end"), Some(date("2020.09.17")));
    let duration = event.duration().expect("duration").expect("both ends");
    assert_eq!(duration.total_days, 839);
}

#[test]
fn partial_dates_measure_from_forced_first_day() {
    let node = OutlineNode::new("1939.09.00 - 1945.00.00 - World War II (WWII WW2)");
    let event = extract(&node).expect("event");
    assert_eq!(event.name(), "World War II (WWII WW2)");
    assert_eq!(event.start().expect("start"), Some(date("1939.09")));
    assert_eq!(event.end().expect("end"), Some(date("1945")));
    let duration = event.duration().expect("duration").expect("both ends");
    assert_eq!(duration.total_days, 1949);
    assert_eq!(duration.to_string(), "1949 Days");
}

#[test]
fn single_date_line_ends_on_its_start() {
    let event = extract(&OutlineNode::new("1898.00.00 - Spanish-American War")).expect("event");
    assert_eq!(event.name(), "Spanish-American War");
    assert_eq!(event.end().expect("end"), Some(date("1898")));
    let duration = event.duration().expect("duration").expect("both ends");
    assert!(duration.is_zero());
}

#[test]
fn invalid_date_token_leaves_end_undated() {
    let event = extract(&OutlineNode::new("2014.13.01 - 2015 - Bad Start")).expect("event");
    assert_eq!(event.name(), "Bad Start");
    assert_eq!(event.explicit_dates().start, None);
    assert_eq!(event.start().expect("start"), None);
    assert_eq!(event.end().expect("end"), Some(date("2015")));
    assert_eq!(event.duration().expect("duration"), None);
}

#[test]
fn before_epoch_line_is_read() {
    let event = extract(&OutlineNode::new("(0753) - -0510 - Roman Kingdom")).expect("event");
    assert_eq!(event.start().expect("start").map(|d| d.year()), Some(-753));
    assert_eq!(event.end().expect("end").map(|d| d.year()), Some(-510));
    let duration = event.duration().expect("duration").expect("both ends");
    assert!(duration.total_days > 0);
}

#[test]
fn range_across_the_epoch_has_no_year_zero() {
    let new_year = extract(&OutlineNode::new("(0001).12.31 - 0001.01.01 - New Year")).expect("event");
    assert_eq!(
        new_year.start().expect("start").map(|d| d.format()),
        Some("12/31/0001 BC".to_string())
    );
    let duration = new_year.duration().expect("duration").expect("both ends");
    assert_eq!(duration.to_string(), "1 Days");

    let crossing = extract(&OutlineNode::new("-0001 - 0001 - Crossing")).expect("event");
    let duration = crossing.duration().expect("duration").expect("both ends");
    assert_eq!(duration.total_days, 366);
}

#[test]
fn group_rollup_spans_the_epoch() {
    let outline = build_outline(["01 - Turn of the Era", "\t(0004) - Herod", "\t0014 - Augustus"])
        .expect("valid outline");
    let root = read_event(&outline).expect("valid event tree");
    let duration = root.duration().expect("duration").expect("both ends");
    assert_eq!(duration.years, 17);
    assert_eq!(duration.total_days, 17 * 365 + 4);
}

#[test]
fn empty_line_yields_empty_event() {
    let event = extract(&OutlineNode::default()).expect("event");
    assert_eq!(event.name(), "");
    assert_eq!(event.start().expect("start"), None);
}

#[test]
fn notes_flow_into_events() {
    let node = OutlineNode::with_notes("2021.05.13 - Declaration", "Signed in Geneva.", []);
    let event = extract(&node).expect("event");
    assert_eq!(event.notes(), "Signed in Geneva.");
}

#[test]
fn tree_mirrors_outline_shape() {
    let root = peace_events();
    assert_eq!(root.name(), "");
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.children()[0].children().len(), 3);
    assert_eq!(root.children()[0].children()[0].children().len(), 4);
    assert_eq!(root.children()[1].children().len(), 3);
}

#[test]
fn group_dates_roll_up_from_children() {
    let root = peace_events();

    let peace = &root.children()[0];
    assert_eq!(peace.name(), "Peace");
    assert_eq!(peace.kind(), EventKind::Group);
    assert_eq!(peace.start().expect("start"), Some(date("2018.06.01")));
    assert_eq!(peace.end().expect("end"), Some(date("2025.02.27")));

    let demonstrations = &peace.children()[0];
    assert_eq!(demonstrations.kind(), EventKind::Leaf);
    assert_eq!(demonstrations.start().expect("start"), Some(date("2018.06.01")));
    assert_eq!(demonstrations.end().expect("end"), Some(date("2020.09.17")));

    assert_eq!(root.start().expect("start"), Some(date("2018.06.01")));
    assert_eq!(root.end().expect("end"), Some(date("2025.11.19")));
}

#[test]
fn reading_twice_gives_equal_trees() {
    assert_eq!(peace_events(), peace_events());
}

#[test]
fn well_formed_tree_validates() {
    let report = peace_events().validate();
    assert!(report.is_valid, "{report}");
    assert!(report.errors.is_empty());
}

#[test]
fn childless_undated_event_validates() {
    let report = Event::leaf("Someday", None, None).validate();
    assert!(report.is_valid);
}

#[test]
fn multi_line_child_is_invalid() {
    let outline = OutlineNode::with_children(
        "01 - Peace",
        [OutlineNode::new("\t2021 - first\nsecond")],
    );
    let err = read_event(&outline).expect_err("child spans two lines");
    assert_eq!(
        err,
        EventTreeError::InvalidChildNode {
            line: "\t2021 - first\nsecond".to_string()
        }
    );
    assert!(err.to_string().starts_with("invalid child node"));
}

#[test]
fn nesting_past_limit_is_rejected() {
    let outline = build_outline(["a", "\tb", "\t\t2000 - c"]).expect("valid outline");
    assert!(read_event_with_limit(&outline, 2).is_ok());
    let err = read_event_with_limit(&outline, 1).expect_err("too deep");
    assert!(matches!(err, EventTreeError::DepthLimitExceeded { limit: 1, .. }));
}
