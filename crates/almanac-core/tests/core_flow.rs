use std::io::Write;

use almanac_core::commands::load_events_jsonl;
use almanac_core::datetime::start_of_week;
use almanac_core::event::EventDraft;
use almanac_core::grid::build_month_grid;
use almanac_core::layout::project_week_events;
use almanac_core::picker::{DateRange, DateRangePicker};
use almanac_core::store::EventStore;
use chrono::NaiveDate;
use tempfile::NamedTempFile;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn seeded_store_flows_into_month_grid_and_week_projection() {
    let mut seed = NamedTempFile::new().expect("temp seed file");
    writeln!(
        seed,
        r#"{{"id":1,"title":"kickoff","start":"2024-03-04T09:00","end":"2024-03-04T10:30"}}"#
    )
    .expect("write seed line");
    writeln!(
        seed,
        r##"{{"id":2,"title":"retro","start":"2024-03-06T14:05","end":"2024-03-06T14:20","color":"#d64545"}}"##
    )
    .expect("write seed line");
    seed.flush().expect("flush seed file");

    let events = load_events_jsonl(seed.path()).expect("load seed events");
    let mut store = EventStore::new();
    store.load_all(events);

    let reference = day(2024, 3, 15);
    let grouped = store.events_for_month_grouped_by_day(reference);
    let cells = build_month_grid(reference, day(2024, 3, 15), None, Some(&grouped));

    assert_eq!(cells.len(), 42);
    let kickoff_cell = cells
        .iter()
        .find(|cell| cell.iso_key == "2024-03-04")
        .expect("cell for march 4th");
    assert_eq!(kickoff_cell.events.len(), 1);
    assert_eq!(kickoff_cell.events[0].title, "kickoff");

    let week_start = start_of_week(day(2024, 3, 6));
    assert_eq!(week_start, day(2024, 3, 4));
    let projected = project_week_events(&store.events_for_week(week_start));
    assert_eq!(projected.len(), 2);

    let retro = projected
        .iter()
        .find(|p| p.event.title == "retro")
        .expect("projected retro");
    assert_eq!(retro.column, 3);
    assert_eq!(retro.row_start, 171);
    assert_eq!(retro.row_span, 3);

    // Seeded ids keep the counter unique for later inserts.
    let next = store.add(EventDraft {
        title: "follow-up".to_string(),
        start: day(2024, 3, 7).and_hms_opt(9, 0, 0).expect("valid time"),
        end: day(2024, 3, 7).and_hms_opt(9, 30, 0).expect("valid time"),
        color: None,
    });
    assert_eq!(next, 3);
}

#[test]
fn range_picker_drives_a_filtered_query() {
    let mut store = EventStore::new();
    for offset in 0..5 {
        let date = day(2024, 3, 4 + offset);
        store.add(EventDraft {
            title: format!("event-{offset}"),
            start: date.and_hms_opt(9, 0, 0).expect("valid time"),
            end: date.and_hms_opt(10, 0, 0).expect("valid time"),
            color: None,
        });
    }

    let mut picker = DateRangePicker::new(day(2024, 3, 1));
    picker.toggle_open();
    picker.select_date(day(2024, 3, 7));
    picker.select_date(day(2024, 3, 5));

    assert_eq!(
        picker.value(),
        DateRange {
            start: Some(day(2024, 3, 5)),
            end: Some(day(2024, 3, 7)),
        }
    );
    assert!(!picker.is_open());

    let range = picker.value();
    let (start, end) = (
        range.start.expect("complete range"),
        range.end.expect("complete range"),
    );
    let selected: Vec<String> = store
        .all_events()
        .into_iter()
        .filter(|event| {
            let event_day = event.start.date();
            event_day >= start && event_day <= end
        })
        .map(|event| event.title)
        .collect();

    assert_eq!(selected, vec!["event-1", "event-2", "event-3"]);
}
