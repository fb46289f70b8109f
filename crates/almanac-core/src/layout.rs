use chrono::{Datelike, Timelike};

use crate::event::CalendarEvent;

/// Day view: 48 half-hour rows.
pub const DAY_SLOT_MINUTES: i64 = 30;
/// Week view: 12 rows per hour, 5-minute resolution. Not shared with
/// the day view; the two grids have different densities.
pub const WEEK_SLOT_MINUTES: i64 = 5;
/// Grid row 1 is reserved for the header; content starts at row 2.
const HEADER_ROW_OFFSET: i64 = 2;

/// An event placed on the day-view time grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedDayEvent {
    pub event: CalendarEvent,
    pub row_start: i64,
    /// `ceil(duration / 30min)`. Non-positive when the event ends before
    /// it starts; callers decide how to display such malformed input.
    pub row_span: i64,
}

/// An event placed on the week-view time grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedWeekEvent {
    pub event: CalendarEvent,
    /// Monday=1 .. Sunday=7.
    pub column: u32,
    pub row_start: i64,
    pub row_span: i64,
}

/// Projects day-filtered events onto the 30-minute grid. Stable map:
/// output order matches input order, overlapping events are not
/// rearranged here.
pub fn project_day_events(events: &[CalendarEvent]) -> Vec<ProjectedDayEvent> {
    events
        .iter()
        .map(|event| {
            let (row_start, row_span) = slot_position(event, DAY_SLOT_MINUTES);
            ProjectedDayEvent {
                event: event.clone(),
                row_start,
                row_span,
            }
        })
        .collect()
}

/// Projects week-filtered events onto the 5-minute grid, one column per
/// weekday. Stable map, same contract as the day projection.
pub fn project_week_events(events: &[CalendarEvent]) -> Vec<ProjectedWeekEvent> {
    events
        .iter()
        .map(|event| {
            let (row_start, row_span) = slot_position(event, WEEK_SLOT_MINUTES);
            ProjectedWeekEvent {
                column: event.start.weekday().number_from_monday(),
                event: event.clone(),
                row_start,
                row_span,
            }
        })
        .collect()
}

fn slot_position(event: &CalendarEvent, slot_minutes: i64) -> (i64, i64) {
    let hour = event.start.hour() as i64;
    let minute = event.start.minute() as i64;
    let rows_per_hour = 60 / slot_minutes;

    let row_start = hour * rows_per_hour + minute / slot_minutes + HEADER_ROW_OFFSET;
    let row_span = div_ceil(event.duration_minutes(), slot_minutes);
    (row_start, row_span)
}

fn div_ceil(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1).div_euclid(divisor)
}
