use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::datetime::{add_days, first_day_of_month, is_in_range, iso_day_key};
use crate::event::CalendarEvent;
use crate::picker::DateRange;

/// A month grid is always 6 rows of 7; padding cells from the adjacent
/// months fill the fixed layout.
pub const MONTH_GRID_CELLS: usize = 42;
pub const WEEK_GRID_DAYS: usize = 7;

/// One cell of a month grid. Derived data, rebuilt on demand; never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub iso_key: String,
    pub day_number: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub events: Vec<CalendarEvent>,
}

/// One day of a week strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub is_today: bool,
}

/// A month-grid cell for the range picker, carrying range-selection
/// flags instead of events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeDayCell {
    pub date: NaiveDate,
    pub iso_key: String,
    pub day_number: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub is_in_range: bool,
    pub is_in_hover_range: bool,
}

/// Builds the 42-cell month grid around the reference date's month:
/// the tail of the previous month up to the Monday-first weekday offset
/// of day 1, the month itself, then the head of the next month.
pub fn build_month_grid(
    reference: NaiveDate,
    today: NaiveDate,
    selected: Option<NaiveDate>,
    events_by_day: Option<&BTreeMap<String, Vec<CalendarEvent>>>,
) -> Vec<DayCell> {
    let first = first_day_of_month(reference.year(), reference.month());
    let leading = first.weekday().num_days_from_monday() as i64;
    let grid_start = add_days(first, -leading);

    (0..MONTH_GRID_CELLS as i64)
        .map(|offset| {
            let date = add_days(grid_start, offset);
            let iso_key = iso_day_key(date);
            let events = events_by_day
                .and_then(|grouped| grouped.get(&iso_key))
                .cloned()
                .unwrap_or_default();

            DayCell {
                date,
                day_number: date.day(),
                is_current_month: date.month() == reference.month()
                    && date.year() == reference.year(),
                is_today: date == today,
                is_selected: selected == Some(date),
                events,
                iso_key,
            }
        })
        .collect()
}

/// Seven `{date, is_today}` cells from `week_start` onward.
pub fn build_week_grid(week_start: NaiveDate, today: NaiveDate) -> Vec<WeekDay> {
    (0..WEEK_GRID_DAYS as i64)
        .map(|offset| {
            let date = add_days(week_start, offset);
            WeekDay {
                date,
                is_today: date == today,
            }
        })
        .collect()
}

/// The range picker's month grid. Hover preview flags only appear while
/// the range is partial (start picked, end pending).
pub fn build_range_month_grid(
    reference: NaiveDate,
    today: NaiveDate,
    range: &DateRange,
    hover: Option<NaiveDate>,
) -> Vec<RangeDayCell> {
    let first = first_day_of_month(reference.year(), reference.month());
    let leading = first.weekday().num_days_from_monday() as i64;
    let grid_start = add_days(first, -leading);

    (0..MONTH_GRID_CELLS as i64)
        .map(|offset| {
            let date = add_days(grid_start, offset);
            let is_start = range.start == Some(date);
            let is_end = range.end == Some(date);
            let is_in_range = match (range.start, range.end) {
                (Some(start), Some(end)) => is_in_range(date, start, end),
                _ => false,
            };
            let is_in_hover_range = match (range.start, range.end, hover) {
                (Some(start), None, Some(cursor)) => {
                    let (low, high) = if cursor < start { (cursor, start) } else { (start, cursor) };
                    crate::datetime::is_in_range(date, low, high)
                }
                _ => false,
            };

            RangeDayCell {
                date,
                iso_key: iso_day_key(date),
                day_number: date.day(),
                is_current_month: date.month() == reference.month()
                    && date.year() == reference.year(),
                is_today: date == today,
                is_start,
                is_end,
                is_in_range,
                is_in_hover_range,
            }
        })
        .collect()
}
