use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::binding::FormBinding;
use crate::datetime::{add_days, add_months, first_day_of_month, last_day_of_month, start_of_week};
use crate::grid::{DayCell, RangeDayCell, build_month_grid, build_range_month_grid};

/// A two-ended day selection. `end` is never set while `start` is
/// unset, and a complete range always has `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// How far along a two-click range selection is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePhase {
    Empty,
    Partial,
    Complete,
}

/// Single-date picker: a popup toggle, the committed value, and the
/// month the popup is currently looking at. `view_date` is independent
/// of `value` and only resyncs to it when the popup opens.
#[derive(Debug)]
pub struct DatePicker {
    is_open: bool,
    value: Option<NaiveDate>,
    view_date: NaiveDate,
    binding: FormBinding<NaiveDate>,
}

impl DatePicker {
    pub fn new(view_date: NaiveDate) -> Self {
        Self {
            is_open: false,
            value: None,
            view_date,
            binding: FormBinding::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn value(&self) -> Option<NaiveDate> {
        self.value
    }

    pub fn view_date(&self) -> NaiveDate {
        self.view_date
    }

    pub fn binding_mut(&mut self) -> &mut FormBinding<NaiveDate> {
        &mut self.binding
    }

    pub fn toggle_open(&mut self) {
        self.is_open = !self.is_open;
        if self.is_open {
            if let Some(value) = self.value {
                self.view_date = value;
            }
        }
    }

    /// Moves the popup's month without touching the committed value.
    pub fn navigate_month(&mut self, delta: i32) {
        self.view_date = add_months(self.view_date, delta);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        debug!(%date, "date selected");
        self.value = Some(date);
        self.binding.notify_change(&date);
        self.binding.notify_touched();
        self.is_open = false;
    }

    pub fn select_today(&mut self, today: NaiveDate) {
        self.select_date(today);
    }

    /// Form-side write. Lenient: `None` empties the selection; no
    /// notification is sent back for either shape.
    pub fn write_value(&mut self, value: Option<NaiveDate>) {
        match value {
            Some(date) => {
                self.value = Some(date);
                self.view_date = date;
            }
            None => self.value = None,
        }
    }

    /// The 42-cell grid for the month the popup is looking at.
    pub fn month_cells(&self, today: NaiveDate) -> Vec<DayCell> {
        build_month_grid(self.view_date, today, self.value, None)
    }
}

/// Date-range picker: the two-click selection machine with
/// swap-on-reversal, plus a hover cursor for previewing the range while
/// only the first day is picked.
#[derive(Debug)]
pub struct DateRangePicker {
    is_open: bool,
    value: DateRange,
    hover_cursor: Option<NaiveDate>,
    view_date: NaiveDate,
    binding: FormBinding<DateRange>,
}

impl DateRangePicker {
    pub fn new(view_date: NaiveDate) -> Self {
        Self {
            is_open: false,
            value: DateRange::empty(),
            hover_cursor: None,
            view_date,
            binding: FormBinding::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn value(&self) -> DateRange {
        self.value
    }

    pub fn hover_cursor(&self) -> Option<NaiveDate> {
        self.hover_cursor
    }

    pub fn view_date(&self) -> NaiveDate {
        self.view_date
    }

    pub fn binding_mut(&mut self) -> &mut FormBinding<DateRange> {
        &mut self.binding
    }

    pub fn phase(&self) -> RangePhase {
        match (self.value.start, self.value.end) {
            (None, _) => RangePhase::Empty,
            (Some(_), None) => RangePhase::Partial,
            (Some(_), Some(_)) => RangePhase::Complete,
        }
    }

    pub fn toggle_open(&mut self) {
        if self.is_open {
            self.close();
            return;
        }
        self.is_open = true;
        if let Some(start) = self.value.start {
            self.view_date = start;
        }
    }

    pub fn navigate_month(&mut self, delta: i32) {
        self.view_date = add_months(self.view_date, delta);
    }

    /// One click of the two-click selection. The first click (or any
    /// click on top of a completed range) starts a fresh range; the
    /// second completes it, swapping the ends if the second day precedes
    /// the first. Only completion notifies the form side and closes the
    /// popup.
    pub fn select_date(&mut self, date: NaiveDate) {
        let Some(start) = self.value.start.filter(|_| self.value.end.is_none()) else {
            self.value = DateRange {
                start: Some(date),
                end: None,
            };
            debug!(%date, "range started");
            return;
        };

        self.value = if date < start {
            DateRange {
                start: Some(date),
                end: Some(start),
            }
        } else {
            DateRange {
                start: Some(start),
                end: Some(date),
            }
        };
        debug!(start = ?self.value.start, end = ?self.value.end, "range completed");
        self.commit();
    }

    /// Preview cursor for rendering the candidate range; never changes
    /// the committed value.
    pub fn on_date_hover(&mut self, date: NaiveDate) {
        self.hover_cursor = Some(date);
    }

    pub fn clear_hover(&mut self) {
        self.hover_cursor = None;
    }

    /// Shortcut: the Monday-first week around `today`.
    pub fn select_this_week(&mut self, today: NaiveDate) {
        let start = start_of_week(today);
        self.value = DateRange {
            start: Some(start),
            end: Some(add_days(start, 6)),
        };
        self.commit();
    }

    /// Shortcut: the full month around `today`.
    pub fn select_this_month(&mut self, today: NaiveDate) {
        use chrono::Datelike;
        self.value = DateRange {
            start: Some(first_day_of_month(today.year(), today.month())),
            end: Some(last_day_of_month(today.year(), today.month())),
        };
        self.commit();
    }

    /// Form-side write. Lenient: anything that violates the range shape
    /// (no start, or an end without a start) collapses to the empty
    /// range; a reversed pair is swapped so `start <= end` keeps
    /// holding. No notification is sent back.
    pub fn write_value(&mut self, value: Option<DateRange>) {
        let Some(range) = value else {
            self.value = DateRange::empty();
            return;
        };
        let Some(start) = range.start else {
            self.value = DateRange::empty();
            return;
        };

        self.value = match range.end {
            Some(end) if end < start => DateRange {
                start: Some(end),
                end: Some(start),
            },
            _ => range,
        };
        self.view_date = start;
    }

    /// The 42-cell grid for the month the popup is looking at, with
    /// range and hover-preview flags.
    pub fn month_cells(&self, today: NaiveDate) -> Vec<RangeDayCell> {
        build_range_month_grid(self.view_date, today, &self.value, self.hover_cursor)
    }

    fn commit(&mut self) {
        let snapshot = self.value;
        self.binding.notify_change(&snapshot);
        self.binding.notify_touched();
        self.close();
    }

    fn close(&mut self) {
        self.is_open = false;
        self.hover_cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use chrono::NaiveDate;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn single_picker_select_commits_and_closes() {
        let mut picker = DatePicker::new(day(2024, 3, 1));
        let changes = Rc::new(RefCell::new(Vec::new()));
        let touched = Rc::new(Cell::new(0_u32));

        let changes_inner = Rc::clone(&changes);
        picker
            .binding_mut()
            .register_on_change(move |value: &NaiveDate| changes_inner.borrow_mut().push(*value));
        let touched_inner = Rc::clone(&touched);
        picker
            .binding_mut()
            .register_on_touched(move || touched_inner.set(touched_inner.get() + 1));

        picker.toggle_open();
        assert!(picker.is_open());

        picker.select_date(day(2024, 3, 14));
        assert!(!picker.is_open());
        assert_eq!(picker.value(), Some(day(2024, 3, 14)));
        assert_eq!(*changes.borrow(), vec![day(2024, 3, 14)]);
        assert_eq!(touched.get(), 1);
    }

    #[test]
    fn single_picker_view_resyncs_only_on_open() {
        let mut picker = DatePicker::new(day(2024, 3, 1));
        picker.select_date(day(2024, 3, 14));

        // Selecting never moves the view month; navigation does.
        picker.navigate_month(3);
        assert_eq!(picker.view_date(), day(2024, 6, 1));
        assert_eq!(picker.value(), Some(day(2024, 3, 14)));

        picker.toggle_open();
        assert_eq!(picker.view_date(), day(2024, 3, 14));

        // Closing has no side effect on the view month.
        picker.navigate_month(-1);
        picker.toggle_open();
        assert_eq!(picker.view_date(), day(2024, 2, 14));
    }

    #[test]
    fn single_picker_write_value_is_lenient() {
        let mut picker = DatePicker::new(day(2024, 3, 1));
        picker.write_value(Some(day(2024, 5, 2)));
        assert_eq!(picker.value(), Some(day(2024, 5, 2)));
        assert_eq!(picker.view_date(), day(2024, 5, 2));

        picker.write_value(None);
        assert_eq!(picker.value(), None);
    }

    #[test]
    fn range_completes_in_order() {
        let mut picker = DateRangePicker::new(day(2024, 3, 1));
        assert_eq!(picker.phase(), RangePhase::Empty);

        picker.select_date(day(2024, 3, 5));
        assert_eq!(picker.phase(), RangePhase::Partial);

        picker.select_date(day(2024, 3, 9));
        assert_eq!(picker.phase(), RangePhase::Complete);
        assert_eq!(
            picker.value(),
            DateRange {
                start: Some(day(2024, 3, 5)),
                end: Some(day(2024, 3, 9)),
            }
        );
    }

    #[test]
    fn range_reversal_swaps_ends() {
        let mut picker = DateRangePicker::new(day(2024, 3, 1));
        picker.select_date(day(2024, 3, 9));
        picker.select_date(day(2024, 3, 5));
        assert_eq!(
            picker.value(),
            DateRange {
                start: Some(day(2024, 3, 5)),
                end: Some(day(2024, 3, 9)),
            }
        );
    }

    #[test]
    fn same_day_twice_is_a_single_day_range() {
        let mut picker = DateRangePicker::new(day(2024, 3, 1));
        picker.select_date(day(2024, 3, 5));
        picker.select_date(day(2024, 3, 5));
        assert_eq!(
            picker.value(),
            DateRange {
                start: Some(day(2024, 3, 5)),
                end: Some(day(2024, 3, 5)),
            }
        );
    }

    #[test]
    fn third_click_restarts_the_range() {
        let mut picker = DateRangePicker::new(day(2024, 3, 1));
        picker.select_date(day(2024, 3, 5));
        picker.select_date(day(2024, 3, 9));
        picker.select_date(day(2024, 3, 20));
        assert_eq!(
            picker.value(),
            DateRange {
                start: Some(day(2024, 3, 20)),
                end: None,
            }
        );
        assert_eq!(picker.phase(), RangePhase::Partial);
    }

    #[test]
    fn only_completion_notifies_and_closes() {
        let mut picker = DateRangePicker::new(day(2024, 3, 1));
        let changes = Rc::new(RefCell::new(Vec::new()));
        let changes_inner = Rc::clone(&changes);
        picker
            .binding_mut()
            .register_on_change(move |range: &DateRange| changes_inner.borrow_mut().push(*range));

        picker.toggle_open();
        picker.select_date(day(2024, 3, 5));
        assert!(picker.is_open());
        assert!(changes.borrow().is_empty());

        picker.select_date(day(2024, 3, 9));
        assert!(!picker.is_open());
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn hover_cursor_clears_on_close() {
        let mut picker = DateRangePicker::new(day(2024, 3, 1));
        picker.toggle_open();
        picker.select_date(day(2024, 3, 5));
        picker.on_date_hover(day(2024, 3, 8));
        assert_eq!(picker.hover_cursor(), Some(day(2024, 3, 8)));

        picker.toggle_open();
        assert_eq!(picker.hover_cursor(), None);
    }

    #[test]
    fn this_week_shortcut_selects_monday_through_sunday() {
        let mut picker = DateRangePicker::new(day(2024, 3, 1));
        picker.toggle_open();
        picker.select_this_week(day(2024, 3, 6));
        assert!(!picker.is_open());
        assert_eq!(
            picker.value(),
            DateRange {
                start: Some(day(2024, 3, 4)),
                end: Some(day(2024, 3, 10)),
            }
        );
    }

    #[test]
    fn this_month_shortcut_selects_whole_month() {
        let mut picker = DateRangePicker::new(day(2023, 11, 1));
        picker.select_this_month(day(2024, 2, 10));
        assert_eq!(
            picker.value(),
            DateRange {
                start: Some(day(2024, 2, 1)),
                end: Some(day(2024, 2, 29)),
            }
        );
    }

    #[test]
    fn range_write_value_collapses_malformed_shapes() {
        let mut picker = DateRangePicker::new(day(2024, 3, 1));
        picker.write_value(Some(DateRange {
            start: None,
            end: Some(day(2024, 3, 9)),
        }));
        assert_eq!(picker.value(), DateRange::empty());

        picker.write_value(Some(DateRange {
            start: Some(day(2024, 3, 9)),
            end: Some(day(2024, 3, 5)),
        }));
        assert_eq!(
            picker.value(),
            DateRange {
                start: Some(day(2024, 3, 5)),
                end: Some(day(2024, 3, 9)),
            }
        );

        picker.write_value(None);
        assert_eq!(picker.value(), DateRange::empty());
    }
}
