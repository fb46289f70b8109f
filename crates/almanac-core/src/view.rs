use chrono::NaiveDate;
use tracing::debug;

use crate::datetime::{add_days, add_months, start_of_week};

/// Which calendar view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    Month,
    Week,
    Day,
}

impl CalendarView {
    pub fn as_key(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
        }
    }

    /// Unknown keys parse to `None`; callers keep their current view,
    /// which makes a stray tag a no-op rather than an error.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "month" => Some(Self::Month),
            "week" => Some(Self::Week),
            "day" => Some(Self::Day),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// The reference date anchoring whatever view is displayed, plus the
/// active view tag. Navigation mutates the reference date by one unit
/// of the active view's granularity.
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    reference_date: NaiveDate,
    view: CalendarView,
}

impl ViewState {
    pub fn new(reference_date: NaiveDate, view: CalendarView) -> Self {
        Self {
            reference_date,
            view,
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    /// Monday of the reference date's week.
    pub fn week_start(&self) -> NaiveDate {
        start_of_week(self.reference_date)
    }

    pub fn change_view(&mut self, view: CalendarView) {
        self.view = view;
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.reference_date = date;
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.reference_date = today;
    }

    /// One step of the active view's granularity in the given direction.
    pub fn advance(&mut self, direction: Direction) {
        let step: i64 = match direction {
            Direction::Prev => -1,
            Direction::Next => 1,
        };

        self.reference_date = match self.view {
            CalendarView::Month => add_months(self.reference_date, step as i32),
            CalendarView::Week => add_days(self.reference_date, step * 7),
            CalendarView::Day => add_days(self.reference_date, step),
        };
        debug!(view = self.view.as_key(), reference = %self.reference_date, "advanced view");
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn advance_steps_by_view_granularity() {
        let mut state = ViewState::new(day(2024, 3, 14), CalendarView::Month);
        state.advance(Direction::Next);
        assert_eq!(state.reference_date(), day(2024, 4, 14));

        state.change_view(CalendarView::Week);
        state.advance(Direction::Prev);
        assert_eq!(state.reference_date(), day(2024, 4, 7));

        state.change_view(CalendarView::Day);
        state.advance(Direction::Next);
        assert_eq!(state.reference_date(), day(2024, 4, 8));
    }

    #[test]
    fn month_step_across_year_boundary() {
        let mut state = ViewState::new(day(2024, 12, 31), CalendarView::Month);
        state.advance(Direction::Next);
        assert_eq!(state.reference_date(), day(2025, 1, 31));
        state.advance(Direction::Prev);
        assert_eq!(state.reference_date(), day(2024, 12, 31));
    }

    #[test]
    fn week_start_is_monday_of_reference_week() {
        let state = ViewState::new(day(2024, 3, 6), CalendarView::Week);
        assert_eq!(state.week_start(), day(2024, 3, 4));
    }

    #[test]
    fn view_keys_round_trip_and_reject_unknown() {
        for view in [CalendarView::Month, CalendarView::Week, CalendarView::Day] {
            assert_eq!(CalendarView::from_key(view.as_key()), Some(view));
        }
        assert_eq!(CalendarView::from_key("YEAR"), None);
        assert_eq!(CalendarView::from_key(" Week "), Some(CalendarView::Week));
    }
}
