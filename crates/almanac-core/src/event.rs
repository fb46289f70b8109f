use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::datetime::event_minute_serde;

/// A timed calendar entry. Identity is the `id`, assigned by the store
/// at insertion; all other fields are caller data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: u64,

    pub title: String,

    #[serde(with = "event_minute_serde")]
    pub start: NaiveDateTime,

    #[serde(with = "event_minute_serde")]
    pub end: NaiveDateTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CalendarEvent {
    /// Signed duration in whole minutes. Negative when `end` precedes
    /// `start` (tolerated input, see `EventStore::add`).
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// An event as supplied by the caller, before the store assigns an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,

    #[serde(with = "event_minute_serde")]
    pub start: NaiveDateTime,

    #[serde(with = "event_minute_serde")]
    pub end: NaiveDateTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl EventDraft {
    pub fn into_event(self, id: u64) -> CalendarEvent {
        CalendarEvent {
            id,
            title: self.title,
            start: self.start,
            end: self.end,
            color: self.color,
        }
    }
}

/// Partial update for `EventStore::update`; `None` fields are left as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, with = "event_minute_serde::option")]
    pub start: Option<NaiveDateTime>,

    #[serde(default, with = "event_minute_serde::option")]
    pub end: Option<NaiveDateTime>,

    #[serde(default)]
    pub color: Option<String>,
}

impl EventPatch {
    pub fn apply_to(&self, event: &mut CalendarEvent) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(start) = self.start {
            event.start = start;
        }
        if let Some(end) = self.end {
            event.end = end;
        }
        if let Some(color) = &self.color {
            event.color = Some(color.clone());
        }
    }
}
