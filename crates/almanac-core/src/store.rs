use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::datetime::{add_days, is_same_day, iso_day_key};
use crate::event::{CalendarEvent, EventDraft, EventPatch};

/// Owns the canonical event collection. Consumers receive the store by
/// reference through explicit construction, and every query hands back a
/// freshly built `Vec`, so callers never alias internal storage.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
    next_id: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Inserts a new event and returns its assigned id. Ids come from a
    /// monotonic per-store counter, so rapid successive inserts cannot
    /// collide.
    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn add(&mut self, draft: EventDraft) -> u64 {
        if draft.end < draft.start {
            warn!(
                start = %draft.start,
                end = %draft.end,
                "event ends before it starts; storing as-is"
            );
        }

        let id = self.next_id;
        self.next_id += 1;
        self.events.push(draft.into_event(id));
        debug!(id, total = self.events.len(), "added event");
        id
    }

    /// Applies a partial update. Unknown ids are a no-op, not an error.
    #[tracing::instrument(skip(self, patch))]
    pub fn update(&mut self, id: u64, patch: &EventPatch) {
        match self.events.iter_mut().find(|event| event.id == id) {
            Some(event) => {
                patch.apply_to(event);
                debug!(id, "updated event");
            }
            None => debug!(id, "update for unknown event id ignored"),
        }
    }

    /// Removes an event. Unknown ids are a no-op, not an error.
    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: u64) {
        let before = self.events.len();
        self.events.retain(|event| event.id != id);
        if self.events.len() == before {
            debug!(id, "delete for unknown event id ignored");
        } else {
            debug!(id, total = self.events.len(), "deleted event");
        }
    }

    /// Bulk replace. The id counter resyncs above the highest loaded id
    /// so later `add` calls stay unique.
    #[tracing::instrument(skip(self, events))]
    pub fn load_all(&mut self, events: Vec<CalendarEvent>) {
        let max_id = events.iter().map(|event| event.id).max().unwrap_or(0);
        self.next_id = max_id + 1;
        self.events = events;
        debug!(total = self.events.len(), next_id = self.next_id, "loaded events");
    }

    /// Events whose start falls on the given day, in insertion order.
    pub fn events_for_day(&self, day: NaiveDate) -> Vec<CalendarEvent> {
        let probe = day.and_hms_opt(0, 0, 0);
        self.events
            .iter()
            .filter(|event| probe.is_some_and(|p| is_same_day(event.start, p)))
            .cloned()
            .collect()
    }

    /// Events whose start falls within `[week_start, week_start + 7d)`.
    /// An event spanning the boundary is attributed by its start only.
    pub fn events_for_week(&self, week_start: NaiveDate) -> Vec<CalendarEvent> {
        let Some(window_start) = week_start.and_hms_opt(0, 0, 0) else {
            return Vec::new();
        };
        let Some(window_end) = add_days(week_start, 7).and_hms_opt(0, 0, 0) else {
            return Vec::new();
        };

        self.events
            .iter()
            .filter(|event| event.start >= window_start && event.start < window_end)
            .cloned()
            .collect()
    }

    /// Events of the reference date's (year, month), grouped by the
    /// `YYYY-MM-DD` key of their start. Only `start` decides membership;
    /// an event ending in the next month is neither excluded nor
    /// duplicated. Insertion order is preserved within each key.
    pub fn events_for_month_grouped_by_day(
        &self,
        reference: NaiveDate,
    ) -> BTreeMap<String, Vec<CalendarEvent>> {
        let year = reference.year();
        let month = reference.month();

        let mut grouped: BTreeMap<String, Vec<CalendarEvent>> = BTreeMap::new();
        for event in &self.events {
            if event.start.year() != year || event.start.month() != month {
                continue;
            }
            grouped
                .entry(iso_day_key(event.start.date()))
                .or_default()
                .push(event.clone());
        }

        grouped
    }

    pub fn all_events(&self) -> Vec<CalendarEvent> {
        self.events.clone()
    }

    pub fn get(&self, id: u64) -> Option<CalendarEvent> {
        self.events.iter().find(|event| event.id == id).cloned()
    }
}
