use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use super::explode::explode;
use super::types::CalendarEvent;
use crate::argument::DateRange;

/// Exploded events of one request, by day and then by start time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventIndex {
    days: BTreeMap<NaiveDate, BTreeMap<NaiveTime, Vec<CalendarEvent>>>,
}

impl EventIndex {
    /// Explodes `events` over `range` and files every clone under its day.
    pub fn build<'a, I>(events: I, range: &DateRange) -> Self
    where
        I: IntoIterator<Item = &'a CalendarEvent>,
    {
        let mut index = Self::default();
        for event in events {
            for clone in explode(event, range) {
                index.insert(clone);
            }
        }
        index
    }

    pub fn insert(&mut self, event: CalendarEvent) {
        self.days
            .entry(event.date())
            .or_default()
            .entry(event.start_time())
            .or_default()
            .push(event);
    }

    /// Events on `date` ordered by start time.
    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &CalendarEvent> {
        self.days
            .get(&date)
            .into_iter()
            .flat_map(|times| times.values().flatten())
    }

    pub fn has_events(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Total number of day clones held.
    pub fn len(&self) -> usize {
        self.days
            .values()
            .flat_map(|times| times.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
