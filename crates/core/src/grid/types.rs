use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarEvent;

/// An event placed in a multi-day row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedEvent {
    pub event: CalendarEvent,
    pub colspan: usize,
    pub rowspan: usize,
    pub all_day: bool,
    /// The event started before this cell.
    pub continuation: bool,
    /// The event goes on after the last column this cell covers.
    pub continues: bool,
}

/// One slot of a multi-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayBucketEntry {
    /// Carries an event spanning `colspan` columns.
    Event(PlacedEvent),
    /// Filled placeholder a later event may take over.
    Available,
    /// Covered by a span that starts in an earlier column.
    Blocked,
}

impl DayBucketEntry {
    pub fn filled(&self) -> bool {
        !matches!(self, DayBucketEntry::Blocked)
    }

    pub fn avail(&self) -> bool {
        matches!(self, DayBucketEntry::Available)
    }

    pub fn colspan(&self) -> usize {
        match self {
            DayBucketEntry::Event(placed) => placed.colspan,
            _ => 1,
        }
    }

    pub fn rowspan(&self) -> usize {
        match self {
            DayBucketEntry::Event(placed) => placed.rowspan,
            _ => 1,
        }
    }

    pub fn event(&self) -> Option<&CalendarEvent> {
        match self {
            DayBucketEntry::Event(placed) => Some(&placed.event),
            _ => None,
        }
    }
}

/// The synthetic "+N more" entry of a day with hidden items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoreLink {
    pub date: NaiveDate,
    /// Number of hidden events.
    pub count: usize,
    /// Number of events on the day, shown or not.
    pub total: usize,
    pub hidden_ids: Vec<String>,
}

/// Events contained within a single day, by time slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleDayBucket {
    pub entries: BTreeMap<NaiveTime, Vec<CalendarEvent>>,
    pub more: Option<MoreLink>,
}

impl SingleDayBucket {
    pub fn push(&mut self, slot: NaiveTime, event: CalendarEvent) {
        self.entries.entry(slot).or_default().push(event);
    }

    /// Number of events shown in the bucket.
    pub fn item_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0 && self.more.is_none()
    }

    /// Shown events in slot order.
    pub fn events(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.entries.values().flatten()
    }
}

/// Buckets of one seven-day row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    pub days: [NaiveDate; 7],
    pub in_range: [bool; 7],
    pub multiday: [Vec<DayBucketEntry>; 7],
    pub singleday: [SingleDayBucket; 7],
    /// Rows every column of the week is drawn with.
    pub total_rows: usize,
}

impl WeekGrid {
    pub(crate) fn new(days: [NaiveDate; 7], in_range: [bool; 7]) -> Self {
        Self {
            days,
            in_range,
            multiday: Default::default(),
            singleday: Default::default(),
            total_rows: 1,
        }
    }
}
