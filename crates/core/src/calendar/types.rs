use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::datetime::{is_all_day_between, TimeGranularity};

/// A colour/label tag drawn as a bar on an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stripe {
    pub label: String,
    pub hex: String,
}

impl Stripe {
    pub fn new(label: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hex: hex.into(),
        }
    }
}

/// A normalized event record.
///
/// `start`/`end` are the part of the event shown in one cell, while
/// `span_start`/`span_end` always hold the full interval, so a clone
/// produced by [`explode`](super::explode) still knows where the event
/// begins and ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub span_start: NaiveDateTime,
    pub span_end: NaiveDateTime,
    pub timezone: String,
    pub all_day: bool,
    pub granularity: TimeGranularity,
    pub increment: u32,
    /// Content type (bundle) of the underlying entity.
    pub category: Option<String>,
    /// Taxonomy term ids attached to the entity.
    pub terms: Vec<String>,
    stripes: Vec<Stripe>,
    /// Caller supplied payload, passed through untouched.
    pub rendered_fields: serde_json::Value,
}

impl CalendarEvent {
    /// Creates an event, clamping `end` up to `start` when it precedes it.
    pub fn new(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let end = end.max(start);
        let granularity = TimeGranularity::default();
        Self {
            id: id.into(),
            start,
            end,
            span_start: start,
            span_end: end,
            timezone: "UTC".to_string(),
            all_day: is_all_day_between(start, end, granularity, 1),
            granularity,
            increment: 1,
            category: None,
            terms: Vec::new(),
            stripes: Vec::new(),
            rendered_fields: serde_json::Value::Null,
        }
    }

    /// Sets the precision of the date field and re-evaluates the all-day flag.
    pub fn with_granularity(mut self, granularity: TimeGranularity, increment: u32) -> Self {
        self.granularity = granularity;
        self.increment = increment;
        self.all_day = is_all_day_between(self.start, self.end, granularity, increment);
        self
    }

    /// Marks the event as all-day regardless of its times.
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rendered_fields(mut self, rendered_fields: serde_json::Value) -> Self {
        self.rendered_fields = rendered_fields;
        self
    }

    /// Day the shown part of the event falls on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start.time()
    }

    /// First day of the full interval.
    pub fn first_day(&self) -> NaiveDate {
        self.span_start.date()
    }

    /// Last day of the full interval.
    ///
    /// An event ending exactly at midnight does not occupy the day it ends on.
    pub fn last_day(&self) -> NaiveDate {
        last_occupied_day(self.span_start, self.span_end)
    }

    /// Whether the full interval covers more than one day.
    pub fn is_multi_day(&self) -> bool {
        self.first_day() != self.last_day()
    }

    pub fn stripes(&self) -> &[Stripe] {
        &self.stripes
    }

    pub fn stripe_labels(&self) -> Vec<&str> {
        self.stripes.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn stripe_hexes(&self) -> Vec<&str> {
        self.stripes.iter().map(|s| s.hex.as_str()).collect()
    }

    pub fn add_stripe(&mut self, stripe: Stripe) {
        self.stripes.push(stripe);
    }
}

pub(crate) fn last_occupied_day(start: NaiveDateTime, end: NaiveDateTime) -> NaiveDate {
    if end > start && end.time() == NaiveTime::MIN {
        (end - Duration::days(1)).date()
    } else {
        end.date()
    }
}
