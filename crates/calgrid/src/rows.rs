//! Host result rows and their conversion into calendar events.

use calgrid_core::calendar::CalendarEvent;
use calgrid_core::datetime::TimeGranularity;
use calgrid_core::serde::deserialize_optional_string;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::RowError;

/// One result row as the host hands it over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub end: Option<String>,
    #[serde(default)]
    pub all_day: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub granularity: Option<TimeGranularity>,
    #[serde(default)]
    pub increment: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub fields: serde_json::Value,
}

impl EventRow {
    pub fn new(id: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start: Some(start.into()),
            ..Self::default()
        }
    }

    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
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

    /// Converts the row into a normalized event.
    ///
    /// A missing end falls back to the start. Date-only values default to
    /// day granularity, and a date-only end covers its whole day.
    pub fn into_event(self) -> Result<CalendarEvent, RowError> {
        if self.id.trim().is_empty() {
            return Err(RowError::MissingId);
        }
        let raw_start = self.start.ok_or_else(|| RowError::MissingStart {
            id: self.id.clone(),
        })?;
        let (start, start_is_date) = parse_value(&self.id, &raw_start)?;
        let (end, end_is_date) = match self.end {
            Some(raw_end) => parse_value(&self.id, &raw_end)?,
            None => (start, start_is_date),
        };
        let end = if end_is_date {
            end.date().and_hms_opt(23, 59, 59).unwrap_or(end)
        } else {
            end
        };

        let granularity = self.granularity.unwrap_or(if start_is_date && end_is_date {
            TimeGranularity::Day
        } else {
            TimeGranularity::Second
        });

        let mut event = CalendarEvent::new(self.id, start, end)
            .with_granularity(granularity, self.increment.unwrap_or(1))
            .with_terms(self.terms)
            .with_rendered_fields(self.fields);
        if start_is_date && end_is_date {
            event = event.with_all_day(true);
        }
        if let Some(all_day) = self.all_day {
            event = event.with_all_day(all_day);
        }
        if let Some(timezone) = self.timezone {
            event = event.with_timezone(timezone);
        }
        if let Some(category) = self.category {
            event = event.with_category(category);
        }
        Ok(event)
    }
}

fn parse_value(id: &str, value: &str) -> Result<(NaiveDateTime, bool), RowError> {
    parse_datetime(value).ok_or_else(|| RowError::InvalidDate {
        id: id.to_string(),
        value: value.to_string(),
    })
}

/// Parses a stored date value.
///
/// Accepts `Y-m-d H:i:s`, `Y-m-dTH:i:s` (optionally without seconds),
/// `Y-m-d`, and unix timestamps in seconds. The flag is true for date-only
/// values.
pub fn parse_datetime(value: &str) -> Option<(NaiveDateTime, bool)> {
    let value = value.trim();

    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    if let Some(parsed) = FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some((parsed, false));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some((date.and_time(NaiveTime::MIN), true));
    }

    let seconds: i64 = value.parse().ok()?;
    DateTime::from_timestamp(seconds, 0).map(|utc| (utc.naive_utc(), false))
}

/// Converts rows into events, skipping the ones that cannot be parsed.
///
/// Returns the events and the number of skipped rows.
pub fn normalize_rows<I>(rows: I) -> (Vec<CalendarEvent>, usize)
where
    I: IntoIterator<Item = EventRow>,
{
    let mut events = Vec::new();
    let mut skipped = 0;

    for row in rows {
        match row.into_event() {
            Ok(event) => events.push(event),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping malformed event row");
                skipped += 1;
            }
        }
    }

    (events, skipped)
}
