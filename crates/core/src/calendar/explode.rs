use chrono::{NaiveDate, NaiveTime};

use super::types::{last_occupied_day, CalendarEvent};
use crate::argument::DateRange;
use crate::datetime::{is_all_day_between, TimeGranularity};

/// Splits an event into one clone per visible day it occupies.
///
/// Each clone is clipped to `[00:00:00, 23:59:59]` of its day and its
/// all-day flag is re-evaluated against the clipped interval. Days outside
/// `range` produce nothing.
pub fn explode(event: &CalendarEvent, range: &DateRange) -> Vec<CalendarEvent> {
    let first = event.start.date().max(range.min_date());
    let last = last_occupied_day(event.start, event.end).min(range.max_date());

    // Date-only fields are compared at hour precision.
    let granularity = match event.granularity {
        TimeGranularity::Day => TimeGranularity::Hour,
        other => other,
    };

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .filter_map(|day| clip_to_day(event, day, granularity))
        .collect()
}

/// Explodes every event, keeping input order within each day.
pub fn explode_all<'a, I>(events: I, range: &DateRange) -> Vec<CalendarEvent>
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    events
        .into_iter()
        .flat_map(|event| explode(event, range))
        .collect()
}

fn clip_to_day(
    event: &CalendarEvent,
    day: NaiveDate,
    granularity: TimeGranularity,
) -> Option<CalendarEvent> {
    let day_start = day.and_time(NaiveTime::MIN);
    let day_end = day.and_hms_opt(23, 59, 59)?;

    let mut clone = event.clone();
    clone.start = event.start.max(day_start);
    clone.end = event.end.min(day_end).max(clone.start);
    clone.all_day = is_all_day_between(clone.start, clone.end, granularity, event.increment);
    Some(clone)
}
