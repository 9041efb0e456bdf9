use std::array;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::header::{header_from, WeekdayHeader};
use super::layout::{layout_rows, LayoutCell};
use super::types::{DayBucketEntry, MoreLink, PlacedEvent, SingleDayBucket, WeekGrid};
use super::GridContext;
use crate::calendar::{CalendarEvent, MaxItemsBehavior, MultiDayDisplay};
use crate::datetime::{month_bounds, week_start};

/// A single week calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    pub header: Vec<WeekdayHeader>,
    pub grid: WeekGrid,
    pub rows: Vec<Vec<LayoutCell>>,
}

/// Builds the week view of the range.
///
/// The row starts on the range's first day so all seven days of the week
/// argument are shown whatever the configured first day of the week.
pub fn build_week_view(ctx: &GridContext<'_>) -> WeekView {
    let first = ctx.range.min_date();
    let grid = build_row(ctx, first, false);
    WeekView {
        header: header_from(first.weekday(), ctx.options),
        rows: layout_rows(&grid),
        grid,
    }
}

/// Buckets the events of the week row containing `start_day`.
///
/// The row starts on the configured first day of the week. With
/// `check_month`, days outside the context's month are out of range and get
/// no buckets, though the row keeps all seven columns.
pub fn build_week(ctx: &GridContext<'_>, start_day: NaiveDate, check_month: bool) -> WeekGrid {
    build_row(ctx, week_start(start_day, ctx.options.first_weekday()), check_month)
}

fn build_row(ctx: &GridContext<'_>, first: NaiveDate, check_month: bool) -> WeekGrid {
    let days: [NaiveDate; 7] = array::from_fn(|col| first + Duration::days(col as i64));
    let in_range = days.map(|day| ctx.in_range(day, check_month));
    let first_in_range = in_range.iter().position(|in_range| *in_range);
    let mut grid = WeekGrid::new(days, in_range);

    for col in 0..7 {
        if !grid.in_range[col] {
            continue;
        }

        let day = grid.days[col];
        let mut singles = Vec::new();
        for event in ctx.index.events_on(day) {
            if !spans_columns(ctx, event) {
                singles.push(event);
                continue;
            }
            // Later days of a span are covered by the cell placed on its anchor.
            let anchor = col == 0 || event.first_day() == day || first_in_range == Some(col);
            if anchor {
                place_multi_day(ctx, &mut grid, col, event, check_month);
            }
        }

        let occupied = grid.multiday[col]
            .iter()
            .filter(|entry| !entry.avail())
            .count();
        grid.singleday[col] = fill_single_day(ctx, day, singles, occupied);
    }

    grid.total_rows = grid
        .multiday
        .iter()
        .map(|rows| rows.len() + 1)
        .max()
        .unwrap_or(1);
    grid
}

fn spans_columns(ctx: &GridContext<'_>, event: &CalendarEvent) -> bool {
    ctx.options.multi_day_display == MultiDayDisplay::MultiColumnRow
        && (event.is_multi_day() || event.all_day)
}

fn place_multi_day(
    ctx: &GridContext<'_>,
    grid: &mut WeekGrid,
    col: usize,
    event: &CalendarEvent,
    check_month: bool,
) {
    let day = grid.days[col];
    let days_to_end = (event.last_day() - day).num_days().max(0);

    let mut remaining = (6 - col) as i64;
    remaining = remaining.min((ctx.range.max_date() - day).num_days());
    if check_month {
        if let Some((_, month_end)) = month_bounds(day.year(), day.month()) {
            remaining = remaining.min((month_end - day).num_days());
        }
    }
    let bucket_cnt = days_to_end.min(remaining).max(0);
    let colspan = bucket_cnt as usize + 1;

    let placed = DayBucketEntry::Event(PlacedEvent {
        event: event.clone(),
        colspan,
        rowspan: 1,
        all_day: event.all_day,
        continuation: event.first_day() < day,
        continues: days_to_end > bucket_cnt,
    });

    let rows = &mut grid.multiday[col];
    let row = match rows.iter().position(DayBucketEntry::avail) {
        Some(row) => {
            rows[row] = placed;
            row
        }
        None => {
            rows.push(placed);
            rows.len() - 1
        }
    };

    for next in col + 1..col + colspan {
        let rows = &mut grid.multiday[next];
        while rows.len() < row {
            rows.push(DayBucketEntry::Available);
        }
        if rows.len() == row {
            rows.push(DayBucketEntry::Blocked);
        } else {
            rows[row] = DayBucketEntry::Blocked;
        }
    }
}

fn fill_single_day(
    ctx: &GridContext<'_>,
    day: NaiveDate,
    events: Vec<&CalendarEvent>,
    occupied: usize,
) -> SingleDayBucket {
    let mut bucket = SingleDayBucket::default();
    let (shown, more) = split_overflow(ctx, day, events, occupied);

    for event in shown {
        let slot = ctx.options.time_grouping.slot(event.start_time());
        bucket.push(slot, event.clone());
    }
    bucket.more = more;
    bucket
}

/// Applies the item cap to a day's events.
///
/// `occupied` rows count against the cap. Returns the events to show and the
/// more-link describing the ones left out.
pub(crate) fn split_overflow<'e>(
    ctx: &GridContext<'_>,
    day: NaiveDate,
    mut events: Vec<&'e CalendarEvent>,
    occupied: usize,
) -> (Vec<&'e CalendarEvent>, Option<MoreLink>) {
    let total = events.len();
    let Some(max) = ctx.options.item_cap(ctx.range.granularity) else {
        return (events, None);
    };
    if total + occupied <= max {
        return (events, None);
    }

    let hidden = match ctx.options.max_items_behavior {
        MaxItemsBehavior::ShowLink => events.split_off(max.saturating_sub(occupied).min(total)),
        MaxItemsBehavior::HideWithDayLink => std::mem::take(&mut events),
    };
    if hidden.is_empty() {
        return (events, None);
    }

    let more = MoreLink {
        date: day,
        count: hidden.len(),
        total,
        hidden_ids: hidden.iter().map(|event| event.id.clone()).collect(),
    };
    (events, Some(more))
}
