use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::day::{build_day, DayView};
use super::header::{week_header, WeekdayHeader};
use super::layout::{layout_rows, LayoutCell};
use super::types::WeekGrid;
use super::week::build_week;
use super::GridContext;
use crate::argument::{DateTokenKind, Granularity};
use crate::datetime::{calendar_week, month_bounds, week_start};

/// Week number label of a row and the token linking to that week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekNumber {
    pub number: u32,
    pub token: String,
}

/// One row of a month calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWeek {
    pub week_number: Option<WeekNumber>,
    pub grid: WeekGrid,
    pub rows: Vec<Vec<LayoutCell>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub header: Vec<WeekdayHeader>,
    pub weeks: Vec<MonthWeek>,
}

/// One row of a mini month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniWeek {
    pub week_number: Option<WeekNumber>,
    pub days: Vec<DayView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniMonthView {
    pub year: i32,
    pub month: u32,
    /// Month name, e.g. `March`.
    pub title: String,
    pub header: Vec<WeekdayHeader>,
    pub weeks: Vec<MiniWeek>,
}

/// Builds the month calendar of the range.
pub fn build_month(ctx: &GridContext<'_>) -> MonthView {
    let (year, month) = (ctx.range.min_date().year(), ctx.range.min_date().month());
    let ctx = ctx.with_month(month);

    let weeks = week_rows(&ctx, year, month)
        .into_iter()
        .map(|start| {
            let grid = build_week(&ctx, start, true);
            MonthWeek {
                week_number: week_number(&ctx, start),
                rows: layout_rows(&grid),
                grid,
            }
        })
        .collect();

    MonthView {
        year,
        month,
        header: week_header(ctx.options),
        weeks,
    }
}

/// Builds a mini calendar of one month, where days only flag their events.
pub fn build_mini_month(ctx: &GridContext<'_>, year: i32, month: u32) -> MiniMonthView {
    let ctx = ctx.with_month(month);

    let weeks = week_rows(&ctx, year, month)
        .into_iter()
        .map(|start| MiniWeek {
            week_number: week_number(&ctx, start),
            days: (0..7)
                .map(|offset| {
                    let date = start + Duration::days(offset);
                    let mut day = build_day(&ctx, date, true);
                    day.in_range = ctx.in_range(date, true);
                    day
                })
                .collect(),
        })
        .collect();

    let title = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.format("%B").to_string())
        .unwrap_or_default();

    MiniMonthView {
        year,
        month,
        title,
        header: week_header(ctx.options),
        weeks,
    }
}

/// First day of every week row shown for a month.
///
/// Rows start at the row containing the 1st and stop once the next row
/// would begin after the month or after the range.
fn week_rows(ctx: &GridContext<'_>, year: i32, month: u32) -> Vec<NaiveDate> {
    let Some((first, last)) = month_bounds(year, month) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    let mut start = week_start(first, ctx.options.first_weekday());
    loop {
        rows.push(start);
        start += Duration::days(7);
        if start > last || start > ctx.range.max_date() {
            break;
        }
    }
    rows
}

fn week_number(ctx: &GridContext<'_>, start: NaiveDate) -> Option<WeekNumber> {
    let shows = ctx.options.show_week_numbers
        && !matches!(ctx.range.granularity, Granularity::Day | Granularity::Week);
    if !shows {
        return None;
    }

    let monday = start.iter_days().take(7).find(|d| d.weekday() == Weekday::Mon)?;
    Some(WeekNumber {
        number: calendar_week(monday),
        token: DateTokenKind::YearWeek.format(monday),
    })
}
