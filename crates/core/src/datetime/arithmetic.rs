use std::cmp::Ordering;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Unit of measure for [`difference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

/// Precision of a stored date value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeGranularity {
    Day,
    Hour,
    Minute,
    #[default]
    Second,
}

/// Computes the difference between two date-times in the given unit.
///
/// When `absolute` is set and `stop` precedes `start`, the operands are
/// swapped so the result is never negative. Days are counted as day
/// boundaries crossed, so the time of day does not matter. Weeks are ISO
/// weeks and account for 53-week years.
pub fn difference(
    start: NaiveDateTime,
    stop: NaiveDateTime,
    unit: DateUnit,
    absolute: bool,
) -> i64 {
    let (mut date1, mut date2) = (start, stop);
    let mut diff = (date2 - date1).num_seconds();
    if diff == 0 {
        return 0;
    }
    if diff < 0 && absolute {
        std::mem::swap(&mut date1, &mut date2);
        diff = -diff;
    }

    let year_diff = i64::from(date2.year() - date1.year());
    match unit {
        DateUnit::Seconds => diff,
        DateUnit::Minutes => diff / 60,
        DateUnit::Hours => diff / 3600,
        DateUnit::Years => year_diff,
        DateUnit::Months => {
            year_diff * 12 + i64::from(date2.month()) - i64::from(date1.month())
        }
        DateUnit::Days => day_difference(date1.date(), date2.date()),
        DateUnit::Weeks => week_difference(date1.date(), date2.date()),
    }
}

fn days_in_year(year: i32) -> i64 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}

/// Steps over year boundaries using day-of-year ordinals.
fn day_difference(from: NaiveDate, to: NaiveDate) -> i64 {
    let (y1, y2) = (from.year(), to.year());
    let z1 = i64::from(from.ordinal0());
    let z2 = i64::from(to.ordinal0());

    match y1.cmp(&y2) {
        Ordering::Equal => z2 - z1,
        Ordering::Less => {
            let between: i64 = (y1 + 1..y2).map(days_in_year).sum();
            days_in_year(y1) - z1 + between + z2
        }
        Ordering::Greater => {
            let between: i64 = (y2 + 1..y1).map(days_in_year).sum();
            -(z1 + between + days_in_year(y2) - z2)
        }
    }
}

fn week_difference(from: NaiveDate, to: NaiveDate) -> i64 {
    let (w1, w2) = (from.iso_week(), to.iso_week());
    let mut weeks = i64::from(w2.week()) - i64::from(w1.week());

    if w1.year() <= w2.year() {
        weeks += (w1.year()..w2.year())
            .map(|year| i64::from(weeks_in_iso_year(year)))
            .sum::<i64>();
    } else {
        weeks -= (w2.year()..w1.year())
            .map(|year| i64::from(weeks_in_iso_year(year)))
            .sum::<i64>();
    }

    weeks
}

fn weeks_in_iso_year(year: i32) -> u32 {
    // December 28 always falls in the last ISO week of its year.
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|date| date.iso_week().week())
        .unwrap_or(52)
}

/// Returns the number of ISO weeks (52 or 53) in the year of `date`.
pub fn iso_weeks_in_year(date: impl Datelike) -> u32 {
    weeks_in_iso_year(date.year())
}

/// Returns the calendar week number of `date`.
///
/// Matches the ISO week whenever the ISO year equals the calendar year.
/// Late-December days that ISO puts in week 1 of the next year keep counting
/// up inside their own year (52 → 53, 53 → 54), and early-January days that
/// still belong to last year's final ISO week are numbered 0.
pub fn calendar_week(date: NaiveDate) -> u32 {
    let iso = date.iso_week();
    match iso.year().cmp(&date.year()) {
        Ordering::Equal => iso.week(),
        Ordering::Greater => (date - Duration::days(7)).iso_week().week() + 1,
        Ordering::Less => 0,
    }
}

/// Checks whether a `Y-m-d H:i:s` interval covers a whole day.
///
/// Returns false for malformed input and for [`TimeGranularity::Day`].
pub fn is_all_day(start: &str, end: &str, granularity: TimeGranularity, increment: u32) -> bool {
    match (parse_timestamp(start), parse_timestamp(end)) {
        (Some(start), Some(end)) => is_all_day_between(start, end, granularity, increment),
        _ => false,
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let head = value.trim().get(..19)?;
    NaiveDateTime::parse_from_str(head, "%Y-%m-%d %H:%M:%S").ok()
}

/// Typed form of [`is_all_day`].
///
/// The start must be midnight and the end must be the last instant the
/// granularity and increment can express (for example 23:59:59, or 23:45:45
/// with an increment of 15), or midnight again.
pub fn is_all_day_between(
    start: NaiveDateTime,
    end: NaiveDateTime,
    granularity: TimeGranularity,
    increment: u32,
) -> bool {
    let last = last_step(increment);
    let (h1, m1, s1) = (start.hour(), start.minute(), start.second());
    let (h2, m2, s2) = (end.hour(), end.minute(), end.second());
    let ends_at_midnight = h2 == 0 && m2 == 0 && s2 == 0;

    let (min_match, max_match) = match granularity {
        TimeGranularity::Second => (
            h1 == 0 && m1 == 0 && s1 == 0,
            ends_at_midnight
                || (h2 == 23 && (m2 == last || m2 == 59) && (s2 == last || s2 == 59)),
        ),
        TimeGranularity::Minute => (
            h1 == 0 && m1 == 0,
            ends_at_midnight || (h2 == 23 && (m2 == last || m2 == 59)),
        ),
        TimeGranularity::Hour => (h1 == 0, ends_at_midnight || h2 == 23),
        TimeGranularity::Day => return false,
    };

    min_match && max_match
}

/// Largest minute/second value reachable in steps of `increment`.
fn last_step(increment: u32) -> u32 {
    let step = increment.max(1);
    (59 / step) * step
}

/// Returns the first day of the week containing `date`.
pub fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let offset =
        (7 + date.weekday().num_days_from_sunday() - first_day.num_days_from_sunday()) % 7;
    date - Duration::days(i64::from(offset))
}

/// Returns the first and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    Some((first, next.pred_opt()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_datetime(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
        make_date(year, month, day).and_hms_opt(hour, min, 0).unwrap()
    }

    #[test]
    fn test_difference_days_ignores_time_of_day() {
        let start = make_datetime(2024, 1, 15, 23, 30);
        let stop = make_datetime(2024, 1, 17, 0, 15);
        assert_eq!(difference(start, stop, DateUnit::Days, true), 2);
    }

    #[test]
    fn test_difference_days_across_leap_years() {
        let start = make_datetime(2023, 12, 31, 12, 0);
        let stop = make_datetime(2025, 1, 1, 8, 0);
        // 2024 is a leap year: 1 + 366 days.
        assert_eq!(difference(start, stop, DateUnit::Days, true), 367);

        let feb = make_datetime(2024, 2, 28, 0, 0);
        let mar = make_datetime(2024, 3, 1, 0, 0);
        assert_eq!(difference(feb, mar, DateUnit::Days, true), 2);
    }

    #[test]
    fn test_difference_days_matches_date_subtraction() {
        let anchor = make_date(1999, 11, 20);
        for offset in [0_i64, 1, 40, 365, 366, 1000, 3000] {
            let later = anchor + Duration::days(offset);
            let start = anchor.and_hms_opt(18, 0, 0).unwrap();
            let stop = later.and_hms_opt(6, 0, 0).unwrap();
            if start == stop {
                continue;
            }
            let forward = difference(start, stop, DateUnit::Days, true);
            let backward = difference(stop, start, DateUnit::Days, true);
            assert_eq!(forward, (later - anchor).num_days());
            assert_eq!(forward, backward);
        }
    }

    #[test]
    fn test_difference_signed() {
        let start = make_datetime(2024, 3, 10, 0, 0);
        let stop = make_datetime(2024, 3, 7, 0, 0);
        assert_eq!(difference(start, stop, DateUnit::Days, false), -3);
        assert_eq!(difference(start, stop, DateUnit::Days, true), 3);

        let earlier_year = make_datetime(2022, 12, 30, 0, 0);
        assert_eq!(difference(start, earlier_year, DateUnit::Days, false), -436);
    }

    #[test]
    fn test_difference_simple_units() {
        let start = make_datetime(2024, 1, 1, 0, 0);
        let stop = make_datetime(2024, 1, 1, 2, 30);
        assert_eq!(difference(start, stop, DateUnit::Seconds, true), 9000);
        assert_eq!(difference(start, stop, DateUnit::Minutes, true), 150);
        assert_eq!(difference(start, stop, DateUnit::Hours, true), 2);
        assert_eq!(difference(start, start, DateUnit::Hours, true), 0);
    }

    #[test]
    fn test_difference_months_and_years() {
        let start = make_datetime(2022, 11, 5, 0, 0);
        let stop = make_datetime(2024, 2, 1, 0, 0);
        assert_eq!(difference(start, stop, DateUnit::Months, true), 15);
        assert_eq!(difference(start, stop, DateUnit::Years, true), 2);
        assert_eq!(difference(stop, start, DateUnit::Months, false), -15);
    }

    #[test]
    fn test_difference_weeks_across_53_week_year() {
        // 2020-12-31 is in 2020-W53, 2021-01-07 is in 2021-W01.
        let start = make_datetime(2020, 12, 31, 0, 0);
        let stop = make_datetime(2021, 1, 7, 0, 0);
        assert_eq!(difference(start, stop, DateUnit::Weeks, true), 1);
        assert_eq!(difference(stop, start, DateUnit::Weeks, false), -1);

        let within = make_datetime(2024, 1, 1, 0, 0);
        let later = make_datetime(2024, 3, 4, 0, 0);
        assert_eq!(difference(within, later, DateUnit::Weeks, true), 9);
    }

    #[test]
    fn test_iso_weeks_in_year() {
        assert_eq!(iso_weeks_in_year(make_date(2015, 6, 1)), 53);
        assert_eq!(iso_weeks_in_year(make_date(2020, 1, 1)), 53);
        assert_eq!(iso_weeks_in_year(make_date(2021, 12, 31)), 52);
        assert_eq!(iso_weeks_in_year(make_date(2024, 3, 1)), 52);
        assert_eq!(iso_weeks_in_year(make_date(2026, 1, 1)), 53);
    }

    #[test]
    fn test_iso_weeks_in_year_thursday_rule() {
        for year in 1990..2050 {
            let jan1 = make_date(year, 1, 1).weekday() == Weekday::Thu;
            let dec31 = make_date(year, 12, 31).weekday() == Weekday::Thu;
            let expected = if jan1 || dec31 { 53 } else { 52 };
            assert_eq!(iso_weeks_in_year(make_date(year, 7, 1)), expected, "{year}");
        }
    }

    #[test]
    fn test_calendar_week_round_trips_iso_mondays() {
        for year in 1995..2040 {
            for week in 1..=iso_weeks_in_year(make_date(year, 1, 1)) {
                let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).unwrap();
                if monday.year() == year {
                    assert_eq!(calendar_week(monday), week, "{year}-W{week}");
                }
            }
        }
    }

    #[test]
    fn test_calendar_week_year_edges() {
        // 2021-01-01 is a Friday that ISO places in 2020-W53.
        assert_eq!(calendar_week(make_date(2021, 1, 1)), 0);
        assert_eq!(calendar_week(make_date(2021, 1, 4)), 1);
        // 2024-12-30 is a Monday that ISO places in 2025-W01.
        assert_eq!(calendar_week(make_date(2024, 12, 30)), 53);
        assert_eq!(calendar_week(make_date(2024, 12, 29)), 52);
    }

    #[test]
    fn test_is_all_day_second_granularity() {
        assert!(is_all_day(
            "2024-03-01 00:00:00",
            "2024-03-01 23:59:59",
            TimeGranularity::Second,
            1
        ));
        assert!(is_all_day(
            "2024-03-01 00:00:00",
            "2024-03-02 00:00:00",
            TimeGranularity::Second,
            1
        ));
        assert!(!is_all_day(
            "2024-03-01 00:00:01",
            "2024-03-01 23:59:59",
            TimeGranularity::Second,
            1
        ));
    }

    #[test]
    fn test_is_all_day_hour_granularity() {
        assert!(!is_all_day(
            "2024-03-01 08:00:00",
            "2024-03-01 17:00:00",
            TimeGranularity::Hour,
            1
        ));
        assert!(is_all_day(
            "2024-03-01 00:30:00",
            "2024-03-01 23:00:00",
            TimeGranularity::Hour,
            1
        ));
    }

    #[test]
    fn test_is_all_day_with_increment() {
        assert!(is_all_day(
            "2024-03-01 00:00:00",
            "2024-03-01 23:45:45",
            TimeGranularity::Second,
            15
        ));
        assert!(is_all_day(
            "2024-03-01 00:00:00",
            "2024-03-01 23:45:00",
            TimeGranularity::Minute,
            15
        ));
        assert!(!is_all_day(
            "2024-03-01 00:00:00",
            "2024-03-01 23:30:00",
            TimeGranularity::Minute,
            15
        ));
    }

    #[test]
    fn test_is_all_day_rejects_bad_input() {
        assert!(!is_all_day("", "2024-03-01 23:59:59", TimeGranularity::Second, 1));
        assert!(!is_all_day("2024-03-01", "2024-03-01", TimeGranularity::Second, 1));
        assert!(!is_all_day(
            "2024-13-01 00:00:00",
            "2024-13-01 23:59:59",
            TimeGranularity::Second,
            1
        ));
        assert!(!is_all_day(
            "2024-03-01 00:00:00",
            "2024-03-01 23:59:59",
            TimeGranularity::Day,
            1
        ));
    }

    #[test]
    fn test_week_start() {
        let wednesday = make_date(2024, 1, 17);
        assert_eq!(week_start(wednesday, Weekday::Mon), make_date(2024, 1, 15));
        assert_eq!(week_start(wednesday, Weekday::Sun), make_date(2024, 1, 14));
        assert_eq!(week_start(wednesday, Weekday::Wed), wednesday);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2024, 2),
            Some((make_date(2024, 2, 1), make_date(2024, 2, 29)))
        );
        assert_eq!(
            month_bounds(2023, 12),
            Some((make_date(2023, 12, 1), make_date(2023, 12, 31)))
        );
        assert_eq!(month_bounds(2023, 13), None);
    }
}
