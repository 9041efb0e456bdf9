use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::day::{build_day, DayView};
use super::month::{build_mini_month, build_month, MiniMonthView, MonthView};
use super::week::{build_week_view, WeekView};
use super::year::{build_year, YearView};
use crate::argument::{ArgumentError, DateArgument, DateRange, Granularity};
use crate::calendar::{CalendarEvent, CalendarOptions, EventIndex};

/// Read-only inputs shared by the builders of one request.
#[derive(Debug, Clone, Copy)]
pub struct GridContext<'a> {
    pub range: &'a DateRange,
    pub index: &'a EventIndex,
    pub options: &'a CalendarOptions,
    month: u32,
}

impl<'a> GridContext<'a> {
    pub fn new(range: &'a DateRange, index: &'a EventIndex, options: &'a CalendarOptions) -> Self {
        Self {
            range,
            index,
            options,
            month: range.min_date().month(),
        }
    }

    /// Same context, with month checks against `month`.
    pub(crate) fn with_month(self, month: u32) -> Self {
        Self { month, ..self }
    }

    /// Whether `day` gets buckets, optionally requiring the context's month.
    pub(crate) fn in_range(&self, day: NaiveDate, check_month: bool) -> bool {
        self.range.contains_date(day) && (!check_month || day.month() == self.month)
    }
}

/// A rendered calendar of any granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalendarView {
    Year(YearView),
    Month(MonthView),
    MiniMonth(MiniMonthView),
    Week(WeekView),
    Day(DayView),
}

/// Builds the calendar a date argument asks for.
///
/// Fails only when the argument is missing or does not validate. No state
/// outlives the call, so equal inputs give equal views.
pub fn build_calendar(
    argument: &DateArgument,
    events: &[CalendarEvent],
    options: &CalendarOptions,
) -> Result<CalendarView, ArgumentError> {
    let range = argument.range()?;
    let index = EventIndex::build(events, &range);
    Ok(build_view(&GridContext::new(&range, &index, options)))
}

/// Builds the view matching the range's granularity.
pub fn build_view(ctx: &GridContext<'_>) -> CalendarView {
    match ctx.range.granularity {
        Granularity::Year => CalendarView::Year(build_year(ctx)),
        Granularity::Month if ctx.options.mini => {
            let first = ctx.range.min_date();
            CalendarView::MiniMonth(build_mini_month(ctx, first.year(), first.month()))
        }
        Granularity::Month => CalendarView::Month(build_month(ctx)),
        Granularity::Week => CalendarView::Week(build_week_view(ctx)),
        Granularity::Day => CalendarView::Day(build_day(ctx, ctx.range.min_date(), ctx.options.mini)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::DateTokenKind;
    use crate::calendar::MaxItemsBehavior;
    use chrono::Duration;

    fn events() -> Vec<CalendarEvent> {
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let mut events = vec![CalendarEvent::new("trip", monday, monday + Duration::days(2))];
        for i in 0..6 {
            let at = monday + Duration::days(3) + Duration::hours(i);
            events.push(CalendarEvent::new(format!("e{i}"), at, at));
        }
        events
    }

    #[test]
    fn test_view_follows_granularity() {
        let options = CalendarOptions::default();
        let cases = [
            (DateTokenKind::Year, "2024"),
            (DateTokenKind::YearMonth, "202403"),
            (DateTokenKind::YearWeek, "202410"),
            (DateTokenKind::FullDate, "20240304"),
        ];

        let views: Vec<CalendarView> = cases
            .iter()
            .map(|(kind, token)| {
                let argument = DateArgument::new(*kind).with_value(*token);
                build_calendar(&argument, &events(), &options).unwrap()
            })
            .collect();

        assert!(matches!(views[0], CalendarView::Year(_)));
        assert!(matches!(views[1], CalendarView::Month(_)));
        assert!(matches!(views[2], CalendarView::Week(_)));
        assert!(matches!(views[3], CalendarView::Day(_)));
    }

    #[test]
    fn test_mini_month_option() {
        let mut options = CalendarOptions::default();
        options.mini = true;
        let argument = DateArgument::new(DateTokenKind::YearMonth).with_value("202403");

        let view = build_calendar(&argument, &events(), &options).unwrap();

        assert!(matches!(view, CalendarView::MiniMonth(_)));
    }

    #[test]
    fn test_invalid_argument_is_reported() {
        let options = CalendarOptions::default();
        let missing = DateArgument::new(DateTokenKind::YearMonth);
        let invalid = DateArgument::new(DateTokenKind::YearMonth).with_value("202499");

        assert_eq!(
            build_calendar(&missing, &events(), &options),
            Err(ArgumentError::Missing)
        );
        assert!(matches!(
            build_calendar(&invalid, &events(), &options),
            Err(ArgumentError::Invalid { .. })
        ));
    }

    #[test]
    fn test_build_calendar_is_idempotent() {
        let options = CalendarOptions::default().with_max_items(3, MaxItemsBehavior::ShowLink);
        let argument = DateArgument::new(DateTokenKind::YearMonth).with_value("202403");
        let events = events();

        let first = build_calendar(&argument, &events, &options).unwrap();
        let second = build_calendar(&argument, &events, &options).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_view_serializes_with_type_tag() {
        let options = CalendarOptions::default();
        let argument = DateArgument::new(DateTokenKind::FullDate).with_value("20240307");

        let view = build_calendar(&argument, &events(), &options).unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["type"], "day");
        assert_eq!(json["date"], "2024-03-07");
        assert_eq!(json["items"]["10:00:00"][0]["id"], "e0");
    }
}
