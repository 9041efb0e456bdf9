use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::types::MoreLink;
use super::week::split_overflow;
use super::GridContext;
use crate::calendar::CalendarEvent;

/// Contents of one day.
///
/// In mini mode only `has_events` is filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub in_range: bool,
    pub mini: bool,
    pub has_events: bool,
    pub all_day: Vec<CalendarEvent>,
    pub items: BTreeMap<NaiveTime, Vec<CalendarEvent>>,
    pub more: Option<MoreLink>,
}

impl DayView {
    /// True when nothing is listed for the day.
    pub fn is_empty(&self) -> bool {
        self.all_day.is_empty() && self.items.values().all(Vec::is_empty)
    }
}

/// Builds the view of a single day.
pub fn build_day(ctx: &GridContext<'_>, date: NaiveDate, mini: bool) -> DayView {
    let events: Vec<&CalendarEvent> = ctx.index.events_on(date).collect();
    let mut view = DayView {
        date,
        in_range: ctx.range.contains_date(date),
        mini,
        has_events: !events.is_empty(),
        all_day: Vec::new(),
        items: BTreeMap::new(),
        more: None,
    };
    if mini {
        return view;
    }

    let (shown, more) = split_overflow(ctx, date, events, 0);
    for event in shown {
        if event.all_day {
            view.all_day.push(event.clone());
        } else {
            let slot = ctx.options.time_grouping.slot(event.start_time());
            view.items.entry(slot).or_default().push(event.clone());
        }
    }
    for slot in ctx.options.time_grouping.fixed_slots() {
        view.items.entry(*slot).or_default();
    }
    view.more = more;
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::{DateArgument, DateRange, DateTokenKind};
    use crate::calendar::{CalendarOptions, EventIndex, MaxItemsBehavior, TimeGrouping};
    use chrono::NaiveDateTime;

    fn make_datetime(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn make_time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn day_range() -> DateRange {
        DateArgument::new(DateTokenKind::FullDate)
            .with_value("20240305")
            .range()
            .unwrap()
    }

    fn events() -> Vec<CalendarEvent> {
        vec![
            CalendarEvent::new("standup", make_datetime(5, 9, 0), make_datetime(5, 9, 15)),
            CalendarEvent::new("lunch", make_datetime(5, 12, 30), make_datetime(5, 13, 30)),
            CalendarEvent::new("trip", make_datetime(4, 10, 0), make_datetime(6, 10, 0)),
        ]
    }

    #[test]
    fn test_day_splits_all_day_and_timed() {
        let range = day_range();
        let events = events();
        let index = EventIndex::build(&events, &range);
        let options = CalendarOptions::default().with_time_grouping(TimeGrouping::None);
        let ctx = GridContext::new(&range, &index, &options);
        let date = range.min_date();

        let view = build_day(&ctx, date, false);

        assert!(view.has_events);
        assert_eq!(view.all_day.len(), 1);
        assert_eq!(view.all_day[0].id, "trip");
        let slots: Vec<NaiveTime> = view.items.keys().copied().collect();
        assert_eq!(slots, vec![make_time(9, 0), make_time(12, 30)]);
        assert!(view.more.is_none());
    }

    #[test]
    fn test_mini_day_only_flags_events() {
        let range = day_range();
        let events = events();
        let index = EventIndex::build(&events, &range);
        let options = CalendarOptions::default();
        let ctx = GridContext::new(&range, &index, &options);

        let view = build_day(&ctx, range.min_date(), true);

        assert!(view.has_events);
        assert!(view.is_empty());
    }

    #[test]
    fn test_custom_slots_shown_when_empty() {
        let range = day_range();
        let events = events();
        let index = EventIndex::build(&events, &range);
        let options = CalendarOptions::default().with_time_grouping(TimeGrouping::Custom(vec![
            make_time(0, 0),
            make_time(12, 0),
            make_time(18, 0),
        ]));
        let ctx = GridContext::new(&range, &index, &options);

        let view = build_day(&ctx, range.min_date(), false);

        assert_eq!(view.items.len(), 3);
        assert_eq!(view.items[&make_time(0, 0)].len(), 1);
        assert_eq!(view.items[&make_time(12, 0)].len(), 1);
        assert!(view.items[&make_time(18, 0)].is_empty());
    }

    fn busy_day() -> Vec<CalendarEvent> {
        (0..6)
            .map(|i| {
                let at = make_datetime(5, 8 + i, 0);
                CalendarEvent::new(format!("e{i}"), at, at)
            })
            .collect()
    }

    #[test]
    fn test_day_applies_item_cap() {
        let range = day_range();
        let events = busy_day();
        let index = EventIndex::build(&events, &range);
        let options = CalendarOptions::default().with_max_items(3, MaxItemsBehavior::ShowLink);
        let ctx = GridContext::new(&range, &index, &options);

        let view = build_day(&ctx, range.min_date(), false);

        let shown: Vec<&str> = view.items.values().flatten().map(|e| e.id.as_str()).collect();
        assert_eq!(shown, vec!["e0", "e1", "e2"]);
        let more = view.more.unwrap();
        assert_eq!(more.count, 3);
        assert_eq!(more.total, 6);
        assert_eq!(more.hidden_ids, vec!["e3", "e4", "e5"]);
    }

    #[test]
    fn test_day_hides_items_over_cap() {
        let range = day_range();
        let events = busy_day();
        let index = EventIndex::build(&events, &range);
        let options =
            CalendarOptions::default().with_max_items(3, MaxItemsBehavior::HideWithDayLink);
        let ctx = GridContext::new(&range, &index, &options);

        let view = build_day(&ctx, range.min_date(), false);

        assert!(view.is_empty());
        assert_eq!(view.more.map(|more| more.count), Some(6));
    }

    #[test]
    fn test_empty_day() {
        let range = day_range();
        let index = EventIndex::default();
        let options = CalendarOptions::default();
        let ctx = GridContext::new(&range, &index, &options);

        let view = build_day(&ctx, range.min_date(), false);

        assert!(!view.has_events);
        assert!(view.is_empty());
        assert!(view.in_range);
    }
}
