use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarOptions;

/// A weekday column heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayHeader {
    pub weekday: Weekday,
    /// Lowercase full name, usable as a class or key.
    pub key: String,
    pub label: String,
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weekday headings ordered from the configured first day of the week.
pub fn week_header(options: &CalendarOptions) -> Vec<WeekdayHeader> {
    header_from(options.first_weekday(), options)
}

/// Weekday headings for a row starting on `first`.
pub(crate) fn header_from(first: Weekday, options: &CalendarOptions) -> Vec<WeekdayHeader> {
    let mut weekday = first;
    let mut header = Vec::with_capacity(7);
    for _ in 0..7 {
        let name = weekday_name(weekday);
        header.push(WeekdayHeader {
            weekday,
            key: name.to_lowercase(),
            label: options.name_size.apply(name),
        });
        weekday = weekday.succ();
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::NameSize;

    #[test]
    fn test_header_starts_on_first_day() {
        let options = CalendarOptions::default().with_week_starts_on(0);

        let header = week_header(&options);

        assert_eq!(header.len(), 7);
        assert_eq!(header[0].weekday, Weekday::Sun);
        assert_eq!(header[0].key, "sunday");
        assert_eq!(header[0].label, "Sun");
        assert_eq!(header[6].weekday, Weekday::Sat);
    }

    #[test]
    fn test_header_label_size() {
        let mut options = CalendarOptions::default();
        options.name_size = NameSize::Initial;
        let labels: Vec<String> = week_header(&options).into_iter().map(|h| h.label).collect();
        assert_eq!(labels, vec!["M", "T", "W", "T", "F", "S", "S"]);

        options.name_size = NameSize::Full;
        assert_eq!(week_header(&options)[2].label, "Wednesday");
    }
}
