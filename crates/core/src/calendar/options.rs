use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use super::OptionsError;
use crate::argument::{DateTokenKind, Granularity};
use crate::legend::LegendMode;

/// Which calendar the view renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarType {
    Year,
    #[default]
    Month,
    Week,
    Day,
}

impl CalendarType {
    /// Argument encoding used for the default ("current") date.
    pub fn token_kind(&self) -> DateTokenKind {
        match self {
            CalendarType::Year => DateTokenKind::Year,
            CalendarType::Month => DateTokenKind::YearMonth,
            CalendarType::Week => DateTokenKind::YearWeek,
            CalendarType::Day => DateTokenKind::FullDate,
        }
    }
}

/// Length of the weekday names in headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NameSize {
    /// `M`
    Initial,
    /// `Mo`
    Short,
    /// `Mon`
    #[default]
    Abbreviated,
    /// `Monday`
    Full,
}

impl NameSize {
    /// Applies the size to a full weekday name.
    pub fn apply(&self, name: &str) -> String {
        let take = match self {
            NameSize::Initial => 1,
            NameSize::Short => 2,
            NameSize::Abbreviated => 3,
            NameSize::Full => return name.to_string(),
        };
        name.chars().take(take).collect()
    }
}

impl TryFrom<u8> for NameSize {
    type Error = OptionsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(NameSize::Initial),
            2 => Ok(NameSize::Short),
            3 => Ok(NameSize::Abbreviated),
            99 => Ok(NameSize::Full),
            other => Err(OptionsError::InvalidNameSize(other)),
        }
    }
}

impl From<NameSize> for u8 {
    fn from(size: NameSize) -> Self {
        match size {
            NameSize::Initial => 1,
            NameSize::Short => 2,
            NameSize::Abbreviated => 3,
            NameSize::Full => 99,
        }
    }
}

/// What happens to a day's items once `max_items` is exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaxItemsBehavior {
    /// Show the first items and a "+N more" link for the rest.
    #[default]
    #[serde(rename = "more")]
    ShowLink,
    /// Hide every item and only link to the day.
    #[serde(rename = "hide")]
    HideWithDayLink,
}

/// How events spanning several days are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiDayDisplay {
    /// Repeat the event in every day cell.
    SingleColumn,
    /// One cell spanning the covered columns.
    #[default]
    MultiColumnRow,
}

/// Grouping of single-day items by time of day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeGrouping {
    /// One slot per distinct start time.
    None,
    #[default]
    Hour,
    HalfHour,
    /// Slots start at the listed times; later items join the last slot.
    Custom(#[serde(deserialize_with = "crate::serde::deserialize_time_list")] Vec<NaiveTime>),
}

impl TimeGrouping {
    /// The slot an item starting at `time` is grouped under.
    pub fn slot(&self, time: NaiveTime) -> NaiveTime {
        let floored = |minute: u32| NaiveTime::from_hms_opt(time.hour(), minute, 0).unwrap_or(time);
        match self {
            TimeGrouping::None => time,
            TimeGrouping::Hour => floored(0),
            TimeGrouping::HalfHour => floored(if time.minute() >= 30 { 30 } else { 0 }),
            TimeGrouping::Custom(times) => times
                .iter()
                .copied()
                .filter(|slot| *slot <= time)
                .max()
                .or_else(|| times.iter().copied().min())
                .unwrap_or(time),
        }
    }

    /// Slots shown even when empty.
    pub fn fixed_slots(&self) -> &[NaiveTime] {
        match self {
            TimeGrouping::Custom(times) => times,
            _ => &[],
        }
    }
}

/// Display configuration of a calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarOptions {
    pub calendar_type: CalendarType,
    /// Render month views as mini calendars.
    pub mini: bool,
    pub name_size: NameSize,
    pub show_week_numbers: bool,
    /// First day of the week, 0 (Sunday) to 6 (Saturday).
    pub week_starts_on: u8,
    /// Items per day in month views, 0 for unlimited.
    pub max_items: usize,
    pub max_items_behavior: MaxItemsBehavior,
    pub multi_day_display: MultiDayDisplay,
    pub time_grouping: TimeGrouping,
    pub legend: LegendMode,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            calendar_type: CalendarType::default(),
            mini: false,
            name_size: NameSize::default(),
            show_week_numbers: false,
            week_starts_on: 1,
            max_items: 0,
            max_items_behavior: MaxItemsBehavior::default(),
            multi_day_display: MultiDayDisplay::default(),
            time_grouping: TimeGrouping::default(),
            legend: LegendMode::default(),
        }
    }
}

impl CalendarOptions {
    pub fn with_calendar_type(mut self, calendar_type: CalendarType) -> Self {
        self.calendar_type = calendar_type;
        self
    }

    pub fn with_max_items(mut self, max_items: usize, behavior: MaxItemsBehavior) -> Self {
        self.max_items = max_items;
        self.max_items_behavior = behavior;
        self
    }

    pub fn with_week_starts_on(mut self, week_starts_on: u8) -> Self {
        self.week_starts_on = week_starts_on;
        self
    }

    pub fn with_time_grouping(mut self, time_grouping: TimeGrouping) -> Self {
        self.time_grouping = time_grouping;
        self
    }

    pub fn with_multi_day_display(mut self, multi_day_display: MultiDayDisplay) -> Self {
        self.multi_day_display = multi_day_display;
        self
    }

    pub fn with_legend(mut self, legend: LegendMode) -> Self {
        self.legend = legend;
        self
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.week_starts_on > 6 {
            return Err(OptionsError::WeekStartOutOfRange(self.week_starts_on));
        }
        if matches!(&self.time_grouping, TimeGrouping::Custom(times) if times.is_empty()) {
            return Err(OptionsError::EmptyCustomTimes);
        }
        Ok(())
    }

    /// Configured first day of the week.
    pub fn first_weekday(&self) -> Weekday {
        match self.week_starts_on % 7 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    /// Item cap for single-day lists. Month grids and day pages enforce it,
    /// week pages list everything.
    pub(crate) fn item_cap(&self, granularity: Granularity) -> Option<usize> {
        let capped = matches!(granularity, Granularity::Month | Granularity::Day);
        (capped && self.max_items > 0).then_some(self.max_items)
    }
}
