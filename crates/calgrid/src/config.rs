use std::env;

use calgrid_core::calendar::{CalendarOptions, CalendarType, MaxItemsBehavior, TimeGrouping};
use calgrid_core::serde::parse_time_list;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Calendar configuration loaded from environment variables or host JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub options: CalendarOptions,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CALGRID_CALENDAR_TYPE` - year, month, week or day (default: month)
    /// - `CALGRID_WEEK_STARTS_ON` - 0 (Sunday) to 6 (default: 1)
    /// - `CALGRID_MAX_ITEMS` - items per day in month views, 0 for unlimited (default: 0)
    /// - `CALGRID_MAX_ITEMS_BEHAVIOR` - more or hide (default: more)
    /// - `CALGRID_TIME_GROUPING` - none, hour, half_hour or a list of times (default: hour)
    /// - `CALGRID_SHOW_WEEK_NUMBERS` - true or false (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading values through `lookup`.
    ///
    /// Values that fail to parse or validate fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CalendarOptions::default();

        let week_starts_on = lookup("CALGRID_WEEK_STARTS_ON")
            .and_then(|v| v.trim().parse().ok())
            .filter(|day| *day <= 6)
            .unwrap_or(defaults.week_starts_on);

        let options = CalendarOptions {
            calendar_type: lookup("CALGRID_CALENDAR_TYPE")
                .and_then(|v| parse_name::<CalendarType>(&v))
                .unwrap_or(defaults.calendar_type),
            week_starts_on,
            max_items: lookup("CALGRID_MAX_ITEMS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_items),
            max_items_behavior: lookup("CALGRID_MAX_ITEMS_BEHAVIOR")
                .and_then(|v| parse_name::<MaxItemsBehavior>(&v))
                .unwrap_or(defaults.max_items_behavior),
            time_grouping: lookup("CALGRID_TIME_GROUPING")
                .and_then(|v| parse_time_grouping(&v))
                .unwrap_or_else(|| defaults.time_grouping.clone()),
            show_week_numbers: lookup("CALGRID_SHOW_WEEK_NUMBERS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.show_week_numbers),
            ..defaults
        };

        Self { options }
    }

    /// Load options stored by the host as JSON.
    ///
    /// Missing keys take their defaults; the result is validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: CalendarOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(Self { options })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Parses a unit enum variant from its serialized name.
fn parse_name<T: DeserializeOwned>(value: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase())).ok()
}

fn parse_time_grouping(value: &str) -> Option<TimeGrouping> {
    let value = value.trim();
    if let Some(grouping) = parse_name::<TimeGrouping>(value) {
        return Some(grouping);
    }
    parse_time_list(value)
        .ok()
        .filter(|times| !times.is_empty())
        .map(TimeGrouping::Custom)
}
