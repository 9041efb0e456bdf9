//! Serde helper functions for host supplied settings and rows.
//!
//! Hosts store empty form fields as empty strings and times in either
//! `HH:MM` or `HH:MM:SS` form.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer};

use crate::calendar::OptionsError;

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Parses a time of day.
/// Accepts formats: HH:MM or HH:MM:SS
pub fn parse_time(value: &str) -> Result<NaiveTime, OptionsError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| OptionsError::InvalidTime(value.to_string()))
}

/// Parses a comma separated list such as `00:00:00,08:00:00,18:00:00`.
///
/// Blank entries are skipped and the result is sorted.
pub fn parse_time_list(value: &str) -> Result<Vec<NaiveTime>, OptionsError> {
    let mut times = value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_time)
        .collect::<Result<Vec<_>, _>>()?;
    times.sort();
    times.dedup();
    Ok(times)
}

/// Deserialize a list of times given either as an array or a comma separated string.
pub fn deserialize_time_list<'de, D>(deserializer: D) -> Result<Vec<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TimeList {
        List(Vec<String>),
        Joined(String),
    }

    let joined = match TimeList::deserialize(deserializer)? {
        TimeList::List(items) => items.join(","),
        TimeList::Joined(joined) => joined,
    };
    parse_time_list(&joined).map_err(serde::de::Error::custom)
}
