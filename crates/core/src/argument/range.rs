use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ArgumentError;

/// The calendar unit a date argument represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Year,
    Month,
    Week,
    Day,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Year => "year",
            Granularity::Month => "month",
            Granularity::Week => "week",
            Granularity::Day => "day",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The visible date range of one render request, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
    pub granularity: Granularity,
}

impl DateRange {
    /// Creates a new date range, validating that min <= max.
    pub fn new(
        min: NaiveDateTime,
        max: NaiveDateTime,
        granularity: Granularity,
    ) -> Result<Self, ArgumentError> {
        if min > max {
            return Err(ArgumentError::InvertedRange { min, max });
        }
        Ok(Self {
            min,
            max,
            granularity,
        })
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min.date()
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max.date()
    }

    /// Whether a calendar day falls inside the range.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.min_date() <= date && date <= self.max_date()
    }

    /// Iterates every day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.min_date()
            .iter_days()
            .take_while(move |day| *day <= self.max_date())
    }
}
