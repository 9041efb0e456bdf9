use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::Granularity;
use crate::datetime::{iso_weeks_in_year, month_bounds};

/// Encoding of a date argument token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTokenKind {
    /// `YYYY`
    Year,
    /// `YYYYMM`
    YearMonth,
    /// `YYYYWW`, ISO year and week.
    YearWeek,
    /// `YYYYMMDD`
    FullDate,
}

impl DateTokenKind {
    pub fn granularity(&self) -> Granularity {
        match self {
            DateTokenKind::Year => Granularity::Year,
            DateTokenKind::YearMonth => Granularity::Month,
            DateTokenKind::YearWeek => Granularity::Week,
            DateTokenKind::FullDate => Granularity::Day,
        }
    }

    /// Number of digits a token of this kind has.
    pub fn width(&self) -> usize {
        match self {
            DateTokenKind::Year => 4,
            DateTokenKind::YearMonth | DateTokenKind::YearWeek => 6,
            DateTokenKind::FullDate => 8,
        }
    }

    /// Parses a token into the first day it represents.
    ///
    /// Week tokens resolve to the Monday of the ISO week. Returns `None` for
    /// tokens of the wrong shape or naming a date that does not exist.
    pub fn parse(&self, token: &str) -> Option<NaiveDate> {
        if token.len() != self.width() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let year: i32 = token[..4].parse().ok()?;
        match self {
            DateTokenKind::Year => NaiveDate::from_ymd_opt(year, 1, 1),
            DateTokenKind::YearMonth => NaiveDate::from_ymd_opt(year, token[4..6].parse().ok()?, 1),
            DateTokenKind::FullDate => NaiveDate::from_ymd_opt(
                year,
                token[4..6].parse().ok()?,
                token[6..8].parse().ok()?,
            ),
            DateTokenKind::YearWeek => {
                let week: u32 = token[4..6].parse().ok()?;
                let max_week = iso_weeks_in_year(NaiveDate::from_ymd_opt(year, 1, 1)?);
                if !(1..=max_week).contains(&week) {
                    return None;
                }
                NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            }
        }
    }

    /// Encodes the token of this kind that contains `date`.
    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            DateTokenKind::Year => format!("{:04}", date.year()),
            DateTokenKind::YearMonth => format!("{:04}{:02}", date.year(), date.month()),
            DateTokenKind::FullDate => {
                format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
            }
            DateTokenKind::YearWeek => {
                let iso = date.iso_week();
                format!("{:04}{:02}", iso.year(), iso.week())
            }
        }
    }

    /// First and last day covered by the token starting at `date`.
    pub(crate) fn bounds(&self, date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            DateTokenKind::Year => Some((
                NaiveDate::from_ymd_opt(date.year(), 1, 1)?,
                NaiveDate::from_ymd_opt(date.year(), 12, 31)?,
            )),
            DateTokenKind::YearMonth => month_bounds(date.year(), date.month()),
            DateTokenKind::YearWeek => Some((date, date.checked_add_signed(Duration::days(6))?)),
            DateTokenKind::FullDate => Some((date, date)),
        }
    }

    /// Moves `date` one unit of this kind forwards or backwards.
    pub(crate) fn shift(&self, date: NaiveDate, forward: bool) -> Option<NaiveDate> {
        match (self, forward) {
            (DateTokenKind::Year, true) => date.checked_add_months(Months::new(12)),
            (DateTokenKind::Year, false) => date.checked_sub_months(Months::new(12)),
            (DateTokenKind::YearMonth, true) => date.checked_add_months(Months::new(1)),
            (DateTokenKind::YearMonth, false) => date.checked_sub_months(Months::new(1)),
            (DateTokenKind::YearWeek, true) => date.checked_add_signed(Duration::days(7)),
            (DateTokenKind::YearWeek, false) => date.checked_sub_signed(Duration::days(7)),
            (DateTokenKind::FullDate, true) => date.succ_opt(),
            (DateTokenKind::FullDate, false) => date.pred_opt(),
        }
    }
}
