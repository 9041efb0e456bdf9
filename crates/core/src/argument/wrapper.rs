use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{ArgumentError, DateRange, DateTokenKind, Granularity};

/// A date argument value together with the encoding it uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateArgument {
    pub kind: DateTokenKind,
    pub value: Option<String>,
}

impl DateArgument {
    pub fn new(kind: DateTokenKind) -> Self {
        Self { kind, value: None }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Argument pointing at the unit that contains `date` (e.g. today).
    pub fn for_date(kind: DateTokenKind, date: NaiveDate) -> Self {
        Self::new(kind).with_value(kind.format(date))
    }

    pub fn granularity(&self) -> Granularity {
        self.kind.granularity()
    }

    /// Checks that the value is a well formed token naming a real date.
    ///
    /// Tokens must survive a parse/format round trip unchanged, so `20240230`
    /// is rejected rather than rolled over into March.
    pub fn validate_value(&self) -> bool {
        self.date().is_some()
    }

    /// The first day of the token, or `None` when it does not validate.
    pub fn date(&self) -> Option<NaiveDate> {
        let value = self.value.as_deref()?;
        self.kind
            .parse(value)
            .filter(|date| self.kind.format(*date) == value)
    }

    /// Start of the range at 00:00:00.
    pub fn min_date(&self) -> Option<NaiveDateTime> {
        let (first, _) = self.kind.bounds(self.date()?)?;
        Some(first.and_time(NaiveTime::MIN))
    }

    /// End of the range at 23:59:59.
    pub fn max_date(&self) -> Option<NaiveDateTime> {
        let (_, last) = self.kind.bounds(self.date()?)?;
        last.and_hms_opt(23, 59, 59)
    }

    /// The visible range of the argument.
    pub fn range(&self) -> Result<DateRange, ArgumentError> {
        let value = self.value.as_deref().ok_or(ArgumentError::Missing)?;
        let invalid = || ArgumentError::Invalid {
            value: value.to_string(),
            granularity: self.granularity(),
        };

        let min = self.min_date().ok_or_else(invalid)?;
        let max = self.max_date().ok_or_else(invalid)?;
        DateRange::new(min, max, self.granularity())
    }

    /// Token of the preceding year, month, week or day.
    pub fn previous_token(&self) -> Option<String> {
        self.shifted_token(false)
    }

    /// Token of the following year, month, week or day.
    pub fn next_token(&self) -> Option<String> {
        self.shifted_token(true)
    }

    fn shifted_token(&self, forward: bool) -> Option<String> {
        let date = self.kind.shift(self.date()?, forward)?;
        Some(self.kind.format(date))
    }

    /// Human readable label, e.g. `March 2024` or `Friday, March 1, 2024`.
    pub fn title(&self) -> Option<String> {
        let date = self.date()?;
        let format = match self.granularity() {
            Granularity::Year => "%Y",
            Granularity::Month => "%B %Y",
            Granularity::Week => "%B %-d, %Y",
            Granularity::Day => "%A, %B %-d, %Y",
        };
        Some(date.format(format).to_string())
    }
}
