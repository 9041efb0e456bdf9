use chrono::NaiveDateTime;
use thiserror::Error;

use super::Granularity;

/// Errors raised while turning a date argument into a range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("No calendar date argument value was provided.")]
    Missing,
    #[error("The value {value} is not a valid date argument for {granularity}")]
    Invalid {
        value: String,
        granularity: Granularity,
    },
    #[error("Range start {min} is after range end {max}")]
    InvertedRange {
        min: NaiveDateTime,
        max: NaiveDateTime,
    },
}
