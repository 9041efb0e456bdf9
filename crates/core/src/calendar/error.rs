use thiserror::Error;

/// Errors that can occur when validating calendar display options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("Week start must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    WeekStartOutOfRange(u8),
    #[error("Custom groupby times cannot be empty.")]
    EmptyCustomTimes,
    #[error("Invalid day name size {0}, expected 1, 2, 3 or 99")]
    InvalidNameSize(u8),
    #[error("Invalid time {0}, expected HH:MM or HH:MM:SS")]
    InvalidTime(String),
}
