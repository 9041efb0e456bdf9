//! Date arithmetic shared by the argument, calendar and grid modules.

mod arithmetic;
mod format;

pub use arithmetic::{
    calendar_week, difference, is_all_day, is_all_day_between, iso_weeks_in_year, month_bounds,
    week_start, DateUnit, TimeGranularity,
};
pub use format::{limit_format, DatePart};
