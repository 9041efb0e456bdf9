//! Week, month, year and day grids.
//!
//! A [`WeekGrid`] is built per seven-day row: events spanning several days
//! go into column-spanning multi-day rows, the rest into per-day buckets
//! keyed by time slot. Month and year views are assembled from week rows.

mod day;
mod header;
mod layout;
mod month;
mod types;
mod view;
mod week;
mod year;

pub use day::{build_day, DayView};
pub use header::{week_header, WeekdayHeader};
pub use layout::{layout_rows, LayoutCell};
pub use month::{build_mini_month, build_month, MiniMonthView, MiniWeek, MonthView, MonthWeek, WeekNumber};
pub use types::{DayBucketEntry, MoreLink, PlacedEvent, SingleDayBucket, WeekGrid};
pub use view::{build_calendar, build_view, CalendarView, GridContext};
pub use week::{build_week, build_week_view, WeekView};
pub use year::{build_year, YearView};
