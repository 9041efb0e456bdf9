//! Pure calendar grid logic - no I/O, no logging, no side effects.
//!
//! This crate provides:
//! - Date arithmetic: differences, ISO and calendar weeks, all-day checks
//! - Date argument tokens and the ranges they describe
//! - Event explode/index and display options
//! - Week, month, year and day grids
//! - Colour stripes and legends
//!
//! # Example
//!
//! ```
//! use calgrid_core::argument::{DateArgument, DateTokenKind};
//! use calgrid_core::calendar::{CalendarEvent, CalendarOptions};
//! use calgrid_core::grid::{build_calendar, CalendarView};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap().and_hms_opt(15, 0, 0).unwrap();
//! let events = vec![CalendarEvent::new("trip", start, end)];
//!
//! let argument = DateArgument::new(DateTokenKind::YearMonth).with_value("202403");
//! let view = build_calendar(&argument, &events, &CalendarOptions::default()).unwrap();
//!
//! let CalendarView::Month(month) = view else { panic!("expected a month") };
//! assert_eq!(month.weeks[1].grid.multiday[0][0].colspan(), 3);
//! ```

pub mod argument;
pub mod calendar;
pub mod datetime;
pub mod grid;
pub mod legend;
pub mod serde;
