//! Calendar rendering for hosts.
//!
//! Wraps the pure grid builders of `calgrid_core` with the parts that touch
//! the outside world: parsing host rows, loading configuration and logging.
//!
//! ```
//! use calgrid::{CalendarRenderer, EventRow};
//! use calgrid_core::calendar::CalendarOptions;
//! use chrono::NaiveDate;
//!
//! let renderer = CalendarRenderer::new(CalendarOptions::default()).unwrap();
//! let argument = renderer.default_argument(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
//!
//! let rows = vec![EventRow::new("1", "2024-03-15 09:00:00")];
//! let output = renderer.render(&argument, rows);
//!
//! assert!(output.is_valid());
//! assert_eq!(output.title.as_deref(), Some("March 2024"));
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod rows;

pub use config::Config;
pub use error::{RenderError, Result, RowError};
pub use render::{CalendarRenderer, Pager, RenderOutput};
pub use rows::{normalize_rows, parse_datetime, EventRow};
