mod error;
mod explode;
mod index;
mod options;
mod types;

pub use error::OptionsError;
pub use explode::{explode, explode_all};
pub use index::EventIndex;
pub use options::{
    CalendarOptions, CalendarType, MaxItemsBehavior, MultiDayDisplay, NameSize, TimeGrouping,
};
pub use types::{CalendarEvent, Stripe};
