//! Colour stripes that categorise events by content type or taxonomy term.

mod color;
mod stripe;

pub use color::{is_valid_color, normalize_color, EMPTY_STRIPE};
pub use stripe::{
    annotate, annotate_all, collect_legend, LegendError, LegendMode, StripeLookup,
};
