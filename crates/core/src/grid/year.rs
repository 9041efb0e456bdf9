use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::month::{build_mini_month, MiniMonthView};
use super::GridContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearView {
    pub year: i32,
    pub months: Vec<MiniMonthView>,
}

/// Builds twelve mini months for the year of the range.
pub fn build_year(ctx: &GridContext<'_>) -> YearView {
    let year = ctx.range.min_date().year();
    YearView {
        year,
        months: (1..=12)
            .map(|month| build_mini_month(ctx, year, month))
            .collect(),
    }
}
