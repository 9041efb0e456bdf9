use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::{DayBucketEntry, SingleDayBucket, WeekGrid};

/// One cell of a week row as a presentation layer draws it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cell", rename_all = "snake_case")]
pub enum LayoutCell {
    DateBox {
        date: NaiveDate,
        in_range: bool,
        has_events: bool,
    },
    MultiDay {
        entry: DayBucketEntry,
    },
    Items {
        date: NaiveDate,
        bucket: SingleDayBucket,
        rowspan: usize,
    },
    /// A day outside the range, filling its whole column.
    Empty {
        date: NaiveDate,
        rowspan: usize,
    },
    /// Covered by a rowspan from above.
    Spanned,
}

/// Reads a week grid out into rows of seven cells.
///
/// The first row holds the date boxes. Multi-day rows follow, and each
/// column ends with its single-day items stretched over the rows it has left.
pub fn layout_rows(grid: &WeekGrid) -> Vec<Vec<LayoutCell>> {
    let mut rows = Vec::with_capacity(grid.total_rows + 1);
    rows.push((0..7).map(|col| date_box(grid, col)).collect());
    for index in 0..grid.total_rows {
        rows.push((0..7).map(|col| cell_at(grid, col, index)).collect());
    }
    rows
}

fn date_box(grid: &WeekGrid, col: usize) -> LayoutCell {
    let has_events = grid.multiday[col].iter().any(|entry| !entry.avail())
        || !grid.singleday[col].is_empty();
    LayoutCell::DateBox {
        date: grid.days[col],
        in_range: grid.in_range[col],
        has_events,
    }
}

fn cell_at(grid: &WeekGrid, col: usize, index: usize) -> LayoutCell {
    let date = grid.days[col];
    if !grid.in_range[col] {
        return match index {
            0 => LayoutCell::Empty {
                date,
                rowspan: grid.total_rows,
            },
            _ => LayoutCell::Spanned,
        };
    }

    let multiday = &grid.multiday[col];
    if let Some(entry) = multiday.get(index) {
        LayoutCell::MultiDay {
            entry: entry.clone(),
        }
    } else if index == multiday.len() {
        LayoutCell::Items {
            date,
            bucket: grid.singleday[col].clone(),
            rowspan: grid.total_rows - index,
        }
    } else {
        LayoutCell::Spanned
    }
}
