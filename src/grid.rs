//!
//! Calendar grids.
//!
//! The day grid always has 6 weeks, starting with the week that
//! contains the first of the month. The year lists come in
//! blocks of [YEAR_PAGE] years.
//!

use crate::adapter::DateAdapter;
use chrono::NaiveDateTime;

/// Days in the day grid.
pub const GRID_DAYS: usize = 42;
/// Years per page of the year list.
pub const YEAR_PAGE: i32 = 15;

/// A block of years, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32) -> Self {
        Self {
            start,
            end: start + YEAR_PAGE - 1,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}

/// The 42 days shown for the month of the anchor date.
pub fn day_grid(adapter: &dyn DateAdapter, anchor: NaiveDateTime) -> [NaiveDateTime; GRID_DAYS] {
    let first = adapter.start_of_month(anchor);
    let start = adapter.start_of_week(first);
    std::array::from_fn(|i| adapter.add_days(start, i as i64))
}

/// Months of a year, 1-based.
pub fn month_list() -> [u32; 12] {
    std::array::from_fn(|i| i as u32 + 1)
}

/// `len` consecutive years starting at `start`.
pub fn year_list(start: i32, len: usize) -> Vec<i32> {
    (0..len as i32).map(|i| start + i).collect()
}

/// Year list around a year. Used by the month-view sidebar.
pub fn year_list_around(year: i32, len: usize) -> Vec<i32> {
    let half = (len as f64 / 2.0).round() as i32;
    year_list(year - half, len)
}

/// `count` consecutive year ranges, the middle one contains
/// the given year.
///
/// The ranges are aligned to the year, not to any fixed
/// raster: the center range starts 7 years before `year`.
pub fn year_ranges(year: i32, count: usize) -> Vec<YearRange> {
    let start = year - YEAR_PAGE / 2 - YEAR_PAGE * (count as i32 / 2);
    (0..count as i32)
        .map(|i| YearRange::new(start + i * YEAR_PAGE))
        .collect()
}

/// Index of the range containing the year.
pub fn find_year_range(ranges: &[YearRange], year: i32) -> Option<usize> {
    ranges.iter().position(|v| v.contains(year))
}
