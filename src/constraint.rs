//!
//! Which dates and times can be selected.
//!
//! A date is selectable if it is within min/max, is not in the
//! list of disabled dates and the date-filter doesn't reject it.
//! All of this works at the granularity of a day.
//!
//! Times are only checked with the time-filter.
//!

use crate::adapter::DateAdapter;
use crate::grid::YearRange;
use crate::time::normalize_time_in_day;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Upper bound for the search of an enabled date in each direction.
pub const MAX_NEAREST_SEARCH_DAYS: i64 = 3660;

/// Filter function. Returns true if the date/time is disabled.
pub type DisableFn = Rc<dyn Fn(NaiveDateTime) -> bool>;

/// Constraint set for the picker.
#[derive(Clone, Default)]
pub struct DateConstraints {
    min_date: Option<NaiveDateTime>,
    max_date: Option<NaiveDateTime>,
    disabled_dates: Vec<NaiveDate>,
    date_filter: Option<DisableFn>,
    time_filter: Option<DisableFn>,
}

impl Debug for DateConstraints {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateConstraints")
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("disabled_dates", &self.disabled_dates)
            .field("date_filter", &self.date_filter.is_some())
            .field("time_filter", &self.time_filter.is_some())
            .finish()
    }
}

impl DateConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_date(mut self, date: NaiveDateTime) -> Self {
        self.min_date = Some(date);
        self
    }

    pub fn with_max_date(mut self, date: NaiveDateTime) -> Self {
        self.max_date = Some(date);
        self
    }

    pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.disabled_dates.extend(dates);
        self
    }

    pub fn with_date_filter(mut self, filter: impl Fn(NaiveDateTime) -> bool + 'static) -> Self {
        self.date_filter = Some(Rc::new(filter));
        self
    }

    pub fn with_time_filter(mut self, filter: impl Fn(NaiveDateTime) -> bool + 'static) -> Self {
        self.time_filter = Some(Rc::new(filter));
        self
    }

    pub fn min_date(&self) -> Option<NaiveDateTime> {
        self.min_date
    }

    pub fn set_min_date(&mut self, date: Option<NaiveDateTime>) {
        self.min_date = date;
    }

    pub fn max_date(&self) -> Option<NaiveDateTime> {
        self.max_date
    }

    pub fn set_max_date(&mut self, date: Option<NaiveDateTime>) {
        self.max_date = date;
    }

    pub fn disabled_dates(&self) -> &[NaiveDate] {
        &self.disabled_dates
    }

    pub fn set_disabled_dates(&mut self, dates: Vec<NaiveDate>) {
        self.disabled_dates = dates;
    }

    /// Add disabled dates given as text.
    ///
    /// Entries that can't be parsed are ignored.
    pub fn add_disabled_text<S: AsRef<str>>(
        &mut self,
        adapter: &dyn DateAdapter,
        dates: &[S],
        pattern: &str,
    ) {
        for s in dates {
            match adapter.parse(s.as_ref(), pattern) {
                Ok(v) => self.disabled_dates.push(v.date()),
                Err(e) => log::debug!("ignore disabled date {:?}: {}", s.as_ref(), e),
            }
        }
    }

    pub fn set_date_filter(&mut self, filter: impl Fn(NaiveDateTime) -> bool + 'static) {
        self.date_filter = Some(Rc::new(filter));
    }

    pub fn clear_date_filter(&mut self) {
        self.date_filter = None;
    }

    pub fn set_time_filter(&mut self, filter: impl Fn(NaiveDateTime) -> bool + 'static) {
        self.time_filter = Some(Rc::new(filter));
    }

    pub fn clear_time_filter(&mut self) {
        self.time_filter = None;
    }

    pub fn has_time_filter(&self) -> bool {
        self.time_filter.is_some()
    }

    /// Shared time-filter, used for the time-picker.
    pub fn time_filter(&self) -> Option<DisableFn> {
        self.time_filter.clone()
    }

    /// Before the min-date. Compares days, not instants.
    pub fn is_before_min(&self, date: NaiveDateTime) -> bool {
        self.min_date.is_some_and(|min| date.date() < min.date())
    }

    /// After the max-date. Compares days, not instants.
    pub fn is_after_max(&self, date: NaiveDateTime) -> bool {
        self.max_date.is_some_and(|max| date.date() > max.date())
    }

    /// Is the day of the date disabled.
    pub fn is_date_disabled(&self, date: NaiveDateTime) -> bool {
        if self.is_before_min(date) || self.is_after_max(date) {
            return true;
        }
        let day = date.date();
        if self.disabled_dates.contains(&day) {
            return true;
        }
        match &self.date_filter {
            Some(filter) => filter(day.and_time(NaiveTime::MIN)),
            None => false,
        }
    }

    /// Is this time disabled. Only the time-filter is used.
    pub fn is_time_disabled(&self, date: NaiveDateTime) -> bool {
        match &self.time_filter {
            Some(filter) => filter(date),
            None => false,
        }
    }

    /// Search for the nearest enabled date.
    ///
    /// Goes one day forward and one day back per step, the
    /// forward direction wins if both are enabled. The time of
    /// day is kept.
    ///
    /// Returns None if there is no enabled date within
    /// [MAX_NEAREST_SEARCH_DAYS] or within min/max.
    pub fn find_nearest_valid_date(
        &self,
        adapter: &dyn DateAdapter,
        date: NaiveDateTime,
    ) -> Option<NaiveDateTime> {
        for n in 1..=MAX_NEAREST_SEARCH_DAYS {
            let next = adapter.add_days(date, n);
            let prev = adapter.add_days(date, -n);

            if !self.is_date_disabled(next) {
                return Some(next);
            }
            if !self.is_date_disabled(prev) {
                return Some(prev);
            }
            if self.is_after_max(next) && self.is_before_min(prev) {
                break;
            }
        }
        log::debug!("no enabled date near {}", date);
        None
    }

    /// All days of the month are disabled.
    pub fn is_month_disabled(&self, adapter: &dyn DateAdapter, year: i32, month: u32) -> bool {
        for day in 1..=adapter.days_in_month_of(year, month) {
            if let Some(date) = adapter.create_date(year, month, day) {
                if !self.is_date_disabled(date) {
                    return false;
                }
            }
        }
        true
    }

    /// All days of the year are disabled.
    pub fn is_year_disabled(&self, adapter: &dyn DateAdapter, year: i32) -> bool {
        if let Some(min) = self.min_date {
            if adapter.get_year(min) > year {
                return true;
            }
        }
        if let Some(max) = self.max_date {
            if adapter.get_year(max) < year {
                return true;
            }
        }
        for month in 1..=12 {
            if !self.is_month_disabled(adapter, year, month) {
                return false;
            }
        }
        true
    }

    /// All years in the range are disabled.
    pub fn is_year_range_disabled(&self, adapter: &dyn DateAdapter, range: YearRange) -> bool {
        if let Some(min) = self.min_date {
            if adapter.get_year(min) > range.end {
                return true;
            }
        }
        if let Some(max) = self.max_date {
            if adapter.get_year(max) < range.start {
                return true;
            }
        }
        (range.start..=range.end).all(|year| self.is_year_disabled(adapter, year))
    }

    /// Move the date into the valid range.
    ///
    /// * Before min gives min.
    /// * After max gives max.
    /// * A disabled date gives the nearest enabled date, or the
    ///   date itself if there is none.
    ///
    /// With `with_time` the time of day of the input is kept and
    /// moved to the nearest enabled time of the same day.
    pub fn clamp_date(
        &self,
        adapter: &dyn DateAdapter,
        date: NaiveDateTime,
        with_time: bool,
    ) -> NaiveDateTime {
        if let Some(min) = self.min_date {
            if date < min {
                return min;
            }
        }
        if let Some(max) = self.max_date {
            if date > max {
                return max;
            }
        }

        let mut adjusted = date;
        if self.is_date_disabled(adjusted) {
            adjusted = self
                .find_nearest_valid_date(adapter, adjusted)
                .unwrap_or(adjusted);
        }

        if with_time {
            adjusted = adapter.apply_time(adjusted, date);
            adjusted = normalize_time_in_day(adjusted, |v| self.is_time_disabled(v)).value;
        }
        adjusted
    }
}
