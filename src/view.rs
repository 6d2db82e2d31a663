//!
//! Navigation state of the date-picker.
//!
//! The picker shows one of three views. The anchor date decides
//! which month is shown in the day view and which year in the
//! month view. The year view shows the year list, a window of
//! [YEAR_PAGE] years.
//!

use crate::adapter::DateAdapter;
use crate::constraint::DateConstraints;
use crate::grid::{find_year_range, year_list, year_list_around, year_ranges, YearRange, YEAR_PAGE};
use chrono::NaiveDateTime;

/// What is selected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum PickerMode {
    #[default]
    Day,
    Month,
    Year,
}

/// What is shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum ViewMode {
    #[default]
    Days,
    Months,
    Years,
}

impl PickerMode {
    /// Initial view for the mode.
    pub fn view_mode(self) -> ViewMode {
        match self {
            PickerMode::Day => ViewMode::Days,
            PickerMode::Month => ViewMode::Months,
            PickerMode::Year => ViewMode::Years,
        }
    }
}

/// View mode, anchor date and year lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    view_mode: ViewMode,
    anchor: NaiveDateTime,
    year_list: Vec<i32>,
    year_ranges: Vec<YearRange>,
}

impl ViewState {
    pub fn new(anchor: NaiveDateTime) -> Self {
        Self {
            view_mode: ViewMode::Days,
            anchor,
            year_list: Vec::new(),
            year_ranges: Vec::new(),
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switch the view without touching the lists.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    pub fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: NaiveDateTime) {
        self.anchor = anchor;
    }

    pub fn year_list(&self) -> &[i32] {
        &self.year_list
    }

    pub fn year_ranges(&self) -> &[YearRange] {
        &self.year_ranges
    }

    /// Start fresh for the picker mode.
    pub fn reset(
        &mut self,
        adapter: &dyn DateAdapter,
        mode: PickerMode,
        anchor: NaiveDateTime,
        today: NaiveDateTime,
    ) {
        self.anchor = anchor;
        match mode {
            PickerMode::Day => {
                self.view_mode = ViewMode::Days;
            }
            PickerMode::Month => {
                self.show_months(adapter, anchor);
            }
            PickerMode::Year => {
                self.show_years(adapter, anchor, today);
            }
        }
    }

    /// Month view. The year list is centered on `focus`.
    ///
    /// Returns the year to scroll to.
    pub fn show_months(&mut self, adapter: &dyn DateAdapter, focus: NaiveDateTime) -> i32 {
        self.view_mode = ViewMode::Months;
        let year = adapter.get_year(focus);
        self.year_list = year_list_around(year, YEAR_PAGE as usize);
        year
    }

    /// Year view. The year ranges are centered on today, the year
    /// list is the range that contains `focus`.
    ///
    /// Returns the start of the year list to scroll to.
    pub fn show_years(
        &mut self,
        adapter: &dyn DateAdapter,
        focus: NaiveDateTime,
        today: NaiveDateTime,
    ) -> i32 {
        self.view_mode = ViewMode::Years;
        self.year_ranges = year_ranges(adapter.get_year(today), YEAR_PAGE as usize);

        let year = adapter.get_year(focus);
        let start = match find_year_range(&self.year_ranges, year) {
            Some(idx) => self.year_ranges[idx].start,
            None => year,
        };
        self.year_list = year_list(start, YEAR_PAGE as usize);
        start
    }

    /// Show the years of one range.
    pub fn select_year_range(&mut self, start: i32) {
        self.year_list = year_list(start, YEAR_PAGE as usize);
        self.view_mode = ViewMode::Years;
    }

    /// Is the year list the one starting with `start`.
    pub fn is_active_year_range(&self, start: i32) -> bool {
        self.year_list.first() == Some(&start)
    }

    fn first_year(&self) -> i32 {
        self.year_list.first().copied().unwrap_or_default()
    }

    fn last_year(&self) -> i32 {
        self.year_list.last().copied().unwrap_or_default()
    }

    /// Page back. One month, one year or one year list.
    /// Nothing happens if the page is before the min-date.
    ///
    /// Returns the id of the item to scroll to. That's the month
    /// in the day view and the year otherwise.
    pub fn go_prev(
        &mut self,
        adapter: &dyn DateAdapter,
        constraints: &DateConstraints,
    ) -> Option<i32> {
        if self.is_prev_disabled(adapter, constraints) {
            return None;
        }
        match self.view_mode {
            ViewMode::Days => self.prev_month(adapter, constraints).map(|v| v as i32),
            ViewMode::Months => {
                self.anchor = adapter.add_years(self.anchor, -1);
                Some(adapter.get_year(self.anchor))
            }
            ViewMode::Years => {
                let start = self.first_year() - YEAR_PAGE;
                self.year_list = year_list(start, YEAR_PAGE as usize);
                Some(start)
            }
        }
    }

    /// Page forward. One month, one year or one year list.
    /// Nothing happens if the page is after the max-date.
    ///
    /// Returns the id of the item to scroll to.
    pub fn go_next(
        &mut self,
        adapter: &dyn DateAdapter,
        constraints: &DateConstraints,
    ) -> Option<i32> {
        if self.is_next_disabled(adapter, constraints) {
            return None;
        }
        match self.view_mode {
            ViewMode::Days => self.next_month(adapter, constraints).map(|v| v as i32),
            ViewMode::Months => {
                self.anchor = adapter.add_years(self.anchor, 1);
                Some(adapter.get_year(self.anchor))
            }
            ViewMode::Years => {
                let start = self.last_year() + 1;
                self.year_list = year_list(start, YEAR_PAGE as usize);
                Some(start)
            }
        }
    }

    /// Previous month, unless it's completely before the min-date.
    /// Returns the new month.
    pub fn prev_month(
        &mut self,
        adapter: &dyn DateAdapter,
        constraints: &DateConstraints,
    ) -> Option<u32> {
        if self.is_prev_disabled(adapter, constraints) {
            return None;
        }
        self.anchor = adapter.add_months(self.anchor, -1);
        Some(adapter.get_month(self.anchor))
    }

    /// Next month, unless it's completely after the max-date.
    /// Returns the new month.
    pub fn next_month(
        &mut self,
        adapter: &dyn DateAdapter,
        constraints: &DateConstraints,
    ) -> Option<u32> {
        if self.is_next_disabled(adapter, constraints) {
            return None;
        }
        self.anchor = adapter.add_months(self.anchor, 1);
        Some(adapter.get_month(self.anchor))
    }

    /// Would paging back only show dates before the min-date.
    pub fn is_prev_disabled(
        &self,
        adapter: &dyn DateAdapter,
        constraints: &DateConstraints,
    ) -> bool {
        let Some(min) = constraints.min_date() else {
            return false;
        };
        match self.view_mode {
            ViewMode::Days => {
                let prev_end = adapter.add_days(adapter.start_of_month(self.anchor), -1);
                prev_end.date() < min.date()
            }
            ViewMode::Months => adapter.get_year(min) > adapter.get_year(self.anchor) - 1,
            ViewMode::Years => adapter.get_year(min) >= self.first_year(),
        }
    }

    /// Would paging forward only show dates after the max-date.
    pub fn is_next_disabled(
        &self,
        adapter: &dyn DateAdapter,
        constraints: &DateConstraints,
    ) -> bool {
        let Some(max) = constraints.max_date() else {
            return false;
        };
        match self.view_mode {
            ViewMode::Days => {
                let next_start = adapter.add_days(adapter.end_of_month(self.anchor), 1);
                next_start.date() > max.date()
            }
            ViewMode::Months => adapter.get_year(max) < adapter.get_year(self.anchor) + 1,
            ViewMode::Years => adapter.get_year(max) <= self.last_year(),
        }
    }

    /// Move the anchor inside min/max.
    /// Returns true if the anchor changed.
    pub fn adjust_to_valid_range(&mut self, constraints: &DateConstraints) -> bool {
        let mut adjusted = self.anchor;
        if let Some(min) = constraints.min_date() {
            if adjusted < min {
                adjusted = min;
            }
        }
        if let Some(max) = constraints.max_date() {
            if adjusted > max {
                adjusted = max;
            }
        }
        if adjusted.date() != self.anchor.date() {
            self.anchor = adjusted;
            true
        } else {
            false
        }
    }
}
