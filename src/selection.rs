//!
//! Selection models for the picker.
//!
//! [SingleSelection] just holds one value. [RangeSelection] is a
//! small state machine that goes from empty to start-only to
//! complete with each selected date.
//!

use chrono::NaiveDateTime;

/// Selection model for a date picker.
pub trait PickerSelection {
    /// Clear all selections.
    fn clear(&mut self);

    /// Number of selected endpoints.
    fn count(&self) -> usize;

    /// Is the given day one of the selected days.
    fn is_selected(&self, date: NaiveDateTime) -> bool;

    /// The day lies inside a range, but is not an endpoint.
    fn is_in_range(&self, date: NaiveDateTime) -> bool;

    /// The value the time-picker edits.
    fn lead_selection(&self) -> Option<NaiveDateTime>;

    /// Lead selection, or any other selected date.
    fn any_selected(&self) -> Option<NaiveDateTime>;

    /// Is this a range selection.
    fn is_range(&self) -> bool;
}

/// Which end of a range is edited next.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum ActiveEndpoint {
    #[default]
    Start,
    End,
}

/// A completed or partial range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

/// Result of [RangeSelection::select].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStep {
    /// A new range has been started. End is cleared.
    Started,
    /// The range is complete.
    Completed,
}

/// Single date.
#[derive(Debug, Default, Clone)]
pub struct SingleSelection {
    selected: Option<NaiveDateTime>,
}

impl PickerSelection for SingleSelection {
    fn clear(&mut self) {
        self.selected = None;
    }

    fn count(&self) -> usize {
        if self.selected.is_some() {
            1
        } else {
            0
        }
    }

    fn is_selected(&self, date: NaiveDateTime) -> bool {
        self.selected.is_some_and(|v| v.date() == date.date())
    }

    fn is_in_range(&self, _date: NaiveDateTime) -> bool {
        false
    }

    fn lead_selection(&self) -> Option<NaiveDateTime> {
        self.selected
    }

    fn any_selected(&self) -> Option<NaiveDateTime> {
        self.selected
    }

    fn is_range(&self) -> bool {
        false
    }
}

impl SingleSelection {
    /// Returns true if the value changed.
    pub fn select(&mut self, date: NaiveDateTime) -> bool {
        let old = self.selected;
        self.selected = Some(date);
        old != self.selected
    }

    pub fn selected(&self) -> Option<NaiveDateTime> {
        self.selected
    }
}

/// Start and end date.
///
/// If both are set, start <= end holds.
#[derive(Debug, Default, Clone)]
pub struct RangeSelection {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    /// Which endpoint the time-picker edits.
    active: ActiveEndpoint,
    /// Preview end while the mouse hovers after the start.
    hover: Option<NaiveDateTime>,
}

impl PickerSelection for RangeSelection {
    fn clear(&mut self) {
        self.start = None;
        self.end = None;
        self.hover = None;
        self.active = ActiveEndpoint::Start;
    }

    fn count(&self) -> usize {
        self.start.is_some() as usize + self.end.is_some() as usize
    }

    fn is_selected(&self, date: NaiveDateTime) -> bool {
        self.is_range_start(date) || self.is_range_end(date)
    }

    fn is_in_range(&self, date: NaiveDateTime) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let Some(end) = self.end.or(self.hover) else {
            return false;
        };
        date.date() > start.date() && date.date() < end.date()
    }

    fn lead_selection(&self) -> Option<NaiveDateTime> {
        match self.active {
            ActiveEndpoint::Start => self.start,
            ActiveEndpoint::End => self.end,
        }
    }

    fn any_selected(&self) -> Option<NaiveDateTime> {
        self.lead_selection().or(self.start).or(self.end)
    }

    fn is_range(&self) -> bool {
        true
    }
}

impl RangeSelection {
    /// Feed a date into the state machine.
    ///
    /// * No start, a complete range, or a date before the
    ///   start begin a new range.
    /// * Otherwise the date becomes the end.
    pub fn select(&mut self, date: NaiveDateTime) -> RangeStep {
        self.hover = None;
        match (self.start, self.end) {
            (Some(start), None) if date >= start => {
                self.end = Some(date);
                RangeStep::Completed
            }
            _ => {
                self.start = Some(date);
                self.end = None;
                RangeStep::Started
            }
        }
    }

    /// Set both ends. Swaps them if necessary.
    pub fn set_range(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        let old = (self.start, self.end);
        if end < start {
            self.start = Some(end);
            self.end = Some(start);
        } else {
            self.start = Some(start);
            self.end = Some(end);
        }
        self.hover = None;
        old != (self.start, self.end)
    }

    /// Set the start. Clears the end if it would be before the start.
    pub fn set_start(&mut self, start: Option<NaiveDateTime>) -> bool {
        let old = (self.start, self.end);
        self.start = start;
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                self.end = None;
            }
        }
        old != (self.start, self.end)
    }

    /// Set the end. An end before the start is ignored.
    pub fn set_end(&mut self, end: Option<NaiveDateTime>) -> bool {
        let old = self.end;
        match (self.start, end) {
            (Some(start), Some(end)) if end < start => {}
            (None, Some(_)) => {}
            _ => self.end = end,
        }
        old != self.end
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    /// Range if at least the start is set.
    pub fn range(&self) -> Option<DateRange> {
        self.start.map(|start| DateRange {
            start,
            end: self.end,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn active(&self) -> ActiveEndpoint {
        self.active
    }

    pub fn set_active(&mut self, active: ActiveEndpoint) {
        self.active = active;
    }

    /// Preview end, only used while start is set and end is not.
    pub fn set_hover(&mut self, date: Option<NaiveDateTime>) -> bool {
        let old = self.hover;
        if self.start.is_some() && self.end.is_none() {
            self.hover = date;
        } else {
            self.hover = None;
        }
        old != self.hover
    }

    pub fn hover(&self) -> Option<NaiveDateTime> {
        self.hover
    }

    pub fn is_range_start(&self, date: NaiveDateTime) -> bool {
        self.start.is_some_and(|v| v.date() == date.date())
    }

    pub fn is_range_end(&self, date: NaiveDateTime) -> bool {
        self.end.is_some_and(|v| v.date() == date.date())
    }
}
