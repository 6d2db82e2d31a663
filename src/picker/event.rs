use rat_event::{ConsumedEvent, Outcome};

/// Result of event handling for the date-picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PickerOutcome {
    /// The given event has not been used at all.
    Continue,
    /// The event has been recognized, but the result was nil.
    /// Further processing for this event may stop.
    Unchanged,
    /// The event has been recognized and there is some change
    /// due to it.
    /// Further processing for this event may stop.
    /// Rendering the ui is advised.
    Changed,
    /// A range has been started, the end is still open.
    RangeStarted,
    /// A date has been selected or a range has been completed.
    Selected,
}

impl ConsumedEvent for PickerOutcome {
    fn is_consumed(&self) -> bool {
        *self != PickerOutcome::Continue
    }
}

impl From<bool> for PickerOutcome {
    fn from(value: bool) -> Self {
        if value {
            PickerOutcome::Changed
        } else {
            PickerOutcome::Unchanged
        }
    }
}

impl From<Outcome> for PickerOutcome {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Continue => PickerOutcome::Continue,
            Outcome::Unchanged => PickerOutcome::Unchanged,
            Outcome::Changed => PickerOutcome::Changed,
        }
    }
}

impl From<PickerOutcome> for Outcome {
    fn from(value: PickerOutcome) -> Self {
        match value {
            PickerOutcome::Continue => Outcome::Continue,
            PickerOutcome::Unchanged => Outcome::Unchanged,
            PickerOutcome::Changed => Outcome::Changed,
            PickerOutcome::RangeStarted => Outcome::Changed,
            PickerOutcome::Selected => Outcome::Changed,
        }
    }
}
