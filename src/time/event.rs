use rat_event::{ConsumedEvent, Outcome};

/// Result of event handling for the time-picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimeOutcome {
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
    /// One of the hour/minute/second/period columns changed.
    Selected,
    /// A new value has been saved. Read it with
    /// [TimePickerState::value](crate::time::TimePickerState::value).
    Saved,
}

impl ConsumedEvent for TimeOutcome {
    fn is_consumed(&self) -> bool {
        *self != TimeOutcome::Continue
    }
}

impl From<bool> for TimeOutcome {
    fn from(value: bool) -> Self {
        if value {
            TimeOutcome::Changed
        } else {
            TimeOutcome::Unchanged
        }
    }
}

impl From<Outcome> for TimeOutcome {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Continue => TimeOutcome::Continue,
            Outcome::Unchanged => TimeOutcome::Unchanged,
            Outcome::Changed => TimeOutcome::Changed,
        }
    }
}

impl From<TimeOutcome> for Outcome {
    fn from(value: TimeOutcome) -> Self {
        match value {
            TimeOutcome::Continue => Outcome::Continue,
            TimeOutcome::Unchanged => Outcome::Unchanged,
            TimeOutcome::Changed => Outcome::Changed,
            TimeOutcome::Selected => Outcome::Changed,
            TimeOutcome::Saved => Outcome::Changed,
        }
    }
}
