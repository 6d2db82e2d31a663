use crate::picker::event::PickerOutcome;
use crate::picker::{DatePickerState, PickerCommit};
use crate::selection::{PickerSelection, SingleSelection};
use crate::PickerError;
use chrono::{NaiveDateTime, NaiveTime};
use rat_event::{flow, HandleEvent, MouseOnly, Regular};
use rat_focus::HasFocus;

impl PickerCommit for DatePickerState<SingleSelection> {
    fn commit_date(&mut self, date: NaiveDateTime) -> PickerOutcome {
        self.selection.select(date);
        self.sync_time();
        PickerOutcome::Selected
    }

    fn time_changed(&mut self, time: NaiveTime) -> PickerOutcome {
        self.on_time_change(time)
    }

    fn ok_click(&mut self) -> PickerOutcome {
        if self.show_time() && self.selection.selected().is_some() {
            let time = self.time.to_datetime().time();
            self.on_time_change(time);
        }
        if self.selection.selected().is_some() {
            PickerOutcome::Selected
        } else {
            PickerOutcome::Unchanged
        }
    }
}

impl DatePickerState<SingleSelection> {
    /// Apply a time to the value. Without a value today is used.
    pub fn on_time_change(&mut self, time: NaiveTime) -> PickerOutcome {
        let date = self
            .selection
            .selected()
            .unwrap_or_else(|| self.adapter().today());
        let date = self.clamp(date.date().and_time(time));
        if self.selection.select(date) {
            self.time.set_value(Some(date));
            PickerOutcome::Changed
        } else {
            PickerOutcome::Unchanged
        }
    }

    pub fn value(&self) -> Option<NaiveDateTime> {
        self.selection.selected()
    }

    /// Set the value from outside. The value is not emitted
    /// by [take_changed_value](Self::take_changed_value).
    pub fn set_value(&mut self, value: Option<NaiveDateTime>) {
        match value {
            Some(v) => {
                self.selection.select(v);
                self.show_date(v);
                let text = self.format_value(v);
                self.set_emitted(Some((text, None)));
            }
            None => {
                self.selection.clear();
                self.set_emitted(None);
            }
        }
        self.sync_time();
    }

    /// Set the value as text in the value calendar.
    /// Empty text clears the value.
    pub fn set_value_str(&mut self, text: &str) -> Result<(), PickerError> {
        if text.trim().is_empty() {
            self.set_value(None);
            return Ok(());
        }
        let date = self.value_adapter().parse(text.trim(), self.format())?;
        self.set_value(Some(date));
        Ok(())
    }

    /// Value formatted with the value calendar.
    pub fn value_text(&self) -> Option<String> {
        self.selection.selected().map(|v| self.format_value(v))
    }

    /// Value formatted with the display calendar.
    pub fn text(&self) -> String {
        match self.selection.selected() {
            Some(v) => self.format_date(v),
            None => String::new(),
        }
    }

    /// The value text, if it differs from the last one returned.
    pub fn take_changed_value(&mut self) -> Option<String> {
        let text = self.value_text()?;
        if self.emit_if_changed((text.clone(), None)) {
            Some(text)
        } else {
            None
        }
    }

    /// Typing in the text input. Unparsable text is ignored.
    pub fn input_changed(&mut self, text: &str) -> PickerOutcome {
        match self.parse_input(text) {
            Ok(date) => {
                if self.selection.select(date) {
                    self.show_date(date);
                    self.sync_time();
                    PickerOutcome::Changed
                } else {
                    PickerOutcome::Unchanged
                }
            }
            Err(e) => {
                log::debug!("date input {:?}: {}", text, e);
                PickerOutcome::Unchanged
            }
        }
    }

    /// The text input lost focus.
    ///
    /// Returns the corrected text if it differs from the input.
    /// Empty text clears the value with allow_empty, and becomes
    /// today otherwise.
    pub fn input_blur(&mut self, text: &str) -> Option<String> {
        if text.trim().is_empty() && self.allow_empty() {
            if self.selection.selected().is_some() {
                self.selection.clear();
                self.sync_time();
            }
            return None;
        }
        let corrected = self.validate_and_correct_input(text);
        if corrected == text {
            return None;
        }
        self.input_changed(&corrected);
        Some(corrected)
    }
}

impl HandleEvent<crossterm::event::Event, Regular, PickerOutcome>
    for DatePickerState<SingleSelection>
{
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> PickerOutcome {
        if self.show_time() {
            let r = self.time.handle(event, Regular);
            flow!(self.time_outcome(r));
        }
        if self.grid_focus.is_focused() {
            flow!(self.handle_grid_keys(event));
        }
        self.handle(event, MouseOnly)
    }
}

impl HandleEvent<crossterm::event::Event, MouseOnly, PickerOutcome>
    for DatePickerState<SingleSelection>
{
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: MouseOnly) -> PickerOutcome {
        if self.show_time() {
            let r = self.time.handle(event, MouseOnly);
            flow!(self.time_outcome(r));
        }
        self.handle_mouse(event)
    }
}
