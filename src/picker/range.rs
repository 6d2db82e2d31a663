use crate::picker::event::PickerOutcome;
use crate::picker::{default_presets, DatePickerState, PickerCommit, PresetValue};
use crate::selection::{ActiveEndpoint, DateRange, PickerSelection, RangeSelection, RangeStep};
use crate::PickerError;
use chrono::{NaiveDateTime, NaiveTime};
use rat_event::util::item_at;
use rat_event::{ct_event, flow, HandleEvent, MouseOnly, Regular};
use rat_focus::HasFocus;
use std::time::{Duration, Instant};

impl PickerCommit for DatePickerState<RangeSelection> {
    fn commit_date(&mut self, date: NaiveDateTime) -> PickerOutcome {
        self.debounce.cancel();
        let r = match self.selection.select(date) {
            RangeStep::Started => {
                if !self.show_time {
                    self.selection.set_active(ActiveEndpoint::End);
                } else {
                    self.selection.set_active(ActiveEndpoint::Start);
                }
                PickerOutcome::RangeStarted
            }
            RangeStep::Completed => {
                if self.show_time {
                    self.selection.set_active(ActiveEndpoint::End);
                }
                PickerOutcome::Selected
            }
        };
        self.sync_time();
        r
    }

    fn time_changed(&mut self, time: NaiveTime) -> PickerOutcome {
        self.on_time_change(time, Instant::now())
    }

    fn ok_click(&mut self) -> PickerOutcome {
        self.debounce.flush();
        if self.selection.is_complete() {
            PickerOutcome::Selected
        } else {
            PickerOutcome::Unchanged
        }
    }
}

impl DatePickerState<RangeSelection> {
    /// Which endpoint the time-picker edits.
    pub fn set_active(&mut self, active: ActiveEndpoint) -> bool {
        let old = self.selection.active();
        self.selection.set_active(active);
        self.sync_time();
        old != active
    }

    pub fn active(&self) -> ActiveEndpoint {
        self.selection.active()
    }

    /// Preview of the range while the end is still open.
    pub fn set_hover(&mut self, date: Option<NaiveDateTime>) -> bool {
        let date = date.filter(|v| !self.is_date_disabled(*v));
        self.selection.set_hover(date)
    }

    /// Apply a time to the active endpoint.
    ///
    /// A start change is available immediately, an end change is
    /// held back until [poll_debounce](Self::poll_debounce) yields it.
    /// A time that would put the end before the start is ignored.
    pub fn on_time_change(&mut self, time: NaiveTime, now: Instant) -> PickerOutcome {
        match self.selection.active() {
            ActiveEndpoint::Start => {
                let base = self
                    .selection
                    .start()
                    .unwrap_or_else(|| self.adapter().today());
                let date = self.clamp(base.date().and_time(time));
                if self.selection.end().is_some_and(|end| date > end) {
                    log::debug!("start time {} after end", date);
                    return PickerOutcome::Unchanged;
                }
                if self.selection.set_start(Some(date)) {
                    self.time.set_value(Some(date));
                    PickerOutcome::Changed
                } else {
                    PickerOutcome::Unchanged
                }
            }
            ActiveEndpoint::End => {
                let Some(start) = self.selection.start() else {
                    return PickerOutcome::Unchanged;
                };
                let base = self.selection.end().unwrap_or(start);
                let date = self.clamp(base.date().and_time(time));
                if date < start {
                    log::debug!("end time {} before start", date);
                    return PickerOutcome::Unchanged;
                }
                if self.selection.set_end(Some(date)) {
                    self.time.set_value(Some(date));
                    self.debounce.schedule(
                        DateRange {
                            start,
                            end: Some(date),
                        },
                        now,
                    );
                    PickerOutcome::Changed
                } else {
                    PickerOutcome::Unchanged
                }
            }
        }
    }

    /// Pending end-time change, once the delay has passed.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<DateRange> {
        self.debounce.poll(now)
    }

    /// Time until [poll_debounce](Self::poll_debounce) yields
    /// something.
    pub fn debounce_sleep(&self, now: Instant) -> Option<Duration> {
        self.debounce.sleep_time(now)
    }

    /// Delay of the end-time debounce.
    pub fn set_debounce_delay(&mut self, delay: Duration) {
        self.debounce = crate::debounce::Debounce::new(delay);
    }

    /// Start and end.
    pub fn value(&self) -> Option<DateRange> {
        self.selection.range()
    }

    /// Set the range from outside. The range is not emitted by
    /// [take_changed_value](Self::take_changed_value).
    pub fn set_value(&mut self, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) {
        self.debounce.cancel();
        match (start, end) {
            (Some(start), Some(end)) => {
                self.selection.set_range(start, end);
            }
            (start, _) => {
                self.selection.clear();
                self.selection.set_start(start);
            }
        }
        if let Some(start) = self.selection.start() {
            self.show_date(start);
        }
        let emitted = self.range_text();
        self.set_emitted(emitted);
        self.sync_time();
    }

    /// Set the range as text in the value calendar.
    /// Empty text leaves the endpoint empty.
    pub fn set_value_str(&mut self, start: &str, end: &str) -> Result<(), PickerError> {
        let parse = |text: &str| -> Result<Option<NaiveDateTime>, PickerError> {
            if text.trim().is_empty() {
                Ok(None)
            } else {
                Ok(Some(self.value_adapter().parse(text.trim(), self.format())?))
            }
        };
        let start = parse(start)?;
        let end = parse(end)?;
        self.set_value(start, end);
        Ok(())
    }

    fn range_text(&self) -> Option<(String, Option<String>)> {
        let start = self.selection.start()?;
        Some((
            self.format_value(start),
            self.selection.end().map(|v| self.format_value(v)),
        ))
    }

    /// Start and end formatted with the value calendar.
    pub fn value_text(&self) -> Option<(String, Option<String>)> {
        self.range_text()
    }

    /// Text of one endpoint formatted with the display calendar.
    pub fn text(&self, endpoint: ActiveEndpoint) -> String {
        let date = match endpoint {
            ActiveEndpoint::Start => self.selection.start(),
            ActiveEndpoint::End => self.selection.end(),
        };
        match date {
            Some(v) => self.format_date(v),
            None => String::new(),
        }
    }

    /// The range text, if the range is complete, no end-time
    /// change is pending and it differs from the last one returned.
    pub fn take_changed_value(&mut self) -> Option<(String, String)> {
        if self.debounce.is_pending() {
            return None;
        }
        let (start, end) = self.range_text()?;
        let end = end?;
        if self.emit_if_changed((start.clone(), Some(end.clone()))) {
            Some((start, end))
        } else {
            None
        }
    }

    /// Typing in one of the text inputs. Unparsable text is ignored.
    pub fn input_changed(&mut self, text: &str, endpoint: ActiveEndpoint) -> PickerOutcome {
        let date = match self.parse_input(text) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("date input {:?}: {}", text, e);
                return PickerOutcome::Unchanged;
            }
        };
        let changed = match endpoint {
            ActiveEndpoint::Start => self.selection.set_start(Some(date)),
            ActiveEndpoint::End => self.selection.set_end(Some(date)),
        };
        if changed {
            self.debounce.cancel();
            self.selection.set_active(endpoint);
            self.show_date(date);
            self.sync_time();
            PickerOutcome::Changed
        } else {
            PickerOutcome::Unchanged
        }
    }

    /// One of the text inputs lost focus.
    ///
    /// Returns the corrected text if it differs from the input.
    pub fn input_blur(&mut self, text: &str, endpoint: ActiveEndpoint) -> Option<String> {
        if text.trim().is_empty() && self.allow_empty() {
            let changed = match endpoint {
                ActiveEndpoint::Start => {
                    let had = self.selection.start().is_some();
                    self.selection.clear();
                    had
                }
                ActiveEndpoint::End => self.selection.set_end(None),
            };
            if changed {
                self.sync_time();
            }
            return None;
        }
        let corrected = self.validate_and_correct_input(text);
        if corrected == text {
            return None;
        }
        self.input_changed(&corrected, endpoint);
        Some(corrected)
    }

    /// Reset the presets to last day, last week, last month and
    /// custom with the labels of the locale.
    pub fn reset_presets(&mut self) {
        let presets = default_presets(self.adapter());
        self.set_presets(presets);
    }

    /// Select a preset range. The range is clamped to the
    /// constraints. The custom preset only marks itself.
    pub fn select_preset(&mut self, idx: usize) -> PickerOutcome {
        let Some(preset) = self.presets.get(idx) else {
            return PickerOutcome::Unchanged;
        };
        match preset.value {
            PresetValue::Custom => {
                self.selected_preset = Some(idx);
                PickerOutcome::Changed
            }
            PresetValue::Range(start, end) => {
                let start = self.clamp(start);
                let end = self.clamp(end);
                self.debounce.cancel();
                self.selected_preset = Some(idx);
                self.selection.set_range(start, end);
                self.selection.set_active(ActiveEndpoint::End);
                self.show_date(start);
                self.sync_time();
                PickerOutcome::Selected
            }
        }
    }

    /// The preset matches the range at the granularity of a day.
    pub fn is_active_preset(&self, idx: usize) -> bool {
        self.preset_matches(idx, self.selection.start(), self.selection.end())
    }

    fn handle_range_mouse(&mut self, event: &crossterm::event::Event) -> PickerOutcome {
        match event {
            ct_event!(mouse any for m) if self.mouse.hover(&self.area_days, m) => {
                let date = self.mouse.hover.get().map(|n| self.days()[n]);
                self.set_hover(date).into()
            }
            ct_event!(mouse down Left for x, y) => match item_at(&self.area_presets, *x, *y) {
                Some(n) => self.select_preset(n),
                None => PickerOutcome::Continue,
            },
            _ => PickerOutcome::Continue,
        }
    }
}

impl HandleEvent<crossterm::event::Event, Regular, PickerOutcome>
    for DatePickerState<RangeSelection>
{
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> PickerOutcome {
        if self.show_time() {
            let r = self.time.handle(event, Regular);
            flow!(self.time_outcome(r));
        }
        if self.grid_focus.is_focused() {
            flow!(match event {
                ct_event!(keycode press Esc) if self.selection.hover().is_some() => {
                    self.set_hover(None).into()
                }
                _ => self.handle_grid_keys(event),
            });
        }
        self.handle(event, MouseOnly)
    }
}

impl HandleEvent<crossterm::event::Event, MouseOnly, PickerOutcome>
    for DatePickerState<RangeSelection>
{
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: MouseOnly) -> PickerOutcome {
        if self.show_time() {
            let r = self.time.handle(event, MouseOnly);
            flow!(self.time_outcome(r));
        }
        flow!(self.handle_range_mouse(event));
        self.handle_mouse(event)
    }
}
