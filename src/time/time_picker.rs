use crate::_private::NonExhaustive;
use crate::adapter::format::{has_24h_clock, has_seconds};
use crate::adapter::{CalendarType, DateAdapter};
use crate::constraint::DisableFn;
use crate::debounce::Deferred;
use crate::time::event::TimeOutcome;
use crate::time::style::TimePickerStyle;
use crate::time::{nearest_time_slot, Period, TimeConfig, TimeFormat};
use crate::util::{block_size, revert_style};
use crate::PickerError;
use chrono::{NaiveDateTime, NaiveTime};
use rat_event::util::{item_at, MouseFlagsN};
use rat_event::{ct_event, flow, HandleEvent, MouseOnly, Regular};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use rat_reloc::{relocate_area, relocate_areas, RelocatableState};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
#[cfg(feature = "unstable-widget-ref")]
use ratatui::widgets::StatefulWidgetRef;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Default display format of the time-picker.
pub const DEFAULT_TIME_FORMAT: &str = "hh:mm a";

/// Renders hour, minute, second and am/pm columns.
#[derive(Debug, Default, Clone)]
pub struct TimePicker<'a> {
    style: Style,
    header_style: Option<Style>,
    item_style: Option<Style>,
    select_style: Option<Style>,
    focus_style: Option<Style>,
    disabled_style: Option<Style>,
    show_header: bool,
    block: Option<Block<'a>>,
}

/// Columns of the time-picker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeColumn {
    #[default]
    Hour,
    Minute,
    Second,
    Period,
}

/// State & event-handling.
pub struct TimePickerState {
    /// Total area.
    /// __readonly__. renewed for each render.
    pub area: Rect,
    /// Area inside the border.
    /// __readonly__. renewed for each render.
    pub inner: Rect,
    /// Header with the formatted time.
    /// __readonly__. renewed for each render.
    pub area_header: Rect,
    /// Visible hour items.
    /// __readonly__. renewed for each render.
    pub area_hours: Vec<Rect>,
    /// Visible minute items.
    /// __readonly__. renewed for each render.
    pub area_minutes: Vec<Rect>,
    /// Visible second items.
    /// __readonly__. renewed for each render.
    pub area_seconds: Vec<Rect>,
    /// AM and PM.
    /// __readonly__. renewed for each render.
    pub area_periods: Vec<Rect>,
    /// Columns in the order hour, minute, second, period.
    /// __readonly__. renewed for each render.
    pub area_columns: [Rect; 4],

    /// First visible item of the hour, minute and second column.
    /// __read+write__
    pub offset: [usize; 3],
    /// Column for keyboard navigation.
    /// __read+write__
    pub column: TimeColumn,

    adapter: Rc<dyn DateAdapter>,
    pattern: String,
    time_format: TimeFormat,
    show_seconds: bool,

    selected: TimeConfig,
    base_date: NaiveDateTime,
    value: Option<NaiveDateTime>,

    min_time: Option<NaiveTime>,
    max_time: Option<NaiveTime>,
    time_filter: Option<DisableFn>,

    /// Save on every change of a column.
    inline: bool,
    allow_empty: bool,
    scroll: Deferred<()>,

    /// Focus
    /// __read+write__
    pub focus: FocusFlag,
    /// Mouse flags
    /// __read+write__
    pub mouse: MouseFlagsN,

    pub non_exhaustive: NonExhaustive,
}

impl<'a> TimePicker<'a> {
    pub fn new() -> Self {
        Self {
            show_header: true,
            ..Default::default()
        }
    }

    /// Set the composite style.
    #[inline]
    pub fn styles(mut self, s: TimePickerStyle) -> Self {
        self.style = s.style;
        if s.header.is_some() {
            self.header_style = s.header;
        }
        if s.item.is_some() {
            self.item_style = s.item;
        }
        if s.select.is_some() {
            self.select_style = s.select;
        }
        if s.focus.is_some() {
            self.focus_style = s.focus;
        }
        if s.disabled.is_some() {
            self.disabled_style = s.disabled;
        }
        if s.block.is_some() {
            self.block = s.block;
        }
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    #[inline]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    #[inline]
    pub fn select_style(mut self, style: Style) -> Self {
        self.select_style = Some(style);
        self
    }

    #[inline]
    pub fn focus_style(mut self, style: Style) -> Self {
        self.focus_style = Some(style);
        self
    }

    #[inline]
    pub fn disabled_style(mut self, style: Style) -> Self {
        self.disabled_style = Some(style);
        self
    }

    /// Border style of the block.
    #[inline]
    pub fn border_style(mut self, style: Style) -> Self {
        self.block = self.block.map(|v| v.border_style(style));
        self
    }

    /// Show the formatted time above the columns.
    #[inline]
    pub fn show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    #[inline]
    pub fn block(mut self, b: Block<'a>) -> Self {
        self.block = Some(b);
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Inherent width of the widget.
    pub fn width(&self, state: &TimePickerState) -> u16 {
        let mut w = 4 + 4;
        if state.show_seconds {
            w += 4;
        }
        if state.time_format == TimeFormat::H12 {
            w += 5;
        }
        w + block_size(&self.block).width
    }
}

#[cfg(feature = "unstable-widget-ref")]
impl<'a> StatefulWidgetRef for TimePicker<'a> {
    type State = TimePickerState;

    fn render_ref(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl StatefulWidget for TimePicker<'_> {
    type State = TimePickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

fn render_ref(widget: &TimePicker<'_>, area: Rect, buf: &mut Buffer, state: &mut TimePickerState) {
    state.area = area;

    let block = widget.block.clone().unwrap_or_else(|| Block::new().style(widget.style));
    state.inner = block.inner(area);
    block.render(area, buf);

    let focus_style = widget.focus_style.unwrap_or(revert_style(widget.style));
    let select_style = widget.select_style.unwrap_or(revert_style(widget.style));
    let item_style = widget.item_style.unwrap_or(widget.style);
    let header_style = widget.header_style.unwrap_or(widget.style);
    let disabled_style = widget.disabled_style.unwrap_or(widget.style);

    let inner = state.inner;
    let mut y = inner.y;
    if widget.show_header && inner.height > 0 {
        state.area_header = Rect::new(inner.x, y, inner.width, 1);
        Span::from(state.text())
            .style(header_style)
            .render(state.area_header, buf);
        y += 1;
    } else {
        state.area_header = Rect::new(inner.x, y, inner.width, 0);
    }
    let rows = inner.bottom().saturating_sub(y) as usize;

    let mut x = inner.x;
    let mut columns = [Rect::default(); 4];
    columns[0] = Rect::new(x, y, 4, rows as u16).intersection(inner);
    x += 4;
    columns[1] = Rect::new(x, y, 4, rows as u16).intersection(inner);
    x += 4;
    if state.show_seconds {
        columns[2] = Rect::new(x, y, 4, rows as u16).intersection(inner);
        x += 4;
    }
    if state.time_format == TimeFormat::H12 {
        columns[3] = Rect::new(x, y, 4, rows as u16).intersection(inner);
    }
    state.area_columns = columns;

    if state.scroll.take().is_some() {
        state.scroll_offsets(rows);
    }

    let focused = state.is_focused();
    let style_of = |col: TimeColumn, selected: bool, disabled: bool, column: TimeColumn| {
        if selected && focused && col == column {
            focus_style
        } else if selected {
            select_style
        } else if disabled {
            disabled_style
        } else {
            item_style
        }
    };

    // hours
    let hours = state.hours();
    state.area_hours.clear();
    state.offset[0] = state.offset[0].min(hours.len().saturating_sub(1));
    for (i, hour) in hours.iter().skip(state.offset[0]).take(rows).enumerate() {
        let area = Rect::new(columns[0].x, columns[0].y + i as u16, 3, 1).intersection(inner);
        let style = style_of(
            TimeColumn::Hour,
            state.selected.hour == *hour,
            state.is_hour_disabled(*hour),
            state.column,
        );
        Span::from(format!("{:>2} ", hour))
            .style(style)
            .render(area, buf);
        state.area_hours.push(area);
    }

    // minutes
    state.area_minutes.clear();
    state.offset[1] = state.offset[1].min(59);
    for (i, minute) in (0..60u32).skip(state.offset[1]).take(rows).enumerate() {
        let area = Rect::new(columns[1].x, columns[1].y + i as u16, 3, 1).intersection(inner);
        let style = style_of(
            TimeColumn::Minute,
            state.selected.minute == minute,
            state.is_minute_disabled(minute),
            state.column,
        );
        Span::from(format!("{:02} ", minute))
            .style(style)
            .render(area, buf);
        state.area_minutes.push(area);
    }

    // seconds
    state.area_seconds.clear();
    if state.show_seconds {
        state.offset[2] = state.offset[2].min(59);
        for (i, second) in (0..60u32).skip(state.offset[2]).take(rows).enumerate() {
            let area =
                Rect::new(columns[2].x, columns[2].y + i as u16, 3, 1).intersection(inner);
            let style = style_of(
                TimeColumn::Second,
                state.selected.second == second,
                state.is_second_disabled(second),
                state.column,
            );
            Span::from(format!("{:02} ", second))
                .style(style)
                .render(area, buf);
            state.area_seconds.push(area);
        }
    }

    // am/pm
    state.area_periods.clear();
    if state.time_format == TimeFormat::H12 {
        for (i, period) in [Period::Am, Period::Pm].into_iter().take(rows).enumerate() {
            let area =
                Rect::new(columns[3].x, columns[3].y + i as u16, 4, 1).intersection(inner);
            let style = style_of(
                TimeColumn::Period,
                state.selected.period == period,
                false,
                state.column,
            );
            Span::from(state.period_label(period))
                .style(style)
                .render(area, buf);
            state.area_periods.push(area);
        }
    }
}

impl Debug for TimePickerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimePickerState")
            .field("area", &self.area)
            .field("inner", &self.inner)
            .field("offset", &self.offset)
            .field("column", &self.column)
            .field("adapter", &self.adapter)
            .field("pattern", &self.pattern)
            .field("time_format", &self.time_format)
            .field("show_seconds", &self.show_seconds)
            .field("selected", &self.selected)
            .field("base_date", &self.base_date)
            .field("value", &self.value)
            .field("min_time", &self.min_time)
            .field("max_time", &self.max_time)
            .field("time_filter", &self.time_filter.is_some())
            .field("inline", &self.inline)
            .field("allow_empty", &self.allow_empty)
            .field("focus", &self.focus)
            .finish()
    }
}

impl Clone for TimePickerState {
    fn clone(&self) -> Self {
        Self {
            area: self.area,
            inner: self.inner,
            area_header: self.area_header,
            area_hours: self.area_hours.clone(),
            area_minutes: self.area_minutes.clone(),
            area_seconds: self.area_seconds.clone(),
            area_periods: self.area_periods.clone(),
            area_columns: self.area_columns,
            offset: self.offset,
            column: self.column,
            adapter: self.adapter.clone(),
            pattern: self.pattern.clone(),
            time_format: self.time_format,
            show_seconds: self.show_seconds,
            selected: self.selected,
            base_date: self.base_date,
            value: self.value,
            min_time: self.min_time,
            max_time: self.max_time,
            time_filter: self.time_filter.clone(),
            inline: self.inline,
            allow_empty: self.allow_empty,
            scroll: self.scroll.clone(),
            focus: FocusFlag::named(&self.focus.name()),
            mouse: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl Default for TimePickerState {
    fn default() -> Self {
        let adapter = CalendarType::Gregorian.adapter();
        let base_date = adapter.today();
        Self {
            area: Default::default(),
            inner: Default::default(),
            area_header: Default::default(),
            area_hours: Default::default(),
            area_minutes: Default::default(),
            area_seconds: Default::default(),
            area_periods: Default::default(),
            area_columns: Default::default(),
            offset: Default::default(),
            column: Default::default(),
            adapter,
            pattern: DEFAULT_TIME_FORMAT.to_string(),
            time_format: TimeFormat::H12,
            show_seconds: false,
            selected: TimeConfig {
                hour: 12,
                minute: 0,
                second: 0,
                period: Period::Am,
            },
            base_date,
            value: None,
            min_time: None,
            max_time: None,
            time_filter: None,
            inline: false,
            allow_empty: true,
            scroll: Default::default(),
            focus: Default::default(),
            mouse: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl HasFocus for TimePickerState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    #[inline]
    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    #[inline]
    fn area(&self) -> Rect {
        self.area
    }
}

impl RelocatableState for TimePickerState {
    fn relocate(&mut self, shift: (i16, i16), clip: Rect) {
        self.area = relocate_area(self.area, shift, clip);
        self.inner = relocate_area(self.inner, shift, clip);
        self.area_header = relocate_area(self.area_header, shift, clip);
        relocate_areas(&mut self.area_hours, shift, clip);
        relocate_areas(&mut self.area_minutes, shift, clip);
        relocate_areas(&mut self.area_seconds, shift, clip);
        relocate_areas(&mut self.area_periods, shift, clip);
        relocate_areas(&mut self.area_columns, shift, clip);
    }
}

impl TimePickerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        Self {
            focus: FocusFlag::named(name),
            ..Self::default()
        }
    }

    /// Calendar used for parsing and formatting.
    pub fn set_calendar_type(&mut self, calendar_type: CalendarType) {
        self.adapter = calendar_type.adapter();
    }

    pub fn set_adapter(&mut self, adapter: Rc<dyn DateAdapter>) {
        self.adapter = adapter;
    }

    pub fn adapter(&self) -> &dyn DateAdapter {
        self.adapter.as_ref()
    }

    /// Display format.
    ///
    /// A `H` selects the 24h clock, otherwise it's 12h.
    /// Seconds are shown if the format contains seconds.
    pub fn set_format(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        let time = self.selected.to_time(self.time_format);

        self.show_seconds = has_seconds(&pattern);
        self.time_format = if has_24h_clock(&pattern) {
            TimeFormat::H24
        } else {
            TimeFormat::H12
        };
        self.pattern = pattern;

        if let Some(time) = time {
            self.selected = TimeConfig::from_time(time, self.time_format);
        }
        if self.column == TimeColumn::Second && !self.show_seconds {
            self.column = TimeColumn::Minute;
        }
        if self.column == TimeColumn::Period && self.time_format == TimeFormat::H24 {
            self.column = TimeColumn::Minute;
        }
    }

    pub fn format(&self) -> &str {
        &self.pattern
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    pub fn show_seconds(&self) -> bool {
        self.show_seconds
    }

    /// Earliest time of day.
    pub fn set_min_time(&mut self, time: Option<NaiveTime>) {
        self.min_time = time;
    }

    pub fn min_time(&self) -> Option<NaiveTime> {
        self.min_time
    }

    /// Latest time of day.
    pub fn set_max_time(&mut self, time: Option<NaiveTime>) {
        self.max_time = time;
    }

    pub fn max_time(&self) -> Option<NaiveTime> {
        self.max_time
    }

    /// Earliest time of day, parsed with the display format.
    pub fn set_min_time_str(&mut self, text: &str) -> Result<(), PickerError> {
        let v = self.adapter.parse_with_base(text, &self.pattern, self.base_date)?;
        self.min_time = Some(v.time());
        Ok(())
    }

    /// Latest time of day, parsed with the display format.
    pub fn set_max_time_str(&mut self, text: &str) -> Result<(), PickerError> {
        let v = self.adapter.parse_with_base(text, &self.pattern, self.base_date)?;
        self.max_time = Some(v.time());
        Ok(())
    }

    /// Predicate for disabled times.
    pub fn set_time_filter(&mut self, filter: impl Fn(NaiveDateTime) -> bool + 'static) {
        self.time_filter = Some(Rc::new(filter));
    }

    /// Share a predicate.
    pub fn set_time_filter_rc(&mut self, filter: Option<DisableFn>) {
        self.time_filter = filter;
    }

    pub fn clear_time_filter(&mut self) {
        self.time_filter = None;
    }

    /// Day the time applies to.
    pub fn set_base_date(&mut self, date: NaiveDateTime) {
        self.base_date = date;
    }

    pub fn base_date(&self) -> NaiveDateTime {
        self.base_date
    }

    /// Save after every change of a column.
    pub fn set_inline(&mut self, inline: bool) {
        self.inline = inline;
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Empty text input is left alone on blur.
    pub fn set_allow_empty(&mut self, allow_empty: bool) {
        self.allow_empty = allow_empty;
    }

    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    /// Current state of the columns.
    pub fn selected(&self) -> TimeConfig {
        self.selected
    }

    /// Last saved value.
    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    /// Set the value and the columns.
    pub fn set_value(&mut self, value: Option<NaiveDateTime>) {
        self.value = value;
        if let Some(value) = value {
            self.base_date = value;
        }
        self.update_from_date(value);
    }

    /// Hours for the current clock.
    pub fn hours(&self) -> Vec<u32> {
        match self.time_format {
            TimeFormat::H12 => (1..=12).collect(),
            TimeFormat::H24 => (0..24).collect(),
        }
    }

    pub fn period_label(&self, period: Period) -> &'static str {
        match period {
            Period::Am => self.adapter.locale().am,
            Period::Pm => self.adapter.locale().pm,
        }
    }

    /// The base date with the time of the given columns.
    pub fn date_with(&self, config: TimeConfig) -> NaiveDateTime {
        match config.to_time(self.time_format) {
            Some(time) => self.base_date.date().and_time(time),
            None => self.base_date,
        }
    }

    /// The time of the columns applied to the current value
    /// or the base date.
    pub fn to_datetime(&self) -> NaiveDateTime {
        let date = self.value.unwrap_or(self.base_date);
        match self.selected.to_time(self.time_format) {
            Some(time) => date.date().and_time(time),
            None => date,
        }
    }

    /// Formatted [to_datetime](Self::to_datetime).
    pub fn text(&self) -> String {
        self.adapter.format(self.to_datetime(), &self.pattern)
    }

    /// Outside min/max time or rejected by the predicate.
    pub fn is_time_disabled(&self, date: NaiveDateTime) -> bool {
        if let Some(min) = self.min_time {
            if date.time() < min {
                return true;
            }
        }
        if let Some(max) = self.max_time {
            if date.time() > max {
                return true;
            }
        }
        match &self.time_filter {
            Some(filter) => filter(date),
            None => false,
        }
    }

    /// All minutes of the hour are disabled.
    pub fn is_hour_disabled(&self, hour: u32) -> bool {
        (0..60).all(|minute| {
            self.is_time_disabled(self.date_with(TimeConfig {
                hour,
                minute,
                second: 0,
                ..self.selected
            }))
        })
    }

    /// Without seconds only the full minute is tested. Otherwise all
    /// seconds of the minute must be disabled.
    pub fn is_minute_disabled(&self, minute: u32) -> bool {
        if !self.show_seconds {
            return self.is_time_disabled(self.date_with(TimeConfig {
                minute,
                second: 0,
                ..self.selected
            }));
        }
        (0..60).all(|second| {
            self.is_time_disabled(self.date_with(TimeConfig {
                minute,
                second,
                ..self.selected
            }))
        })
    }

    pub fn is_second_disabled(&self, second: u32) -> bool {
        self.is_time_disabled(self.date_with(TimeConfig {
            second,
            ..self.selected
        }))
    }

    fn after_select(&mut self) -> TimeOutcome {
        self.scroll_to_time();
        if self.inline {
            match self.save() {
                TimeOutcome::Saved => TimeOutcome::Saved,
                _ => TimeOutcome::Selected,
            }
        } else {
            TimeOutcome::Selected
        }
    }

    /// Select an hour. Disabled hours are ignored.
    pub fn select_hour(&mut self, hour: u32) -> TimeOutcome {
        if !self.hours().contains(&hour) || self.is_hour_disabled(hour) {
            return TimeOutcome::Unchanged;
        }
        self.selected.hour = hour;
        self.after_select()
    }

    /// Select a minute. Disabled minutes are ignored.
    pub fn select_minute(&mut self, minute: u32) -> TimeOutcome {
        if minute >= 60 || self.is_minute_disabled(minute) {
            return TimeOutcome::Unchanged;
        }
        self.selected.minute = minute;
        self.after_select()
    }

    /// Select a second. Disabled seconds are ignored.
    pub fn select_second(&mut self, second: u32) -> TimeOutcome {
        if second >= 60 || self.is_second_disabled(second) {
            return TimeOutcome::Unchanged;
        }
        self.selected.second = second;
        self.after_select()
    }

    pub fn select_period(&mut self, period: Period) -> TimeOutcome {
        if self.time_format == TimeFormat::H24 {
            return TimeOutcome::Unchanged;
        }
        self.selected.period = period;
        self.after_select()
    }

    /// Set all columns and save.
    pub fn select_time(&mut self, time: NaiveTime) -> TimeOutcome {
        self.selected = TimeConfig::from_time(time, self.time_format);
        self.scroll_to_time();
        self.save()
    }

    /// Set the current time and save.
    pub fn select_now(&mut self) -> TimeOutcome {
        let now = self.adapter.today();
        self.select_time(now.time())
    }

    /// Set the columns from a date. None resets them.
    pub fn update_from_date(&mut self, date: Option<NaiveDateTime>) {
        match date {
            Some(date) => self.selected = TimeConfig::from_time(date.time(), self.time_format),
            None => self.reset(),
        }
    }

    /// Columns to 00:00:00.
    pub fn reset(&mut self) {
        self.selected = TimeConfig::from_time(NaiveTime::MIN, self.time_format);
    }

    /// Store the time of the columns as new value.
    ///
    /// A disabled time is not saved. Returns [TimeOutcome::Saved]
    /// only if the value changed.
    pub fn save(&mut self) -> TimeOutcome {
        let date = self.to_datetime();
        if self.is_time_disabled(date) {
            return TimeOutcome::Unchanged;
        }
        if self.value == Some(date) {
            return TimeOutcome::Unchanged;
        }
        self.value = Some(date);
        TimeOutcome::Saved
    }

    /// Follow the text input while typing. Only the columns change.
    pub fn parse_time_text(&mut self, text: &str) -> bool {
        match self.adapter.parse_with_base(text, &self.pattern, self.base_date) {
            Ok(v) => {
                let old = self.selected;
                self.selected = TimeConfig::from_time(v.time(), self.time_format);
                self.scroll_to_time();
                old != self.selected
            }
            Err(e) => {
                log::debug!("time input {:?}: {}", text, e);
                false
            }
        }
    }

    /// Text input lost focus.
    ///
    /// The text is parsed and moved to the nearest enabled time slot.
    /// Unparseable text is ignored. Empty text is ignored too, it's
    /// up to the caller to decide between an empty value and the
    /// last value with [allow_empty](Self::allow_empty).
    pub fn validate_and_update(&mut self, text: &str) -> TimeOutcome {
        if text.trim().is_empty() {
            return TimeOutcome::Unchanged;
        }
        let date = match self.adapter.parse_with_base(text, &self.pattern, self.base_date) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("time input {:?}: {}", text, e);
                return TimeOutcome::Unchanged;
            }
        };
        let Some(date) = nearest_time_slot(date, |v| self.is_time_disabled(v)) else {
            log::debug!("no enabled time near {}", date);
            return TimeOutcome::Unchanged;
        };
        self.selected = TimeConfig::from_time(date.time(), self.time_format);
        self.value = Some(date);
        self.scroll_to_time();
        TimeOutcome::Saved
    }

    /// Scroll the selected items into view with the next render.
    pub fn scroll_to_time(&mut self) {
        self.scroll.set(());
    }

    fn scroll_offsets(&mut self, rows: usize) {
        let center = |idx: usize, len: usize| -> usize {
            let max = len.saturating_sub(rows);
            idx.saturating_sub(rows / 2).min(max)
        };
        let hours = self.hours();
        let hour_idx = hours
            .iter()
            .position(|v| *v == self.selected.hour)
            .unwrap_or(0);
        self.offset[0] = center(hour_idx, hours.len());
        self.offset[1] = center(self.selected.minute as usize, 60);
        self.offset[2] = center(self.selected.second as usize, 60);
    }

    fn columns(&self) -> Vec<TimeColumn> {
        let mut c = vec![TimeColumn::Hour, TimeColumn::Minute];
        if self.show_seconds {
            c.push(TimeColumn::Second);
        }
        if self.time_format == TimeFormat::H12 {
            c.push(TimeColumn::Period);
        }
        c
    }

    /// Keyboard column to the left.
    pub fn prev_column(&mut self) -> TimeOutcome {
        let columns = self.columns();
        match columns.iter().position(|v| *v == self.column) {
            Some(n) if n > 0 => {
                self.column = columns[n - 1];
                TimeOutcome::Changed
            }
            _ => TimeOutcome::Unchanged,
        }
    }

    /// Keyboard column to the right.
    pub fn next_column(&mut self) -> TimeOutcome {
        let columns = self.columns();
        match columns.iter().position(|v| *v == self.column) {
            Some(n) if n + 1 < columns.len() => {
                self.column = columns[n + 1];
                TimeOutcome::Changed
            }
            _ => TimeOutcome::Unchanged,
        }
    }

    /// Move the selection in the keyboard column.
    /// Skips disabled items.
    pub fn move_selection(&mut self, delta: i32) -> TimeOutcome {
        match self.column {
            TimeColumn::Hour => {
                let hours = self.hours();
                let Some(idx) = hours.iter().position(|v| *v == self.selected.hour) else {
                    return TimeOutcome::Unchanged;
                };
                let next = step_enabled(idx, hours.len(), delta, |i| {
                    self.is_hour_disabled(hours[i])
                });
                match next {
                    Some(i) => self.select_hour(hours[i]),
                    None => TimeOutcome::Unchanged,
                }
            }
            TimeColumn::Minute => {
                let next = step_enabled(self.selected.minute as usize, 60, delta, |i| {
                    self.is_minute_disabled(i as u32)
                });
                match next {
                    Some(i) => self.select_minute(i as u32),
                    None => TimeOutcome::Unchanged,
                }
            }
            TimeColumn::Second => {
                let next = step_enabled(self.selected.second as usize, 60, delta, |i| {
                    self.is_second_disabled(i as u32)
                });
                match next {
                    Some(i) => self.select_second(i as u32),
                    None => TimeOutcome::Unchanged,
                }
            }
            TimeColumn::Period => match self.selected.period {
                Period::Am if delta > 0 => self.select_period(Period::Pm),
                Period::Pm if delta < 0 => self.select_period(Period::Am),
                _ => TimeOutcome::Unchanged,
            },
        }
    }

    /// Scroll a column without changing the selection.
    pub fn scroll_column(&mut self, column: TimeColumn, delta: isize) -> TimeOutcome {
        let (idx, len) = match column {
            TimeColumn::Hour => (0, self.hours().len()),
            TimeColumn::Minute => (1, 60),
            TimeColumn::Second => (2, 60),
            TimeColumn::Period => return TimeOutcome::Unchanged,
        };
        let old = self.offset[idx];
        let new = old
            .saturating_add_signed(delta)
            .min(len.saturating_sub(1));
        self.offset[idx] = new;
        if old != new {
            TimeOutcome::Changed
        } else {
            TimeOutcome::Unchanged
        }
    }
}

/// Next index in the direction of delta that isn't disabled.
fn step_enabled(
    start: usize,
    len: usize,
    delta: i32,
    is_disabled: impl Fn(usize) -> bool,
) -> Option<usize> {
    let mut idx = start as i64;
    loop {
        idx += delta.signum() as i64;
        if idx < 0 || idx >= len as i64 {
            return None;
        }
        if !is_disabled(idx as usize) {
            return Some(idx as usize);
        }
    }
}

impl HandleEvent<crossterm::event::Event, Regular, TimeOutcome> for TimePickerState {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> TimeOutcome {
        if self.is_focused() {
            flow!(match event {
                ct_event!(keycode press Left) => self.prev_column(),
                ct_event!(keycode press Right) => self.next_column(),
                ct_event!(keycode press Up) => self.move_selection(-1),
                ct_event!(keycode press Down) => self.move_selection(1),
                ct_event!(keycode press Enter) => self.save(),
                _ => TimeOutcome::Continue,
            })
        }

        self.handle(event, MouseOnly)
    }
}

impl HandleEvent<crossterm::event::Event, MouseOnly, TimeOutcome> for TimePickerState {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: MouseOnly) -> TimeOutcome {
        match event {
            ct_event!(mouse down Left for x, y) => {
                if let Some(n) = item_at(&self.area_hours, *x, *y) {
                    self.column = TimeColumn::Hour;
                    let hours = self.hours();
                    match hours.get(self.offset[0] + n) {
                        Some(hour) => self.select_hour(*hour),
                        None => TimeOutcome::Unchanged,
                    }
                } else if let Some(n) = item_at(&self.area_minutes, *x, *y) {
                    self.column = TimeColumn::Minute;
                    self.select_minute((self.offset[1] + n) as u32)
                } else if let Some(n) = item_at(&self.area_seconds, *x, *y) {
                    self.column = TimeColumn::Second;
                    self.select_second((self.offset[2] + n) as u32)
                } else if let Some(n) = item_at(&self.area_periods, *x, *y) {
                    self.column = TimeColumn::Period;
                    if n == 0 {
                        self.select_period(Period::Am)
                    } else {
                        self.select_period(Period::Pm)
                    }
                } else {
                    TimeOutcome::Continue
                }
            }
            ct_event!(scroll up for x, y) => match item_at(&self.area_columns, *x, *y) {
                Some(0) => self.scroll_column(TimeColumn::Hour, -1),
                Some(1) => self.scroll_column(TimeColumn::Minute, -1),
                Some(2) => self.scroll_column(TimeColumn::Second, -1),
                _ => TimeOutcome::Continue,
            },
            ct_event!(scroll down for x, y) => match item_at(&self.area_columns, *x, *y) {
                Some(0) => self.scroll_column(TimeColumn::Hour, 1),
                Some(1) => self.scroll_column(TimeColumn::Minute, 1),
                Some(2) => self.scroll_column(TimeColumn::Second, 1),
                _ => TimeOutcome::Continue,
            },
            _ => TimeOutcome::Continue,
        }
    }
}
