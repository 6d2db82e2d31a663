//!
//! Date-picker for single dates and date ranges.
//!
//! [DatePickerState] ties the calendar arithmetic, the constraints,
//! the view navigation and the selection together. The
//! [DatePicker] widget renders it.
//!
//! The state comes in two flavours,
//! `DatePickerState<SingleSelection>` and
//! `DatePickerState<RangeSelection>`. Both share the navigation,
//! selection and text input work differently.
//!
//! ```ignore
//! let mut state = DatePickerState::<SingleSelection>::named("start");
//! state.set_calendar_type(CalendarType::Jalali);
//! state.set_format("yyyy/MM/dd HH:mm");
//! ```
//!

use crate::_private::NonExhaustive;
use crate::adapter::format::{extract_date_pattern, extract_time_pattern, has_time_component};
use crate::adapter::{CalendarType, DateAdapter};
use crate::constraint::DateConstraints;
use crate::debounce::{Debounce, Deferred};
use crate::grid::{day_grid, find_year_range, YearRange, GRID_DAYS};
use crate::locale::{Locale, NameStyle};
use crate::picker::event::PickerOutcome;
use crate::selection::{DateRange, PickerSelection};
use crate::time::event::TimeOutcome;
use crate::time::TimePickerState;
use crate::view::{PickerMode, ViewMode, ViewState};
use crate::PickerError;
use chrono::{NaiveDateTime, NaiveTime};
use rat_event::util::{item_at, MouseFlagsN};
use rat_event::{ct_event, Outcome};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use rat_reloc::{relocate_area, relocate_areas, RelocatableState};
use ratatui::layout::Rect;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

pub mod event;
mod range;
mod single;
mod style;
mod widget;

pub use style::*;
pub use widget::*;

/// Default display format.
pub const DEFAULT_DATE_FORMAT: &str = "yyyy/MM/dd";
/// Display format for [PickerMode::Month].
pub const MONTH_FORMAT: &str = "yyyy/MM";
/// Display format for [PickerMode::Year].
pub const YEAR_FORMAT: &str = "yyyy";

/// Calendar for the emitted text value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum ValueCalendar {
    #[default]
    Gregorian,
    Jalali,
    /// Same as the display calendar.
    Date,
}

/// Value of a preset range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetValue {
    Range(NaiveDateTime, NaiveDateTime),
    /// Free selection. Active when no other preset matches.
    Custom,
}

/// Quick selection of a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub label: String,
    pub value: PresetValue,
}

impl Preset {
    pub fn new(label: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            label: label.into(),
            value: PresetValue::Range(start, end),
        }
    }

    pub fn custom(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: PresetValue::Custom,
        }
    }
}

/// Last day, last week, last month and custom, ending today.
pub fn default_presets(adapter: &dyn DateAdapter) -> Vec<Preset> {
    let today = adapter.today();
    let loc = adapter.locale();
    vec![
        Preset::new(loc.last_day, adapter.add_days(today, -1), today),
        Preset::new(loc.last_week, adapter.add_days(today, -7), today),
        Preset::new(loc.last_month, adapter.add_months(today, -1), today),
        Preset::custom(loc.custom),
    ]
}

/// State & event-handling.
pub struct DatePickerState<Selection> {
    /// Total area.
    /// __readonly__. renewed for each render.
    pub area: Rect,
    /// Area inside the border.
    /// __readonly__. renewed for each render.
    pub inner: Rect,
    /// Previous page button.
    /// __readonly__. renewed for each render.
    pub area_prev: Rect,
    /// Title. Switches to the month/year view.
    /// __readonly__. renewed for each render.
    pub area_title: Rect,
    /// Next page button.
    /// __readonly__. renewed for each render.
    pub area_next: Rect,
    /// Weekday names.
    /// __readonly__. renewed for each render.
    pub area_weekdays: Rect,
    /// Area of the grid.
    /// __readonly__. renewed for each render.
    pub area_grid: Rect,
    /// Days of the day view.
    /// __readonly__. renewed for each render.
    pub area_days: [Rect; GRID_DAYS],
    /// Months of the month view.
    /// __readonly__. renewed for each render.
    pub area_months: [Rect; 12],
    /// Years of the year view.
    /// __readonly__. renewed for each render.
    pub area_years: Vec<Rect>,
    /// Sidebar list.
    /// __readonly__. renewed for each render.
    pub area_sidebar: Rect,
    /// Visible sidebar items.
    /// __readonly__. renewed for each render.
    pub area_sidebar_items: Vec<Rect>,
    /// Preset buttons.
    /// __readonly__. renewed for each render.
    pub area_presets: Vec<Rect>,
    /// Today button.
    /// __readonly__. renewed for each render.
    pub area_today: Rect,
    /// Ok button.
    /// __readonly__. renewed for each render.
    pub area_ok: Rect,

    /// First visible sidebar item.
    /// __read+write__
    pub sidebar_offset: usize,

    adapter: Rc<dyn DateAdapter>,
    value_calendar: ValueCalendar,
    mode: PickerMode,
    constraints: DateConstraints,
    view: ViewState,
    /// Day under the keyboard cursor.
    cursor: NaiveDateTime,

    /// Selection model.
    /// __read+write__
    pub selection: Selection,

    format: String,
    show_time: bool,
    /// Time sub-picker.
    /// __read+write__
    pub time: TimePickerState,

    presets: Vec<Preset>,
    selected_preset: Option<usize>,
    debounce: Debounce<DateRange>,
    scroll: Deferred<i32>,
    last_emitted: Option<(String, Option<String>)>,

    allow_empty: bool,
    show_today: bool,
    show_sidebar: bool,

    /// Container focus. Set if the grid or the time-picker is focused.
    /// __read+write__
    pub focus: FocusFlag,
    /// Focus of the calendar grid.
    /// __read+write__
    pub grid_focus: FocusFlag,
    /// Mouse flags
    /// __read+write__
    pub mouse: MouseFlagsN,

    pub non_exhaustive: NonExhaustive,
}

impl<Selection: Debug> Debug for DatePickerState<Selection> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePickerState")
            .field("area", &self.area)
            .field("inner", &self.inner)
            .field("adapter", &self.adapter)
            .field("value_calendar", &self.value_calendar)
            .field("mode", &self.mode)
            .field("constraints", &self.constraints)
            .field("view", &self.view)
            .field("cursor", &self.cursor)
            .field("selection", &self.selection)
            .field("format", &self.format)
            .field("show_time", &self.show_time)
            .field("time", &self.time)
            .field("presets", &self.presets)
            .field("selected_preset", &self.selected_preset)
            .field("debounce", &self.debounce)
            .field("last_emitted", &self.last_emitted)
            .field("allow_empty", &self.allow_empty)
            .field("show_today", &self.show_today)
            .field("show_sidebar", &self.show_sidebar)
            .field("focus", &self.focus)
            .field("grid_focus", &self.grid_focus)
            .finish()
    }
}

impl<Selection: Clone> Clone for DatePickerState<Selection> {
    fn clone(&self) -> Self {
        Self {
            area: self.area,
            inner: self.inner,
            area_prev: self.area_prev,
            area_title: self.area_title,
            area_next: self.area_next,
            area_weekdays: self.area_weekdays,
            area_grid: self.area_grid,
            area_days: self.area_days,
            area_months: self.area_months,
            area_years: self.area_years.clone(),
            area_sidebar: self.area_sidebar,
            area_sidebar_items: self.area_sidebar_items.clone(),
            area_presets: self.area_presets.clone(),
            area_today: self.area_today,
            area_ok: self.area_ok,
            sidebar_offset: self.sidebar_offset,
            adapter: self.adapter.clone(),
            value_calendar: self.value_calendar,
            mode: self.mode,
            constraints: self.constraints.clone(),
            view: self.view.clone(),
            cursor: self.cursor,
            selection: self.selection.clone(),
            format: self.format.clone(),
            show_time: self.show_time,
            time: self.time.clone(),
            presets: self.presets.clone(),
            selected_preset: self.selected_preset,
            debounce: self.debounce.clone(),
            scroll: self.scroll.clone(),
            last_emitted: self.last_emitted.clone(),
            allow_empty: self.allow_empty,
            show_today: self.show_today,
            show_sidebar: self.show_sidebar,
            focus: FocusFlag::named(&self.focus.name()),
            grid_focus: FocusFlag::named(&self.grid_focus.name()),
            mouse: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl<Selection> Default for DatePickerState<Selection>
where
    Selection: PickerSelection + Default,
{
    fn default() -> Self {
        let adapter = CalendarType::Gregorian.adapter();
        let today = adapter.today();
        let mut time = TimePickerState::new();
        time.set_inline(true);
        time.set_format(extract_time_pattern(DEFAULT_DATE_FORMAT));
        time.set_adapter(adapter.clone());

        let mut z = Self {
            area: Default::default(),
            inner: Default::default(),
            area_prev: Default::default(),
            area_title: Default::default(),
            area_next: Default::default(),
            area_weekdays: Default::default(),
            area_grid: Default::default(),
            area_days: [Rect::default(); GRID_DAYS],
            area_months: Default::default(),
            area_years: Default::default(),
            area_sidebar: Default::default(),
            area_sidebar_items: Default::default(),
            area_presets: Default::default(),
            area_today: Default::default(),
            area_ok: Default::default(),
            sidebar_offset: 0,
            adapter,
            value_calendar: Default::default(),
            mode: Default::default(),
            constraints: Default::default(),
            view: ViewState::new(today),
            cursor: today,
            selection: Default::default(),
            format: DEFAULT_DATE_FORMAT.to_string(),
            show_time: false,
            time,
            presets: Default::default(),
            selected_preset: None,
            debounce: Default::default(),
            scroll: Default::default(),
            last_emitted: None,
            allow_empty: false,
            show_today: true,
            show_sidebar: true,
            focus: Default::default(),
            grid_focus: Default::default(),
            mouse: Default::default(),
            non_exhaustive: NonExhaustive,
        };
        z.init_presets();
        z
    }
}

/// Focus leaf for the calendar grid.
struct GridFocus {
    focus: FocusFlag,
    area: Rect,
}

impl HasFocus for GridFocus {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.area
    }
}

impl<Selection> HasFocus for DatePickerState<Selection> {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.widget(&GridFocus {
            focus: self.grid_focus.clone(),
            area: self.area_grid,
        });
        if self.show_time {
            builder.widget(&self.time);
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

impl<Selection> RelocatableState for DatePickerState<Selection> {
    fn relocate(&mut self, shift: (i16, i16), clip: Rect) {
        self.area = relocate_area(self.area, shift, clip);
        self.inner = relocate_area(self.inner, shift, clip);
        self.area_prev = relocate_area(self.area_prev, shift, clip);
        self.area_title = relocate_area(self.area_title, shift, clip);
        self.area_next = relocate_area(self.area_next, shift, clip);
        self.area_weekdays = relocate_area(self.area_weekdays, shift, clip);
        self.area_grid = relocate_area(self.area_grid, shift, clip);
        relocate_areas(&mut self.area_days, shift, clip);
        relocate_areas(&mut self.area_months, shift, clip);
        relocate_areas(&mut self.area_years, shift, clip);
        self.area_sidebar = relocate_area(self.area_sidebar, shift, clip);
        relocate_areas(&mut self.area_sidebar_items, shift, clip);
        relocate_areas(&mut self.area_presets, shift, clip);
        self.area_today = relocate_area(self.area_today, shift, clip);
        self.area_ok = relocate_area(self.area_ok, shift, clip);
        self.time.relocate(shift, clip);
    }
}

impl<Selection> DatePickerState<Selection>
where
    Selection: PickerSelection,
{
    pub fn new() -> Self
    where
        Selection: Default,
    {
        Self::default()
    }

    pub fn named(name: &str) -> Self
    where
        Selection: Default,
    {
        let mut z = Self::default();
        z.focus = FocusFlag::named(name);
        z.grid_focus = FocusFlag::named(&format!("{}.grid", name));
        z.time.focus = FocusFlag::named(&format!("{}.time", name));
        z
    }

    fn init_presets(&mut self) {
        if self.selection.is_range() {
            self.presets = default_presets(self.adapter.as_ref());
        }
    }

    /// Calendar of the picker. Resets the view.
    pub fn set_calendar_type(&mut self, calendar_type: CalendarType) {
        self.set_adapter(calendar_type.adapter());
    }

    /// Calendar with a specific label table. Resets the view.
    pub fn set_calendar_locale(&mut self, calendar_type: CalendarType, locale: Locale) {
        self.set_adapter(calendar_type.adapter_with(locale));
    }

    fn set_adapter(&mut self, adapter: Rc<dyn DateAdapter>) {
        let default_presets = self.presets.is_empty() || self.presets_are_default();
        self.adapter = adapter;
        self.time.set_adapter(self.adapter.clone());
        if default_presets {
            self.init_presets();
        }
        self.reset_view();
    }

    fn presets_are_default(&self) -> bool {
        let old = default_presets(self.adapter.as_ref());
        old.len() == self.presets.len()
            && old
                .iter()
                .zip(self.presets.iter())
                .all(|(a, b)| a.label == b.label)
    }

    pub fn calendar_type(&self) -> CalendarType {
        self.adapter.calendar_type()
    }

    pub fn adapter(&self) -> &dyn DateAdapter {
        self.adapter.as_ref()
    }

    /// Calendar for [value_text](Self::value_text).
    pub fn set_value_calendar(&mut self, value_calendar: ValueCalendar) {
        self.value_calendar = value_calendar;
    }

    pub fn value_calendar(&self) -> ValueCalendar {
        self.value_calendar
    }

    fn value_adapter(&self) -> Rc<dyn DateAdapter> {
        match self.value_calendar {
            ValueCalendar::Gregorian if self.calendar_type() != CalendarType::Gregorian => {
                CalendarType::Gregorian.adapter()
            }
            ValueCalendar::Jalali if self.calendar_type() != CalendarType::Jalali => {
                CalendarType::Jalali.adapter()
            }
            _ => self.adapter.clone(),
        }
    }

    /// Day, month or year selection. Resets the view.
    ///
    /// For month and year the display format changes too.
    pub fn set_mode(&mut self, mode: PickerMode) {
        self.mode = mode;
        match mode {
            PickerMode::Day => {
                if self.format == MONTH_FORMAT || self.format == YEAR_FORMAT {
                    self.set_format(DEFAULT_DATE_FORMAT);
                }
            }
            PickerMode::Month => self.set_format(MONTH_FORMAT),
            PickerMode::Year => self.set_format(YEAR_FORMAT),
        }
        self.reset_view();
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    /// Display format. If it contains a time the time-picker
    /// is shown.
    pub fn set_format(&mut self, pattern: impl Into<String>) {
        self.format = pattern.into();
        self.show_time = has_time_component(&self.format);
        self.time.set_format(extract_time_pattern(&self.format));
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Show the time-picker.
    pub fn show_time(&self) -> bool {
        self.show_time
    }

    pub fn set_min_date(&mut self, date: Option<NaiveDateTime>) {
        self.constraints.set_min_date(date);
        self.adjust_view();
    }

    pub fn set_max_date(&mut self, date: Option<NaiveDateTime>) {
        self.constraints.set_max_date(date);
        self.adjust_view();
    }

    /// Min-date as text. Uses the value calendar and the date part
    /// of the display format.
    pub fn set_min_date_str(&mut self, text: &str) -> Result<(), PickerError> {
        let date = self
            .value_adapter()
            .parse(text, &extract_date_pattern(&self.format))?;
        self.set_min_date(Some(date));
        Ok(())
    }

    /// Max-date as text. Uses the value calendar and the date part
    /// of the display format.
    pub fn set_max_date_str(&mut self, text: &str) -> Result<(), PickerError> {
        let date = self
            .value_adapter()
            .parse(text, &extract_date_pattern(&self.format))?;
        self.set_max_date(Some(date));
        Ok(())
    }

    /// Disabled dates as text, in the date part of the
    /// display format.
    pub fn add_disabled_dates_str<S: AsRef<str>>(&mut self, dates: &[S]) {
        let pattern = extract_date_pattern(&self.format);
        self.constraints
            .add_disabled_text(self.adapter.as_ref(), dates, &pattern);
    }

    pub fn set_constraints(&mut self, constraints: DateConstraints) {
        self.constraints = constraints;
        self.time.set_time_filter_rc(self.constraints.time_filter());
        self.adjust_view();
    }

    pub fn constraints(&self) -> &DateConstraints {
        &self.constraints
    }

    /// Changes are picked up with the next render or
    /// [adjust_view](Self::adjust_view).
    pub fn constraints_mut(&mut self) -> &mut DateConstraints {
        &mut self.constraints
    }

    /// Bring the view in line with the constraints.
    pub fn adjust_view(&mut self) {
        self.time.set_time_filter_rc(self.constraints.time_filter());
        if self.view.adjust_to_valid_range(&self.constraints) {
            self.cursor = self.view.anchor();
        }
    }

    /// Leave an empty text input empty on blur.
    pub fn set_allow_empty(&mut self, allow_empty: bool) {
        self.allow_empty = allow_empty;
    }

    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    /// Highlight today.
    pub fn set_show_today(&mut self, show_today: bool) {
        self.show_today = show_today;
    }

    pub fn show_today(&self) -> bool {
        self.show_today
    }

    /// Show the sidebar with the month/year lists.
    pub fn set_show_sidebar(&mut self, show_sidebar: bool) {
        self.show_sidebar = show_sidebar;
    }

    pub fn show_sidebar(&self) -> bool {
        self.show_sidebar
    }

    /// Replace the preset ranges.
    pub fn set_presets(&mut self, presets: Vec<Preset>) {
        self.presets = presets;
        self.selected_preset = None;
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Last selected preset.
    pub fn selected_preset(&self) -> Option<usize> {
        self.selected_preset
    }

    /// The date the picker starts with.
    pub fn initial_date(&self) -> NaiveDateTime {
        self.selection
            .any_selected()
            .unwrap_or_else(|| self.adapter.today())
    }

    /// Back to the initial view of the mode.
    pub fn reset_view(&mut self) {
        let today = self.adapter.today();
        let initial = self.initial_date();
        self.view
            .reset(self.adapter.as_ref(), self.mode, initial, today);
        self.view.adjust_to_valid_range(&self.constraints);
        self.cursor = self.view.anchor();
        self.sync_time();
    }

    /// Update the time-picker from the lead selection.
    pub(crate) fn sync_time(&mut self) {
        let lead = self.selection.lead_selection();
        self.time
            .set_base_date(lead.unwrap_or_else(|| self.adapter.today()));
        self.time.set_value(lead);
        self.time.scroll_to_time();
    }

    /// Anchor of the view.
    pub fn current_date(&self) -> NaiveDateTime {
        self.view.anchor()
    }

    /// Show the month of this date.
    pub fn set_current_date(&mut self, date: NaiveDateTime) {
        self.view.set_anchor(date);
        self.cursor = date;
    }

    /// Keyboard cursor.
    pub fn cursor(&self) -> NaiveDateTime {
        self.cursor
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view.view_mode()
    }

    pub fn year_list(&self) -> &[i32] {
        self.view.year_list()
    }

    pub fn year_ranges(&self) -> &[YearRange] {
        self.view.year_ranges()
    }

    /// The 42 days of the day view.
    pub fn days(&self) -> [NaiveDateTime; GRID_DAYS] {
        day_grid(self.adapter.as_ref(), self.view.anchor())
    }

    /// Short weekday names, in the order of the grid.
    pub fn weekday_names(&self) -> Vec<&'static str> {
        self.adapter.weekday_names(NameStyle::Short)
    }

    pub fn month_name(&self, month: u32) -> String {
        self.adapter.month_name(month, NameStyle::Long)
    }

    pub fn current_month(&self) -> u32 {
        self.adapter.get_month(self.view.anchor())
    }

    pub fn current_year(&self) -> i32 {
        self.adapter.get_year(self.view.anchor())
    }

    /// Title for the header.
    pub fn title(&self) -> String {
        match self.view.view_mode() {
            ViewMode::Days => format!(
                "{} {}",
                self.month_name(self.current_month()),
                self.current_year()
            ),
            ViewMode::Months => format!("{}", self.current_year()),
            ViewMode::Years => match (self.view.year_list().first(), self.view.year_list().last())
            {
                (Some(first), Some(last)) => format!("{} - {}", first, last),
                _ => String::new(),
            },
        }
    }

    pub fn is_today(&self, date: NaiveDateTime) -> bool {
        self.show_today && self.adapter.is_same_day(date, self.adapter.today())
    }

    pub fn is_same_month(&self, date: NaiveDateTime) -> bool {
        self.adapter.is_same_month(date, self.view.anchor())
    }

    pub fn is_active_month(&self, month: u32) -> bool {
        self.current_month() == month
    }

    pub fn is_active_year(&self, year: i32) -> bool {
        self.current_year() == year
    }

    pub fn is_active_year_range(&self, start: i32) -> bool {
        self.view.is_active_year_range(start)
    }

    pub fn is_date_disabled(&self, date: NaiveDateTime) -> bool {
        self.constraints.is_date_disabled(date)
    }

    /// All days of the month in the year of the anchor are disabled.
    pub fn is_month_disabled(&self, month: u32) -> bool {
        self.constraints
            .is_month_disabled(self.adapter.as_ref(), self.current_year(), month)
    }

    pub fn is_year_disabled(&self, year: i32) -> bool {
        self.constraints
            .is_year_disabled(self.adapter.as_ref(), year)
    }

    pub fn is_year_range_disabled(&self, range: YearRange) -> bool {
        self.constraints
            .is_year_range_disabled(self.adapter.as_ref(), range)
    }

    /// Switch to the month view.
    pub fn show_month_selector(&mut self) -> bool {
        let year = self
            .view
            .show_months(self.adapter.as_ref(), self.initial_date());
        self.request_scroll(year);
        true
    }

    /// Switch to the year view.
    pub fn show_year_selector(&mut self) -> bool {
        let start = self.view.show_years(
            self.adapter.as_ref(),
            self.initial_date(),
            self.adapter.today(),
        );
        self.request_scroll(start);
        true
    }

    /// Show the years of one range.
    pub fn select_year_range(&mut self, start: i32) -> bool {
        self.view.select_year_range(start);
        self.request_scroll(start);
        true
    }

    /// Page back.
    pub fn go_prev(&mut self) -> bool {
        let r = self.view.go_prev(self.adapter.as_ref(), &self.constraints);
        if let Some(id) = r {
            self.cursor = self.view.anchor();
            self.request_scroll(id);
        }
        r.is_some()
    }

    /// Page forward.
    pub fn go_next(&mut self) -> bool {
        let r = self.view.go_next(self.adapter.as_ref(), &self.constraints);
        if let Some(id) = r {
            self.cursor = self.view.anchor();
            self.request_scroll(id);
        }
        r.is_some()
    }

    pub fn prev_month(&mut self) -> bool {
        let r = self
            .view
            .prev_month(self.adapter.as_ref(), &self.constraints);
        if let Some(month) = r {
            self.cursor = self.view.anchor();
            self.request_scroll(month as i32);
        }
        r.is_some()
    }

    pub fn next_month(&mut self) -> bool {
        let r = self
            .view
            .next_month(self.adapter.as_ref(), &self.constraints);
        if let Some(month) = r {
            self.cursor = self.view.anchor();
            self.request_scroll(month as i32);
        }
        r.is_some()
    }

    pub fn is_prev_disabled(&self) -> bool {
        self.view
            .is_prev_disabled(self.adapter.as_ref(), &self.constraints)
    }

    pub fn is_next_disabled(&self) -> bool {
        self.view
            .is_next_disabled(self.adapter.as_ref(), &self.constraints)
    }

    /// Move the keyboard cursor. Days in the day view, months in
    /// the month view, years in the year view.
    pub fn move_cursor(&mut self, n: i64) -> bool {
        let cursor = match self.view.view_mode() {
            ViewMode::Days => self.adapter.add_days(self.cursor, n),
            ViewMode::Months => self.adapter.add_months(self.cursor, n as i32),
            ViewMode::Years => self.adapter.add_years(self.cursor, n as i32),
        };
        self.set_cursor(cursor)
    }

    /// Move the keyboard cursor to today.
    pub fn move_to_today(&mut self) -> bool {
        let today = self.adapter.today();
        self.set_cursor(today)
    }

    fn set_cursor(&mut self, cursor: NaiveDateTime) -> bool {
        if cursor == self.cursor {
            return false;
        }
        self.cursor = cursor;
        match self.view.view_mode() {
            ViewMode::Days => {
                if !self.adapter.is_same_month(cursor, self.view.anchor()) {
                    self.view.set_anchor(cursor);
                    self.request_scroll(self.adapter.get_month(cursor) as i32);
                }
            }
            ViewMode::Months => {
                if !self.adapter.is_same_year(cursor, self.view.anchor()) {
                    self.request_scroll(self.adapter.get_year(cursor));
                }
                self.view.set_anchor(cursor);
            }
            ViewMode::Years => {
                let year = self.adapter.get_year(cursor);
                if !self.view.year_list().contains(&year) {
                    let start = match find_year_range(self.view.year_ranges(), year) {
                        Some(idx) => self.view.year_ranges()[idx].start,
                        None => year,
                    };
                    self.view.select_year_range(start);
                    self.request_scroll(start);
                }
            }
        }
        true
    }

    /// Scroll the sidebar to the item with this id with the next
    /// render. A newer request replaces an older one.
    pub fn request_scroll(&mut self, id: i32) {
        if self.show_sidebar {
            self.scroll.set(id);
        }
    }

    /// Pending scroll request.
    pub fn take_scroll(&mut self) -> Option<i32> {
        self.scroll.take()
    }

    /// Sidebar items for the current view, as (id, label).
    pub fn sidebar_items(&self) -> Vec<(i32, String)> {
        match self.view.view_mode() {
            ViewMode::Days => (1..=12)
                .map(|m| (m, self.month_name(m as u32)))
                .collect(),
            ViewMode::Months => self
                .view
                .year_list()
                .iter()
                .map(|y| (*y, y.to_string()))
                .collect(),
            ViewMode::Years => self
                .view
                .year_ranges()
                .iter()
                .map(|r| (r.start, format!("{}-{}", r.start, r.end)))
                .collect(),
        }
    }

    /// Is this sidebar item the current month/year/range.
    pub fn is_active_sidebar_item(&self, id: i32) -> bool {
        match self.view.view_mode() {
            ViewMode::Days => self.is_active_month(id as u32),
            ViewMode::Months => self.is_active_year(id),
            ViewMode::Years => self.is_active_year_range(id),
        }
    }

    /// Is this sidebar item disabled.
    pub fn is_sidebar_item_disabled(&self, id: i32) -> bool {
        match self.view.view_mode() {
            ViewMode::Days => self.is_month_disabled(id as u32),
            ViewMode::Months => self.is_year_disabled(id),
            ViewMode::Years => self.is_year_range_disabled(YearRange::new(id)),
        }
    }

    /// Apply a scroll request to the sidebar.
    pub(crate) fn apply_scroll(&mut self, rows: usize) {
        if let Some(id) = self.scroll.take() {
            let items = self.sidebar_items();
            if let Some(idx) = items.iter().position(|(v, _)| *v == id) {
                let max = items.len().saturating_sub(rows);
                self.sidebar_offset = idx.saturating_sub(rows / 2).min(max);
            }
        }
    }

    /// Scroll the sidebar without changing anything else.
    pub fn scroll_sidebar(&mut self, delta: isize) -> bool {
        let len = self.sidebar_items().len();
        let old = self.sidebar_offset;
        self.sidebar_offset = old
            .saturating_add_signed(delta)
            .min(len.saturating_sub(1));
        old != self.sidebar_offset
    }

    /// Is this a preset range equal to the selection.
    /// Custom is active if no other preset is.
    fn preset_matches(
        &self,
        idx: usize,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> bool {
        let Some(preset) = self.presets.get(idx) else {
            return false;
        };
        match preset.value {
            PresetValue::Range(p_start, p_end) => match (start, end) {
                (Some(start), Some(end)) => {
                    self.adapter.is_same_day(p_start, start) && self.adapter.is_same_day(p_end, end)
                }
                _ => false,
            },
            PresetValue::Custom => !(0..self.presets.len())
                .filter(|i| *i != idx)
                .filter(|i| self.presets[*i].value != PresetValue::Custom)
                .any(|i| self.preset_matches(i, start, end)),
        }
    }
}

/// Selection specific part of the picker operations.
///
/// Implemented for `DatePickerState<SingleSelection>` and
/// `DatePickerState<RangeSelection>`.
pub trait PickerCommit {
    /// Store a validated and clamped date.
    fn commit_date(&mut self, date: NaiveDateTime) -> PickerOutcome;

    /// The time-picker changed the time.
    fn time_changed(&mut self, time: NaiveTime) -> PickerOutcome;

    /// Confirm the current selection.
    fn ok_click(&mut self) -> PickerOutcome;
}

impl<Selection> DatePickerState<Selection>
where
    Selection: PickerSelection,
    Self: PickerCommit,
{
    /// Select a day.
    ///
    /// Disabled days are ignored. With the time-picker the time of
    /// its columns is used, otherwise the start of the day.
    /// The result is clamped to the constraints.
    pub fn select_date(&mut self, date: NaiveDateTime) -> PickerOutcome {
        if self.is_date_disabled(date) {
            return PickerOutcome::Unchanged;
        }
        let date = self.prepare_date(date);
        self.cursor = date;
        if !self.adapter.is_same_month(date, self.view.anchor()) {
            self.view.set_anchor(date);
            self.request_scroll(self.adapter.get_month(date) as i32);
        }
        self.commit_date(date)
    }

    /// Select a month of the current year.
    ///
    /// In month mode this selects the first of the month. Otherwise
    /// the picker switches to the day view of the month.
    pub fn select_month(&mut self, month: u32) -> PickerOutcome {
        if self.is_month_disabled(month) {
            return PickerOutcome::Unchanged;
        }
        let Some(date) = self
            .adapter
            .create_date(self.current_year(), month, 1)
        else {
            return PickerOutcome::Unchanged;
        };
        self.view.set_anchor(date);
        self.cursor = date;
        if self.mode == PickerMode::Month {
            let date = self.prepare_date(date);
            self.commit_date(date)
        } else {
            self.view.set_view_mode(ViewMode::Days);
            self.request_scroll(month as i32);
            PickerOutcome::Changed
        }
    }

    /// Select a year.
    ///
    /// In year mode this selects the first day of the year.
    /// From the sidebar it only changes the year of the view,
    /// otherwise the picker switches to the month view.
    pub fn select_year(&mut self, year: i32, side_selector: bool) -> PickerOutcome {
        if self.is_year_disabled(year) {
            return PickerOutcome::Unchanged;
        }
        if self.mode == PickerMode::Year {
            let Some(date) = self.adapter.create_date(year, 1, 1) else {
                return PickerOutcome::Unchanged;
            };
            self.view.set_anchor(date);
            self.cursor = date;
            let date = self.prepare_date(date);
            self.commit_date(date)
        } else if side_selector {
            let date = self.adapter.set_year(self.initial_date(), year);
            self.view.set_anchor(date);
            self.cursor = date;
            self.request_scroll(year);
            PickerOutcome::Changed
        } else {
            let date = self.adapter.set_year(self.view.anchor(), year);
            self.view.set_anchor(date);
            self.cursor = date;
            let year = self.view.show_months(self.adapter.as_ref(), date);
            self.request_scroll(year);
            PickerOutcome::Changed
        }
    }

    /// Select today. With the time-picker the current time is kept.
    pub fn today_click(&mut self) -> PickerOutcome {
        let today = self.adapter.today();
        if self.is_date_disabled(today) {
            return PickerOutcome::Unchanged;
        }
        let today = if self.show_time {
            today
        } else {
            self.adapter.start_of_day(today)
        };
        let today = self
            .constraints
            .clamp_date(self.adapter.as_ref(), today, self.show_time);
        self.view.set_view_mode(self.mode.view_mode());
        self.view.set_anchor(today);
        self.cursor = today;
        self.request_scroll(self.adapter.get_month(today) as i32);
        self.commit_date(today)
    }

    /// Enter on the keyboard cursor.
    pub fn select_cursor(&mut self) -> PickerOutcome {
        match self.view.view_mode() {
            ViewMode::Days => self.select_date(self.cursor),
            ViewMode::Months => self.select_month(self.adapter.get_month(self.cursor)),
            ViewMode::Years => self.select_year(self.adapter.get_year(self.cursor), false),
        }
    }

    /// Forward the result of the time-picker.
    pub(crate) fn time_outcome(&mut self, r: TimeOutcome) -> PickerOutcome {
        match r {
            TimeOutcome::Saved => match self.time.value() {
                Some(v) => self.time_changed(v.time()),
                None => PickerOutcome::Unchanged,
            },
            TimeOutcome::Selected => PickerOutcome::Changed,
            r => Outcome::from(r).into(),
        }
    }

    /// Keyboard navigation of the grid.
    pub(crate) fn handle_grid_keys(&mut self, event: &crossterm::event::Event) -> PickerOutcome {
        let (row, col) = match self.view.view_mode() {
            ViewMode::Days => (7, 1),
            ViewMode::Months | ViewMode::Years => (3, 1),
        };
        match event {
            ct_event!(keycode press Left) => self.move_cursor(-col).into(),
            ct_event!(keycode press Right) => self.move_cursor(col).into(),
            ct_event!(keycode press Up) => self.move_cursor(-row).into(),
            ct_event!(keycode press Down) => self.move_cursor(row).into(),
            ct_event!(keycode press PageUp) => self.go_prev().into(),
            ct_event!(keycode press PageDown) => self.go_next().into(),
            ct_event!(keycode press CONTROL-Up) => match self.view.view_mode() {
                ViewMode::Days => self.show_month_selector().into(),
                ViewMode::Months => self.show_year_selector().into(),
                ViewMode::Years => PickerOutcome::Unchanged,
            },
            ct_event!(keycode press CONTROL-Home) => self.move_to_today().into(),
            ct_event!(keycode press Enter) | ct_event!(key press ' ') => self.select_cursor(),
            _ => PickerOutcome::Continue,
        }
    }

    /// Mouse handling common to all selections.
    pub(crate) fn handle_mouse(&mut self, event: &crossterm::event::Event) -> PickerOutcome {
        match event {
            ct_event!(mouse down Left for x, y) => {
                let pos = (*x, *y).into();
                if self.area_prev.contains(pos) {
                    self.go_prev().into()
                } else if self.area_next.contains(pos) {
                    self.go_next().into()
                } else if self.area_title.contains(pos) {
                    match self.view.view_mode() {
                        ViewMode::Days => self.show_month_selector().into(),
                        ViewMode::Months => self.show_year_selector().into(),
                        ViewMode::Years => PickerOutcome::Unchanged,
                    }
                } else if self.area_today.contains(pos) {
                    self.today_click()
                } else if self.area_ok.contains(pos) {
                    self.ok_click()
                } else if let Some(n) = item_at(&self.area_sidebar_items, *x, *y) {
                    self.click_sidebar(self.sidebar_offset + n)
                } else {
                    match self.view.view_mode() {
                        ViewMode::Days => match item_at(&self.area_days, *x, *y) {
                            Some(n) => self.select_date(self.days()[n]),
                            None => PickerOutcome::Continue,
                        },
                        ViewMode::Months => match item_at(&self.area_months, *x, *y) {
                            Some(n) => self.select_month(n as u32 + 1),
                            None => PickerOutcome::Continue,
                        },
                        ViewMode::Years => match item_at(&self.area_years, *x, *y) {
                            Some(n) => match self.view.year_list().get(n) {
                                Some(year) => self.select_year(*year, false),
                                None => PickerOutcome::Unchanged,
                            },
                            None => PickerOutcome::Continue,
                        },
                    }
                }
            }
            ct_event!(scroll up for x, y) => {
                if self.area_sidebar.contains((*x, *y).into()) {
                    self.scroll_sidebar(-1).into()
                } else if self.area_grid.contains((*x, *y).into()) {
                    self.go_prev().into()
                } else {
                    PickerOutcome::Continue
                }
            }
            ct_event!(scroll down for x, y) => {
                if self.area_sidebar.contains((*x, *y).into()) {
                    self.scroll_sidebar(1).into()
                } else if self.area_grid.contains((*x, *y).into()) {
                    self.go_next().into()
                } else {
                    PickerOutcome::Continue
                }
            }
            _ => PickerOutcome::Continue,
        }
    }

    fn click_sidebar(&mut self, idx: usize) -> PickerOutcome {
        let Some((id, _)) = self.sidebar_items().get(idx).cloned() else {
            return PickerOutcome::Unchanged;
        };
        match self.view.view_mode() {
            ViewMode::Days => self.select_month(id as u32),
            ViewMode::Months => self.select_year(id, true),
            ViewMode::Years => self.select_year_range(id).into(),
        }
    }
}

impl<Selection> DatePickerState<Selection>
where
    Selection: PickerSelection,
{
    /// Time of the time-picker or the start of the day, then
    /// clamped.
    pub(crate) fn prepare_date(&self, date: NaiveDateTime) -> NaiveDateTime {
        let date = if self.show_time {
            match self.time.selected().to_time(self.time.time_format()) {
                Some(time) => date.date().and_time(time),
                None => date,
            }
        } else {
            self.adapter.start_of_day(date)
        };
        self.clamp(date)
    }

    /// Clamp to the constraints. The time is only kept with the
    /// time-picker.
    pub fn clamp(&self, date: NaiveDateTime) -> NaiveDateTime {
        self.constraints
            .clamp_date(self.adapter.as_ref(), date, self.show_time)
    }

    /// Format with the display calendar.
    pub fn format_date(&self, date: NaiveDateTime) -> String {
        self.adapter.format(date, &self.format)
    }

    /// Format with the value calendar.
    pub fn format_value(&self, date: NaiveDateTime) -> String {
        self.value_adapter().format(date, &self.format)
    }

    /// Parse with the display calendar and clamp.
    pub fn parse_input(&self, text: &str) -> Result<NaiveDateTime, PickerError> {
        let date = self.adapter.parse(text.trim(), &self.format)?;
        Ok(self.clamp(date))
    }

    /// Correct the text of an input field.
    ///
    /// Unparsable text becomes today. The date is clamped and
    /// formatted again.
    pub fn validate_and_correct_input(&self, text: &str) -> String {
        let date = match self.adapter.parse(text.trim(), &self.format) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("correct input {:?}: {}", text, e);
                let today = self.adapter.today();
                if self.show_time {
                    today
                } else {
                    self.adapter.start_of_day(today)
                }
            }
        };
        self.format_date(self.clamp(date))
    }

    /// Show the date after an external change of the value.
    pub(crate) fn show_date(&mut self, date: NaiveDateTime) {
        self.view.set_anchor(date);
        self.view.adjust_to_valid_range(&self.constraints);
        self.cursor = self.view.anchor();
        self.request_scroll(self.adapter.get_month(date) as i32);
    }

    /// Compare with the last emitted value and remember it.
    pub(crate) fn emit_if_changed(&mut self, value: (String, Option<String>)) -> bool {
        if self.last_emitted.as_ref() == Some(&value) {
            false
        } else {
            self.last_emitted = Some(value);
            true
        }
    }

    /// Mark a value as already emitted.
    pub(crate) fn set_emitted(&mut self, value: Option<(String, Option<String>)>) {
        self.last_emitted = value;
    }
}
