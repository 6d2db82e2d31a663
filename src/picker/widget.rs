use crate::grid::{month_list, GRID_DAYS, YEAR_PAGE};
use crate::picker::style::DatePickerStyle;
use crate::picker::DatePickerState;
use crate::selection::PickerSelection;
use crate::time::{TimePicker, TimePickerStyle};
use crate::util::{block_size, fill_buf_area, revert_style};
use crate::view::ViewMode;
use rat_focus::HasFocus;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
#[cfg(feature = "unstable-widget-ref")]
use ratatui::widgets::StatefulWidgetRef;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use std::marker::PhantomData;

const DAY_WIDTH: u16 = 3;
const GRID_WIDTH: u16 = 7 * DAY_WIDTH;
const SIDEBAR_WIDTH: u16 = 12;

/// Renders the date-picker.
///
/// Header with previous/title/next, then the day, month or
/// year grid. Optionally a sidebar with the months/years on the
/// left, the time-picker on the right and presets and buttons
/// below.
#[derive(Debug, Clone)]
pub struct DatePicker<'a, Selection> {
    style: Style,
    title_style: Option<Style>,
    nav_style: Option<Style>,
    weekday_style: Option<Style>,
    day_style: Option<Style>,
    other_month_style: Option<Style>,
    today_style: Option<Style>,
    select_style: Option<Style>,
    range_style: Option<Style>,
    disabled_style: Option<Style>,
    focus_style: Option<Style>,
    sidebar_style: Option<Style>,
    button_style: Option<Style>,
    time_style: Option<TimePickerStyle>,

    show_buttons: bool,

    block: Option<Block<'a>>,

    phantom: PhantomData<Selection>,
}

impl<Selection> Default for DatePicker<'_, Selection> {
    fn default() -> Self {
        Self {
            style: Default::default(),
            title_style: None,
            nav_style: None,
            weekday_style: None,
            day_style: None,
            other_month_style: None,
            today_style: None,
            select_style: None,
            range_style: None,
            disabled_style: None,
            focus_style: None,
            sidebar_style: None,
            button_style: None,
            time_style: None,
            show_buttons: true,
            block: None,
            phantom: PhantomData,
        }
    }
}

impl<'a, Selection> DatePicker<'a, Selection> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the composite style.
    #[inline]
    pub fn styles(mut self, s: DatePickerStyle) -> Self {
        self.style = s.style;
        if s.title.is_some() {
            self.title_style = s.title;
        }
        if s.nav.is_some() {
            self.nav_style = s.nav;
        }
        if s.weekday.is_some() {
            self.weekday_style = s.weekday;
        }
        if s.day.is_some() {
            self.day_style = s.day;
        }
        if s.other_month.is_some() {
            self.other_month_style = s.other_month;
        }
        if s.today.is_some() {
            self.today_style = s.today;
        }
        if s.select.is_some() {
            self.select_style = s.select;
        }
        if s.range.is_some() {
            self.range_style = s.range;
        }
        if s.disabled.is_some() {
            self.disabled_style = s.disabled;
        }
        if s.focus.is_some() {
            self.focus_style = s.focus;
        }
        if s.sidebar.is_some() {
            self.sidebar_style = s.sidebar;
        }
        if s.button.is_some() {
            self.button_style = s.button;
        }
        if s.time.is_some() {
            self.time_style = s.time;
        }
        if s.block.is_some() {
            self.block = s.block;
        }
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Base style.
    #[inline]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    #[inline]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = Some(style);
        self
    }

    #[inline]
    pub fn weekday_style(mut self, style: Style) -> Self {
        self.weekday_style = Some(style);
        self
    }

    #[inline]
    pub fn day_style(mut self, style: Style) -> Self {
        self.day_style = Some(style);
        self
    }

    #[inline]
    pub fn today_style(mut self, style: Style) -> Self {
        self.today_style = Some(style);
        self
    }

    #[inline]
    pub fn select_style(mut self, style: Style) -> Self {
        self.select_style = Some(style);
        self
    }

    /// Days between start and end.
    #[inline]
    pub fn range_style(mut self, style: Style) -> Self {
        self.range_style = Some(style);
        self
    }

    #[inline]
    pub fn disabled_style(mut self, style: Style) -> Self {
        self.disabled_style = Some(style);
        self
    }

    #[inline]
    pub fn focus_style(mut self, style: Style) -> Self {
        self.focus_style = Some(style);
        self
    }

    /// Border style of the block.
    #[inline]
    pub fn border_style(mut self, style: Style) -> Self {
        self.block = self.block.map(|v| v.border_style(style));
        self
    }

    /// Show today and ok buttons.
    #[inline]
    pub fn show_buttons(mut self, show: bool) -> Self {
        self.show_buttons = show;
        self
    }

    #[inline]
    pub fn block(mut self, b: Block<'a>) -> Self {
        self.block = Some(b);
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Inherent size of the widget.
    pub fn size(&self, state: &DatePickerState<Selection>) -> Size
    where
        Selection: PickerSelection,
    {
        let mut width = GRID_WIDTH;
        if state.show_sidebar {
            width += SIDEBAR_WIDTH + 1;
        }
        if state.show_time {
            let time = self.time_picker();
            width += 1 + time.width(&state.time);
        }
        // header, weekdays, 6 weeks
        let mut height = 1 + 1 + 6;
        if !state.presets.is_empty() {
            height += 1;
        }
        if self.show_buttons {
            height += 1;
        }
        let block = block_size(&self.block);
        Size::new(width + block.width, height + block.height)
    }

    fn time_picker(&self) -> TimePicker<'a> {
        let mut time = TimePicker::new().style(self.style).show_header(false);
        if let Some(style) = &self.time_style {
            time = time.styles(style.clone());
        }
        time
    }
}

#[cfg(feature = "unstable-widget-ref")]
impl<'a, Selection> StatefulWidgetRef for DatePicker<'a, Selection>
where
    Selection: PickerSelection,
{
    type State = DatePickerState<Selection>;

    fn render_ref(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl<Selection> StatefulWidget for DatePicker<'_, Selection>
where
    Selection: PickerSelection,
{
    type State = DatePickerState<Selection>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

fn render_ref<Selection: PickerSelection>(
    widget: &DatePicker<'_, Selection>,
    area: Rect,
    buf: &mut Buffer,
    state: &mut DatePickerState<Selection>,
) {
    state.adjust_view();
    state.area = area;

    let block = widget.block.clone().unwrap_or_else(|| Block::new().style(widget.style));
    state.inner = block.inner(area);
    block.render(area, buf);
    fill_buf_area(buf, state.inner, " ", widget.style);

    let inner = state.inner;

    // footer rows
    let mut bottom = inner.bottom();
    let area_buttons = if widget.show_buttons && inner.height > 0 {
        bottom -= 1;
        Rect::new(inner.x, bottom, inner.width, 1)
    } else {
        Rect::new(inner.x, bottom, inner.width, 0)
    };
    let area_presets = if !state.presets.is_empty() && bottom > inner.y {
        bottom -= 1;
        Rect::new(inner.x, bottom, inner.width, 1)
    } else {
        Rect::new(inner.x, bottom, inner.width, 0)
    };
    let body = Rect::new(
        inner.x,
        inner.y,
        inner.width,
        bottom.saturating_sub(inner.y),
    );

    // columns
    let mut x = body.x;
    if state.show_sidebar {
        state.area_sidebar = Rect::new(x, body.y, SIDEBAR_WIDTH, body.height).intersection(body);
        x += SIDEBAR_WIDTH + 1;
    } else {
        state.area_sidebar = Rect::new(x, body.y, 0, 0);
    }
    let area_cal = Rect::new(x, body.y, GRID_WIDTH, body.height).intersection(body);
    x += GRID_WIDTH + 1;
    let area_time = if state.show_time {
        Rect::new(x, body.y, body.right().saturating_sub(x), body.height).intersection(body)
    } else {
        Rect::new(x, body.y, 0, 0)
    };

    render_header(widget, area_cal, buf, state);
    match state.view.view_mode() {
        ViewMode::Days => {
            render_days(widget, area_cal, buf, state);
            state.area_months = Default::default();
            state.area_years.clear();
        }
        ViewMode::Months => {
            render_months(widget, area_cal, buf, state);
            state.area_days = [Rect::default(); GRID_DAYS];
            state.area_years.clear();
            state.area_weekdays = Rect::default();
        }
        ViewMode::Years => {
            render_years(widget, area_cal, buf, state);
            state.area_days = [Rect::default(); GRID_DAYS];
            state.area_months = Default::default();
            state.area_weekdays = Rect::default();
        }
    }
    render_sidebar(widget, buf, state);
    render_presets(widget, area_presets, buf, state);
    render_buttons(widget, area_buttons, buf, state);

    if state.show_time {
        widget.time_picker().render(area_time, buf, &mut state.time);
    } else {
        state.time.area = Rect::default();
    }
}

fn render_header<Selection: PickerSelection>(
    widget: &DatePicker<'_, Selection>,
    area: Rect,
    buf: &mut Buffer,
    state: &mut DatePickerState<Selection>,
) {
    if area.height == 0 {
        state.area_prev = Rect::default();
        state.area_title = Rect::default();
        state.area_next = Rect::default();
        return;
    }
    let nav_style = widget.nav_style.unwrap_or(widget.style);
    let disabled_style = widget.disabled_style.unwrap_or(widget.style);
    let title_style = widget.title_style.unwrap_or(widget.style);

    state.area_prev = Rect::new(area.x, area.y, 2, 1).intersection(area);
    state.area_next = Rect::new(area.right().saturating_sub(2), area.y, 2, 1).intersection(area);
    state.area_title = Rect::new(
        area.x + 2,
        area.y,
        area.width.saturating_sub(4),
        1,
    )
    .intersection(area);

    let style = if state.is_prev_disabled() {
        disabled_style
    } else {
        nav_style
    };
    Span::from("<").style(style).render(state.area_prev, buf);
    let style = if state.is_next_disabled() {
        disabled_style
    } else {
        nav_style
    };
    Line::from(">")
        .alignment(Alignment::Right)
        .style(style)
        .render(state.area_next, buf);
    Line::from(state.title())
        .alignment(Alignment::Center)
        .style(title_style)
        .render(state.area_title, buf);
}

fn render_days<Selection: PickerSelection>(
    widget: &DatePicker<'_, Selection>,
    area: Rect,
    buf: &mut Buffer,
    state: &mut DatePickerState<Selection>,
) {
    let weekday_style = widget.weekday_style.unwrap_or(widget.style);
    let day_style = widget.day_style.unwrap_or(widget.style);
    let other_month_style = widget.other_month_style.unwrap_or(day_style);
    let disabled_style = widget.disabled_style.unwrap_or(day_style);
    let range_style = widget.range_style.unwrap_or(day_style);
    let today_style = widget.today_style.unwrap_or(day_style);
    let select_style = widget.select_style.unwrap_or(revert_style(widget.style));
    let focus_style = widget.focus_style.unwrap_or(revert_style(widget.style));

    state.area_weekdays = Rect::new(area.x, area.y + 1, area.width, 1).intersection(area);
    let mut x = state.area_weekdays.x;
    for name in state.weekday_names() {
        let cell =
            Rect::new(x, state.area_weekdays.y, DAY_WIDTH, 1).intersection(state.area_weekdays);
        Span::from(name.chars().take(2).collect::<String>())
            .style(weekday_style)
            .render(cell, buf);
        x += DAY_WIDTH;
    }

    state.area_grid = Rect::new(area.x, area.y + 2, area.width, 6).intersection(area);

    let focused = state.grid_focus.is_focused();
    let days = state.days();
    for (i, day) in days.iter().enumerate() {
        let row = (i / 7) as u16;
        let col = (i % 7) as u16;
        let cell = Rect::new(
            state.area_grid.x + col * DAY_WIDTH,
            state.area_grid.y + row,
            DAY_WIDTH,
            1,
        )
        .intersection(state.area_grid);
        state.area_days[i] = cell;

        let mut style = if state.is_same_month(*day) {
            day_style
        } else {
            other_month_style
        };
        if state.is_date_disabled(*day) {
            style = style.patch(disabled_style);
        } else if state.selection.is_in_range(*day) {
            style = style.patch(range_style);
        }
        if state.is_today(*day) {
            style = style.patch(today_style);
        }
        if state.selection.is_selected(*day) {
            style = style.patch(select_style);
        }
        if focused && state.adapter.is_same_day(*day, state.cursor) {
            style = style.patch(focus_style);
        }

        Span::from(format!("{:>2} ", state.adapter.get_day(*day)))
            .style(style)
            .render(cell, buf);
    }
}

/// Grid of 3 columns with the given labels.
fn grid_cells(area: Rect, len: usize) -> Vec<Rect> {
    let width = area.width / 3;
    (0..len)
        .map(|i| {
            let row = (i / 3) as u16;
            let col = (i % 3) as u16;
            Rect::new(area.x + col * width, area.y + row, width, 1).intersection(area)
        })
        .collect()
}

fn render_months<Selection: PickerSelection>(
    widget: &DatePicker<'_, Selection>,
    area: Rect,
    buf: &mut Buffer,
    state: &mut DatePickerState<Selection>,
) {
    let day_style = widget.day_style.unwrap_or(widget.style);
    let disabled_style = widget.disabled_style.unwrap_or(day_style);
    let select_style = widget.select_style.unwrap_or(revert_style(widget.style));
    let focus_style = widget.focus_style.unwrap_or(revert_style(widget.style));

    state.area_grid = Rect::new(area.x, area.y + 2, area.width, 4).intersection(area);
    let cells = grid_cells(state.area_grid, 12);

    let focused = state.grid_focus.is_focused();
    let cursor_month = state.adapter.get_month(state.cursor);
    let selected = state
        .selection
        .any_selected()
        .filter(|v| state.adapter.get_year(*v) == state.current_year())
        .map(|v| state.adapter.get_month(v));

    for (i, month) in month_list().into_iter().enumerate() {
        let cell = cells[i];
        state.area_months[i] = cell;

        let mut style = day_style;
        if state.is_month_disabled(month) {
            style = style.patch(disabled_style);
        }
        if selected == Some(month) {
            style = style.patch(select_style);
        }
        if focused && cursor_month == month {
            style = style.patch(focus_style);
        }
        Line::from(state.adapter.month_name(month, crate::locale::NameStyle::Short))
            .alignment(Alignment::Center)
            .style(style)
            .render(cell, buf);
    }
}

fn render_years<Selection: PickerSelection>(
    widget: &DatePicker<'_, Selection>,
    area: Rect,
    buf: &mut Buffer,
    state: &mut DatePickerState<Selection>,
) {
    let day_style = widget.day_style.unwrap_or(widget.style);
    let disabled_style = widget.disabled_style.unwrap_or(day_style);
    let today_style = widget.today_style.unwrap_or(day_style);
    let select_style = widget.select_style.unwrap_or(revert_style(widget.style));
    let focus_style = widget.focus_style.unwrap_or(revert_style(widget.style));

    state.area_grid =
        Rect::new(area.x, area.y + 2, area.width, (YEAR_PAGE / 3) as u16).intersection(area);
    let years = state.view.year_list().to_vec();
    let cells = grid_cells(state.area_grid, years.len());

    let focused = state.grid_focus.is_focused();
    let cursor_year = state.adapter.get_year(state.cursor);
    let this_year = state.adapter.get_year(state.adapter.today());
    let selected = state
        .selection
        .any_selected()
        .map(|v| state.adapter.get_year(v));

    state.area_years.clear();
    for (cell, year) in cells.into_iter().zip(years) {
        state.area_years.push(cell);

        let mut style = day_style;
        if state.is_year_disabled(year) {
            style = style.patch(disabled_style);
        }
        if state.show_today && year == this_year {
            style = style.patch(today_style);
        }
        if selected == Some(year) {
            style = style.patch(select_style);
        }
        if focused && cursor_year == year {
            style = style.patch(focus_style);
        }
        Line::from(year.to_string())
            .alignment(Alignment::Center)
            .style(style)
            .render(cell, buf);
    }
}

fn render_sidebar<Selection: PickerSelection>(
    widget: &DatePicker<'_, Selection>,
    buf: &mut Buffer,
    state: &mut DatePickerState<Selection>,
) {
    state.area_sidebar_items.clear();
    if !state.show_sidebar || state.area_sidebar.is_empty() {
        return;
    }
    let sidebar_style = widget.sidebar_style.unwrap_or(widget.style);
    let disabled_style = widget.disabled_style.unwrap_or(sidebar_style);
    let select_style = widget.select_style.unwrap_or(revert_style(widget.style));

    let rows = state.area_sidebar.height as usize;
    state.apply_scroll(rows);

    let items = state.sidebar_items();
    state.sidebar_offset = state.sidebar_offset.min(items.len().saturating_sub(1));

    let area = state.area_sidebar;
    for (i, (id, label)) in items.iter().skip(state.sidebar_offset).take(rows).enumerate() {
        let cell = Rect::new(area.x, area.y + i as u16, area.width, 1);
        let mut style = sidebar_style;
        if state.is_sidebar_item_disabled(*id) {
            style = style.patch(disabled_style);
        }
        if state.is_active_sidebar_item(*id) {
            style = style.patch(select_style);
        }
        Span::from(label.as_str()).style(style).render(cell, buf);
        state.area_sidebar_items.push(cell);
    }
}

fn render_presets<Selection: PickerSelection>(
    widget: &DatePicker<'_, Selection>,
    area: Rect,
    buf: &mut Buffer,
    state: &mut DatePickerState<Selection>,
) {
    state.area_presets.clear();
    if area.is_empty() {
        return;
    }
    let button_style = widget.button_style.unwrap_or(widget.style);
    let select_style = widget.select_style.unwrap_or(revert_style(widget.style));

    let mut x = area.x;
    for (i, preset) in state.presets.iter().enumerate() {
        let width = preset.label.chars().count() as u16 + 2;
        let cell = Rect::new(x, area.y, width, 1).intersection(area);
        let style = if state.selected_preset == Some(i) {
            select_style
        } else {
            button_style
        };
        Line::from(preset.label.as_str())
            .alignment(Alignment::Center)
            .style(style)
            .render(cell, buf);
        state.area_presets.push(cell);
        x = x.saturating_add(width + 1);
    }
}

fn render_buttons<Selection: PickerSelection>(
    widget: &DatePicker<'_, Selection>,
    area: Rect,
    buf: &mut Buffer,
    state: &mut DatePickerState<Selection>,
) {
    if area.is_empty() {
        state.area_today = Rect::default();
        state.area_ok = Rect::default();
        return;
    }
    let button_style = widget.button_style.unwrap_or(widget.style);
    let disabled_style = widget.disabled_style.unwrap_or(button_style);

    let loc = state.adapter.locale();
    let today_label = if state.show_time { loc.now } else { loc.today };
    let today_width = today_label.chars().count() as u16 + 2;
    let ok_width = loc.ok.chars().count() as u16 + 2;

    state.area_today = Rect::new(area.x, area.y, today_width, 1).intersection(area);
    state.area_ok = Rect::new(
        area.right().saturating_sub(ok_width),
        area.y,
        ok_width,
        1,
    )
    .intersection(area);

    let style = if state.is_date_disabled(state.adapter.today()) {
        disabled_style
    } else {
        button_style
    };
    Line::from(today_label)
        .alignment(Alignment::Center)
        .style(style)
        .render(state.area_today, buf);
    Line::from(loc.ok)
        .alignment(Alignment::Center)
        .style(button_style)
        .render(state.area_ok, buf);
}
