use crate::_private::NonExhaustive;
use crate::time::TimePickerStyle;
use ratatui::style::Style;
use ratatui::widgets::Block;

/// Composite style for the date-picker.
#[derive(Debug, Clone)]
pub struct DatePickerStyle {
    pub style: Style,
    pub title: Option<Style>,
    pub nav: Option<Style>,
    pub weekday: Option<Style>,
    pub day: Option<Style>,
    /// Days of the previous and next month.
    pub other_month: Option<Style>,
    pub today: Option<Style>,
    pub select: Option<Style>,
    /// Days between start and end of a range.
    pub range: Option<Style>,
    pub disabled: Option<Style>,
    pub focus: Option<Style>,
    pub sidebar: Option<Style>,
    pub button: Option<Style>,
    pub block: Option<Block<'static>>,
    pub time: Option<TimePickerStyle>,
    pub non_exhaustive: NonExhaustive,
}

impl Default for DatePickerStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            title: None,
            nav: None,
            weekday: None,
            day: None,
            other_month: None,
            today: None,
            select: None,
            range: None,
            disabled: None,
            focus: None,
            sidebar: None,
            button: None,
            block: None,
            time: None,
            non_exhaustive: NonExhaustive,
        }
    }
}
