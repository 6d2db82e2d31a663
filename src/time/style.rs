use crate::_private::NonExhaustive;
use ratatui::style::Style;
use ratatui::widgets::Block;

/// Composite style for the time-picker.
#[derive(Debug, Clone)]
pub struct TimePickerStyle {
    pub style: Style,
    pub header: Option<Style>,
    pub item: Option<Style>,
    pub select: Option<Style>,
    pub focus: Option<Style>,
    pub disabled: Option<Style>,
    pub block: Option<Block<'static>>,
    pub non_exhaustive: NonExhaustive,
}

impl Default for TimePickerStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            header: None,
            item: None,
            select: None,
            focus: None,
            disabled: None,
            block: None,
            non_exhaustive: NonExhaustive,
        }
    }
}
