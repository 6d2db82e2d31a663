use crossterm::event::Event;
use rat_datepicker::event::{ConsumedEvent, HandleEvent, MouseOnly, Outcome, Regular};
use rat_datepicker::event::{PickerOutcome, TimeOutcome};
use rat_datepicker::focus::HasFocus;
use rat_datepicker::picker::{DatePicker, DatePickerState, DatePickerStyle};
use rat_datepicker::reloc::RelocatableState;
use rat_datepicker::selection::{RangeSelection, SingleSelection};
use rat_datepicker::time::{TimePicker, TimePickerState, TimePickerStyle};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::StatefulWidget;
use std::fmt::Debug;

macro_rules! conform_widget {
    (CORE: $widget:ty, $state:ty, $style:ty) => {{
        let v = <$widget>::default();
        fn debug(_: &impl Debug) {}
        debug(&v);
        fn clone(_: &impl Clone) {}
        clone(&v);

        _ = v;
    }};
    (BASE: $widget:ty, $state:ty, $style:ty) => {{
        let mut v = <$widget>::default();

        v = v.block(Block::default());
        v = v.border_style(Style::default());
        v = v.styles(<$style>::default());
        v = v.style(Style::default());

        fn stateful_widget(_: &impl StatefulWidget<State = $state>) {}
        stateful_widget(&v);

        let mut state = <$state>::default();
        let mut buf = Buffer::default();
        <$widget>::default().render(Rect::new(0, 0, 0, 0), &mut buf, &mut state);
        assert_eq!(state.area, Rect::new(0, 0, 0, 0));

        let mut state = <$state>::default();
        let mut buf = Buffer::empty(Rect::new(5, 5, 15, 15));
        <$widget>::default().render(Rect::new(5, 5, 15, 15), &mut buf, &mut state);
        assert_eq!(state.area, Rect::new(5, 5, 15, 15));
    }};
    (TITLE: $widget:ty, $state:ty, $style:ty) => {{
        let mut v = <$widget>::default();
        v = v.title_style(Style::default());
        _ = v;
    }};
    (SIZED: $widget:ty, $state:ty, $style:ty) => {{
        let _ = <$widget>::size;
    }};
    (WIDTH: $widget:ty, $state:ty, $style:ty) => {{
        let _ = <$widget>::width;
    }};
}

macro_rules! conform_state {
    (CORE: $state:ty, $event:ident, $outcome:ty) => {{
        let v = <$state>::default();

        fn debug(_: &impl Debug) {}
        debug(&v);
        fn clone(_: &impl Clone) {}
        clone(&v);
        fn focus(_: &impl HasFocus) {}
        focus(&v);

        let _ = <$state>::new;
    }};
    (BASE: $state:ty, $event:ident, $outcome:ty) => {{
        let mut v = <$state>::default();

        fn relocatable(_: &impl RelocatableState) {}
        relocatable(&v);

        let _: $outcome = v.handle(&Event::FocusGained, MouseOnly);
        let r: $outcome = v.handle(&Event::FocusGained, $event);

        fn consumed(_: &impl ConsumedEvent) {}
        consumed(&r);
        fn outcome(_: &impl Into<Outcome>) {}
        outcome(&r);

        _ = <$state>::new();
        _ = <$state>::named("some");

        _ = v.area;
        _ = v.inner;
        _ = v.non_exhaustive;
    }};
}

type SinglePicker<'a> = DatePicker<'a, SingleSelection>;
type SingleState = DatePickerState<SingleSelection>;
type RangePicker<'a> = DatePicker<'a, RangeSelection>;
type RangeState = DatePickerState<RangeSelection>;

#[test]
fn date_picker() {
    conform_widget!(CORE: SinglePicker<'_>, SingleState, DatePickerStyle);
    conform_widget!(BASE: SinglePicker<'_>, SingleState, DatePickerStyle);
    conform_widget!(TITLE: SinglePicker<'_>, SingleState, DatePickerStyle);
    conform_widget!(SIZED: SinglePicker<'_>, SingleState, DatePickerStyle);
    conform_state!(CORE: SingleState, Regular, PickerOutcome);
    conform_state!(BASE: SingleState, Regular, PickerOutcome);
}

#[test]
fn range_picker() {
    conform_widget!(CORE: RangePicker<'_>, RangeState, DatePickerStyle);
    conform_widget!(BASE: RangePicker<'_>, RangeState, DatePickerStyle);
    conform_widget!(TITLE: RangePicker<'_>, RangeState, DatePickerStyle);
    conform_widget!(SIZED: RangePicker<'_>, RangeState, DatePickerStyle);
    conform_state!(CORE: RangeState, Regular, PickerOutcome);
    conform_state!(BASE: RangeState, Regular, PickerOutcome);
}

#[test]
fn time_picker() {
    conform_widget!(CORE: TimePicker<'_>, TimePickerState, TimePickerStyle);
    conform_widget!(BASE: TimePicker<'_>, TimePickerState, TimePickerStyle);
    conform_widget!(WIDTH: TimePicker<'_>, TimePickerState, TimePickerStyle);
    conform_state!(CORE: TimePickerState, Regular, TimeOutcome);
    conform_state!(BASE: TimePickerState, Regular, TimeOutcome);
}
