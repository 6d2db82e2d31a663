use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rat_datepicker::adapter::CalendarType;
use rat_datepicker::constraint::DateConstraints;
use rat_datepicker::event::PickerOutcome;
use rat_datepicker::picker::{DatePickerState, PickerCommit, Preset, PresetValue, ValueCalendar};
use rat_datepicker::selection::{ActiveEndpoint, DateRange, PickerSelection, RangeSelection};
use std::time::{Duration, Instant};

fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("date")
        .and_hms_opt(h, mi, 0)
        .expect("time")
}

fn hm(h: u32, mi: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, mi, 0).expect("time")
}

fn picker() -> DatePickerState<RangeSelection> {
    let mut state = DatePickerState::<RangeSelection>::named("range");
    state.set_current_date(dt(2024, 3, 14, 0, 0));
    state
}

#[test]
fn test_select_range() {
    let mut state = picker();

    assert_eq!(state.select_date(dt(2024, 3, 10, 0, 0)), PickerOutcome::RangeStarted);
    assert_eq!(state.active(), ActiveEndpoint::End);
    assert_eq!(state.take_changed_value(), None);

    assert_eq!(state.select_date(dt(2024, 3, 15, 0, 0)), PickerOutcome::Selected);
    assert_eq!(
        state.value(),
        Some(DateRange {
            start: dt(2024, 3, 10, 0, 0),
            end: Some(dt(2024, 3, 15, 0, 0)),
        })
    );
    assert_eq!(state.text(ActiveEndpoint::Start), "2024/03/10");
    assert_eq!(state.text(ActiveEndpoint::End), "2024/03/15");
    assert_eq!(
        state.take_changed_value(),
        Some(("2024/03/10".into(), "2024/03/15".into()))
    );
    assert_eq!(state.take_changed_value(), None);

    // a complete range starts over
    assert_eq!(state.select_date(dt(2024, 3, 20, 0, 0)), PickerOutcome::RangeStarted);
    // before the start as well
    assert_eq!(state.select_date(dt(2024, 3, 18, 0, 0)), PickerOutcome::RangeStarted);
    assert_eq!(
        state.value(),
        Some(DateRange {
            start: dt(2024, 3, 18, 0, 0),
            end: None,
        })
    );
    assert_eq!(state.value_text(), Some(("2024/03/18".into(), None)));
    assert_eq!(state.ok_click(), PickerOutcome::Unchanged);
}

#[test]
fn test_hover() {
    let mut state = picker();
    state.set_constraints(
        DateConstraints::new().with_disabled_dates([NaiveDate::from_ymd_opt(2024, 3, 16)
            .expect("date")]),
    );

    assert!(!state.set_hover(Some(dt(2024, 3, 12, 0, 0))));

    state.select_date(dt(2024, 3, 10, 0, 0));
    assert!(state.set_hover(Some(dt(2024, 3, 14, 0, 0))));
    assert!(state.selection.is_in_range(dt(2024, 3, 12, 0, 0)));

    // disabled days don't preview
    state.set_hover(Some(dt(2024, 3, 16, 0, 0)));
    assert_eq!(state.selection.hover(), None);

    state.set_hover(Some(dt(2024, 3, 14, 0, 0)));
    state.select_date(dt(2024, 3, 13, 0, 0));
    assert_eq!(state.selection.hover(), None);
}

#[test]
fn test_time_debounce() {
    let mut state = picker();
    state.set_format("yyyy/MM/dd HH:mm");
    state.set_value(Some(dt(2024, 3, 10, 10, 0)), Some(dt(2024, 3, 15, 12, 0)));
    assert_eq!(state.take_changed_value(), None);

    assert!(state.set_active(ActiveEndpoint::End));
    assert_eq!(state.time.value(), Some(dt(2024, 3, 15, 12, 0)));

    let t0 = Instant::now();
    assert_eq!(state.on_time_change(hm(14, 0), t0), PickerOutcome::Changed);
    assert_eq!(state.selection.end(), Some(dt(2024, 3, 15, 14, 0)));
    // held back until the delay has passed
    assert_eq!(state.take_changed_value(), None);
    assert!(state.debounce_sleep(t0).is_some());
    assert_eq!(state.poll_debounce(t0 + Duration::from_millis(100)), None);

    // a second change restarts the delay
    let t1 = t0 + Duration::from_millis(200);
    assert_eq!(state.on_time_change(hm(15, 0), t1), PickerOutcome::Changed);
    assert_eq!(state.poll_debounce(t0 + Duration::from_millis(400)), None);
    assert_eq!(
        state.poll_debounce(t1 + Duration::from_millis(400)),
        Some(DateRange {
            start: dt(2024, 3, 10, 10, 0),
            end: Some(dt(2024, 3, 15, 15, 0)),
        })
    );
    assert_eq!(state.debounce_sleep(t1), None);
    assert_eq!(
        state.take_changed_value(),
        Some(("2024/03/10 10:00".into(), "2024/03/15 15:00".into()))
    );
}

#[test]
fn test_time_order() {
    let mut state = picker();
    state.set_format("yyyy/MM/dd HH:mm");
    state.set_value(Some(dt(2024, 3, 10, 10, 0)), Some(dt(2024, 3, 10, 12, 0)));
    let now = Instant::now();

    state.set_active(ActiveEndpoint::End);
    assert_eq!(state.on_time_change(hm(8, 0), now), PickerOutcome::Unchanged);
    assert_eq!(state.selection.end(), Some(dt(2024, 3, 10, 12, 0)));

    state.set_active(ActiveEndpoint::Start);
    assert_eq!(state.on_time_change(hm(13, 0), now), PickerOutcome::Unchanged);
    // start changes are not delayed
    assert_eq!(state.on_time_change(hm(9, 0), now), PickerOutcome::Changed);
    assert_eq!(state.debounce_sleep(now), None);
    assert_eq!(
        state.take_changed_value(),
        Some(("2024/03/10 09:00".into(), "2024/03/10 12:00".into()))
    );
}

#[test]
fn test_ok_flushes() {
    let mut state = picker();
    state.set_format("yyyy/MM/dd HH:mm");
    state.set_value(Some(dt(2024, 3, 10, 10, 0)), Some(dt(2024, 3, 15, 12, 0)));
    state.set_active(ActiveEndpoint::End);
    state.on_time_change(hm(14, 0), Instant::now());

    assert_eq!(state.ok_click(), PickerOutcome::Selected);
    assert_eq!(state.debounce_sleep(Instant::now()), None);
    assert_eq!(
        state.take_changed_value(),
        Some(("2024/03/10 10:00".into(), "2024/03/15 14:00".into()))
    );
}

#[test]
fn test_with_time_start() {
    let mut state = picker();
    state.set_format("yyyy/MM/dd HH:mm");

    // with the time-picker the start stays active after the first click
    assert_eq!(state.select_date(dt(2024, 3, 10, 0, 0)), PickerOutcome::RangeStarted);
    assert_eq!(state.active(), ActiveEndpoint::Start);
    assert_eq!(state.select_date(dt(2024, 3, 11, 0, 0)), PickerOutcome::Selected);
    assert_eq!(state.active(), ActiveEndpoint::End);
}

#[test]
fn test_presets() {
    let mut state = picker();
    assert_eq!(state.presets().len(), 4);
    assert_eq!(state.presets()[0].label, "Last day");
    assert_eq!(state.presets()[3].value, PresetValue::Custom);

    assert_eq!(state.select_preset(1), PickerOutcome::Selected);
    assert_eq!(state.selected_preset(), Some(1));
    assert!(state.is_active_preset(1));
    assert!(!state.is_active_preset(0));
    assert!(!state.is_active_preset(3));
    assert_eq!(state.active(), ActiveEndpoint::End);
    assert!(state.selection.is_complete());

    state.select_date(dt(2001, 1, 1, 0, 0));
    state.select_date(dt(2001, 1, 2, 0, 0));
    assert!(!state.is_active_preset(1));
    assert!(state.is_active_preset(3));

    assert_eq!(state.select_preset(3), PickerOutcome::Changed);
    assert_eq!(state.selected_preset(), Some(3));
    assert_eq!(state.select_preset(9), PickerOutcome::Unchanged);
}

#[test]
fn test_custom_presets() {
    let mut state = picker();
    state.set_max_date(Some(dt(2024, 3, 15, 0, 0)));
    state.set_presets(vec![
        Preset::new("Q1", dt(2024, 1, 1, 0, 0), dt(2024, 3, 31, 0, 0)),
        Preset::custom("Other"),
    ]);
    assert_eq!(state.selected_preset(), None);

    assert_eq!(state.select_preset(0), PickerOutcome::Selected);
    // clamped to the constraints
    assert_eq!(
        state.value(),
        Some(DateRange {
            start: dt(2024, 1, 1, 0, 0),
            end: Some(dt(2024, 3, 15, 0, 0)),
        })
    );
    assert_eq!(state.current_month(), 1);

    // user presets survive a change of the calendar
    state.set_calendar_type(CalendarType::Jalali);
    assert_eq!(state.presets()[0].label, "Q1");

    state.reset_presets();
    assert_eq!(state.presets().len(), 4);
}

#[test]
fn test_input() {
    let mut state = picker();

    assert_eq!(
        state.input_changed("2024/03/01", ActiveEndpoint::Start),
        PickerOutcome::Changed
    );
    assert_eq!(
        state.input_changed("2024/03/05", ActiveEndpoint::End),
        PickerOutcome::Changed
    );
    assert_eq!(state.active(), ActiveEndpoint::End);
    // an end before the start is ignored
    assert_eq!(
        state.input_changed("2024/02/01", ActiveEndpoint::End),
        PickerOutcome::Unchanged
    );
    assert_eq!(
        state.input_changed("2024/02/", ActiveEndpoint::End),
        PickerOutcome::Unchanged
    );
    assert_eq!(state.selection.end(), Some(dt(2024, 3, 5, 0, 0)));

    assert_eq!(state.input_blur("2024/03/05", ActiveEndpoint::End), None);
    assert_eq!(
        state.input_blur("2024/3/6", ActiveEndpoint::End),
        Some("2024/03/06".into())
    );
    assert_eq!(state.selection.end(), Some(dt(2024, 3, 6, 0, 0)));

    state.set_allow_empty(true);
    assert_eq!(state.input_blur("", ActiveEndpoint::End), None);
    assert_eq!(state.selection.end(), None);
    assert_eq!(state.input_blur("", ActiveEndpoint::Start), None);
    assert_eq!(state.value(), None);
}

#[test]
fn test_jalali_range() {
    let mut state = picker();
    state.set_calendar_type(CalendarType::Jalali);
    state.set_value_calendar(ValueCalendar::Gregorian);

    state.select_date(dt(2024, 3, 20, 0, 0));
    state.select_date(dt(2024, 3, 22, 0, 0));
    assert_eq!(state.text(ActiveEndpoint::Start), "1403/01/01");
    assert_eq!(state.text(ActiveEndpoint::End), "1403/01/03");
    assert_eq!(
        state.take_changed_value(),
        Some(("2024/03/20".into(), "2024/03/22".into()))
    );

    assert!(state
        .set_value_str("2024/04/01", "2024/04/10")
        .is_ok());
    assert_eq!(state.current_month(), 1);
    assert_eq!(state.text(ActiveEndpoint::Start), "1403/01/13");
    assert!(state.set_value_str("2024/04/01", "xx").is_err());
}
