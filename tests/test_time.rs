use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rat_datepicker::event::TimeOutcome;
use rat_datepicker::time::{
    nearest_time_slot, normalize_time_in_day, Period, TimeColumn, TimeConfig, TimeFormat,
    TimePickerState,
};

fn dt(h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .expect("date")
        .and_hms_opt(h, mi, 0)
        .expect("time")
}

fn hm(h: u32, mi: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, mi, 0).expect("time")
}

#[test]
fn test_normalize() {
    let v = normalize_time_in_day(dt(10, 15), |d| d.hour() < 9);
    assert!(v.valid);
    assert_eq!(v.value, dt(10, 15));

    let v = normalize_time_in_day(dt(7, 30), |d| d.hour() < 9);
    assert!(!v.valid);
    assert_eq!(v.value, dt(9, 0));

    // nothing later, search backwards
    let v = normalize_time_in_day(dt(23, 0), |d| d.hour() >= 22);
    assert_eq!(v.value, dt(21, 59));

    let v = normalize_time_in_day(dt(12, 0), |d| d.hour() > 0);
    assert_eq!(v.value, dt(0, 59));

    // nothing at all
    let v = normalize_time_in_day(dt(12, 0), |_| true);
    assert!(!v.valid);
    assert_eq!(v.value, dt(0, 0));
}

#[test]
fn test_nearest_slot() {
    assert_eq!(nearest_time_slot(dt(10, 10), |_| false), Some(dt(10, 10)));
    assert_eq!(
        nearest_time_slot(dt(7, 10), |d| d.hour() < 9),
        Some(dt(9, 10))
    );
    // the previous slot is taken if the next one is disabled
    assert_eq!(
        nearest_time_slot(dt(12, 10), |d| d.hour() >= 12),
        Some(dt(11, 40))
    );
    assert_eq!(nearest_time_slot(dt(7, 10), |_| true), None);
}

#[test]
fn test_time_config() {
    let c = TimeConfig::from_time(hm(0, 5), TimeFormat::H12);
    assert_eq!(c.hour, 12);
    assert_eq!(c.period, Period::Am);
    assert_eq!(c.hour24(TimeFormat::H12), 0);

    let c = TimeConfig::from_time(hm(13, 5), TimeFormat::H12);
    assert_eq!(c.hour, 1);
    assert_eq!(c.period, Period::Pm);
    assert_eq!(c.to_time(TimeFormat::H12), Some(hm(13, 5)));

    let c = TimeConfig::from_time(hm(13, 5), TimeFormat::H24);
    assert_eq!(c.hour, 13);
    assert_eq!(c.to_time(TimeFormat::H24), Some(hm(13, 5)));
}

#[test]
fn test_state_format() {
    let mut state = TimePickerState::new();
    assert_eq!(state.time_format(), TimeFormat::H12);
    assert_eq!(state.hours(), (1..=12).collect::<Vec<_>>());

    state.set_value(Some(dt(14, 30)));
    assert_eq!(state.selected().hour, 2);
    assert_eq!(state.selected().period, Period::Pm);

    // switching the clock keeps the time
    state.set_format("HH:mm:ss");
    assert_eq!(state.time_format(), TimeFormat::H24);
    assert!(state.show_seconds());
    assert_eq!(state.hours().len(), 24);
    assert_eq!(state.selected().hour, 14);
    assert_eq!(state.text(), "14:30:00");
}

#[test]
fn test_state_select_save() {
    let mut state = TimePickerState::new();
    state.set_format("HH:mm");
    state.set_base_date(dt(0, 0));

    assert_eq!(state.select_hour(10), TimeOutcome::Selected);
    assert_eq!(state.select_minute(45), TimeOutcome::Selected);
    assert_eq!(state.value(), None);
    assert_eq!(state.save(), TimeOutcome::Saved);
    assert_eq!(state.value(), Some(dt(10, 45)));
    assert_eq!(state.save(), TimeOutcome::Unchanged);

    assert_eq!(state.select_hour(24), TimeOutcome::Unchanged);
    assert_eq!(state.select_minute(60), TimeOutcome::Unchanged);

    state.set_inline(true);
    assert_eq!(state.select_minute(50), TimeOutcome::Saved);
    assert_eq!(state.value(), Some(dt(10, 50)));
}

#[test]
fn test_state_disabled() {
    let mut state = TimePickerState::new();
    state.set_format("HH:mm");
    state.set_base_date(dt(0, 0));
    state.set_min_time(Some(hm(9, 0)));
    state.set_max_time(Some(hm(17, 30)));

    assert!(state.is_hour_disabled(8));
    assert!(!state.is_hour_disabled(9));
    assert!(!state.is_hour_disabled(17));
    assert!(state.is_hour_disabled(18));
    assert_eq!(state.select_hour(8), TimeOutcome::Unchanged);

    state.select_hour(17);
    assert!(state.is_minute_disabled(45));
    assert!(!state.is_minute_disabled(30));

    // the selected time 00:00 is disabled and is not saved
    let mut state = TimePickerState::new();
    state.set_format("HH:mm");
    state.set_time_filter(|d| d.hour() < 9);
    assert_eq!(state.save(), TimeOutcome::Unchanged);
    assert_eq!(state.value(), None);
}

#[test]
fn test_state_text_input() {
    let mut state = TimePickerState::new();
    state.set_format("HH:mm");
    state.set_base_date(dt(0, 0));
    state.set_time_filter(|d| d.hour() < 9);

    assert!(state.parse_time_text("11:20"));
    assert_eq!(state.selected().hour, 11);
    assert_eq!(state.value(), None);
    assert!(!state.parse_time_text("11:"));

    assert_eq!(state.validate_and_update("07:10"), TimeOutcome::Saved);
    assert_eq!(state.value(), Some(dt(9, 10)));
    assert_eq!(state.selected().hour, 9);

    assert_eq!(state.validate_and_update("xx"), TimeOutcome::Unchanged);
    assert_eq!(state.validate_and_update(""), TimeOutcome::Unchanged);
    assert_eq!(state.value(), Some(dt(9, 10)));

    let mut state = TimePickerState::new();
    state.set_format("HH:mm");
    state.set_time_filter(|_| true);
    assert_eq!(state.validate_and_update("07:10"), TimeOutcome::Unchanged);

    assert!(state.set_min_time_str("08:15").is_ok());
    assert_eq!(state.min_time(), Some(hm(8, 15)));
    assert!(state.set_max_time_str("nope").is_err());
}

#[test]
fn test_state_keyboard() {
    let mut state = TimePickerState::new();
    state.set_format("HH:mm");
    state.set_base_date(dt(0, 0));
    state.set_min_time(Some(hm(2, 0)));

    assert_eq!(state.column, TimeColumn::Hour);
    // hours 0 and 1 are disabled, the first step lands on 2
    assert_eq!(state.move_selection(1), TimeOutcome::Selected);
    assert_eq!(state.selected().hour, 2);
    assert_eq!(state.move_selection(-1), TimeOutcome::Unchanged);

    assert_eq!(state.next_column(), TimeOutcome::Changed);
    assert_eq!(state.column, TimeColumn::Minute);
    assert_eq!(state.next_column(), TimeOutcome::Unchanged);
    assert_eq!(state.move_selection(1), TimeOutcome::Selected);
    assert_eq!(state.selected().minute, 1);
    assert_eq!(state.prev_column(), TimeOutcome::Changed);

    state.set_format("hh:mm a");
    state.column = TimeColumn::Period;
    assert_eq!(state.move_selection(1), TimeOutcome::Selected);
    assert_eq!(state.selected().period, Period::Pm);
    assert_eq!(state.move_selection(1), TimeOutcome::Unchanged);
}
