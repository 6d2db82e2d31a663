#![cfg(feature = "serde")]

use chrono::NaiveDate;
use rat_datepicker::adapter::CalendarType;
use rat_datepicker::grid::YearRange;
use rat_datepicker::picker::ValueCalendar;
use rat_datepicker::selection::DateRange;
use rat_datepicker::time::{Period, TimeConfig};
use rat_datepicker::view::PickerMode;

#[test]
fn test_serde() {
    let range = DateRange {
        start: NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
        end: None,
    };
    let s = serde_json::to_string_pretty(&range).unwrap();
    println!("{}", s);
    let v: DateRange = serde_json::from_str(&s).unwrap();
    assert_eq!(v, range);

    let time = TimeConfig {
        hour: 3,
        minute: 15,
        second: 0,
        period: Period::Pm,
    };
    let s = serde_json::to_string_pretty(&time).unwrap();
    let v: TimeConfig = serde_json::from_str(&s).unwrap();
    assert_eq!(v, time);

    let s = serde_json::to_string_pretty(&(ValueCalendar::Jalali, PickerMode::Month)).unwrap();
    let v: (ValueCalendar, PickerMode) = serde_json::from_str(&s).unwrap();
    assert_eq!(v, (ValueCalendar::Jalali, PickerMode::Month));

    let s = serde_json::to_string_pretty(&CalendarType::Jalali).unwrap();
    let v: CalendarType = serde_json::from_str(&s).unwrap();
    assert_eq!(v, CalendarType::Jalali);

    let s = serde_json::to_string_pretty(&YearRange::new(2017)).unwrap();
    let v: YearRange = serde_json::from_str(&s).unwrap();
    println!("{:#?}", v);
    assert_eq!(v, YearRange::new(2017));
}
