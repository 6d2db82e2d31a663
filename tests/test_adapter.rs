use chrono::{NaiveDate, NaiveDateTime};
use rat_datepicker::adapter::format::{
    compile_pattern, extract_date_pattern, extract_time_pattern, has_24h_clock, has_seconds,
    has_time_component,
};
use rat_datepicker::adapter::{
    from_jalali, is_jalali_leap_year, jalali_days_in_month, to_jalali, CalendarType, DateAdapter,
    GregorianAdapter, JalaliAdapter,
};
use rat_datepicker::locale::{NameStyle, ENGLISH};
use rat_datepicker::PickerError;

fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("date")
        .and_hms_opt(h, mi, 0)
        .expect("time")
}

#[test]
fn test_gregorian_fields() {
    let g = GregorianAdapter::default();

    assert_eq!(g.get_year(dt(2024, 3, 5, 0, 0)), 2024);
    assert_eq!(g.get_month(dt(2024, 3, 5, 0, 0)), 3);
    assert_eq!(g.get_day(dt(2024, 3, 5, 0, 0)), 5);
    assert_eq!(g.days_in_month_of(2024, 2), 29);
    assert_eq!(g.days_in_month_of(2023, 2), 28);
    assert_eq!(g.create_date(2024, 2, 30), None);
}

#[test]
fn test_gregorian_arithmetic() {
    let g = GregorianAdapter::default();

    // clamped to the end of february, time kept
    assert_eq!(g.add_months(dt(2024, 1, 31, 10, 15), 1), dt(2024, 2, 29, 10, 15));
    assert_eq!(g.add_months(dt(2024, 1, 15, 0, 0), -1), dt(2023, 12, 15, 0, 0));
    assert_eq!(g.add_years(dt(2024, 2, 29, 0, 0), 1), dt(2025, 2, 28, 0, 0));
    assert_eq!(g.set_year(dt(2024, 5, 6, 7, 8), 2020), dt(2020, 5, 6, 7, 8));
    assert_eq!(g.add_days(dt(2024, 2, 28, 0, 0), 2), dt(2024, 3, 1, 0, 0));

    assert_eq!(g.start_of_month(dt(2024, 3, 20, 13, 0)), dt(2024, 3, 1, 0, 0));
    assert_eq!(g.end_of_month(dt(2024, 3, 20, 13, 0)), dt(2024, 3, 31, 0, 0));
    // 2024-03-20 is a wednesday
    assert_eq!(g.start_of_week(dt(2024, 3, 20, 13, 0)), dt(2024, 3, 17, 0, 0));

    assert!(g.is_same_day(dt(2024, 3, 20, 1, 0), dt(2024, 3, 20, 23, 0)));
    assert!(g.is_same_month(dt(2024, 3, 1, 0, 0), dt(2024, 3, 31, 0, 0)));
    assert!(!g.is_same_month(dt(2024, 3, 1, 0, 0), dt(2023, 3, 1, 0, 0)));

    assert_eq!(
        g.apply_time(dt(2024, 3, 20, 0, 0), dt(2000, 1, 1, 17, 45)),
        dt(2024, 3, 20, 17, 45)
    );
}

#[test]
fn test_jalali_leap() {
    assert!(is_jalali_leap_year(1403));
    assert!(!is_jalali_leap_year(1404));
    assert_eq!(jalali_days_in_month(1403, 1), 31);
    assert_eq!(jalali_days_in_month(1403, 7), 30);
    assert_eq!(jalali_days_in_month(1403, 12), 30);
    assert_eq!(jalali_days_in_month(1404, 12), 29);
}

#[test]
fn test_jalali_conversion() {
    let nowruz = NaiveDate::from_ymd_opt(2024, 3, 20).expect("date");
    assert_eq!(to_jalali(nowruz), (1403, 1, 1));
    assert_eq!(from_jalali(1403, 1, 1), Some(nowruz));
    assert_eq!(from_jalali(1404, 1, 1), NaiveDate::from_ymd_opt(2025, 3, 21));
    assert_eq!(from_jalali(1404, 12, 30), None);

    // every day of a few years survives the round trip
    let mut d = NaiveDate::from_ymd_opt(2020, 1, 1).expect("date");
    let end = NaiveDate::from_ymd_opt(2027, 1, 1).expect("date");
    while d < end {
        let (y, m, dd) = to_jalali(d);
        assert_eq!(from_jalali(y, m, dd), Some(d), "{}", d);
        d = d.succ_opt().expect("date");
    }
}

#[test]
fn test_jalali_arithmetic() {
    let j = JalaliAdapter::default();

    assert_eq!(j.get_year(dt(2024, 3, 20, 0, 0)), 1403);
    assert_eq!(j.get_month(dt(2024, 3, 20, 0, 0)), 1);
    // 31 shahrivar + 1 month is 30 mehr
    let shahrivar_31 = j.create_date(1403, 6, 31).expect("date");
    let mehr_30 = j.create_date(1403, 7, 30).expect("date");
    assert_eq!(j.add_months(shahrivar_31, 1), mehr_30);
    // esfand 1403 has 30 days, esfand 1404 only 29
    let esfand_30 = j.create_date(1403, 12, 30).expect("date");
    assert_eq!(j.add_years(esfand_30, 1), j.create_date(1404, 12, 29).expect("date"));

    // week starts saturday
    assert_eq!(j.start_of_week(dt(2024, 3, 20, 0, 0)), dt(2024, 3, 16, 0, 0));
    assert_eq!(j.weekday_names(NameStyle::Long).len(), 7);
}

#[test]
fn test_calendar_type() {
    assert_eq!(
        CalendarType::Gregorian.adapter().calendar_type(),
        CalendarType::Gregorian
    );
    assert_eq!(
        CalendarType::Jalali.adapter().calendar_type(),
        CalendarType::Jalali
    );
    let j = CalendarType::Jalali.adapter_with(ENGLISH);
    assert_eq!(j.month_name(1, NameStyle::Long), "Farvardin");
    let g = CalendarType::Gregorian.adapter();
    assert_eq!(g.month_name(3, NameStyle::Long), "March");
}

#[test]
fn test_format() {
    let g = GregorianAdapter::default();
    let d = dt(2024, 3, 5, 14, 7);

    assert_eq!(g.format(d, "yyyy/MM/dd"), "2024/03/05");
    assert_eq!(g.format(d, "yyyy/MM/dd HH:mm"), "2024/03/05 14:07");
    assert_eq!(g.format(d, "hh:mm a"), "02:07 PM");
    assert_eq!(g.format(d, "d MMMM yy"), "5 March 24");
    assert_eq!(g.format(d, "'at' HH"), "at 14");
    assert_eq!(g.format(dt(2024, 3, 5, 0, 30), "h:mm a"), "12:30 AM");

    let j = JalaliAdapter::default();
    assert_eq!(j.format(dt(2024, 3, 20, 0, 0), "yyyy/MM/dd"), "1403/01/01");

    let j = JalaliAdapter::new(ENGLISH);
    assert_eq!(j.format(dt(2024, 3, 20, 0, 0), "d MMM yyyy"), "1 Far 1403");
    assert_eq!(j.format(dt(2024, 3, 20, 0, 0), "d MMMM yyyy"), "1 Farvardin 1403");
    assert_eq!(j.month_name(12, NameStyle::Short), "Esf");
    assert_eq!(j.month_name(12, NameStyle::Narrow), "E");
    assert_eq!(j.month_name(13, NameStyle::Short), "");
}

#[test]
fn test_parse() {
    let g = GregorianAdapter::default();

    assert_eq!(g.parse("2024/03/05", "yyyy/MM/dd"), Ok(dt(2024, 3, 5, 0, 0)));
    assert_eq!(
        g.parse("2024/3/5 9:30", "yyyy/MM/dd HH:mm"),
        Ok(dt(2024, 3, 5, 9, 30))
    );
    assert_eq!(
        g.parse("2024/03/05 09:30 PM", "yyyy/MM/dd hh:mm a"),
        Ok(dt(2024, 3, 5, 21, 30))
    );
    assert_eq!(g.parse("2024/03", "yyyy/MM"), Ok(dt(2024, 3, 1, 0, 0)));
    assert_eq!(g.parse("2024", "yyyy"), Ok(dt(2024, 1, 1, 0, 0)));

    assert_eq!(
        g.parse("2024/13/01", "yyyy/MM/dd"),
        Err(PickerError::InvalidDate(2024, 13, 1))
    );
    assert!(g.parse("2024-03-05", "yyyy/MM/dd").is_err());
    assert!(g.parse("2024/03/05x", "yyyy/MM/dd").is_err());
    assert!(g.parse("", "yyyy/MM/dd").is_err());

    let base = dt(2024, 3, 5, 0, 0);
    assert_eq!(
        g.parse_with_base("10:15", "HH:mm", base),
        Ok(dt(2024, 3, 5, 10, 15))
    );

    let j = JalaliAdapter::default();
    assert_eq!(j.parse("1403/01/01", "yyyy/MM/dd"), Ok(dt(2024, 3, 20, 0, 0)));
    assert_eq!(
        j.parse("۱۴۰۳/۰۱/۰۱", "yyyy/MM/dd"),
        Ok(dt(2024, 3, 20, 0, 0))
    );
    assert_eq!(
        j.parse("3200/01/01", "yyyy/MM/dd"),
        Err(PickerError::OutOfRange(3200))
    );
    assert_eq!(
        j.parse("1404/12/30", "yyyy/MM/dd"),
        Err(PickerError::InvalidDate(1404, 12, 30))
    );
}

#[test]
fn test_pattern() {
    assert!(compile_pattern("yyyy/MM/dd HH:mm:ss a").is_ok());
    assert!(matches!(
        compile_pattern("yyyy/QQ"),
        Err(PickerError::InvalidPattern(_))
    ));

    assert!(has_time_component("yyyy/MM/dd HH:mm"));
    assert!(!has_time_component("yyyy/MM/dd"));
    assert!(has_24h_clock("HH:mm"));
    assert!(!has_24h_clock("hh:mm a"));
    assert!(has_seconds("HH:mm:ss"));
    assert!(!has_seconds("HH:mm"));

    assert_eq!(extract_time_pattern("yyyy/MM/dd HH:mm"), "HH:mm");
    assert_eq!(extract_time_pattern("yyyy/MM/dd"), "HH:mm");
    assert_eq!(extract_date_pattern("yyyy/MM/dd HH:mm"), "yyyy/MM/dd");
    assert_eq!(extract_date_pattern("yyyy/MM/dd"), "yyyy/MM/dd");
}
