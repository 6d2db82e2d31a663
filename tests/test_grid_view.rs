use chrono::{NaiveDate, NaiveDateTime};
use rat_datepicker::adapter::{GregorianAdapter, JalaliAdapter};
use rat_datepicker::constraint::DateConstraints;
use rat_datepicker::grid::{
    day_grid, find_year_range, month_list, year_list, year_list_around, year_ranges, YearRange,
    GRID_DAYS,
};
use rat_datepicker::view::{PickerMode, ViewMode, ViewState};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("date")
        .and_hms_opt(0, 0, 0)
        .expect("time")
}

#[test]
fn test_day_grid() {
    let g = GregorianAdapter::default();
    let days = day_grid(&g, dt(2024, 3, 14));
    assert_eq!(days.len(), GRID_DAYS);
    // 2024-03-01 is a friday
    assert_eq!(days[0], dt(2024, 2, 25));
    assert_eq!(days[5], dt(2024, 3, 1));
    assert_eq!(days[41], dt(2024, 4, 6));

    let j = JalaliAdapter::default();
    let days = day_grid(&j, dt(2024, 3, 25));
    // 1 farvardin 1403 is a wednesday, weeks start on saturday
    assert_eq!(days[0], dt(2024, 3, 16));
    assert_eq!(days[4], dt(2024, 3, 20));
}

#[test]
fn test_year_lists() {
    assert_eq!(month_list()[0], 1);
    assert_eq!(month_list()[11], 12);

    assert_eq!(year_list(2020, 3), vec![2020, 2021, 2022]);

    let around = year_list_around(2024, 15);
    assert_eq!(around.len(), 15);
    assert_eq!(around[0], 2016);
    assert!(around.contains(&2024));

    let ranges = year_ranges(2024, 15);
    assert_eq!(ranges.len(), 15);
    assert_eq!(ranges[7], YearRange::new(2017));
    assert_eq!(ranges[7].end, 2031);
    assert_eq!(ranges[8].start, ranges[7].end + 1);
    assert_eq!(find_year_range(&ranges, 2024), Some(7));
    assert_eq!(find_year_range(&ranges, 1000), None);
}

#[test]
fn test_view_modes() {
    let g = GregorianAdapter::default();
    let c = DateConstraints::new();
    let today = dt(2024, 3, 14);

    let mut view = ViewState::new(today);
    assert_eq!(view.view_mode(), ViewMode::Days);

    view.reset(&g, PickerMode::Month, dt(2020, 6, 1), today);
    assert_eq!(view.view_mode(), ViewMode::Months);
    assert!(view.year_list().contains(&2020));

    assert_eq!(view.go_next(&g, &c), Some(2021));
    assert_eq!(view.anchor(), dt(2021, 6, 1));
    assert_eq!(view.go_prev(&g, &c), Some(2020));

    let start = view.show_years(&g, dt(2020, 6, 1), today);
    assert_eq!(view.view_mode(), ViewMode::Years);
    assert_eq!(start, 2017);
    assert!(view.is_active_year_range(2017));
    assert_eq!(view.year_ranges().len(), 15);

    assert_eq!(view.go_next(&g, &c), Some(2032));
    assert!(view.is_active_year_range(2032));
    assert_eq!(view.go_prev(&g, &c), Some(2017));

    view.select_year_range(2002);
    assert_eq!(view.year_list()[0], 2002);
    assert_eq!(view.year_list().len(), 15);
}

#[test]
fn test_view_month_paging() {
    let g = GregorianAdapter::default();
    let c = DateConstraints::new()
        .with_min_date(dt(2024, 2, 10))
        .with_max_date(dt(2024, 4, 10));

    let mut view = ViewState::new(dt(2024, 3, 31));
    assert!(!view.is_prev_disabled(&g, &c));
    assert_eq!(view.go_prev(&g, &c), Some(2));
    assert_eq!(view.anchor(), dt(2024, 2, 29));
    assert!(view.is_prev_disabled(&g, &c));
    assert_eq!(view.go_prev(&g, &c), None);

    assert_eq!(view.next_month(&g, &c), Some(3));
    assert_eq!(view.next_month(&g, &c), Some(4));
    assert!(view.is_next_disabled(&g, &c));
    assert_eq!(view.next_month(&g, &c), None);
}

#[test]
fn test_view_adjust() {
    let c = DateConstraints::new().with_min_date(dt(2024, 2, 10));

    let mut view = ViewState::new(dt(2023, 1, 1));
    assert!(view.adjust_to_valid_range(&c));
    assert_eq!(view.anchor(), dt(2024, 2, 10));
    assert!(!view.adjust_to_valid_range(&c));
}

#[test]
fn test_view_paging_bounds() {
    let g = GregorianAdapter::default();
    let today = dt(2024, 3, 14);
    let c = DateConstraints::new()
        .with_min_date(dt(2023, 5, 1))
        .with_max_date(dt(2024, 12, 31));

    let mut view = ViewState::new(today);
    view.show_months(&g, today);
    assert!(view.is_next_disabled(&g, &c));
    assert_eq!(view.go_next(&g, &c), None);
    assert_eq!(view.anchor(), today);
    assert_eq!(view.go_prev(&g, &c), Some(2023));
    assert_eq!(view.go_prev(&g, &c), None);
    assert_eq!(view.anchor(), dt(2023, 3, 14));

    let c = DateConstraints::new()
        .with_min_date(dt(2010, 1, 1))
        .with_max_date(dt(2024, 12, 31));
    let start = view.show_years(&g, dt(2020, 6, 1), today);
    assert_eq!(start, 2017);
    assert_eq!(view.go_next(&g, &c), None);
    assert_eq!(view.year_list()[0], 2017);
    assert_eq!(view.go_prev(&g, &c), Some(2002));
    assert_eq!(view.go_prev(&g, &c), None);
    assert_eq!(view.year_list()[0], 2002);
}
