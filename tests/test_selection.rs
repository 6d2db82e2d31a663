use chrono::{NaiveDate, NaiveDateTime};
use rat_datepicker::debounce::{Debounce, Deferred};
use rat_datepicker::selection::{
    ActiveEndpoint, DateRange, PickerSelection, RangeSelection, RangeStep, SingleSelection,
};
use std::time::{Duration, Instant};

fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("date")
        .and_hms_opt(h, 0, 0)
        .expect("time")
}

#[test]
fn test_single() {
    let mut s = SingleSelection::default();
    assert_eq!(s.count(), 0);
    assert!(s.select(dt(2024, 3, 5, 10)));
    assert!(!s.select(dt(2024, 3, 5, 10)));
    assert_eq!(s.count(), 1);
    assert!(s.is_selected(dt(2024, 3, 5, 0)));
    assert!(!s.is_in_range(dt(2024, 3, 5, 0)));
    assert!(!s.is_range());
    s.clear();
    assert_eq!(s.selected(), None);
}

#[test]
fn test_range_machine() {
    let mut r = RangeSelection::default();

    assert_eq!(r.select(dt(2024, 3, 10, 0)), RangeStep::Started);
    assert_eq!(r.count(), 1);
    assert_eq!(r.select(dt(2024, 3, 15, 0)), RangeStep::Completed);
    assert!(r.is_complete());
    assert!(r.is_in_range(dt(2024, 3, 12, 0)));
    assert!(!r.is_in_range(dt(2024, 3, 10, 0)));
    assert!(r.is_range_start(dt(2024, 3, 10, 23)));
    assert!(r.is_range_end(dt(2024, 3, 15, 1)));

    // a complete range starts over
    assert_eq!(r.select(dt(2024, 3, 20, 0)), RangeStep::Started);
    assert_eq!(r.end(), None);

    // before the start starts over too
    assert_eq!(r.select(dt(2024, 3, 18, 0)), RangeStep::Started);
    assert_eq!(r.start(), Some(dt(2024, 3, 18, 0)));
    assert_eq!(r.end(), None);

    // same day is allowed as end
    assert_eq!(r.select(dt(2024, 3, 18, 0)), RangeStep::Completed);
    assert_eq!(
        r.range(),
        Some(DateRange {
            start: dt(2024, 3, 18, 0),
            end: Some(dt(2024, 3, 18, 0)),
        })
    );
}

#[test]
fn test_range_hover() {
    let mut r = RangeSelection::default();
    assert!(!r.set_hover(Some(dt(2024, 3, 12, 0))));
    assert_eq!(r.hover(), None);

    r.select(dt(2024, 3, 10, 0));
    assert!(r.set_hover(Some(dt(2024, 3, 14, 0))));
    assert!(r.is_in_range(dt(2024, 3, 12, 0)));
    assert!(!r.is_selected(dt(2024, 3, 14, 0)));

    r.select(dt(2024, 3, 13, 0));
    assert_eq!(r.hover(), None);
    assert!(!r.is_in_range(dt(2024, 3, 13, 0)));
}

#[test]
fn test_range_setters() {
    let mut r = RangeSelection::default();

    assert!(!r.set_end(Some(dt(2024, 3, 15, 0))));
    assert_eq!(r.end(), None);

    assert!(r.set_range(dt(2024, 3, 15, 0), dt(2024, 3, 10, 0)));
    assert_eq!(r.start(), Some(dt(2024, 3, 10, 0)));
    assert_eq!(r.end(), Some(dt(2024, 3, 15, 0)));

    assert!(!r.set_end(Some(dt(2024, 3, 5, 0))));
    assert_eq!(r.end(), Some(dt(2024, 3, 15, 0)));

    assert!(r.set_start(Some(dt(2024, 3, 20, 0))));
    assert_eq!(r.end(), None);

    r.set_active(ActiveEndpoint::End);
    assert_eq!(r.lead_selection(), None);
    assert_eq!(r.any_selected(), Some(dt(2024, 3, 20, 0)));

    r.clear();
    assert_eq!(r.active(), ActiveEndpoint::Start);
    assert_eq!(r.count(), 0);
}

#[test]
fn test_debounce() {
    let t0 = Instant::now();
    let mut d = Debounce::new(Duration::from_millis(300));

    d.schedule(1, t0);
    assert!(d.is_pending());
    assert_eq!(d.poll(t0 + Duration::from_millis(100)), None);

    // last write wins and restarts the delay
    d.schedule(2, t0 + Duration::from_millis(200));
    assert_eq!(d.poll(t0 + Duration::from_millis(400)), None);
    assert_eq!(
        d.sleep_time(t0 + Duration::from_millis(400)),
        Some(Duration::from_millis(100))
    );
    assert_eq!(d.poll(t0 + Duration::from_millis(500)), Some(2));
    assert!(!d.is_pending());

    d.schedule(3, t0);
    assert_eq!(d.flush(), Some(3));
    assert_eq!(d.cancel(), None);
}

#[test]
fn test_deferred() {
    let mut d = Deferred::default();
    d.set(1);
    d.set(2);
    assert_eq!(d.peek(), Some(&2));
    assert_eq!(d.take(), Some(2));
    assert_eq!(d.take(), None);
}
