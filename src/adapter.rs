//!
//! Calendar arithmetic.
//!
//! All dates are [NaiveDateTime] in local wall-clock time. A day is
//! always the 24h period starting at 00:00:00, regardless of the
//! calendar. The adapter only decides how this day is split into
//! years, months and weeks, and how it is written down.
//!
//! There are two adapters, [GregorianAdapter] and [JalaliAdapter].
//! Use [CalendarType::adapter] to get one.
//!

use crate::locale::{Locale, NameStyle};
use crate::PickerError;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};
use std::fmt::Debug;
use std::ops::RangeInclusive;
use std::rc::Rc;

pub mod format;
mod gregorian;
mod jalali;

pub use gregorian::*;
pub use jalali::*;

/// Calendar systems.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum CalendarType {
    #[default]
    Gregorian,
    Jalali,
}

impl CalendarType {
    /// Adapter with the default locale for the calendar.
    pub fn adapter(self) -> Rc<dyn DateAdapter> {
        match self {
            CalendarType::Gregorian => Rc::new(GregorianAdapter::default()),
            CalendarType::Jalali => Rc::new(JalaliAdapter::default()),
        }
    }

    /// Adapter with a specific locale.
    pub fn adapter_with(self, locale: Locale) -> Rc<dyn DateAdapter> {
        match self {
            CalendarType::Gregorian => Rc::new(GregorianAdapter::new(locale)),
            CalendarType::Jalali => Rc::new(JalaliAdapter::new(locale)),
        }
    }
}

/// Calendar arithmetic for one calendar system.
///
/// Implementors provide the conversion between a day and its
/// year/month/day fields. Everything else has a default
/// implementation on top of that.
///
/// Months are 1-based.
pub trait DateAdapter: Debug {
    /// Which calendar.
    fn calendar_type(&self) -> CalendarType;

    /// Labels and names.
    fn locale(&self) -> &Locale;

    /// Year, month, day in this calendar.
    fn to_ymd(&self, date: NaiveDate) -> (i32, u32, u32);

    /// Day for the given fields. None if the fields are invalid.
    fn from_ymd(&self, year: i32, month: u32, day: u32) -> Option<NaiveDate>;

    /// Number of days of a month.
    fn days_in_month_of(&self, year: i32, month: u32) -> u32;

    /// First day of the week.
    fn first_weekday(&self) -> Weekday;

    /// Name of the month.
    fn month_name(&self, month: u32, style: NameStyle) -> String;

    /// Years this calendar can represent.
    fn year_range(&self) -> RangeInclusive<i32> {
        NaiveDate::MIN.year()..=NaiveDate::MAX.year()
    }

    /// Current local date and time.
    fn today(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn get_year(&self, date: NaiveDateTime) -> i32 {
        self.to_ymd(date.date()).0
    }

    fn get_month(&self, date: NaiveDateTime) -> u32 {
        self.to_ymd(date.date()).1
    }

    fn get_day(&self, date: NaiveDateTime) -> u32 {
        self.to_ymd(date.date()).2
    }

    fn get_days_in_month(&self, date: NaiveDateTime) -> u32 {
        let (y, m, _) = self.to_ymd(date.date());
        self.days_in_month_of(y, m)
    }

    /// Start of the given day.
    fn create_date(&self, year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
        self.from_ymd(year, month, day)
            .map(|v| v.and_time(NaiveTime::MIN))
    }

    fn add_days(&self, date: NaiveDateTime, days: i64) -> NaiveDateTime {
        TimeDelta::try_days(days)
            .and_then(|d| date.checked_add_signed(d))
            .unwrap_or(date)
    }

    fn add_minutes(&self, date: NaiveDateTime, minutes: i64) -> NaiveDateTime {
        TimeDelta::try_minutes(minutes)
            .and_then(|d| date.checked_add_signed(d))
            .unwrap_or(date)
    }

    /// Adds months in this calendar. The day is clamped to the
    /// length of the target month, the time of day is kept.
    fn add_months(&self, date: NaiveDateTime, months: i32) -> NaiveDateTime {
        let (y, m, d) = self.to_ymd(date.date());
        let total = y as i64 * 12 + (m as i64 - 1) + months as i64;
        let Ok(year) = i32::try_from(total.div_euclid(12)) else {
            return date;
        };
        let month = total.rem_euclid(12) as u32 + 1;
        let day = d.min(self.days_in_month_of(year, month));
        match self.from_ymd(year, month, day) {
            Some(v) => v.and_time(date.time()),
            None => date,
        }
    }

    fn add_years(&self, date: NaiveDateTime, years: i32) -> NaiveDateTime {
        self.add_months(date, years.saturating_mul(12))
    }

    /// Same month and day in another year. Clamped like add_months.
    fn set_year(&self, date: NaiveDateTime, year: i32) -> NaiveDateTime {
        let diff = year - self.get_year(date);
        self.add_years(date, diff)
    }

    fn start_of_day(&self, date: NaiveDateTime) -> NaiveDateTime {
        date.date().and_time(NaiveTime::MIN)
    }

    /// Column of the date in a week that starts with first_weekday().
    fn weekday_index(&self, date: NaiveDateTime) -> u32 {
        (date.weekday().num_days_from_sunday() + 7
            - self.first_weekday().num_days_from_sunday())
            % 7
    }

    fn start_of_week(&self, date: NaiveDateTime) -> NaiveDateTime {
        let idx = self.weekday_index(date);
        self.add_days(self.start_of_day(date), -(idx as i64))
    }

    fn start_of_month(&self, date: NaiveDateTime) -> NaiveDateTime {
        let (y, m, _) = self.to_ymd(date.date());
        self.create_date(y, m, 1)
            .unwrap_or_else(|| self.start_of_day(date))
    }

    fn end_of_month(&self, date: NaiveDateTime) -> NaiveDateTime {
        let (y, m, _) = self.to_ymd(date.date());
        self.create_date(y, m, self.days_in_month_of(y, m))
            .unwrap_or_else(|| self.start_of_day(date))
    }

    fn is_before(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        date < other
    }

    fn is_after(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        date > other
    }

    fn is_equal(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        date == other
    }

    fn is_same_day(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        date.date() == other.date()
    }

    fn is_same_month(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        let (y0, m0, _) = self.to_ymd(date.date());
        let (y1, m1, _) = self.to_ymd(other.date());
        y0 == y1 && m0 == m1
    }

    fn is_same_year(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        self.get_year(date) == self.get_year(other)
    }

    fn get_hours(&self, date: NaiveDateTime) -> u32 {
        date.hour()
    }

    fn get_minutes(&self, date: NaiveDateTime) -> u32 {
        date.minute()
    }

    fn get_seconds(&self, date: NaiveDateTime) -> u32 {
        date.second()
    }

    /// Invalid values leave the date unchanged.
    fn set_hours(&self, date: NaiveDateTime, hours: u32) -> NaiveDateTime {
        date.with_hour(hours).unwrap_or(date)
    }

    /// Invalid values leave the date unchanged.
    fn set_minutes(&self, date: NaiveDateTime, minutes: u32) -> NaiveDateTime {
        date.with_minute(minutes).unwrap_or(date)
    }

    /// Invalid values leave the date unchanged.
    fn set_seconds(&self, date: NaiveDateTime, seconds: u32) -> NaiveDateTime {
        date.with_second(seconds).unwrap_or(date)
    }

    /// Take the time of day from `time` and the day from `date`.
    /// Sub-second parts are dropped.
    fn apply_time(&self, date: NaiveDateTime, time: NaiveDateTime) -> NaiveDateTime {
        let d = self.set_hours(date, time.hour());
        let d = self.set_minutes(d, time.minute());
        let d = self.set_seconds(d, time.second());
        d.with_nanosecond(0).unwrap_or(d)
    }

    /// Weekday names, starting with first_weekday().
    fn weekday_names(&self, style: NameStyle) -> Vec<&'static str> {
        let first = self.first_weekday().num_days_from_sunday() as usize;
        (0..7)
            .map(|i| self.locale().weekday(first + i, style))
            .collect()
    }

    /// All month names.
    fn month_names(&self, style: NameStyle) -> Vec<String> {
        (1..=12).map(|m| self.month_name(m, style)).collect()
    }

    /// Format with a date pattern. See [format] for the syntax.
    ///
    /// An invalid pattern gives an empty string.
    fn format(&self, date: NaiveDateTime, pattern: &str) -> String {
        match format::format_date(self, date, pattern) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("format {:?} failed: {}", pattern, e);
                String::new()
            }
        }
    }

    /// Parse with a date pattern. See [format] for the syntax.
    ///
    /// Fields missing from the pattern are taken from today().
    fn parse(&self, text: &str, pattern: &str) -> Result<NaiveDateTime, PickerError> {
        format::parse_date(self, text, pattern, self.today())
    }

    /// Parse with a date pattern. Missing fields are taken from `base`.
    fn parse_with_base(
        &self,
        text: &str,
        pattern: &str,
        base: NaiveDateTime,
    ) -> Result<NaiveDateTime, PickerError> {
        format::parse_date(self, text, pattern, base)
    }

    fn is_valid_format(&self, text: &str, pattern: &str) -> bool {
        self.parse(text, pattern).is_ok()
    }
}
