use crate::adapter::{CalendarType, DateAdapter};
use crate::locale::{Locale, NameStyle, PERSIAN};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::ops::RangeInclusive;

/// First supported jalali year.
pub const JALALI_MIN_YEAR: i32 = 1;
/// Last supported jalali year.
pub const JALALI_MAX_YEAR: i32 = 3177;

/// Years where the 33-year leap cycle is re-aligned.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Jalali (persian solar) calendar.
///
/// The week starts on saturday. Months 1-6 have 31 days,
/// months 7-11 have 30 days, the last month has 29 days or 30
/// in a leap year.
#[derive(Debug, Clone)]
pub struct JalaliAdapter {
    locale: Locale,
}

impl Default for JalaliAdapter {
    fn default() -> Self {
        Self { locale: PERSIAN }
    }
}

impl JalaliAdapter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

/// Leap year state and start of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearInfo {
    /// Years since the last leap year. 0 is a leap year.
    leap: i32,
    /// Gregorian year in which the jalali year starts.
    gy: i32,
    /// March day of the gregorian year which is the 1st Farvardin.
    march: i32,
}

fn year_info(jy: i32) -> YearInfo {
    let gy = jy + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;
    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }
    let mut n = jy - jp;

    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    YearInfo { leap, gy, march }
}

/// Is this a jalali leap year.
pub fn is_jalali_leap_year(jy: i32) -> bool {
    year_info(jy).leap == 0
}

/// Days of a jalali month.
pub fn jalali_days_in_month(jy: i32, jm: u32) -> u32 {
    match jm {
        1..=6 => 31,
        7..=11 => 30,
        12 => {
            if is_jalali_leap_year(jy) {
                30
            } else {
                29
            }
        }
        _ => 0,
    }
}

/// Gregorian date to jalali (year, month, day).
pub fn to_jalali(date: NaiveDate) -> (i32, u32, u32) {
    let gy = date.year();
    let mut jy = gy - 621;
    let info = year_info(jy);

    let Some(farvardin_1) = NaiveDate::from_ymd_opt(gy, 3, info.march as u32) else {
        return (jy, 1, 1);
    };
    let mut k = (date - farvardin_1).num_days();

    if k >= 0 {
        if k <= 185 {
            return (jy, 1 + (k / 31) as u32, (k % 31) as u32 + 1);
        }
        k -= 186;
    } else {
        jy -= 1;
        k += 179;
        if info.leap == 1 {
            k += 1;
        }
    }
    (jy, 7 + (k / 30) as u32, (k % 30) as u32 + 1)
}

/// Jalali date to gregorian. None for invalid fields or
/// years outside [JALALI_MIN_YEAR]..=[JALALI_MAX_YEAR].
pub fn from_jalali(jy: i32, jm: u32, jd: u32) -> Option<NaiveDate> {
    if !(JALALI_MIN_YEAR..=JALALI_MAX_YEAR).contains(&jy) {
        return None;
    }
    if jd == 0 || jd > jalali_days_in_month(jy, jm) {
        return None;
    }
    let info = year_info(jy);
    let farvardin_1 = NaiveDate::from_ymd_opt(info.gy, 3, info.march as u32)?;
    let offset = (jm - 1) * 31 - jm / 7 * (jm - 7) + jd - 1;
    farvardin_1.checked_add_days(Days::new(offset as u64))
}

impl DateAdapter for JalaliAdapter {
    fn calendar_type(&self) -> CalendarType {
        CalendarType::Jalali
    }

    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn to_ymd(&self, date: NaiveDate) -> (i32, u32, u32) {
        to_jalali(date)
    }

    fn from_ymd(&self, year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        from_jalali(year, month, day)
    }

    fn days_in_month_of(&self, year: i32, month: u32) -> u32 {
        jalali_days_in_month(year, month)
    }

    fn first_weekday(&self) -> Weekday {
        Weekday::Sat
    }

    fn year_range(&self) -> RangeInclusive<i32> {
        JALALI_MIN_YEAR..=JALALI_MAX_YEAR
    }

    fn month_name(&self, month: u32, style: NameStyle) -> String {
        let idx = month.wrapping_sub(1) as usize;
        let (Some(name), Some(short)) = (
            self.locale.jalali_months.get(idx),
            self.locale.jalali_months_short.get(idx),
        ) else {
            return String::new();
        };
        match style {
            NameStyle::Long => name.to_string(),
            NameStyle::Short => short.to_string(),
            NameStyle::Narrow => short.chars().take(1).collect(),
        }
    }
}
