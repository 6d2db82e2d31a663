use crate::adapter::{CalendarType, DateAdapter};
use crate::locale::{Locale, NameStyle, ENGLISH};
use chrono::{Datelike, Months, NaiveDate, Weekday};

/// Gregorian calendar. Delegates everything to chrono.
///
/// The week starts on sunday.
#[derive(Debug, Clone)]
pub struct GregorianAdapter {
    locale: Locale,
}

impl Default for GregorianAdapter {
    fn default() -> Self {
        Self { locale: ENGLISH }
    }
}

impl GregorianAdapter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl DateAdapter for GregorianAdapter {
    fn calendar_type(&self) -> CalendarType {
        CalendarType::Gregorian
    }

    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn to_ymd(&self, date: NaiveDate) -> (i32, u32, u32) {
        (date.year(), date.month(), date.day())
    }

    fn from_ymd(&self, year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn days_in_month_of(&self, year: i32, month: u32) -> u32 {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return 0;
        };
        match first.checked_add_months(Months::new(1)) {
            Some(next) => (next - first).num_days() as u32,
            None => 31,
        }
    }

    fn first_weekday(&self) -> Weekday {
        Weekday::Sun
    }

    fn month_name(&self, month: u32, style: NameStyle) -> String {
        let Some(name) = self.locale.gregorian_months.get(month.wrapping_sub(1) as usize) else {
            return String::new();
        };
        match style {
            NameStyle::Long => name.to_string(),
            NameStyle::Short => name.chars().take(3).collect(),
            NameStyle::Narrow => name.chars().take(1).collect(),
        }
    }
}
