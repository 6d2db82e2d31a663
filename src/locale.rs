//!
//! Label tables.
//!
//! There are two built-in tables, [ENGLISH] and [PERSIAN].
//! Everything else is out of scope, but you can create your own
//! `Locale` and set it for the picker.
//!

/// Long or short names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameStyle {
    #[default]
    Long,
    Short,
    /// One or two characters.
    Narrow,
}

/// All the labels used by the pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub am: &'static str,
    pub pm: &'static str,
    pub today: &'static str,
    pub now: &'static str,
    pub ok: &'static str,
    pub last_day: &'static str,
    pub last_week: &'static str,
    pub last_month: &'static str,
    pub custom: &'static str,
    pub select_date: &'static str,
    pub select_month: &'static str,
    pub select_year: &'static str,
    pub select_time: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub previous: &'static str,
    pub next: &'static str,
    pub gregorian_months: [&'static str; 12],
    pub jalali_months: [&'static str; 12],
    /// Short jalali month names. Persian has no abbreviations and
    /// uses the full names.
    pub jalali_months_short: [&'static str; 12],
    /// Weekday names, starting with Sunday.
    pub weekdays: [&'static str; 7],
    /// Short weekday names, starting with Sunday.
    pub weekdays_short: [&'static str; 7],
    /// Narrow weekday names, starting with Sunday.
    pub weekdays_narrow: [&'static str; 7],
}

pub const ENGLISH: Locale = Locale {
    am: "AM",
    pm: "PM",
    today: "Today",
    now: "Now",
    ok: "Ok",
    last_day: "Last day",
    last_week: "Last week",
    last_month: "Last month",
    custom: "Custom",
    select_date: "Select date",
    select_month: "Select month",
    select_year: "Select year",
    select_time: "Select time",
    start_date: "Start date",
    end_date: "End date",
    previous: "Previous",
    next: "Next",
    gregorian_months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    jalali_months: [
        "Farvardin",
        "Ordibehesht",
        "Khordad",
        "Tir",
        "Mordad",
        "Shahrivar",
        "Mehr",
        "Aban",
        "Azar",
        "Dey",
        "Bahman",
        "Esfand",
    ],
    jalali_months_short: [
        "Far", "Ord", "Kho", "Tir", "Mor", "Sha", "Meh", "Aba", "Aza", "Dey", "Bah", "Esf",
    ],
    weekdays: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    weekdays_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    weekdays_narrow: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
};

pub const PERSIAN: Locale = Locale {
    am: "ق.ظ",
    pm: "ب.ظ",
    today: "امروز",
    now: "اکنون",
    ok: "تایید",
    last_day: "روز گذشته",
    last_week: "هفته گذشته",
    last_month: "ماه گذشته",
    custom: "دلخواه",
    select_date: "انتخاب تاریخ",
    select_month: "انتخاب ماه",
    select_year: "انتخاب سال",
    select_time: "انتخاب زمان",
    start_date: "تاریخ شروع",
    end_date: "تاریخ پایان",
    previous: "قبلی",
    next: "بعدی",
    gregorian_months: [
        "ژانویه",
        "فوریه",
        "مارس",
        "آوریل",
        "مه",
        "ژوئن",
        "ژوئیه",
        "اوت",
        "سپتامبر",
        "اکتبر",
        "نوامبر",
        "دسامبر",
    ],
    jalali_months: [
        "فروردین",
        "اردیبهشت",
        "خرداد",
        "تیر",
        "مرداد",
        "شهریور",
        "مهر",
        "آبان",
        "آذر",
        "دی",
        "بهمن",
        "اسفند",
    ],
    jalali_months_short: [
        "فروردین",
        "اردیبهشت",
        "خرداد",
        "تیر",
        "مرداد",
        "شهریور",
        "مهر",
        "آبان",
        "آذر",
        "دی",
        "بهمن",
        "اسفند",
    ],
    weekdays: [
        "یکشنبه",
        "دوشنبه",
        "سه‌شنبه",
        "چهارشنبه",
        "پنجشنبه",
        "جمعه",
        "شنبه",
    ],
    weekdays_short: ["یک", "دو", "سه", "چهار", "پنج", "جمعه", "شنبه"],
    weekdays_narrow: ["ی", "د", "س", "چ", "پ", "ج", "ش"],
};

impl Default for Locale {
    fn default() -> Self {
        ENGLISH
    }
}

impl Locale {
    /// Weekday name. Index 0 is Sunday.
    pub fn weekday(&self, idx: usize, style: NameStyle) -> &'static str {
        let idx = idx % 7;
        match style {
            NameStyle::Long => self.weekdays[idx],
            NameStyle::Short => self.weekdays_short[idx],
            NameStyle::Narrow => self.weekdays_narrow[idx],
        }
    }

    /// Is this one of the am-labels.
    /// Accepts the english and the persian label, ignores case.
    pub fn is_am(&self, s: &str) -> bool {
        s.eq_ignore_ascii_case(self.am)
            || s.eq_ignore_ascii_case(ENGLISH.am)
            || s == PERSIAN.am
    }

    /// Is this one of the pm-labels.
    /// Accepts the english and the persian label, ignores case.
    pub fn is_pm(&self, s: &str) -> bool {
        s.eq_ignore_ascii_case(self.pm)
            || s.eq_ignore_ascii_case(ENGLISH.pm)
            || s == PERSIAN.pm
    }
}

/// Replace persian and arabic-indic digits with ascii digits.
pub fn normalize_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '۰'..='۹' => char::from(b'0' + (c as u32 - '۰' as u32) as u8),
            '٠'..='٩' => char::from(b'0' + (c as u32 - '٠' as u32) as u8),
            c => c,
        })
        .collect()
}
