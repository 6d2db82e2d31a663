//!
//! Time of day selection.
//!
//! The free functions snap a date-time to an enabled time under a
//! caller supplied predicate. [TimePickerState] holds the hour,
//! minute and second columns of the [TimePicker] widget.
//!

use chrono::{NaiveDateTime, NaiveTime, Timelike};

pub mod event;
mod style;
mod time_picker;

pub use style::*;
pub use time_picker::*;

/// Steps of [nearest_time_slot].
pub const TIME_SLOT_STEPS: i64 = 48;
/// Step width of [nearest_time_slot] in minutes.
pub const TIME_SLOT_MINUTES: i64 = 30;

/// 12 or 24 hour clock.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum TimeFormat {
    #[default]
    H12,
    H24,
}

/// AM/PM
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum Period {
    #[default]
    Am,
    Pm,
}

/// Time as shown in the time-picker.
///
/// With [TimeFormat::H12] the hour is 1..=12 and the period
/// decides about the half of the day. With [TimeFormat::H24] the
/// hour is 0..=23 and the period just follows the hour.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct TimeConfig {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub period: Period,
}

impl TimeConfig {
    /// Split a time of day for the given clock.
    pub fn from_time(time: NaiveTime, format: TimeFormat) -> Self {
        let hour24 = time.hour();
        let period = if hour24 >= 12 { Period::Pm } else { Period::Am };
        let hour = match format {
            TimeFormat::H24 => hour24,
            TimeFormat::H12 => match hour24 % 12 {
                0 => 12,
                v => v,
            },
        };
        Self {
            hour,
            minute: time.minute(),
            second: time.second(),
            period,
        }
    }

    /// Hour on a 24h clock.
    pub fn hour24(&self, format: TimeFormat) -> u32 {
        match format {
            TimeFormat::H24 => self.hour,
            TimeFormat::H12 => {
                let h = self.hour % 12;
                match self.period {
                    Period::Am => h,
                    Period::Pm => h + 12,
                }
            }
        }
    }

    /// Time of day. None if a field is out of range.
    pub fn to_time(&self, format: TimeFormat) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour24(format), self.minute, self.second)
    }
}

/// Result of [normalize_time_in_day].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedTime {
    /// The input was not disabled.
    pub valid: bool,
    pub value: NaiveDateTime,
}

/// Snap to an enabled time of the same day.
///
/// If the date is enabled it is returned unchanged. Otherwise the
/// minutes after the date are tried up to 23:59, then the minutes
/// before it down to 00:00. Seconds are set to 0.
///
/// If nothing is found the result is the start of the day. This
/// start of day is not checked against the predicate.
pub fn normalize_time_in_day(
    date: NaiveDateTime,
    is_disabled: impl Fn(NaiveDateTime) -> bool,
) -> NormalizedTime {
    if !is_disabled(date) {
        return NormalizedTime {
            valid: true,
            value: date,
        };
    }

    let day = date.date();
    let current = date.hour() * 60 + date.minute();
    let at_minute = |m: u32| day.and_hms_opt(m / 60, m % 60, 0);

    let forward = (current + 1..24 * 60).filter_map(at_minute);
    let backward = (0..current).rev().filter_map(at_minute);
    if let Some(value) = forward.chain(backward).find(|v| !is_disabled(*v)) {
        return NormalizedTime {
            valid: false,
            value,
        };
    }

    log::debug!("no enabled time on {}, fall back to start of day", day);
    NormalizedTime {
        valid: false,
        value: day.and_time(NaiveTime::MIN),
    }
}

/// Search an enabled time in 30 minute steps.
///
/// Tries the next slot first, then the previous one, up to 24h
/// in both directions. This may leave the day.
pub fn nearest_time_slot(
    date: NaiveDateTime,
    is_disabled: impl Fn(NaiveDateTime) -> bool,
) -> Option<NaiveDateTime> {
    if !is_disabled(date) {
        return Some(date);
    }
    for i in 1..=TIME_SLOT_STEPS {
        let offset = chrono::TimeDelta::try_minutes(i * TIME_SLOT_MINUTES)?;
        if let Some(next) = date.checked_add_signed(offset) {
            if !is_disabled(next) {
                return Some(next);
            }
        }
        if let Some(prev) = date.checked_sub_signed(offset) {
            if !is_disabled(prev) {
                return Some(prev);
            }
        }
    }
    None
}
