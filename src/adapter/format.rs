//!
//! Date patterns.
//!
//! The syntax is a subset of the unicode/date-fns patterns:
//!
//! * `yyyy` year, `yy` two-digit year
//! * `M`, `MM` month, `MMM` short month name, `MMMM` month name
//! * `d`, `dd` day of month
//! * `EEE` short weekday name, `EEEE` weekday name
//! * `H`, `HH` hour 0-23, `h`, `hh` hour 1-12
//! * `m`, `mm` minute, `s`, `ss` second
//! * `a` am/pm
//! * `'text'` literal text, `''` is a single quote.
//!
//! All other letters are invalid, everything else is copied
//! as is.
//!
//! Parsing accepts persian digits, any number of spaces where
//! the pattern has a space, and both the english and persian
//! am/pm labels.
//!

use crate::adapter::DateAdapter;
use crate::locale::{normalize_digits, NameStyle, ENGLISH, PERSIAN};
use crate::PickerError;
use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};
use std::fmt::Write;

/// Pattern token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Year with the given width. A width of 2 is the two-digit year.
    Year(usize),
    /// 1 and 2 are numeric, 3 is the short name, 4 the full name.
    Month(usize),
    Day(usize),
    Weekday(NameStyle),
    Hour24(usize),
    Hour12(usize),
    Minute(usize),
    Second(usize),
    Period,
    Literal(String),
}

/// Split the pattern into tokens.
pub fn compile_pattern(pattern: &str) -> Result<Vec<Token>, PickerError> {
    let chars = pattern.chars().collect::<Vec<_>>();
    let mut tokens = Vec::new();
    let mut literal = String::new();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                literal.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            loop {
                match chars.get(i) {
                    None => {
                        return Err(PickerError::InvalidPattern(pattern.into()));
                    }
                    Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                        literal.push('\'');
                        i += 2;
                    }
                    Some('\'') => {
                        i += 1;
                        break;
                    }
                    Some(c) => {
                        literal.push(*c);
                        i += 1;
                    }
                }
            }
            continue;
        }

        if !c.is_ascii_alphabetic() {
            literal.push(c);
            i += 1;
            continue;
        }

        let mut n = 1;
        while chars.get(i + n) == Some(&c) {
            n += 1;
        }

        let token = match c {
            'y' => Token::Year(n),
            'M' => Token::Month(n),
            'd' => Token::Day(n),
            'E' => {
                if n >= 4 {
                    Token::Weekday(NameStyle::Long)
                } else {
                    Token::Weekday(NameStyle::Short)
                }
            }
            'H' => Token::Hour24(n),
            'h' => Token::Hour12(n),
            'm' => Token::Minute(n),
            's' => Token::Second(n),
            'a' => Token::Period,
            _ => return Err(PickerError::InvalidPattern(pattern.into())),
        };
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(token);
        i += n;
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    Ok(tokens)
}

/// Does the pattern contain a time part.
pub fn has_time_component(pattern: &str) -> bool {
    match compile_pattern(pattern) {
        Ok(tokens) => tokens.iter().any(|v| {
            matches!(
                v,
                Token::Hour24(_)
                    | Token::Hour12(_)
                    | Token::Minute(_)
                    | Token::Second(_)
                    | Token::Period
            )
        }),
        Err(_) => false,
    }
}

/// Does the pattern use a 24h clock.
pub fn has_24h_clock(pattern: &str) -> bool {
    match compile_pattern(pattern) {
        Ok(tokens) => tokens.iter().any(|v| matches!(v, Token::Hour24(_))),
        Err(_) => false,
    }
}

/// Does the pattern show seconds.
pub fn has_seconds(pattern: &str) -> bool {
    match compile_pattern(pattern) {
        Ok(tokens) => tokens.iter().any(|v| matches!(v, Token::Second(_))),
        Err(_) => false,
    }
}

/// The time part of a pattern, starting with the first hour
/// token. Defaults to `HH:mm`.
pub fn extract_time_pattern(pattern: &str) -> String {
    let start = pattern.find(['H', 'h']);
    match start {
        Some(start) => pattern[start..].trim().to_string(),
        None => "HH:mm".to_string(),
    }
}

/// The date part of a pattern, everything before the first
/// time token.
pub fn extract_date_pattern(pattern: &str) -> String {
    let end = pattern.find(['H', 'h', 'm', 's', 'a']);
    match end {
        Some(end) => pattern[..end].trim().to_string(),
        None => pattern.trim().to_string(),
    }
}

/// Format a date.
pub fn format_date<A: DateAdapter + ?Sized>(
    adapter: &A,
    date: NaiveDateTime,
    pattern: &str,
) -> Result<String, PickerError> {
    let tokens = compile_pattern(pattern)?;
    let (year, month, day) = adapter.to_ymd(date.date());

    let mut buf = String::new();
    for token in tokens {
        _ = match token {
            Token::Year(2) => write!(buf, "{:02}", year.rem_euclid(100)),
            Token::Year(n) => write!(buf, "{:0n$}", year, n = n),
            Token::Month(1) => write!(buf, "{}", month),
            Token::Month(2) => write!(buf, "{:02}", month),
            Token::Month(3) => write!(buf, "{}", adapter.month_name(month, NameStyle::Short)),
            Token::Month(_) => write!(buf, "{}", adapter.month_name(month, NameStyle::Long)),
            Token::Day(1) => write!(buf, "{}", day),
            Token::Day(_) => write!(buf, "{:02}", day),
            Token::Weekday(style) => {
                let idx = date.weekday().num_days_from_sunday() as usize;
                write!(buf, "{}", adapter.locale().weekday(idx, style))
            }
            Token::Hour24(1) => write!(buf, "{}", date.hour()),
            Token::Hour24(_) => write!(buf, "{:02}", date.hour()),
            Token::Hour12(n) => {
                let h = match date.hour() % 12 {
                    0 => 12,
                    h => h,
                };
                if n == 1 {
                    write!(buf, "{}", h)
                } else {
                    write!(buf, "{:02}", h)
                }
            }
            Token::Minute(1) => write!(buf, "{}", date.minute()),
            Token::Minute(_) => write!(buf, "{:02}", date.minute()),
            Token::Second(1) => write!(buf, "{}", date.second()),
            Token::Second(_) => write!(buf, "{:02}", date.second()),
            Token::Period => {
                if date.hour() >= 12 {
                    write!(buf, "{}", adapter.locale().pm)
                } else {
                    write!(buf, "{}", adapter.locale().am)
                }
            }
            Token::Literal(s) => write!(buf, "{}", s),
        };
    }
    Ok(buf)
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn digits(&mut self, min: usize, max: usize) -> Option<i32> {
        let start = self.pos;
        let mut v = 0i32;
        while self.pos - start < max {
            match self.chars.get(self.pos).and_then(|c| c.to_digit(10)) {
                Some(d) => {
                    v = v * 10 + d as i32;
                    self.pos += 1;
                }
                None => break,
            }
        }
        if self.pos - start < min {
            None
        } else {
            Some(v)
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn literal(&mut self, lit: &str) -> bool {
        for c in lit.chars() {
            if c.is_whitespace() {
                self.skip_whitespace();
            } else if self.chars.get(self.pos) == Some(&c) {
                self.pos += 1;
            } else {
                return false;
            }
        }
        true
    }

    /// Index of the longest candidate that matches at the
    /// current position. Ignores ascii case.
    fn one_of<S: AsRef<str>>(&mut self, candidates: &[S]) -> Option<usize> {
        let mut found: Option<(usize, usize)> = None;
        for (idx, cand) in candidates.iter().enumerate() {
            let cand = cand.as_ref();
            if cand.is_empty() {
                continue;
            }
            let len = cand.chars().count();
            let Some(text) = self.chars.get(self.pos..self.pos + len) else {
                continue;
            };
            let is_match = text
                .iter()
                .zip(cand.chars())
                .all(|(a, b)| a.eq_ignore_ascii_case(&b));
            if is_match && found.map(|(_, l)| len > l).unwrap_or(true) {
                found = Some((idx, len));
            }
        }
        let (idx, len) = found?;
        self.pos += len;
        Some(idx)
    }

    fn skip_word(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_alphabetic()) {
            self.pos += 1;
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.chars.len()
    }
}

/// Parse a date.
///
/// If the pattern has no date fields, the date is taken from
/// `base`. Missing fields below a given one start at 1,
/// missing fields above are taken from `base`.
/// A missing time is 00:00:00.
pub fn parse_date<A: DateAdapter + ?Sized>(
    adapter: &A,
    text: &str,
    pattern: &str,
    base: NaiveDateTime,
) -> Result<NaiveDateTime, PickerError> {
    let tokens = compile_pattern(pattern)?;
    let err = || PickerError::InvalidInput(text.into());

    let mut scan = Scanner {
        chars: normalize_digits(text.trim()).chars().collect(),
        pos: 0,
    };

    let (base_year, base_month, base_day) = adapter.to_ymd(base.date());

    let mut year = None;
    let mut month = None;
    let mut day = None;
    let mut hour24 = None;
    let mut hour12 = None;
    let mut minute = None;
    let mut second = None;
    let mut pm = None;

    for token in tokens {
        match token {
            Token::Year(2) => {
                let v = scan.digits(2, 2).ok_or_else(err)?;
                year = Some(base_year - base_year.rem_euclid(100) + v);
            }
            Token::Year(_) => {
                year = Some(scan.digits(1, 4).ok_or_else(err)?);
            }
            Token::Month(1) | Token::Month(2) => {
                month = Some(scan.digits(1, 2).ok_or_else(err)? as u32);
            }
            Token::Month(_) => {
                let mut names = adapter.month_names(NameStyle::Long);
                names.extend(adapter.month_names(NameStyle::Short));
                let idx = scan.one_of(names.as_slice()).ok_or_else(err)?;
                month = Some((idx % 12) as u32 + 1);
            }
            Token::Day(_) => {
                day = Some(scan.digits(1, 2).ok_or_else(err)? as u32);
            }
            Token::Weekday(_) => {
                let locale = adapter.locale();
                let mut names = locale.weekdays.to_vec();
                names.extend(locale.weekdays_short);
                if scan.one_of(names.as_slice()).is_none() {
                    scan.skip_word();
                }
            }
            Token::Hour24(_) => {
                hour24 = Some(scan.digits(1, 2).ok_or_else(err)? as u32);
            }
            Token::Hour12(_) => {
                hour12 = Some(scan.digits(1, 2).ok_or_else(err)? as u32);
            }
            Token::Minute(_) => {
                minute = Some(scan.digits(1, 2).ok_or_else(err)? as u32);
            }
            Token::Second(_) => {
                second = Some(scan.digits(1, 2).ok_or_else(err)? as u32);
            }
            Token::Period => {
                let locale = adapter.locale();
                let labels = [locale.am, locale.pm, ENGLISH.am, ENGLISH.pm, PERSIAN.am, PERSIAN.pm];
                let idx = scan.one_of(&labels[..]).ok_or_else(err)?;
                pm = Some(idx % 2 == 1);
            }
            Token::Literal(s) => {
                if !scan.literal(&s) {
                    return Err(err());
                }
            }
        }
    }
    if !scan.at_end() {
        return Err(err());
    }

    let (y, m, d) = if year.is_none() && month.is_none() && day.is_none() {
        (base_year, base_month, base_day)
    } else {
        (
            year.unwrap_or(base_year),
            month.unwrap_or(if year.is_some() { 1 } else { base_month }),
            day.unwrap_or(if year.is_some() || month.is_some() {
                1
            } else {
                base_day
            }),
        )
    };

    let hour = match (hour24, hour12) {
        (Some(h), _) => h,
        (None, Some(h)) => {
            if !(1..=12).contains(&h) {
                return Err(err());
            }
            if pm == Some(true) {
                h % 12 + 12
            } else {
                h % 12
            }
        }
        (None, None) => 0,
    };
    let time = NaiveTime::from_hms_opt(hour, minute.unwrap_or(0), second.unwrap_or(0))
        .ok_or_else(err)?;

    if !adapter.year_range().contains(&y) {
        return Err(PickerError::OutOfRange(y));
    }
    let date = adapter
        .from_ymd(y, m, d)
        .ok_or(PickerError::InvalidDate(y, m, d))?;

    Ok(date.and_time(time))
}
