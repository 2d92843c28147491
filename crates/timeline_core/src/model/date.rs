//! Compact calendar date tokens.
//!
//! # Responsibility
//! - Parse `Year[.Month[.Day]]` tokens into a `CalendarDate`.
//! - Provide a total order and day arithmetic through `OrdinalDate`.
//! - Render dates as `MM/DD/YYYY` with a ` BC` suffix before year 1.
//!
//! # Invariants
//! - `day` is present only when `month` is present.
//! - `month` is within `1..=12` and `day` fits the month (leap years honored).
//! - Leap-year rules for validation are applied to the absolute value of the year.
//! - Day arithmetic runs on astronomical years: 1 BC (`-1`) is directly
//!   followed by AD 1, and year `0` is read as 1 BC.
//! - A `CalendarDate` is immutable once constructed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<plain>[0-9]{1,7})|\((?P<paren>[0-9]{1,7})\)|-(?P<neg>[0-9]{1,7}))(?:\.(?P<month>[0-9]{1,2})(?:\.(?P<day>[0-9]{1,2}))?)?$",
    )
    .expect("valid date token regex")
});

const BEFORE_EPOCH_SUFFIX: &str = " BC";

/// Reason a date token was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Input was empty.
    Empty,
    /// Input does not follow `Year[.Month[.Day]]`.
    Syntax(String),
    /// Month is greater than 12.
    MonthOutOfRange { month: u8 },
    /// Day does not exist in the given month.
    DayOutOfRange { year: i32, month: u8, day: u8 },
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "date token is empty"),
            Self::Syntax(value) => write!(f, "malformed date token: `{value}`"),
            Self::MonthOutOfRange { month } => {
                write!(f, "month {month} is out of range 1..=12")
            }
            Self::DayOutOfRange { year, month, day } => write!(
                f,
                "day {day} does not exist in month {month} of year {year}"
            ),
        }
    }
}

impl Error for DateParseError {}

/// Parsed calendar date with optional month/day precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarDate {
    year: i32,
    month: Option<u8>,
    day: Option<u8>,
}

impl CalendarDate {
    /// Parses a compact date token, returning `None` for any rejected input.
    pub fn parse(text: &str) -> Option<Self> {
        Self::try_parse(text).ok()
    }

    /// Parses a compact date token.
    ///
    /// Zero month or day values degrade to "absent" rather than failing.
    ///
    /// # Errors
    /// - `Empty` for an empty string.
    /// - `Syntax` when the token does not match the grammar.
    /// - `MonthOutOfRange` / `DayOutOfRange` for calendar-invalid values.
    pub fn try_parse(text: &str) -> Result<Self, DateParseError> {
        if text.is_empty() {
            return Err(DateParseError::Empty);
        }
        let captures = DATE_TOKEN_RE
            .captures(text)
            .ok_or_else(|| DateParseError::Syntax(text.to_string()))?;

        let year = if let Some(digits) = captures.name("plain") {
            parse_digits(digits.as_str(), text)?
        } else if let Some(digits) = captures
            .name("paren")
            .or_else(|| captures.name("neg"))
        {
            -parse_digits(digits.as_str(), text)?
        } else {
            return Err(DateParseError::Syntax(text.to_string()));
        };

        let month = match captures.name("month") {
            Some(value) => parse_digits(value.as_str(), text)? as u8,
            None => 0,
        };
        let day = match captures.name("day") {
            Some(value) => parse_digits(value.as_str(), text)? as u8,
            None => 0,
        };

        Self::new(year, month, day)
    }

    /// Builds a date from raw components, using `0` for "absent".
    ///
    /// # Errors
    /// - `MonthOutOfRange` when `month > 12`.
    /// - `DayOutOfRange` when `day` does not fit the month.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DateParseError> {
        if month > 12 {
            return Err(DateParseError::MonthOutOfRange { month });
        }
        let month = (month > 0).then_some(month);
        let day = match month {
            Some(month) if day > 0 => {
                if day > days_in_month(year, month) {
                    return Err(DateParseError::DayOutOfRange { year, month, day });
                }
                Some(day)
            }
            _ => None,
        };
        Ok(Self { year, month, day })
    }

    /// Year-only date.
    pub fn from_year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<u8> {
        self.month
    }

    pub fn day(&self) -> Option<u8> {
        self.day
    }

    /// Whether the year lies before year 1.
    pub fn is_before_epoch(&self) -> bool {
        self.year < 1
    }

    /// Concrete date with absent month/day forced to `1`.
    pub fn to_ordinal_date(&self) -> OrdinalDate {
        OrdinalDate {
            year: self.year,
            month: self.month.unwrap_or(1),
            day: self.day.unwrap_or(1),
        }
    }

    /// Orders two dates by their ordinal date.
    pub fn cmp_ordinal(&self, other: &Self) -> Ordering {
        self.to_ordinal_date().cmp(&other.to_ordinal_date())
    }

    /// Renders `MM/DD/YYYY`, appending ` BC` before year 1.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let ordinal = self.to_ordinal_date();
        write!(
            f,
            "{:02}/{:02}/{:04}",
            ordinal.month,
            ordinal.day,
            self.year.unsigned_abs()
        )?;
        if self.is_before_epoch() {
            f.write_str(BEFORE_EPOCH_SUFFIX)?;
        }
        Ok(())
    }
}

/// Fully specified date used for ordering and arithmetic.
///
/// Field order matters: the derived `Ord` compares year, then month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OrdinalDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl OrdinalDate {
    /// Astronomical year: `-1` (1 BC) and `0` map to `0`, `-N` maps to `1 - N`.
    pub fn astronomical_year(&self) -> i64 {
        astronomical_year(self.year)
    }

    /// Signed day count where January 1 of 1 BC is day zero.
    pub fn day_number(&self) -> i64 {
        let year = self.astronomical_year();
        days_before_year(year) + days_before_month(year, self.month) + i64::from(self.day) - 1
    }

    /// Adds whole months, clamping the day to the target month length.
    pub fn add_months(&self, months: i64) -> Self {
        let index = self.astronomical_year() * 12 + i64::from(self.month) - 1 + months;
        let year = index.div_euclid(12);
        let month = (index.rem_euclid(12) + 1) as u8;
        Self {
            year: era_year(year),
            month,
            day: self.day.min(astronomical_days_in_month(year, month)),
        }
    }
}

/// Gregorian leap-year rule applied to `|year|`.
pub fn is_leap_year(year: i32) -> bool {
    let year = year.unsigned_abs();
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1..=12) of `year`.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn parse_digits(value: &str, token: &str) -> Result<i32, DateParseError> {
    value
        .parse::<i32>()
        .map_err(|_| DateParseError::Syntax(token.to_string()))
}

fn astronomical_year(year: i32) -> i64 {
    let year = i64::from(year);
    if year < 0 {
        year + 1
    } else {
        year
    }
}

fn era_year(astronomical: i64) -> i32 {
    if astronomical < 1 {
        (astronomical - 1) as i32
    } else {
        astronomical as i32
    }
}

fn is_astronomical_leap_year(year: i64) -> bool {
    (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
}

fn astronomical_days_in_month(year: i64, month: u8) -> u8 {
    match month {
        2 if is_astronomical_leap_year(year) => 29,
        2 => 28,
        _ => days_in_month(1, month),
    }
}

// Days from January 1 of astronomical year 0 to January 1 of `year`.
fn days_before_year(year: i64) -> i64 {
    let previous = year - 1;
    365 * year + previous.div_euclid(4) - previous.div_euclid(100) + previous.div_euclid(400) + 1
}

fn days_before_month(year: i64, month: u8) -> i64 {
    (1..month)
        .map(|m| i64::from(astronomical_days_in_month(year, m)))
        .sum()
}
