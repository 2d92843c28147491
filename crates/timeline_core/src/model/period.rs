//! Calendar interval between two ordinal dates.

use crate::model::date::OrdinalDate;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Calendar period from a start date to an end date.
///
/// `years`/`months`/`days` describe the interval the way a calendar reads it
/// (month lengths and leap days honored). `total_days` is the plain day
/// difference. All fields are negative when the end precedes the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub total_days: i64,
}

impl Period {
    /// Computes the period from `start` to `end`.
    pub fn between(start: OrdinalDate, end: OrdinalDate) -> Self {
        if end < start {
            return Self::between(end, start).negated();
        }

        let mut months = (end.astronomical_year() - start.astronomical_year()) * 12
            + i64::from(end.month)
            - i64::from(start.month);
        if end.day < start.day {
            months -= 1;
        }
        let anchor = start.add_months(months);

        Self {
            years: months / 12,
            months: months % 12,
            days: end.day_number() - anchor.day_number(),
            total_days: end.day_number() - start.day_number(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total_days == 0
    }

    fn negated(self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            days: -self.days,
            total_days: -self.total_days,
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Days", self.total_days)
    }
}

#[cfg(test)]
mod tests {
    use super::Period;
    use crate::model::date::OrdinalDate;

    fn date(year: i32, month: u8, day: u8) -> OrdinalDate {
        OrdinalDate { year, month, day }
    }

    #[test]
    fn counts_leap_day_in_range() {
        let period = Period::between(date(2018, 6, 1), date(2020, 9, 17));
        assert_eq!(period.total_days, 839);
        assert_eq!((period.years, period.months, period.days), (2, 3, 16));
    }

    #[test]
    fn borrows_a_month_when_end_day_is_earlier() {
        let period = Period::between(date(2019, 1, 31), date(2019, 3, 1));
        assert_eq!((period.years, period.months, period.days), (0, 1, 1));
        assert_eq!(period.total_days, 29);
    }

    #[test]
    fn reversed_range_is_negative() {
        let period = Period::between(date(2020, 1, 10), date(2020, 1, 1));
        assert_eq!(period.total_days, -9);
        assert_eq!(period.days, -9);
        assert_eq!(period.to_string(), "-9 Days");
    }

    #[test]
    fn spans_the_epoch_without_year_zero() {
        let period = Period::between(date(-1, 1, 1), date(1, 1, 1));
        assert_eq!(period.total_days, 366);
        assert_eq!((period.years, period.months, period.days), (1, 0, 0));
    }

    #[test]
    fn same_day_is_zero() {
        let period = Period::between(date(1898, 1, 1), date(1898, 1, 1));
        assert!(period.is_zero());
        assert_eq!(period.to_string(), "0 Days");
    }
}
