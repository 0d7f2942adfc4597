//! Calendar month keys and month labels.

use core::str::FromStr;

use chrono::{Datelike as _, Local, Months, NaiveDate};
use serde::Serialize;

use crate::error::FinanzasError;

/// Months in a calendar year.
const MONTHS_PER_YEAR: i64 = 12;

/// Abbreviated Spanish month names, January first.
const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Abbreviated English month names, January first.
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Language used for chart month labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Locale {
    /// Spanish (`ene`, `feb`, ...).
    #[default]
    Es,
    /// English (`Jan`, `Feb`, ...).
    En,
}

/// A calendar month: year plus month number (1-12).
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    /// Calendar year.
    year: i32,
    /// Month number, 1 = January.
    month: u32,
}

impl YearMonth {
    /// Creates a month key, or `None` when `month` is outside `1..=12`.
    #[inline]
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if month >= 1 && month <= 12 {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Month containing the given date.
    #[inline]
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month containing today's date on the local clock.
    #[inline]
    #[must_use]
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// Calendar year.
    #[inline]
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number, 1 = January.
    #[inline]
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// First day of the month.
    #[inline]
    #[must_use]
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last day of the month.
    #[inline]
    #[must_use]
    pub fn last_day(self) -> Option<NaiveDate> {
        self.first_day()?
            .checked_add_months(Months::new(1))?
            .pred_opt()
    }

    /// The month `months` months earlier; January minus one is December
    /// of the previous year.
    ///
    /// Saturates at January of `i32::MIN`.
    #[must_use]
    pub fn minus_months(self, months: u32) -> Self {
        let index = i64::from(self.year) * MONTHS_PER_YEAR + i64::from(self.month)
            - 1
            - i64::from(months);
        let year = index.div_euclid(MONTHS_PER_YEAR);
        let month = index.rem_euclid(MONTHS_PER_YEAR) + 1;
        match (i32::try_from(year), u32::try_from(month)) {
            (Ok(year_value), Ok(month_value)) => Self {
                year: year_value,
                month: month_value,
            },
            _ => Self {
                year: i32::MIN,
                month: 1,
            },
        }
    }

    /// Returns `true` if the date falls in this month.
    #[inline]
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Three-letter month name for chart axes.
    #[must_use]
    pub fn short_label(self, locale: Locale) -> &'static str {
        let names = match locale {
            Locale::Es => &MONTHS_ES,
            Locale::En => &MONTHS_EN,
        };
        self.month
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| names.get(index))
            .copied()
            .unwrap_or_default()
    }
}

impl core::fmt::Display for YearMonth {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = FinanzasError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FinanzasError::InvalidMonth {
            input: s.to_owned(),
        };
        let (year_part, month_part) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year_part.parse::<i32>().ok().ok_or_else(invalid)?;
        let month = month_part.parse::<u32>().ok().ok_or_else(invalid)?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn new_rejects_out_of_range_month() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
        assert!(YearMonth::new(2024, 12).is_some());
    }

    #[test]
    fn minus_months_crosses_year_boundary() {
        assert_eq!(ym(2024, 1).minus_months(1), ym(2023, 12));
        assert_eq!(ym(2024, 3).minus_months(5), ym(2023, 10));
        assert_eq!(ym(2024, 3).minus_months(0), ym(2024, 3));
        assert_eq!(ym(2024, 3).minus_months(27), ym(2021, 12));
    }

    #[test]
    fn minus_months_beyond_calendar_range() {
        assert_eq!(ym(300_000, 1).minus_months(1), ym(299_999, 12));
        assert_eq!(ym(-1, 1).minus_months(1), ym(-2, 12));
        assert_eq!(ym(i32::MIN, 3).minus_months(5), ym(i32::MIN, 1));
        let months: Vec<YearMonth> = (0..6)
            .map(|back| ym(i32::MAX, 12).minus_months(back))
            .collect();
        assert_eq!(months.first(), Some(&ym(i32::MAX, 12)));
        assert_eq!(months.last(), Some(&ym(i32::MAX, 7)));
    }

    #[test]
    fn contains_checks_year_and_month() {
        let march = ym(2024, 3);
        assert!(march.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2023, 3, 10).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }

    #[test]
    fn first_and_last_day() {
        assert_eq!(ym(2024, 2).first_day(), NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(ym(2024, 2).last_day(), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(ym(2023, 12).last_day(), NaiveDate::from_ymd_opt(2023, 12, 31));
    }

    #[test]
    fn parse_and_display() {
        let parsed: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(parsed, ym(2024, 3));
        assert_eq!(parsed.to_string(), "2024-03");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("marzo".parse::<YearMonth>().is_err());
    }

    #[test]
    fn short_labels_by_locale() {
        assert_eq!(ym(2024, 1).short_label(Locale::Es), "ene");
        assert_eq!(ym(2024, 8).short_label(Locale::Es), "ago");
        assert_eq!(ym(2024, 12).short_label(Locale::En), "Dec");
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(ym(2023, 12) < ym(2024, 1));
        assert!(ym(2024, 2) < ym(2024, 3));
    }
}
