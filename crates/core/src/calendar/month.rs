//! `YYYY-MM` month keys.
//!
//! Entries are grouped and locked by calendar month. The key is stored as a
//! string so that range queries and lock lookups are plain equality checks.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shiftpay_shared::AppError;
use thiserror::Error;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

/// The string is not a `YYYY-MM` month key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month '{0}', expected YYYY-MM")]
pub struct InvalidMonthKey(pub String);

impl From<InvalidMonthKey> for AppError {
    fn from(err: InvalidMonthKey) -> Self {
        Self::Validation(err.to_string())
    }
}

impl MonthKey {
    /// Creates a month key, returning `None` if `month` is not 1-12 or the
    /// year is outside 0001-9999.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        ((1..=9999).contains(&year) && (1..=12).contains(&month)).then_some(Self { year, month })
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number, 1-12.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Returns the first day of the month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Returns the month `n` months before this one.
    #[must_use]
    pub fn minus_months(self, n: u32) -> Self {
        let index = self.index() - i64::from(n);
        Self::from_index(index)
    }

    /// Returns the display name, e.g. "October 2026".
    #[must_use]
    pub fn display_name(self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    fn index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_index(index: i64) -> Self {
        let clamped = index.clamp(12, 9999 * 12 + 11);
        #[allow(clippy::cast_possible_truncation)]
        let year = (clamped / 12) as i32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let month = (clamped % 12) as u32 + 1;
        Self { year, month }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = InvalidMonthKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonthKey(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Returns month name.
fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let key: MonthKey = "2026-03".parse().unwrap();
        assert_eq!(key.year(), 2026);
        assert_eq!(key.month(), 3);
        assert_eq!(key.to_string(), "2026-03");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["2026-3", "2026-13", "2026-00", "26-03", "2026/03", "2026-03-01", "", "abcd-ef"] {
            assert!(raw.parse::<MonthKey>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_from_date() {
        assert_eq!(MonthKey::from_date(date(2026, 10, 16)).to_string(), "2026-10");
    }

    #[test]
    fn test_first_day() {
        let feb_leap = MonthKey::new(2024, 2).unwrap();
        assert_eq!(feb_leap.first_day(), date(2024, 2, 1));
    }

    #[test]
    fn test_minus_months_crosses_year() {
        let jan = MonthKey::new(2026, 1).unwrap();
        assert_eq!(jan.minus_months(1).to_string(), "2025-12");
        assert_eq!(jan.minus_months(13).to_string(), "2024-12");
        assert_eq!(jan.minus_months(0), jan);
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = MonthKey::new(2025, 12).unwrap();
        let b = MonthKey::new(2026, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(MonthKey::new(2026, 10).unwrap().display_name(), "October 2026");
    }

    #[test]
    fn test_serde_as_string() {
        let key = MonthKey::new(2026, 7).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2026-07\"");
        let back: MonthKey = serde_json::from_str("\"2026-07\"").unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<MonthKey>("\"July\"").is_err());
    }
}
