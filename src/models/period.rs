//! Period selector
//!
//! A (month, year) pair scoping the financial summary. Months are zero-based
//! (0 = January .. 11 = December), matching the selector the presentation
//! layer renders.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Portuguese month names, indexed by zero-based month
pub const MONTH_LABELS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// The (month, year) currently selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "UncheckedPeriod")]
pub struct PeriodSelector {
    // Field order matters for the derived Ord: year first.
    year: i32,
    month: u32,
}

/// Wire shape of a selector before the month range is checked
#[derive(Deserialize)]
struct UncheckedPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<UncheckedPeriod> for PeriodSelector {
    type Error = PeriodParseError;

    fn try_from(raw: UncheckedPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.month, raw.year)
    }
}

impl PeriodSelector {
    /// Create a selector; `month` is zero-based
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodParseError> {
        if month > 11 {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The period containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// Zero-based month
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month name in Portuguese
    pub fn month_label(&self) -> &'static str {
        MONTH_LABELS[self.month as usize]
    }

    /// First day of the period
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    /// Last day of the period (inclusive)
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.next().start_date().and_then(|d| d.pred_opt())
    }

    /// Check if a calendar date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        if self.month == 11 {
            Self {
                year: self.year + 1,
                month: 0,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> Self {
        if self.month == 0 {
            Self {
                year: self.year - 1,
                month: 11,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// All twelve periods of a year, January first
    pub fn months_of(year: i32) -> impl Iterator<Item = Self> {
        (0..12).map(move |month| Self { year, month })
    }

    /// Parse "YYYY-MM" (month one-based, as people write it)
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }

        Self::new(month - 1, year)
    }
}

/// Years offered by the period selector: `first_year` through next year
pub fn available_years(first_year: i32, today: NaiveDate) -> Vec<i32> {
    (first_year..=today.year() + 1).collect()
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_label(), self.year)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => {
                write!(f, "Invalid period format: {} (expected YYYY-MM)", s)
            }
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_checks_month() {
        let march: PeriodSelector = serde_json::from_str(r#"{"year":2024,"month":2}"#).unwrap();
        assert_eq!(march, PeriodSelector::new(2, 2024).unwrap());
        assert_eq!(march.month_label(), "Março");

        let err = serde_json::from_str::<PeriodSelector>(r#"{"year":2024,"month":12}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("Invalid month: 12"));
    }

    #[test]
    fn test_zero_based_month() {
        let march = PeriodSelector::new(2, 2024).unwrap();
        assert_eq!(march.month_label(), "Março");
        assert_eq!(
            march.start_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(march.end_date(), NaiveDate::from_ymd_opt(2024, 3, 31));
        assert!(PeriodSelector::new(12, 2024).is_err());
    }

    #[test]
    fn test_navigation() {
        let dec = PeriodSelector::new(11, 2024).unwrap();
        assert_eq!(dec.next(), PeriodSelector::new(0, 2025).unwrap());
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_containing_and_contains() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let feb = PeriodSelector::containing(d);
        assert_eq!(feb.month(), 1);
        assert!(feb.contains(d));
        assert!(!feb.contains(NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()));
        assert_eq!(feb.end_date(), Some(d));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            PeriodSelector::parse("2024-03").unwrap(),
            PeriodSelector::new(2, 2024).unwrap()
        );
        assert_eq!(
            PeriodSelector::parse("2024-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(PeriodSelector::parse("março").is_err());
    }

    #[test]
    fn test_display() {
        let p = PeriodSelector::new(0, 2025).unwrap();
        assert_eq!(p.to_string(), "Janeiro 2025");
    }

    #[test]
    fn test_available_years() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(available_years(2020, today), vec![2020, 2021, 2022, 2023, 2024, 2025]);
    }

    #[test]
    fn test_months_of_year() {
        let months: Vec<_> = PeriodSelector::months_of(2024).collect();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].month(), 0);
        assert_eq!(months[11].month(), 11);
    }
}
