//! Period filter
//!
//! Places raw record timestamps into calendar months and keeps the records
//! belonging to a selected period. The timezone used to decide "which month"
//! is explicit; `Local` is the default because that is what the person looking
//! at the summary calls "this month".

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tracing::debug;

use crate::config::settings::{Settings, TimezoneSetting};
use crate::error::{SaldoError, SaldoResult};
use crate::models::PeriodSelector;

/// Naive date-time layouts emitted by the backend (`LocalDateTime`)
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Resolve a raw timestamp to wall-clock date-time in `tz`
///
/// - RFC 3339 with an offset is converted into `tz`.
/// - A naive date-time is already wall-clock time in `tz` and is kept as is.
/// - A bare `YYYY-MM-DD` is midnight of that calendar date.
///
/// Anything else yields `None`.
pub fn wall_clock_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz).naive_local());
    }

    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Resolve a raw timestamp to a calendar date in `tz`
pub fn calendar_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    wall_clock_in(raw, tz).map(|dt| dt.date())
}

/// Keep the records whose timestamp falls in `period`, evaluated in `tz`
///
/// `date_field` picks the raw timestamp out of a record. Records with a
/// missing or unparsable timestamp are dropped. Input order is preserved.
pub fn filter_by_period_in<'a, T, F, Tz>(
    records: &'a [T],
    date_field: F,
    period: PeriodSelector,
    tz: &Tz,
) -> Vec<&'a T>
where
    F: Fn(&T) -> Option<&str>,
    Tz: TimeZone,
{
    records
        .iter()
        .filter(|&record| {
            let Some(raw) = date_field(record) else {
                return false;
            };
            match calendar_date_in(raw, tz) {
                Some(date) => period.contains(date),
                None => {
                    debug!(timestamp = raw, "skipping record with unparsable timestamp");
                    false
                }
            }
        })
        .collect()
}

/// Keep the records whose timestamp falls in `period`, in the local timezone
pub fn filter_by_period<'a, T, F>(
    records: &'a [T],
    date_field: F,
    period: PeriodSelector,
) -> Vec<&'a T>
where
    F: Fn(&T) -> Option<&str>,
{
    filter_by_period_in(records, date_field, period, &Local)
}

/// Period handling driven by user settings
pub struct PeriodService<'a> {
    settings: &'a Settings,
}

impl<'a> PeriodService<'a> {
    /// Create a new period service
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Today's date in the configured timezone
    pub fn today(&self) -> NaiveDate {
        match self.settings.timezone {
            TimezoneSetting::Local => Local::now().date_naive(),
            TimezoneSetting::Utc => Utc::now().date_naive(),
        }
    }

    /// The period containing today
    pub fn current_period(&self) -> PeriodSelector {
        PeriodSelector::containing(self.today())
    }

    /// Parse a period string or fall back to the current period
    ///
    /// Accepts "YYYY-MM" and the relative words "current"/"atual",
    /// "last"/"anterior" and "next"/"proximo".
    pub fn parse_or_current(&self, period: Option<&str>) -> SaldoResult<PeriodSelector> {
        let Some(s) = period else {
            return Ok(self.current_period());
        };

        match s.trim().to_lowercase().as_str() {
            "current" | "atual" | "this" => Ok(self.current_period()),
            "last" | "prev" | "anterior" => Ok(self.current_period().prev()),
            "next" | "proximo" | "próximo" => Ok(self.current_period().next()),
            _ => PeriodSelector::parse(s).map_err(|e| SaldoError::Validation(e.to_string())),
        }
    }

    /// Check if a period is the current one
    pub fn is_current(&self, period: &PeriodSelector) -> bool {
        *period == self.current_period()
    }

    /// Wall-clock date-time of a raw timestamp in the configured timezone
    pub fn wall_clock(&self, raw: &str) -> Option<NaiveDateTime> {
        match self.settings.timezone {
            TimezoneSetting::Local => wall_clock_in(raw, &Local),
            TimezoneSetting::Utc => wall_clock_in(raw, &Utc),
        }
    }

    /// Period filter in the configured timezone
    pub fn filter<'r, T, F>(
        &self,
        records: &'r [T],
        date_field: F,
        period: PeriodSelector,
    ) -> Vec<&'r T>
    where
        F: Fn(&T) -> Option<&str>,
    {
        match self.settings.timezone {
            TimezoneSetting::Local => filter_by_period_in(records, date_field, period, &Local),
            TimezoneSetting::Utc => filter_by_period_in(records, date_field, period, &Utc),
        }
    }

    /// Years offered by the period selector
    pub fn available_years(&self) -> Vec<i32> {
        crate::models::period::available_years(self.settings.first_year, self.today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, FinancialRecord};
    use chrono::FixedOffset;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_date_formats() {
        assert_eq!(calendar_date_in("2024-03-05", &Utc), Some(ymd(2024, 3, 5)));
        assert_eq!(
            calendar_date_in("2024-03-05T23:59:59", &Utc),
            Some(ymd(2024, 3, 5))
        );
        assert_eq!(
            calendar_date_in("2024-03-05T23:59:59.123456", &Utc),
            Some(ymd(2024, 3, 5))
        );
        assert_eq!(
            calendar_date_in("2024-03-05 08:15", &Utc),
            Some(ymd(2024, 3, 5))
        );
        assert_eq!(calendar_date_in("05/03/2024", &Utc), None);
        assert_eq!(calendar_date_in("", &Utc), None);
    }

    #[test]
    fn test_offset_timestamp_converted_into_zone() {
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
        // 01:30 UTC on April 1st is still March 31st in UTC-3
        assert_eq!(
            calendar_date_in("2024-04-01T01:30:00Z", &sao_paulo),
            Some(ymd(2024, 3, 31))
        );
        assert_eq!(
            calendar_date_in("2024-04-01T01:30:00Z", &Utc),
            Some(ymd(2024, 4, 1))
        );
    }

    #[test]
    fn test_naive_timestamp_keeps_wall_clock_date() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(
            calendar_date_in("2024-03-31T23:00:00", &tokyo),
            Some(ymd(2024, 3, 31))
        );
    }

    #[test]
    fn test_filter_keeps_order_and_skips_bad_dates() {
        let expenses = vec![
            Expense::new(1, 10.0, "2024-03-20T10:00:00", None),
            Expense::new(2, 20.0, "2024-04-01T00:00:00", None),
            Expense::new(3, 30.0, "not a date", None),
            Expense::new(4, 40.0, "2024-03-01", None),
        ];
        let march = PeriodSelector::new(2, 2024).unwrap();

        let kept = filter_by_period_in(&expenses, Expense::timestamp, march, &Utc);
        let ids: Vec<i64> = kept.iter().map(|e| e.record_id()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_filter_missing_timestamp() {
        let mut expense = Expense::new(1, 10.0, "2024-03-20", None);
        expense.timestamp = None;
        let march = PeriodSelector::new(2, 2024).unwrap();

        assert!(filter_by_period(&[expense], Expense::timestamp, march).is_empty());
    }

    #[test]
    fn test_same_month_other_year_excluded() {
        let expenses = vec![Expense::new(1, 10.0, "2023-03-20", None)];
        let march = PeriodSelector::new(2, 2024).unwrap();
        assert!(filter_by_period_in(&expenses, Expense::timestamp, march, &Utc).is_empty());
    }

    #[test]
    fn test_service_parse_or_current() {
        let settings = Settings::default();
        let service = PeriodService::new(&settings);

        assert_eq!(
            service.parse_or_current(Some("2024-03")).unwrap(),
            PeriodSelector::new(2, 2024).unwrap()
        );
        assert!(service.parse_or_current(Some("2024-00")).unwrap_err().is_validation());
        assert_eq!(service.parse_or_current(None).unwrap(), service.current_period());
    }

    #[test]
    fn test_service_relative_periods() {
        let settings = Settings::default();
        let service = PeriodService::new(&settings);
        let current = service.current_period();

        assert_eq!(service.parse_or_current(Some("anterior")).unwrap(), current.prev());
        assert_eq!(service.parse_or_current(Some("NEXT")).unwrap(), current.next());
        assert!(service.is_current(&service.parse_or_current(Some("atual")).unwrap()));
    }

    #[test]
    fn test_service_uses_configured_timezone() {
        let settings = Settings {
            timezone: TimezoneSetting::Utc,
            ..Settings::default()
        };
        let service = PeriodService::new(&settings);
        let expenses = vec![Expense::new(1, 10.0, "2024-04-01T01:30:00Z", None)];

        let april = PeriodSelector::new(3, 2024).unwrap();
        assert_eq!(service.filter(&expenses, Expense::timestamp, april).len(), 1);
        assert_eq!(
            service.wall_clock("2024-04-01T01:30:00Z"),
            Some(ymd(2024, 4, 1).and_hms_opt(1, 30, 0).unwrap())
        );
    }
}
