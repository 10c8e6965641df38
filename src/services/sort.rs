//! List ordering
//!
//! Each record list can be ordered by one of a fixed set of keys, ascending
//! or descending. Sorting is stable. Text compares case-folded; amounts and
//! dates that can't be read sort before every readable one.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::period::wall_clock_in;
use crate::config::settings::TimezoneSetting;
use crate::error::SaldoError;
use crate::models::{amount, Expense, FinancialRecord, Goal, Income};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = SaldoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "crescente" => Ok(Self::Asc),
            "desc" | "decrescente" => Ok(Self::Desc),
            other => Err(SaldoError::Validation(format!(
                "Invalid sort order: {} (expected asc or desc)",
                other
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// A comparable projection of one record field
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    Number(Option<f64>),
    Text(String),
    Instant(Option<NaiveDateTime>),
    Day(Option<NaiveDate>),
}

impl SortValue {
    fn text(value: Option<&str>) -> Self {
        Self::Text(value.unwrap_or_default().to_lowercase())
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            },
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Instant(a), Self::Instant(b)) => a.cmp(b),
            (Self::Day(a), Self::Day(b)) => a.cmp(b),
            // Keys always project the same variant
            _ => Ordering::Equal,
        }
    }
}

/// A way of ordering records of type `T`
///
/// Timestamps are compared as wall-clock time in `tz`.
pub trait SortKey<T> {
    fn value_of<Tz: TimeZone>(&self, record: &T, tz: &Tz) -> SortValueRef;
}

/// Opaque comparable value produced by a [`SortKey`]
#[derive(Debug, Clone, PartialEq)]
pub struct SortValueRef(SortValue);

/// Order `records` by `key`, reading timestamps in `tz`
pub fn sort_by_in<'a, T, K, Tz>(
    mut records: Vec<&'a T>,
    key: &K,
    order: SortOrder,
    tz: &Tz,
) -> Vec<&'a T>
where
    K: SortKey<T>,
    Tz: TimeZone,
{
    records.sort_by(|a, b| {
        let ordering = key.value_of(a, tz).0.compare(&key.value_of(b, tz).0);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    records
}

/// Order `records` by `key` in the local timezone
pub fn sort_by<'a, T, K>(records: Vec<&'a T>, key: &K, order: SortOrder) -> Vec<&'a T>
where
    K: SortKey<T>,
{
    sort_by_in(records, key, order, &Local)
}

/// Order `records` by `key` in the configured timezone
pub fn sort_by_zone<'a, T, K>(
    records: Vec<&'a T>,
    key: &K,
    order: SortOrder,
    timezone: TimezoneSetting,
) -> Vec<&'a T>
where
    K: SortKey<T>,
{
    match timezone {
        TimezoneSetting::Local => sort_by_in(records, key, order, &Local),
        TimezoneSetting::Utc => sort_by_in(records, key, order, &Utc),
    }
}

fn instant<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> SortValue {
    SortValue::Instant(raw.and_then(|r| wall_clock_in(r, tz)))
}

macro_rules! sort_key_from_str {
    ($name:ident, $label:literal, { $($text:literal => $variant:ident),+ $(,)? }) => {
        impl FromStr for $name {
            type Err = SaldoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(SaldoError::Validation(format!(
                        "Invalid {} sort key: {}",
                        $label, other
                    ))),
                }
            }
        }
    };
}

/// Expense list keys; default is newest first by timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseSortKey {
    Amount,
    Establishment,
    Category,
    #[default]
    Timestamp,
}

impl ExpenseSortKey {
    pub fn default_order(&self) -> SortOrder {
        SortOrder::Desc
    }
}

sort_key_from_str!(ExpenseSortKey, "expense", {
    "amount" => Amount, "valor" => Amount,
    "establishment" => Establishment, "estabelecimento" => Establishment,
    "category" => Category, "categoria" => Category,
    "timestamp" => Timestamp, "date" => Timestamp, "datahora" => Timestamp,
});

impl SortKey<Expense> for ExpenseSortKey {
    fn value_of<Tz: TimeZone>(&self, record: &Expense, tz: &Tz) -> SortValueRef {
        SortValueRef(match self {
            Self::Amount => SortValue::Number(amount::coerce(record.raw_amount())),
            Self::Establishment => SortValue::text(record.establishment.as_deref()),
            Self::Category => SortValue::text(record.category()),
            Self::Timestamp => instant(record.timestamp(), tz),
        })
    }
}

/// Income list keys; default is newest first by receipt date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncomeSortKey {
    Amount,
    Source,
    Category,
    #[default]
    ReceivedAt,
}

impl IncomeSortKey {
    pub fn default_order(&self) -> SortOrder {
        SortOrder::Desc
    }
}

sort_key_from_str!(IncomeSortKey, "income", {
    "amount" => Amount, "valor" => Amount,
    "source" => Source, "fonte" => Source,
    "category" => Category, "categoria" => Category,
    "received" => ReceivedAt, "date" => ReceivedAt, "datarecebimento" => ReceivedAt,
});

impl SortKey<Income> for IncomeSortKey {
    fn value_of<Tz: TimeZone>(&self, record: &Income, tz: &Tz) -> SortValueRef {
        SortValueRef(match self {
            Self::Amount => SortValue::Number(amount::coerce(record.raw_amount())),
            Self::Source => SortValue::text(record.source.as_deref()),
            Self::Category => SortValue::text(record.category()),
            Self::ReceivedAt => instant(record.timestamp(), tz),
        })
    }
}

/// Goal list keys; default is nearest target date first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalSortKey {
    #[default]
    TargetDate,
    TargetAmount,
    CurrentAmount,
    Name,
    Status,
}

impl GoalSortKey {
    pub fn default_order(&self) -> SortOrder {
        SortOrder::Asc
    }
}

sort_key_from_str!(GoalSortKey, "goal", {
    "target-date" => TargetDate, "date" => TargetDate, "dataalvo" => TargetDate,
    "target" => TargetAmount, "valoralvo" => TargetAmount,
    "current" => CurrentAmount, "valoratual" => CurrentAmount,
    "name" => Name, "nome" => Name,
    "status" => Status,
});

impl SortKey<Goal> for GoalSortKey {
    fn value_of<Tz: TimeZone>(&self, record: &Goal, _tz: &Tz) -> SortValueRef {
        SortValueRef(match self {
            Self::TargetDate => SortValue::Day(record.target_date),
            Self::TargetAmount => SortValue::Number(record.target()),
            Self::CurrentAmount => {
                SortValue::Number(amount::coerce(record.current_amount.as_ref()))
            }
            Self::Name => SortValue::text(Some(&record.name)),
            Self::Status => SortValue::text(Some(record.status.label())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GoalStatus;

    fn ids<T: FinancialRecord>(records: &[&T]) -> Vec<i64> {
        records.iter().map(|r| r.record_id()).collect()
    }

    fn expenses() -> Vec<Expense> {
        vec![
            Expense::new(1, 30.0, "2024-03-02T10:00:00", Some("mercado")).with_establishment("Zeca"),
            Expense::new(2, 10.0, "2024-03-05T10:00:00", Some("Lazer")).with_establishment("ana"),
            Expense::new(3, "abc", "2024-03-01T10:00:00", None).with_establishment("Bar"),
            Expense::new(4, 20.0, "invalid", Some("Mercado")),
        ]
    }

    #[test]
    fn test_default_expense_order_newest_first() {
        let list = expenses();
        let key = ExpenseSortKey::default();
        let sorted = sort_by(list.iter().collect(), &key, key.default_order());
        // The unreadable date sorts lowest, so last when descending
        assert_eq!(ids(&sorted), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_amount_ascending_invalid_first() {
        let list = expenses();
        let sorted = sort_by(list.iter().collect(), &ExpenseSortKey::Amount, SortOrder::Asc);
        assert_eq!(ids(&sorted), vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_text_is_case_folded_and_missing_is_empty() {
        let list = expenses();
        let sorted = sort_by(
            list.iter().collect(),
            &ExpenseSortKey::Establishment,
            SortOrder::Asc,
        );
        assert_eq!(ids(&sorted), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let list = expenses();
        let sorted = sort_by(list.iter().collect(), &ExpenseSortKey::Category, SortOrder::Asc);
        // "mercado" and "Mercado" fold equal and keep input order
        assert_eq!(ids(&sorted), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_income_by_source_desc() {
        let incomes = vec![
            Income::new(1, 1.0, "2024-01-01", None).with_source("Beta"),
            Income::new(2, 1.0, "2024-01-01", None).with_source("alpha"),
        ];
        let sorted = sort_by(incomes.iter().collect(), &IncomeSortKey::Source, SortOrder::Desc);
        assert_eq!(ids(&sorted), vec![1, 2]);
    }

    #[test]
    fn test_goals_by_target_date_and_status() {
        let d = |m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap();
        let mut paused = Goal::new(1, "A", 1.0, 0.0, d(1), d(9));
        paused.status = GoalStatus::Paused;
        let goals = vec![paused, Goal::new(2, "B", 1.0, 0.0, d(1), d(3))];

        let key = GoalSortKey::default();
        let by_date = sort_by(goals.iter().collect(), &key, key.default_order());
        let by_date: Vec<i64> = by_date.iter().map(|g| g.id.value()).collect();
        assert_eq!(by_date, vec![2, 1]);

        // "em andamento" < "pausada"
        let by_status = sort_by(goals.iter().collect(), &GoalSortKey::Status, SortOrder::Asc);
        let by_status: Vec<i64> = by_status.iter().map(|g| g.id.value()).collect();
        assert_eq!(by_status, vec![2, 1]);
    }

    #[test]
    fn test_offset_timestamps_ordered_in_configured_zone() {
        use chrono::FixedOffset;

        // 01:30Z on April 1st is 22:30 on March 31st in UTC-3
        let list = vec![
            Expense::new(1, 1.0, "2024-04-01T01:30:00Z", None),
            Expense::new(2, 1.0, "2024-03-31T23:00:00", None),
        ];
        let key = ExpenseSortKey::Timestamp;

        let utc = sort_by_zone(list.iter().collect(), &key, SortOrder::Asc, TimezoneSetting::Utc);
        assert_eq!(ids(&utc), vec![2, 1]);

        // Read in UTC-3 the first one is 22:30 on March 31st, before 23:00
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
        let local = sort_by_in(list.iter().collect(), &key, SortOrder::Asc, &sao_paulo);
        assert_eq!(ids(&local), vec![1, 2]);
    }

    #[test]
    fn test_parse_keys_and_orders() {
        assert_eq!("valor".parse::<ExpenseSortKey>().unwrap(), ExpenseSortKey::Amount);
        assert_eq!("Fonte".parse::<IncomeSortKey>().unwrap(), IncomeSortKey::Source);
        assert_eq!("nome".parse::<GoalSortKey>().unwrap(), GoalSortKey::Name);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().unwrap_err().is_validation());
        assert!("color".parse::<GoalSortKey>().is_err());
    }
}
