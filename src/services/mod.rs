//! Service layer for Saldo
//!
//! The derivation engine: period filtering, aggregation, balance, goal
//! progress, search and ordering, plus bank SMS parsing. Every function here
//! is pure over its inputs; nothing is cached between calls.

pub mod aggregate;
pub mod balance;
pub mod goal;
pub mod period;
pub mod search;
pub mod sms;
pub mod sort;

pub use aggregate::{group_sum, sum, CategoryBucket, CategoryTotals};
pub use balance::{compute_summary, compute_summary_in, FinancialSummary};
pub use goal::{compute_progress, compute_progress_on, GoalProgress};
pub use period::{calendar_date_in, filter_by_period, filter_by_period_in, PeriodService};
pub use search::{matches_search, search};
pub use sms::{ParsedSms, SmsKind, SmsParser};
pub use sort::{
    sort_by, sort_by_in, sort_by_zone, ExpenseSortKey, GoalSortKey, IncomeSortKey, SortKey,
    SortOrder,
};
