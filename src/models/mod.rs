//! Core data models for Saldo
//!
//! Read-only snapshots of the backend's records (expenses, income, goals) and
//! the period selector that scopes the summary.

pub mod amount;
pub mod expense;
pub mod goal;
pub mod ids;
pub mod income;
pub mod lenient;
pub mod period;
pub mod record;

pub use amount::RawAmount;
pub use expense::Expense;
pub use goal::{Goal, GoalStatus};
pub use ids::{ExpenseId, GoalId, IncomeId};
pub use income::Income;
pub use period::{PeriodParseError, PeriodSelector};
pub use record::{FinancialRecord, Searchable};
