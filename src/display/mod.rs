//! Display formatting for terminal output
//!
//! Currency formatting, report helpers and record list tables.

pub mod list;
pub mod money;
pub mod report;

pub use list::{format_date, format_expense_table, format_goal_table, format_income_table};
pub use money::{format_currency, format_optional};
pub use report::{format_bar, format_percentage, truncate};
