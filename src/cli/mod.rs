//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod goal;
pub mod list;
pub mod period;
pub mod report;
pub mod sms;
pub mod summary;

pub use goal::{handle_goal_list_command, handle_goal_show_command, GoalListArgs, GoalShowArgs};
pub use list::{
    handle_expense_list_command, handle_income_list_command, ExpenseListArgs, IncomeListArgs,
};
pub use period::{handle_periods_command, PeriodsArgs};
pub use report::{handle_categories_command, CategoriesArgs};
pub use sms::{handle_parse_sms_command, ParseSmsArgs};
pub use summary::{handle_summary_command, SummaryArgs};
