//! Reports module for Saldo
//!
//! Period summary, spending by category and goal detail, each with a
//! terminal rendering.

pub mod category;
pub mod goal;
pub mod summary;

pub use category::{CategoryBreakdown, CategoryShare};
pub use goal::GoalReport;
pub use summary::PeriodSummaryReport;
