//! Balance calculator
//!
//! Combines the period filter and the aggregator over the expense and income
//! streams into the period's net balance ("saldo líquido").

use chrono::{Local, TimeZone};
use serde::Serialize;
use tracing::debug;

use super::aggregate::sum;
use super::period::filter_by_period_in;
use crate::models::{Expense, FinancialRecord, Income, PeriodSelector};

/// Totals for one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
}

impl FinancialSummary {
    /// Spending exceeded income in the period
    pub fn is_overspending(&self) -> bool {
        self.net_balance < 0.0
    }
}

/// Summarize a period, placing timestamps into months in `tz`
pub fn compute_summary_in<Tz: TimeZone>(
    expenses: &[Expense],
    incomes: &[Income],
    period: PeriodSelector,
    tz: &Tz,
) -> FinancialSummary {
    let filtered_expenses = filter_by_period_in(expenses, Expense::timestamp, period, tz);
    let filtered_incomes = filter_by_period_in(incomes, Income::timestamp, period, tz);

    let total_expense = sum(filtered_expenses.iter().copied(), Expense::raw_amount);
    let total_income = sum(filtered_incomes.iter().copied(), Income::raw_amount);

    debug!(
        %period,
        expenses = filtered_expenses.len(),
        incomes = filtered_incomes.len(),
        total_income,
        total_expense,
        "computed period summary"
    );

    FinancialSummary {
        total_income,
        total_expense,
        net_balance: total_income - total_expense,
    }
}

/// Summarize a period in the local timezone
pub fn compute_summary(
    expenses: &[Expense],
    incomes: &[Income],
    period: PeriodSelector,
) -> FinancialSummary {
    compute_summary_in(expenses, incomes, period, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn march_2024() -> PeriodSelector {
        PeriodSelector::new(2, 2024).unwrap()
    }

    #[test]
    fn test_basic_summary() {
        let expenses = vec![Expense::new(1, 100.0, "2024-03-05T12:00:00", None)];
        let incomes = vec![Income::new(1, 500.0, "2024-03-10T12:00:00", None)];

        let summary = compute_summary_in(&expenses, &incomes, march_2024(), &Utc);
        assert_eq!(
            summary,
            FinancialSummary {
                total_income: 500.0,
                total_expense: 100.0,
                net_balance: 400.0,
            }
        );
        assert!(!summary.is_overspending());
    }

    #[test]
    fn test_other_periods_ignored() {
        let expenses = vec![
            Expense::new(1, 100.0, "2024-03-05", None),
            Expense::new(2, 999.0, "2024-02-28", None),
        ];
        let incomes = vec![Income::new(1, 50.0, "2024-04-01", None)];

        let summary = compute_summary_in(&expenses, &incomes, march_2024(), &Utc);
        assert_eq!(summary.total_expense, 100.0);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.net_balance, -100.0);
        assert!(summary.is_overspending());
    }

    #[test]
    fn test_empty_inputs() {
        let summary = compute_summary(&[], &[], march_2024());
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expense, 0.0);
        assert_eq!(summary.net_balance, 0.0);
    }

    #[test]
    fn test_malformed_amount_skipped() {
        let expenses = vec![
            Expense::new(1, 40.0, "2024-03-05", None),
            Expense::new(2, "abc", "2024-03-06", None),
        ];
        let summary = compute_summary_in(&expenses, &[], march_2024(), &Utc);
        assert_eq!(summary.total_expense, 40.0);
    }

    #[test]
    fn test_idempotent() {
        let expenses = vec![
            Expense::new(1, 0.1, "2024-03-05", None),
            Expense::new(2, 0.2, "2024-03-06", None),
            Expense::new(3, 0.3, "2024-03-07", None),
        ];
        let incomes = vec![Income::new(1, 1.0, "2024-03-01", None)];

        let a = compute_summary_in(&expenses, &incomes, march_2024(), &Utc);
        let b = compute_summary_in(&expenses, &incomes, march_2024(), &Utc);
        assert_eq!(a.net_balance.to_bits(), b.net_balance.to_bits());
        assert_eq!(a.total_expense.to_bits(), b.total_expense.to_bits());
    }

    #[test]
    fn test_serializes_camel_case() {
        let summary = FinancialSummary {
            total_income: 1.0,
            total_expense: 2.0,
            net_balance: -1.0,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["netBalance"], -1.0);
        assert_eq!(json["totalIncome"], 1.0);
    }
}
