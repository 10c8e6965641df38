//! Period Summary Report
//!
//! Income, expense and net balance for one month.

use chrono::{Local, TimeZone, Utc};
use serde::Serialize;

use crate::config::{Settings, TimezoneSetting};
use crate::display::money::{colored, format_currency};
use crate::models::{Expense, Income, PeriodSelector};
use crate::services::balance::{compute_summary_in, FinancialSummary};

/// Shown when spending exceeds income
pub const OVERSPENDING_WARNING: &str = "Você está gastando mais do que ganha neste período!";

/// Summary of one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummaryReport {
    pub period: PeriodSelector,
    #[serde(flatten)]
    pub summary: FinancialSummary,
}

impl PeriodSummaryReport {
    /// Summarize `period`, placing timestamps into months in `tz`
    pub fn generate<Tz: TimeZone>(
        expenses: &[Expense],
        incomes: &[Income],
        period: PeriodSelector,
        tz: &Tz,
    ) -> Self {
        Self {
            period,
            summary: compute_summary_in(expenses, incomes, period, tz),
        }
    }

    /// Summarize `period` in the timezone chosen in `settings`
    pub fn generate_with(
        expenses: &[Expense],
        incomes: &[Income],
        period: PeriodSelector,
        settings: &Settings,
    ) -> Self {
        match settings.timezone {
            TimezoneSetting::Local => Self::generate(expenses, incomes, period, &Local),
            TimezoneSetting::Utc => Self::generate(expenses, incomes, period, &Utc),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();
        let s = &self.summary;

        output.push_str(&format!("Resumo Financeiro: {}\n", self.period));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>22}\n",
            "Receitas:",
            format_currency(s.total_income, currency_symbol)
        ));
        output.push_str(&format!(
            "{:<16} {:>22}\n",
            "Gastos:",
            format_currency(s.total_expense, currency_symbol)
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');

        let balance = format!("{:>22}", format_currency(s.net_balance, currency_symbol));
        output.push_str(&format!(
            "{:<16} {}\n",
            "Saldo Líquido:",
            colored(&balance, s.net_balance)
        ));

        if s.is_overspending() {
            output.push('\n');
            output.push_str(&format!("⚠ {}\n", OVERSPENDING_WARNING));
        }

        output
    }
}
