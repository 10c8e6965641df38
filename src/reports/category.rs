//! Category Breakdown Report
//!
//! Spending per category with each category's share of the total, as shown
//! in the dashboard's pie chart.

use serde::Serialize;
use std::io::Write;

use crate::display::money::format_currency;
use crate::display::report::{format_bar, format_percentage, separator, truncate};
use crate::error::SaldoResult;
use crate::models::{Expense, FinancialRecord, PeriodSelector};
use crate::services::aggregate::group_sum;

const BAR_WIDTH: usize = 20;

/// One category's slice of the spending
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category_name: String,
    pub total_amount: f64,
    /// Share of the breakdown total, 0 when the total is 0
    pub percentage: f64,
}

/// Expense totals by category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// Restricting period, or `None` for all expenses
    pub period: Option<PeriodSelector>,
    /// Categories in first-seen order
    pub categories: Vec<CategoryShare>,
    pub total: f64,
}

impl CategoryBreakdown {
    /// Group `expenses` by category; uncategorized ones go to `default_key`
    pub fn from_expenses<'a, I>(expenses: I, default_key: &str) -> Self
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let totals = group_sum(expenses, Expense::raw_amount, Expense::category, default_key);
        let total = totals.total();

        let categories = totals
            .into_buckets()
            .into_iter()
            .map(|bucket| CategoryShare {
                percentage: if total == 0.0 {
                    0.0
                } else {
                    bucket.total_amount / total * 100.0
                },
                category_name: bucket.category_name,
                total_amount: bucket.total_amount,
            })
            .collect();

        Self {
            period: None,
            categories,
            total,
        }
    }

    /// Label the breakdown with the period it was filtered to
    pub fn with_period(mut self, period: PeriodSelector) -> Self {
        self.period = Some(period);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Categories from largest to smallest; ties keep first-seen order
    pub fn ranked(&self) -> Vec<&CategoryShare> {
        let mut ranked: Vec<_> = self.categories.iter().collect();
        ranked.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
        ranked
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        let scope = match &self.period {
            Some(period) => period.to_string(),
            None => "Todos os períodos".to_string(),
        };
        output.push_str(&format!("Gastos por Categoria: {}\n", scope));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.is_empty() {
            output.push_str("Nenhum gasto registrado.\n");
            return output;
        }

        let ranked = self.ranked();
        let max = ranked.first().map(|c| c.total_amount).unwrap_or(0.0);

        for share in ranked {
            output.push_str(&format!(
                "{:<24} {:>16} {:>6}  {}\n",
                truncate(&share.category_name, 24),
                format_currency(share.total_amount, currency_symbol),
                format_percentage(share.percentage),
                format_bar(share.total_amount, max, BAR_WIDTH)
            ));
        }

        output.push_str(&separator(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "TOTAL",
            format_currency(self.total, currency_symbol)
        ));

        output
    }

    /// Export the report as CSV, one row per category plus a total row
    pub fn export_csv<W: Write>(&self, writer: W) -> SaldoResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(["Categoria", "Valor", "Percentual"])?;
        for share in &self.categories {
            let amount = format!("{:.2}", share.total_amount);
            let percentage = format!("{:.2}", share.percentage);
            csv.write_record([
                share.category_name.as_str(),
                amount.as_str(),
                percentage.as_str(),
            ])?;
        }
        let total = format!("{:.2}", self.total);
        csv.write_record(["TOTAL", total.as_str(), "100.00"])?;

        csv.flush()?;
        Ok(())
    }
}
