//! CLI commands for expense and income lists

use clap::Args;

use crate::config::Settings;
use crate::display::{format_currency, format_expense_table, format_income_table};
use crate::error::SaldoResult;
use crate::models::{Expense, FinancialRecord, Income, Searchable};
use crate::services::{
    matches_search, sort_by_zone, sum, ExpenseSortKey, IncomeSortKey, PeriodService, SortOrder,
};
use crate::snapshot::Snapshot;

/// Arguments for `saldo expenses`
#[derive(Args, Debug)]
pub struct ExpenseListArgs {
    /// Restrict to one period (e.g., "2024-03"); all records otherwise
    #[arg(short, long)]
    pub period: Option<String>,

    /// Only records containing this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort key: amount, establishment, category, timestamp
    #[arg(long)]
    pub sort: Option<ExpenseSortKey>,

    /// Sort order: asc or desc (default desc)
    #[arg(long)]
    pub order: Option<SortOrder>,
}

/// Arguments for `saldo incomes`
#[derive(Args, Debug)]
pub struct IncomeListArgs {
    /// Restrict to one period (e.g., "2024-03"); all records otherwise
    #[arg(short, long)]
    pub period: Option<String>,

    /// Only records containing this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort key: amount, source, category, received
    #[arg(long)]
    pub sort: Option<IncomeSortKey>,

    /// Sort order: asc or desc (default desc)
    #[arg(long)]
    pub order: Option<SortOrder>,
}

/// Period filter then text search, in input order
fn select<'a, T>(
    records: &'a [T],
    settings: &Settings,
    period: Option<&str>,
    term: Option<&str>,
) -> SaldoResult<Vec<&'a T>>
where
    T: FinancialRecord + Searchable,
{
    let mut selected = match period {
        Some(period) => {
            let service = PeriodService::new(settings);
            let period = service.parse_or_current(Some(period))?;
            service.filter(records, T::timestamp, period)
        }
        None => records.iter().collect(),
    };

    if let Some(term) = term {
        selected.retain(|record| matches_search(*record, term));
    }

    Ok(selected)
}

fn footer<T: FinancialRecord>(records: &[&T], settings: &Settings, noun: &str) -> String {
    let total = sum(records.iter().copied(), T::raw_amount);
    format!(
        "{} {}, total {}\n",
        records.len(),
        noun,
        format_currency(total, &settings.currency_symbol)
    )
}

/// Handle the expense list command
pub fn handle_expense_list_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: ExpenseListArgs,
) -> SaldoResult<()> {
    let selected = select(
        &snapshot.expenses,
        settings,
        args.period.as_deref(),
        args.search.as_deref(),
    )?;

    let key = args.sort.unwrap_or_default();
    let order = args.order.unwrap_or_else(|| key.default_order());
    let expenses = sort_by_zone(selected, &key, order, settings.timezone);

    print!("{}", format_expense_table(&expenses, settings));
    if !expenses.is_empty() {
        print!("{}", footer::<Expense>(&expenses, settings, "gastos"));
    }

    Ok(())
}

/// Handle the income list command
pub fn handle_income_list_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: IncomeListArgs,
) -> SaldoResult<()> {
    let selected = select(
        &snapshot.incomes,
        settings,
        args.period.as_deref(),
        args.search.as_deref(),
    )?;

    let key = args.sort.unwrap_or_default();
    let order = args.order.unwrap_or_else(|| key.default_order());
    let incomes = sort_by_zone(selected, &key, order, settings.timezone);

    print!("{}", format_income_table(&incomes, settings));
    if !incomes.is_empty() {
        print!("{}", footer::<Income>(&incomes, settings, "receitas"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_filters_period_then_search() {
        let settings = Settings::default();
        let expenses = vec![
            Expense::new(1, 10.0, "2024-03-05", Some("Mercado")),
            Expense::new(2, 20.0, "2024-03-06", Some("Lazer")),
            Expense::new(3, 30.0, "2024-04-01", Some("Mercado")),
        ];

        let all = select(&expenses, &settings, None, None).unwrap();
        assert_eq!(all.len(), 3);

        let march = select(&expenses, &settings, Some("2024-03"), Some("merc")).unwrap();
        let ids: Vec<i64> = march.iter().map(|e| e.record_id()).collect();
        assert_eq!(ids, vec![1]);

        assert!(select(&expenses, &settings, Some("março"), None)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_footer_skips_invalid_amounts() {
        let settings = Settings::default();
        let a = Expense::new(1, 10.0, "2024-03-05", None);
        let b = Expense::new(2, "x", "2024-03-06", None);
        assert_eq!(footer(&[&a, &b], &settings, "gastos"), "2 gastos, total R$ 10,00\n");
    }
}
