//! Record list tables

use chrono::{NaiveDate, NaiveTime};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::money::format_optional;
use super::report::{format_percentage, truncate};
use crate::config::Settings;
use crate::models::{amount, Expense, FinancialRecord, Goal, Income};
use crate::services::goal::compute_progress_on;
use crate::services::period::PeriodService;

const TEXT_WIDTH: usize = 28;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Data")]
    date: String,
    #[tabled(rename = "Estabelecimento")]
    establishment: String,
    #[tabled(rename = "Categoria")]
    category: String,
    #[tabled(rename = "Valor")]
    amount: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Data")]
    date: String,
    #[tabled(rename = "Fonte")]
    source: String,
    #[tabled(rename = "Categoria")]
    category: String,
    #[tabled(rename = "Valor")]
    amount: String,
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Meta")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Atual")]
    current: String,
    #[tabled(rename = "Alvo")]
    target: String,
    #[tabled(rename = "%")]
    percent: String,
    #[tabled(rename = "Data Alvo")]
    target_date: String,
}

/// Render a raw timestamp with the configured date format and timezone
///
/// Unparsable timestamps are shown as received.
pub fn format_timestamp(raw: Option<&str>, settings: &Settings) -> String {
    match raw {
        Some(raw) => match PeriodService::new(settings).wall_clock(raw) {
            Some(dt) => dt.format(&settings.date_format).to_string(),
            None => raw.to_string(),
        },
        None => "-".to_string(),
    }
}

/// Render a calendar date with the configured date format
///
/// The date is rendered as its midnight, so time fields in the format read 00:00.
pub fn format_date(date: NaiveDate, settings: &Settings) -> String {
    date.and_time(NaiveTime::MIN)
        .format(&settings.date_format)
        .to_string()
}

fn format_day(date: Option<NaiveDate>, settings: &Settings) -> String {
    date.map(|d| format_date(d, settings))
        .unwrap_or_else(|| "-".to_string())
}

fn text_or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => truncate(v, TEXT_WIDTH),
        _ => "-".to_string(),
    }
}

/// Table of expenses, in the order given
pub fn format_expense_table(expenses: &[&Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "Nenhum gasto encontrado.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: format_timestamp(e.timestamp(), settings),
        establishment: text_or_dash(e.establishment.as_deref()),
        category: text_or_dash(e.category()),
        amount: format_optional(amount::coerce(e.raw_amount()), &settings.currency_symbol),
    });

    format!("{}\n", Table::new(rows).with(Style::rounded()))
}

/// Table of incomes, in the order given
pub fn format_income_table(incomes: &[&Income], settings: &Settings) -> String {
    if incomes.is_empty() {
        return "Nenhuma receita encontrada.\n".to_string();
    }

    let rows = incomes.iter().map(|i| IncomeRow {
        id: i.id.to_string(),
        date: format_timestamp(i.timestamp(), settings),
        source: text_or_dash(i.source.as_deref()),
        category: text_or_dash(i.category()),
        amount: format_optional(amount::coerce(i.raw_amount()), &settings.currency_symbol),
    });

    format!("{}\n", Table::new(rows).with(Style::rounded()))
}

/// Table of goals with their progress as of `today`
pub fn format_goal_table(goals: &[&Goal], settings: &Settings, today: NaiveDate) -> String {
    if goals.is_empty() {
        return "Nenhuma meta encontrada.\n".to_string();
    }

    let symbol = &settings.currency_symbol;
    let rows = goals.iter().map(|g| {
        let progress = compute_progress_on(g, today);
        GoalRow {
            id: g.id.to_string(),
            name: truncate(&g.name, TEXT_WIDTH),
            status: g.status.to_string(),
            current: format_optional(Some(g.current()), symbol),
            target: format_optional(g.target(), symbol),
            percent: format_percentage(progress.percent_complete),
            target_date: format_day(g.target_date, settings),
        }
    });

    format!("{}\n", Table::new(rows).with(Style::rounded()))
}
