//! CLI command for the category breakdown
//!
//! Prints spending by category, or exports it to CSV.

use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{SaldoError, SaldoResult};
use crate::models::{Expense, FinancialRecord};
use crate::reports::CategoryBreakdown;
use crate::services::PeriodService;
use crate::snapshot::Snapshot;

/// Arguments for `saldo categories`
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Restrict to one period (e.g., "2024-03"); all expenses otherwise
    #[arg(short, long)]
    pub period: Option<String>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the breakdown as JSON
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

/// Handle the categories command
pub fn handle_categories_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: CategoriesArgs,
) -> SaldoResult<()> {
    let report = match args.period.as_deref() {
        Some(period) => {
            let service = PeriodService::new(settings);
            let period = service.parse_or_current(Some(period))?;
            let expenses = service.filter(&snapshot.expenses, Expense::timestamp, period);
            CategoryBreakdown::from_expenses(expenses, &settings.default_category)
                .with_period(period)
        }
        None => CategoryBreakdown::from_expenses(&snapshot.expenses, &settings.default_category),
    };

    if let Some(path) = args.output {
        let file = File::create(&path).map_err(|e| {
            SaldoError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!("Category report exported to: {}", path.display());
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}
