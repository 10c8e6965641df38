//! CLI command for the period summary

use clap::Args;

use crate::config::Settings;
use crate::error::SaldoResult;
use crate::reports::PeriodSummaryReport;
use crate::services::PeriodService;
use crate::snapshot::Snapshot;

/// Arguments for `saldo summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Period (e.g., "2024-03", "atual", "anterior"); defaults to this month
    #[arg(short, long)]
    pub period: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle the summary command
pub fn handle_summary_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: SummaryArgs,
) -> SaldoResult<()> {
    let period = PeriodService::new(settings).parse_or_current(args.period.as_deref())?;

    let report =
        PeriodSummaryReport::generate_with(&snapshot.expenses, &snapshot.incomes, period, settings);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}
