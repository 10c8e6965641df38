//! CLI command listing the selectable periods

use clap::Args;

use crate::config::Settings;
use crate::error::{SaldoError, SaldoResult};
use crate::models::PeriodSelector;
use crate::services::PeriodService;

/// Arguments for `saldo periods`
#[derive(Args, Debug)]
pub struct PeriodsArgs {
    /// List the months of this year instead of the years
    #[arg(short, long)]
    pub year: Option<i32>,
}

/// Years on offer, or the months of one of them, marking the current period
fn format_periods(
    years: &[i32],
    current: PeriodSelector,
    year: Option<i32>,
) -> SaldoResult<String> {
    let Some(year) = year else {
        let listed: Vec<String> = years.iter().map(|y| y.to_string()).collect();
        return Ok(format!(
            "Anos disponíveis: {}\nPeríodo atual: {}\n",
            listed.join(", "),
            current
        ));
    };

    if !years.contains(&year) {
        return Err(SaldoError::Validation(format!(
            "Year {} is outside the selectable range {}..={}",
            year,
            years.first().copied().unwrap_or(year),
            years.last().copied().unwrap_or(year)
        )));
    }

    let mut output = String::new();
    for period in PeriodSelector::months_of(year) {
        let marker = if period == current { "  (atual)" } else { "" };
        output.push_str(&format!(
            "{}-{:02}  {}{}\n",
            period.year(),
            period.month() + 1,
            period,
            marker
        ));
    }

    Ok(output)
}

/// Handle the periods command
pub fn handle_periods_command(settings: &Settings, args: PeriodsArgs) -> SaldoResult<()> {
    let service = PeriodService::new(settings);
    let years = service.available_years();

    print!(
        "{}",
        format_periods(&years, service.current_period(), args.year)?
    );

    Ok(())
}
