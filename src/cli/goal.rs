//! CLI commands for savings goals

use chrono::NaiveDate;
use clap::Args;

use crate::config::Settings;
use crate::display::format_goal_table;
use crate::error::{SaldoError, SaldoResult};
use crate::models::GoalId;
use crate::reports::GoalReport;
use crate::services::{search, sort_by, GoalSortKey, PeriodService, SortOrder};
use crate::snapshot::Snapshot;

/// Arguments for `saldo goals`
#[derive(Args, Debug)]
pub struct GoalListArgs {
    /// Only goals whose name or description contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort key: target-date, target, current, name, status
    #[arg(long)]
    pub sort: Option<GoalSortKey>,

    /// Sort order: asc or desc (default depends on the key)
    #[arg(long)]
    pub order: Option<SortOrder>,
}

/// Arguments for `saldo goal`
#[derive(Args, Debug)]
pub struct GoalShowArgs {
    /// Goal ID (e.g., "3" or "meta-3")
    pub id: String,

    /// Evaluate progress as of this date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle the goal list command
pub fn handle_goal_list_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: GoalListArgs,
) -> SaldoResult<()> {
    let key = args.sort.unwrap_or_default();
    let order = args.order.unwrap_or_else(|| key.default_order());

    let found = search(&snapshot.goals, args.search.as_deref().unwrap_or(""));
    let goals = sort_by(found, &key, order);

    let today = PeriodService::new(settings).today();
    print!("{}", format_goal_table(&goals, settings, today));

    Ok(())
}

/// Handle the goal detail command
pub fn handle_goal_show_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: GoalShowArgs,
) -> SaldoResult<()> {
    let id: GoalId = args
        .id
        .parse()
        .map_err(|_| SaldoError::Validation(format!("Invalid goal ID: {}", args.id)))?;

    let goal = snapshot
        .goals
        .iter()
        .find(|g| g.id == id)
        .ok_or_else(|| SaldoError::goal_not_found(args.id.clone()))?;

    let as_of = match args.as_of.as_deref() {
        Some(date) => parse_date(date)?,
        None => PeriodService::new(settings).today(),
    };

    let report = GoalReport::generate(goal, as_of);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.format_terminal(settings));
    }

    Ok(())
}

fn parse_date(s: &str) -> SaldoResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        SaldoError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-07-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
        );
        assert!(parse_date("01/07/2024").unwrap_err().is_validation());
    }
}
