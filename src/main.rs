use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use saldo::cli::{
    handle_categories_command, handle_expense_list_command, handle_goal_list_command,
    handle_goal_show_command, handle_income_list_command, handle_parse_sms_command,
    handle_periods_command, handle_summary_command, CategoriesArgs, ExpenseListArgs,
    GoalListArgs, GoalShowArgs, IncomeListArgs, ParseSmsArgs, PeriodsArgs, SummaryArgs,
};
use saldo::config::{paths::SaldoPaths, settings::Settings};
use saldo::snapshot::Snapshot;

/// Environment variable holding the log filter (e.g., "debug", "saldo=info")
const LOG_ENV: &str = "SALDO_LOG";

#[derive(Parser)]
#[command(
    name = "saldo",
    version,
    about = "Personal finance summaries from expense, income and goal snapshots",
    long_about = "Saldo reads the expense, income and savings goal records of the \
                  personal finance backend (as JSON snapshots) and derives the \
                  monthly balance, spending by category and goal progress."
)]
struct Cli {
    /// Directory holding gastos.json, receitas.json, metas.json and config.json
    #[arg(long, global = true, env = "SALDO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income, expenses and net balance for a month
    #[command(alias = "resumo")]
    Summary(SummaryArgs),

    /// Spending by category
    #[command(alias = "categorias")]
    Categories(CategoriesArgs),

    /// List savings goals with progress
    #[command(alias = "metas")]
    Goals(GoalListArgs),

    /// Show one goal's progress and pace
    #[command(alias = "meta")]
    Goal(GoalShowArgs),

    /// List expenses
    #[command(alias = "gastos")]
    Expenses(ExpenseListArgs),

    /// List incomes
    #[command(alias = "receitas")]
    Incomes(IncomeListArgs),

    /// List the selectable years, or the months of one year
    #[command(alias = "periodos")]
    Periods(PeriodsArgs),

    /// Turn a bank SMS into an expense or income record
    #[command(alias = "sms")]
    ParseSms(ParseSmsArgs),

    /// Write the current settings to config.json
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_config(paths: &SaldoPaths, settings: &Settings) {
    println!("Saldo Configuration");
    println!("===================");
    println!("Data directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Expenses:       {}", paths.expenses_file().display());
    println!("Incomes:        {}", paths.incomes_file().display());
    println!("Goals:          {}", paths.goals_file().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Default category: {}", settings.default_category);
    println!("  Date format:      {}", settings.date_format);
    println!("  First year:       {}", settings.first_year);
    println!("  Timezone:         {:?}", settings.timezone);
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => SaldoPaths::with_base_dir(dir),
        None => SaldoPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "resolved data directory");

    let Some(command) = cli.command else {
        println!("Saldo - personal finance summaries");
        println!();
        println!("Run 'saldo --help' for usage information.");
        println!("Run 'saldo summary' to see this month's balance.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing Saldo at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
        }
        Commands::Config => print_config(&paths, &settings),
        Commands::Periods(args) => handle_periods_command(&settings, args)?,
        Commands::ParseSms(args) => handle_parse_sms_command(&paths, args)?,
        Commands::Summary(args) => {
            handle_summary_command(&Snapshot::load(&paths)?, &settings, args)?
        }
        Commands::Categories(args) => {
            handle_categories_command(&Snapshot::load(&paths)?, &settings, args)?
        }
        Commands::Goals(args) => {
            handle_goal_list_command(&Snapshot::load(&paths)?, &settings, args)?
        }
        Commands::Goal(args) => {
            handle_goal_show_command(&Snapshot::load(&paths)?, &settings, args)?
        }
        Commands::Expenses(args) => {
            handle_expense_list_command(&Snapshot::load(&paths)?, &settings, args)?
        }
        Commands::Incomes(args) => {
            handle_income_list_command(&Snapshot::load(&paths)?, &settings, args)?
        }
    }

    Ok(())
}
