use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fintrack")]
#[command(about = "Totals, bucket balances and dashboards from exported finance records")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Invalid record policy: `reject` or `skip`.
    #[arg(long)]
    pub policy: Option<String>,
    /// Display currency: USD, EUR or BRL.
    #[arg(long)]
    pub currency: Option<String>,
    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sum of all expense amounts.
    Total(FileArgs),
    /// Expense totals per category.
    Categories(FileArgs),
    /// Expense totals per day.
    Daily(FileArgs),
    /// Balance of a savings bucket.
    Balance(BalanceArgs),
    /// Total, category slices and daily series for a date window.
    Dashboard(DashboardArgs),
    /// Income, expense and savings totals.
    Stats(FileArgs),
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// `.csv` or `.json` file of rows.
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct BalanceArgs {
    pub file: PathBuf,
    /// Only count rows of this bucket.
    #[arg(long)]
    pub bucket: Option<String>,
    /// Bucket name shown in the report.
    #[arg(long)]
    pub name: Option<String>,
    /// Goal amount, to report progress.
    #[arg(long)]
    pub goal: Option<String>,
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    pub file: PathBuf,
    /// First day (inclusive), `YYYY-MM-DD`.
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day (inclusive), `YYYY-MM-DD`. Defaults to today.
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Ignore the date window and use every row.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dashboard_window() {
        let cli = Cli::try_parse_from([
            "fintrack",
            "--policy",
            "skip",
            "dashboard",
            "expenses.csv",
            "--from",
            "2026-01-01",
        ])
        .unwrap();
        assert_eq!(cli.policy.as_deref(), Some("skip"));
        match cli.command {
            Command::Dashboard(args) => {
                assert_eq!(args.from, NaiveDate::from_ymd_opt(2026, 1, 1));
                assert_eq!(args.to, None);
                assert!(!args.all);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn all_conflicts_with_explicit_window() {
        assert!(
            Cli::try_parse_from(["fintrack", "dashboard", "x.json", "--all", "--to", "2026-01-01"])
                .is_err()
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
