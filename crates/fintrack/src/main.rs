use chrono::Local;
use clap::Parser;
use ledger::{Aggregator, Bucket, DateRange};

use crate::{
    cli::{Cli, Command, DashboardArgs},
    error::Result,
    report::Printer,
    settings::Settings,
};

mod cli;
mod error;
mod load;
mod report;
mod settings;

fn main() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "fintrack={level},ledger={level}",
            level = settings.level
        ))
        .init();

    tracing::debug!(?settings, "settings loaded");

    if let Err(err) = run(cli, &settings) {
        tracing::error!("{err}");
        return Err(err.into());
    }
    Ok(())
}

fn run(cli: Cli, settings: &Settings) -> Result<()> {
    let aggregator = Aggregator::new(settings.policy);
    let mut printer = Printer::new(std::io::stdout().lock(), settings.currency, cli.json);

    match cli.command {
        Command::Total(args) => {
            let records = load::monetary_records(load::read_rows(&args.file)?);
            printer.total(aggregator.expense_total(&records)?)
        }
        Command::Categories(args) => {
            let records = load::monetary_records(load::read_rows(&args.file)?);
            printer.categories(&aggregator.totals_by_category(&records)?)
        }
        Command::Daily(args) => {
            let expenses = load::expenses(load::read_rows(&args.file)?, &aggregator)?;
            printer.daily(&aggregator.totals_by_day(&expenses)?)
        }
        Command::Balance(args) => {
            let rows = load::read_rows(&args.file)?;
            let transactions =
                load::ledger_transactions(rows, args.bucket.as_deref(), &aggregator)?;
            let bucket = Bucket {
                id: args.bucket.clone().unwrap_or_default(),
                name: args
                    .name
                    .or(args.bucket)
                    .unwrap_or_else(|| "Balance".to_string()),
                institution: None,
                goal_amount: args.goal,
            };
            printer.bucket(&aggregator.bucket_summary(&bucket, &transactions)?)
        }
        Command::Dashboard(args) => {
            let range = dashboard_range(&args, settings.window_days)?;
            let expenses = load::expenses(load::read_rows(&args.file)?, &aggregator)?;
            printer.dashboard(&aggregator.dashboard(&expenses, range)?)
        }
        Command::Stats(args) => {
            let records = load::cash_flows(load::read_rows(&args.file)?, &aggregator)?;
            printer.statistics(&aggregator.cash_flow_statistics(&records)?)
        }
    }
}

/// Explicit bounds win; a missing start is `window_days` before the end and
/// a missing end is today.
fn dashboard_range(args: &DashboardArgs, window_days: u32) -> Result<Option<DateRange>> {
    if args.all {
        return Ok(None);
    }
    let to = args.to.unwrap_or_else(|| Local::now().date_naive());
    let range = match args.from {
        Some(from) => DateRange::new(from, to)?,
        None => DateRange::last_days(to, window_days)?,
    };
    Ok(Some(range))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;

    fn args(from: Option<&str>, to: Option<&str>, all: bool) -> DashboardArgs {
        let day = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        DashboardArgs {
            file: PathBuf::from("expenses.json"),
            from: from.map(day),
            to: to.map(day),
            all,
        }
    }

    #[test]
    fn window_defaults_back_from_end() {
        let range = dashboard_range(&args(None, Some("2026-05-31"), false), 30)
            .unwrap()
            .unwrap();
        assert_eq!(range.from(), NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
    }

    #[test]
    fn explicit_window_is_validated() {
        assert!(dashboard_range(&args(Some("2026-06-02"), Some("2026-06-01"), false), 30).is_err());
        assert_eq!(dashboard_range(&args(None, None, true), 30).unwrap(), None);
    }

    #[test]
    fn missing_end_is_today() {
        let range = dashboard_range(&args(None, None, false), 0).unwrap().unwrap();
        assert_eq!(range.from(), range.to());
        assert!(range.to() <= Local::now().date_naive());
    }
}
