//! CLI commands for reports
//!
//! `report` lists a store's entries, or all stores consolidated per month,
//! with grand totals. `trend` shows the same figures oldest first with a
//! bar per month.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::format_report;
use crate::error::{StorebookError, StorebookResult};
use crate::export::export_report_csv;
use crate::reports::{PeriodFilter, Report, ReportQuery, SortOrder, StoreFilter, TrendReport};
use crate::storage::{EntryStore, Storage};

/// Store and period selection shared by report-style commands
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Store name; omit, leave empty or use "all" to consolidate every store
    #[arg(short, long)]
    pub store: Option<String>,

    /// Only this year (e.g. 2024)
    #[arg(short, long)]
    pub year: Option<String>,

    /// Only this month (1-12 or 01-12)
    #[arg(short, long)]
    pub month: Option<String>,
}

impl FilterArgs {
    /// Turn raw arguments into a report query
    pub fn to_query(&self, order: SortOrder) -> StorebookResult<ReportQuery> {
        let period = PeriodFilter::from_input(self.year.as_deref(), self.month.as_deref())
            .map_err(|e| StorebookError::Validation(e.to_string()))?;
        Ok(ReportQuery::new(
            StoreFilter::from_input(self.store.as_deref()),
            period,
            order,
        ))
    }
}

/// Arguments of `report`
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Oldest period first
    #[arg(long)]
    pub ascending: bool,

    /// Show every leaf amount
    #[arg(short, long)]
    pub detailed: bool,

    /// Also write the rows to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments of `trend`
#[derive(Args, Debug)]
pub struct TrendArgs {
    /// Store name; omit or use "all" to consolidate every store
    #[arg(short, long)]
    pub store: Option<String>,

    /// Only this year (e.g. 2024)
    #[arg(short, long)]
    pub year: Option<String>,
}

/// Handle the report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    args: ReportArgs,
) -> StorebookResult<()> {
    let order = if args.ascending {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };
    let query = args.filter.to_query(order)?;
    let entries = storage.entries.list()?;
    let report = Report::generate(&entries, &query);

    println!("Report for {}", describe(&query));
    println!();
    print!(
        "{}",
        format_report(&report, &settings.currency_symbol, args.detailed)
    );

    if let Some(path) = args.output {
        let file = File::create(&path).map_err(|e| {
            StorebookError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        export_report_csv(&report, BufWriter::new(file))?;
        println!();
        println!("Report exported to: {}", path.display());
    }

    Ok(())
}

/// Handle the trend command
pub fn handle_trend_command(
    storage: &Storage,
    settings: &Settings,
    args: TrendArgs,
) -> StorebookResult<()> {
    let filter = FilterArgs {
        store: args.store,
        year: args.year,
        month: None,
    };
    let query = filter.to_query(SortOrder::Ascending)?;
    let entries = storage.entries.list()?;
    let trend = TrendReport::generate(&entries, &query);

    println!("Trend for {}", describe(&query));
    println!();
    print!("{}", trend.format_terminal(&settings.currency_symbol));

    Ok(())
}

/// Human-readable summary of a query, e.g. "Centro, 2024-03"
fn describe(query: &ReportQuery) -> String {
    let mut parts = vec![query.store.to_string()];
    match (query.period.year, query.period.month) {
        (Some(year), Some(month)) => parts.push(format!("{}-{}", year, month)),
        (Some(year), None) => parts.push(year.to_string()),
        (None, Some(month)) => parts.push(format!("month {} of every year", month)),
        (None, None) => {}
    }
    parts.join(", ")
}
