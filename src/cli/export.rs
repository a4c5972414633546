//! CLI command for report export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{StorebookError, StorebookResult};
use crate::export::{export_report_csv, export_report_json, export_report_yaml};
use crate::reports::{Report, SortOrder};
use crate::storage::{EntryStore, Storage};

use super::report::FilterArgs;

/// Export format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Spreadsheet rows with a totals line
    #[default]
    Csv,
    /// Versioned document with query, rows and totals
    Json,
    /// Same document as JSON, human-readable
    Yaml,
}

/// Arguments of `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path
    pub output: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Oldest period first
    #[arg(long)]
    pub ascending: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> StorebookResult<()> {
    let order = if args.ascending {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };
    let query = args.filter.to_query(order)?;
    let entries = storage.entries.list()?;
    let report = Report::generate(&entries, &query);

    let file = File::create(&args.output).map_err(|e| {
        StorebookError::Export(format!(
            "Failed to create file {}: {}",
            args.output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match args.format {
        ExportFormat::Csv => export_report_csv(&report, &mut writer)?,
        ExportFormat::Json => export_report_json(&report, &query, &mut writer, args.pretty)?,
        ExportFormat::Yaml => export_report_yaml(&report, &query, &mut writer)?,
    }

    writer
        .flush()
        .map_err(|e| StorebookError::Export(e.to_string()))?;

    println!(
        "Exported {} rows to: {}",
        report.rows.len(),
        args.output.display()
    );

    Ok(())
}
