//! CLI command handlers
//!
//! Bridges clap argument parsing with the service, report and export layers.

pub mod audit;
pub mod entry;
pub mod export;
pub mod report;

pub use audit::{handle_audit_command, AuditArgs};
pub use entry::{handle_entry_command, EntryCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use report::{handle_report_command, handle_trend_command, ReportArgs, TrendArgs};
