//! Report export for storebook
//!
//! - CSV: spreadsheet-friendly rows plus a totals line
//! - JSON: machine-readable document with schema version and query
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_report_csv;
pub use json::{export_report_json, ExportRow, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;
