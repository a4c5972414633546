//! YAML export of a report, for human-readable archives

use std::io::Write;

use crate::error::{StorebookError, StorebookResult};
use crate::export::json::ReportExport;
use crate::reports::{Report, ReportQuery};

/// Write a report as YAML with a short comment header
pub fn export_report_yaml<W: Write>(
    report: &Report,
    query: &ReportQuery,
    writer: &mut W,
) -> StorebookResult<()> {
    let export = ReportExport::from_report(report, query);
    let io_err = |e: std::io::Error| StorebookError::Export(e.to_string());

    writeln!(writer, "# storebook report export").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer, "# Amounts are in cents.").map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| StorebookError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, FinancialEntry, Money, Month};

    #[test]
    fn test_yaml_export() {
        let mut entry = FinancialEntry::new("Centro", 2024, Month::new(3).unwrap());
        entry.id = Some(EntryId::new());
        entry.credits.caixa = Money::from_cents(12_50);

        let query = ReportQuery::default();
        let report = Report::generate(&[entry], &query);

        let mut buffer = Vec::new();
        export_report_yaml(&report, &query, &mut buffer).unwrap();
        let yaml = String::from_utf8(buffer).unwrap();

        assert!(yaml.starts_with("# storebook report export"));
        assert!(yaml.contains("schema_version"));
        assert!(yaml.contains("2024-03"));

        let parsed: ReportExport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.totals.total_revenues, Money::from_cents(12_50));
    }
}
