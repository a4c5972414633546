//! JSON export of a report
//!
//! The export document carries the rows of a report with every derived
//! field filled in, the totals over those rows, and the query that selected
//! them.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StorebookError, StorebookResult};
use crate::models::{Credits, Debits, Money, ReportRow, Totals};
use crate::reports::{Report, ReportQuery};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A report as written to JSON or YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub query: ExportQuery,
    pub rows: Vec<ExportRow>,
    pub totals: ExportTotals,
}

/// The selection a report was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportQuery {
    /// Store name, or `all stores`
    pub store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub order: String,
}

/// One report row with its leaves and derived totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    /// Absent on consolidated rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub period: String,
    pub store: String,
    pub aggregated: bool,
    pub credits: Credits,
    pub debits: Debits,
    pub total_revenues: Money,
    pub total_expenses: Money,
    pub net_result: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTotals {
    pub total_revenues: Money,
    pub total_expenses: Money,
    pub net_result: Money,
}

impl From<&ReportRow> for ExportRow {
    fn from(row: &ReportRow) -> Self {
        let totals = row.totals();
        Self {
            id: row.id().map(|id| id.as_uuid().to_string()),
            period: row.period().to_string(),
            store: row.store_label().to_string(),
            aggregated: row.is_aggregated(),
            credits: *row.credits(),
            debits: *row.debits(),
            total_revenues: totals.revenue(),
            total_expenses: totals.expense(),
            net_result: totals.net(),
        }
    }
}

impl From<Totals> for ExportTotals {
    fn from(totals: Totals) -> Self {
        Self {
            total_revenues: totals.revenue(),
            total_expenses: totals.expense(),
            net_result: totals.net(),
        }
    }
}

impl From<&ReportQuery> for ExportQuery {
    fn from(query: &ReportQuery) -> Self {
        Self {
            store: query.store.to_string(),
            year: query.period.year,
            month: query.period.month.map(|m| m.code()),
            order: query.order.to_string(),
        }
    }
}

impl ReportExport {
    pub fn from_report(report: &Report, query: &ReportQuery) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            query: query.into(),
            rows: report.rows.iter().map(ExportRow::from).collect(),
            totals: report.totals.into(),
        }
    }
}

/// Write a report as JSON
pub fn export_report_json<W: Write>(
    report: &Report,
    query: &ReportQuery,
    writer: &mut W,
    pretty: bool,
) -> StorebookResult<()> {
    let export = ReportExport::from_report(report, query);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| StorebookError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, FinancialEntry, Month};
    use crate::reports::{PeriodFilter, SortOrder, StoreFilter};

    fn entry(store: &str, month: u32, credit: i64, debit: i64) -> FinancialEntry {
        let mut entry = FinancialEntry::new(store, 2024, Month::new(month).unwrap());
        entry.id = Some(EntryId::new());
        entry.credits.ifood = Money::from_cents(credit);
        entry.debits.loteria = Money::from_cents(debit);
        entry
    }

    fn entries() -> Vec<FinancialEntry> {
        vec![
            entry("Centro", 1, 100_00, 40_00),
            entry("Norte", 1, 50_00, 10_00),
            entry("Centro", 2, 80_00, 0),
        ]
    }

    #[test]
    fn test_consolidated_export() {
        let query = ReportQuery::default();
        let report = Report::generate(&entries(), &query);

        let mut buffer = Vec::new();
        export_report_json(&report, &query, &mut buffer, true).unwrap();

        let export: ReportExport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.rows.len(), 2);
        assert!(export.rows.iter().all(|r| r.aggregated && r.id.is_none()));
        assert_eq!(export.rows[0].period, "2024-02");
        assert_eq!(export.rows[1].total_revenues, Money::from_cents(150_00));
        assert_eq!(export.rows[1].net_result, Money::from_cents(100_00));
        assert_eq!(export.totals.net_result, Money::from_cents(180_00));
    }

    #[test]
    fn test_query_is_recorded() {
        let query = ReportQuery::new(
            StoreFilter::Store("Centro".into()),
            PeriodFilter::new(Some(2024), Some(Month::new(1).unwrap())),
            SortOrder::Ascending,
        );
        let report = Report::generate(&entries(), &query);
        let export = ReportExport::from_report(&report, &query);

        assert_eq!(export.query.store, "Centro");
        assert_eq!(export.query.year, Some(2024));
        assert_eq!(export.query.month.as_deref(), Some("01"));
        assert_eq!(export.rows.len(), 1);
        assert!(export.rows[0].id.is_some());
        assert!(!export.rows[0].aggregated);
    }

    #[test]
    fn test_empty_report_exports() {
        let query = ReportQuery::default();
        let report = Report::generate(&[], &query);

        let mut buffer = Vec::new();
        export_report_json(&report, &query, &mut buffer, false).unwrap();

        let export: ReportExport = serde_json::from_slice(&buffer).unwrap();
        assert!(export.rows.is_empty());
        assert_eq!(export.totals.net_result, Money::zero());
    }
}
