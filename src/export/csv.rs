//! CSV export of a report
//!
//! One record per row with all nine leaves and the three derived totals,
//! followed by a `TOTAL` record. Amounts are written as decimals.

use std::io::Write;

use serde::Serialize;

use crate::error::{StorebookError, StorebookResult};
use crate::models::{Money, ReportRow, Totals};
use crate::reports::Report;

/// Label of the trailing totals record
pub const TOTAL_LABEL: &str = "TOTAL";

#[derive(Debug, Serialize)]
struct CsvRecord {
    #[serde(rename = "Period")]
    period: String,
    #[serde(rename = "Store")]
    store: String,
    #[serde(rename = "Aggregated")]
    aggregated: String,
    #[serde(rename = "Credit Caixa")]
    credit_caixa: String,
    #[serde(rename = "Credit Delta")]
    credit_delta: String,
    #[serde(rename = "Credit PagBank Debit")]
    credit_pag_bank_debit: String,
    #[serde(rename = "Credit PagBank Credit")]
    credit_pag_bank_credit: String,
    #[serde(rename = "Credit iFood")]
    credit_ifood: String,
    #[serde(rename = "Debit Caixa")]
    debit_caixa: String,
    #[serde(rename = "Debit PagBank Debit")]
    debit_pag_bank_debit: String,
    #[serde(rename = "Debit PagBank Credit")]
    debit_pag_bank_credit: String,
    #[serde(rename = "Debit Loteria")]
    debit_loteria: String,
    #[serde(rename = "Total Revenues")]
    total_revenues: String,
    #[serde(rename = "Total Expenses")]
    total_expenses: String,
    #[serde(rename = "Net Result")]
    net_result: String,
}

fn amount(value: Money) -> String {
    value.to_string()
}

impl From<&ReportRow> for CsvRecord {
    fn from(row: &ReportRow) -> Self {
        let credits = row.credits();
        let debits = row.debits();
        let totals = row.totals();
        Self {
            period: row.period().to_string(),
            store: row.store_label().to_string(),
            aggregated: if row.is_aggregated() { "yes" } else { "no" }.to_string(),
            credit_caixa: amount(credits.caixa),
            credit_delta: amount(credits.delta),
            credit_pag_bank_debit: amount(credits.pag_bank_debit),
            credit_pag_bank_credit: amount(credits.pag_bank_credit),
            credit_ifood: amount(credits.ifood),
            debit_caixa: amount(debits.caixa),
            debit_pag_bank_debit: amount(debits.pag_bank_debit),
            debit_pag_bank_credit: amount(debits.pag_bank_credit),
            debit_loteria: amount(debits.loteria),
            total_revenues: amount(totals.revenue()),
            total_expenses: amount(totals.expense()),
            net_result: amount(totals.net()),
        }
    }
}

impl CsvRecord {
    /// Totals line; leaf columns are left empty
    fn totals(totals: &Totals) -> Self {
        Self {
            period: TOTAL_LABEL.to_string(),
            store: String::new(),
            aggregated: String::new(),
            credit_caixa: String::new(),
            credit_delta: String::new(),
            credit_pag_bank_debit: String::new(),
            credit_pag_bank_credit: String::new(),
            credit_ifood: String::new(),
            debit_caixa: String::new(),
            debit_pag_bank_debit: String::new(),
            debit_pag_bank_credit: String::new(),
            debit_loteria: String::new(),
            total_revenues: amount(totals.revenue()),
            total_expenses: amount(totals.expense()),
            net_result: amount(totals.net()),
        }
    }
}

/// Write the rows of a report, then its totals, as CSV
pub fn export_report_csv<W: Write>(report: &Report, writer: W) -> StorebookResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    let csv_err = |e: ::csv::Error| StorebookError::Export(e.to_string());

    for row in &report.rows {
        csv_writer.serialize(CsvRecord::from(row)).map_err(csv_err)?;
    }
    csv_writer
        .serialize(CsvRecord::totals(&report.totals))
        .map_err(csv_err)?;

    csv_writer
        .flush()
        .map_err(|e| StorebookError::Export(e.to_string()))?;

    Ok(())
}
