//! Report formatting for terminal output
//!
//! Renders report rows as a table. Consolidated rows carry no identifier,
//! so they are shown without one and cannot be targeted by edit/delete.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Money, ReportRow};
use crate::reports::Report;

/// Summary row: one line per report row with the derived figures
#[derive(Tabled)]
struct SummaryRecord {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Store")]
    store: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Net")]
    net: String,
}

/// Detailed row: every leaf amount alongside the derived figures
#[derive(Tabled)]
struct DetailedRecord {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Store")]
    store: String,
    #[tabled(rename = "Cr Caixa")]
    credit_caixa: String,
    #[tabled(rename = "Cr Delta")]
    credit_delta: String,
    #[tabled(rename = "Cr PB Deb")]
    credit_pag_bank_debit: String,
    #[tabled(rename = "Cr PB Cred")]
    credit_pag_bank_credit: String,
    #[tabled(rename = "Cr iFood")]
    credit_ifood: String,
    #[tabled(rename = "Db Caixa")]
    debit_caixa: String,
    #[tabled(rename = "Db PB Deb")]
    debit_pag_bank_debit: String,
    #[tabled(rename = "Db PB Cred")]
    debit_pag_bank_credit: String,
    #[tabled(rename = "Db Loteria")]
    debit_loteria: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Net")]
    net: String,
}

fn row_id(row: &ReportRow) -> String {
    row.id().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

impl SummaryRecord {
    fn from_row(row: &ReportRow, symbol: &str) -> Self {
        let totals = row.totals();
        Self {
            id: row_id(row),
            period: row.period().to_string(),
            store: truncate(row.store_label(), 30),
            revenue: totals.revenue().format_with_symbol(symbol),
            expense: totals.expense().format_with_symbol(symbol),
            net: totals.net().format_with_symbol(symbol),
        }
    }
}

impl DetailedRecord {
    fn from_row(row: &ReportRow, symbol: &str) -> Self {
        let c = row.credits();
        let d = row.debits();
        let totals = row.totals();
        let fmt = |m: Money| m.format_with_symbol(symbol);
        Self {
            period: row.period().to_string(),
            store: truncate(row.store_label(), 20),
            credit_caixa: fmt(c.caixa),
            credit_delta: fmt(c.delta),
            credit_pag_bank_debit: fmt(c.pag_bank_debit),
            credit_pag_bank_credit: fmt(c.pag_bank_credit),
            credit_ifood: fmt(c.ifood),
            debit_caixa: fmt(d.caixa),
            debit_pag_bank_debit: fmt(d.pag_bank_debit),
            debit_pag_bank_credit: fmt(d.pag_bank_credit),
            debit_loteria: fmt(d.loteria),
            revenue: fmt(totals.revenue()),
            expense: fmt(totals.expense()),
            net: fmt(totals.net()),
        }
    }
}

/// Format a report as a table followed by its grand totals
pub fn format_report(report: &Report, symbol: &str, detailed: bool) -> String {
    if report.is_empty() {
        return "No entries match the selected filters.\n".to_string();
    }

    let mut table = if detailed {
        Table::new(report.rows.iter().map(|r| DetailedRecord::from_row(r, symbol)))
    } else {
        Table::new(report.rows.iter().map(|r| SummaryRecord::from_row(r, symbol)))
    };
    let first_amount_column = if detailed { 2 } else { 3 };
    table
        .with(Style::psql())
        .modify(Columns::new(first_amount_column..), Alignment::right());

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&double_separator(40));
    output.push('\n');
    let scope = if report.is_consolidated() {
        "stores consolidated"
    } else {
        "one row per entry"
    };
    output.push_str(&format!(
        "Rows: {} ({}, {})\n",
        report.rows.len(),
        report.order,
        scope
    ));
    output.push_str(&format!(
        "Total revenue: {}\n",
        report.totals.revenue().format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Total expense: {}\n",
        report.totals.expense().format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Net result:    {}\n",
        report.totals.net().format_with_symbol(symbol)
    ));
    output
}

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money, symbol: &str) -> String {
    let text = amount.format_with_symbol(symbol);
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text)
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text)
    } else {
        text
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
