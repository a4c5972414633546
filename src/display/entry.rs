//! Entry display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::FinancialEntry;

use super::report::truncate;

#[derive(Tabled)]
struct EntryRecord {
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

/// Format stored entries as a table, one line per entry
pub fn format_entry_list(entries: &[FinancialEntry], symbol: &str) -> String {
    if entries.is_empty() {
        return "No entries recorded yet.\n".to_string();
    }

    let records = entries.iter().map(|entry| EntryRecord {
        id: entry.id.map(|id| id.to_string()).unwrap_or_default(),
        period: entry.period().to_string(),
        store: truncate(&entry.store, 30),
        revenue: entry.total_revenues().format_with_symbol(symbol),
        expense: entry.total_expenses().format_with_symbol(symbol),
        net: entry.net_result().format_with_symbol(symbol),
    });

    let mut table = Table::new(records);
    table
        .with(Style::psql())
        .modify(Columns::new(3..), Alignment::right());

    format!("{}\nEntries: {}\n", table, entries.len())
}

/// Format a single entry with every leaf and its derived totals
pub fn format_entry_details(entry: &FinancialEntry, symbol: &str) -> String {
    let mut output = String::new();

    let id = entry
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "(unsaved)".to_string());

    output.push_str(&format!("Entry:   {}\n", id));
    output.push_str(&format!("Store:   {}\n", entry.store));
    output.push_str(&format!("Period:  {}\n", entry.period()));
    output.push('\n');

    output.push_str("Credits\n");
    for (name, amount) in entry.credits.leaves() {
        output.push_str(&format!("  {:<16} {:>14}\n", name, amount.format_with_symbol(symbol)));
    }
    output.push_str("Debits\n");
    for (name, amount) in entry.debits.leaves() {
        output.push_str(&format!("  {:<16} {:>14}\n", name, amount.format_with_symbol(symbol)));
    }
    output.push('\n');

    output.push_str(&format!(
        "Total revenues:    {:>14}\n",
        entry.total_revenues().format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Total expenses:    {:>14}\n",
        entry.total_expenses().format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Net result:        {:>14}\n",
        entry.net_result().format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "\nLast modified: {}\n",
        entry.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, Money, Month};

    #[test]
    fn test_format_entry_details() {
        let mut entry = FinancialEntry::new("Centro", 2024, Month::new(5).unwrap());
        entry.id = Some(EntryId::new());
        entry.credits.ifood = Money::from_cents(2500);
        entry.debits.loteria = Money::from_cents(500);

        let output = format_entry_details(&entry, "R$");
        assert!(output.contains("Store:   Centro"));
        assert!(output.contains("Period:  2024-05"));
        assert!(output.contains("ifood"));
        assert!(output.contains("R$25.00"));
        assert!(output.contains("R$20.00"));
    }

    #[test]
    fn test_format_entry_list() {
        let mut entry = FinancialEntry::new("Centro", 2024, Month::new(5).unwrap());
        entry.id = Some(EntryId::new());
        entry.credits.caixa = Money::from_cents(1000);

        let output = format_entry_list(&[entry], "R$");
        assert!(output.contains("ent-"));
        assert!(output.contains("2024-05"));
        assert!(output.contains("R$10.00"));
        assert!(output.contains("Entries: 1"));
    }

    #[test]
    fn test_empty_entry_list() {
        assert!(format_entry_list(&[], "R$").contains("No entries"));
    }

    #[test]
    fn test_unsaved_entry() {
        let entry = FinancialEntry::new("Centro", 2024, Month::JANUARY);
        assert!(format_entry_details(&entry, "$").contains("(unsaved)"));
    }
}
