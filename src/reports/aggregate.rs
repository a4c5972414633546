//! Consolidation of entries by period
//!
//! With no store selected, entries are grouped by (year, month) and each
//! group is folded into a single consolidated row. With a store selected,
//! that store's entries are passed through unchanged.

use std::collections::HashMap;
use std::fmt;

use crate::models::{AggregatedRow, FinancialEntry, Period, ReportRow, ALL_STORES_KEYWORD};

/// Which stores a report covers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreFilter {
    /// Consolidate every store, one row per period
    #[default]
    AllStores,
    /// Only this store's entries, not aggregated
    Store(String),
}

impl StoreFilter {
    /// Interpret a user-supplied store selection
    ///
    /// `None`, an empty string and `all` (any case) select every store.
    /// Entries can never use those names, so no store is shadowed.
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            None | Some("") => Self::AllStores,
            Some(s) if s.eq_ignore_ascii_case(ALL_STORES_KEYWORD) => Self::AllStores,
            Some(s) => Self::Store(s.to_string()),
        }
    }

    pub fn is_all_stores(&self) -> bool {
        matches!(self, Self::AllStores)
    }
}

impl fmt::Display for StoreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllStores => write!(f, "all stores"),
            Self::Store(name) => write!(f, "{}", name),
        }
    }
}

/// Produce the rows a report is built from
///
/// The sequence order of consolidated rows is unspecified; callers sort
/// through the report builder.
pub fn aggregate(entries: &[FinancialEntry], store: &StoreFilter) -> Vec<ReportRow> {
    match store {
        StoreFilter::AllStores => consolidate(entries)
            .into_values()
            .map(ReportRow::Aggregated)
            .collect(),
        StoreFilter::Store(name) => entries
            .iter()
            .filter(|entry| entry.store == *name)
            .cloned()
            .map(ReportRow::Entry)
            .collect(),
    }
}

/// Group entries by period, folding each group into one row
pub fn consolidate(entries: &[FinancialEntry]) -> HashMap<Period, AggregatedRow> {
    let mut groups: HashMap<Period, AggregatedRow> = HashMap::new();
    for entry in entries {
        let period = entry.period();
        groups
            .entry(period)
            .or_insert_with(|| AggregatedRow::empty(period))
            .absorb(entry);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month};
    use std::collections::HashSet;

    fn entry(store: &str, year: i32, month: u32, credit: i64, debit: i64) -> FinancialEntry {
        let mut entry = FinancialEntry::new(store, year, Month::new(month).unwrap());
        entry.credits.caixa = Money::from_cents(credit);
        entry.debits.caixa = Money::from_cents(debit);
        entry
    }

    fn mixed_entries() -> Vec<FinancialEntry> {
        let mut entries = vec![
            entry("A", 2024, 1, 10000, 4000),
            entry("B", 2024, 1, 5000, 1000),
            entry("A", 2024, 2, 7000, 7500),
            entry("C", 2023, 12, 300, 0),
            entry("B", 2023, 12, 1200, 600),
            entry("C", 2024, 2, 0, 250),
        ];
        entries[2].credits.ifood = Money::from_cents(1234);
        entries[3].debits.loteria = Money::from_cents(99);
        entries[4].credits.pag_bank_credit = Money::from_cents(-200);
        entries
    }

    #[test]
    fn test_consolidates_two_stores_into_one_row() {
        let entries = vec![entry("A", 2024, 1, 10000, 4000), entry("B", 2024, 1, 5000, 1000)];

        let rows = aggregate(&entries, &StoreFilter::AllStores);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert!(row.is_aggregated());
        assert_eq!(row.year(), 2024);
        assert_eq!(row.month().code(), "01");
        assert_eq!(row.total_revenues(), Money::from_cents(15000));
        assert_eq!(row.total_expenses(), Money::from_cents(5000));
        assert_eq!(row.net_result(), Money::from_cents(10000));
    }

    #[test]
    fn test_store_filter_passes_entries_through() {
        let entries = vec![entry("A", 2024, 1, 10000, 4000), entry("B", 2024, 1, 5000, 1000)];

        let rows = aggregate(&entries, &StoreFilter::Store("A".into()));

        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_aggregated());
        assert_eq!(rows[0].store_label(), "A");
        assert_eq!(rows[0].total_revenues(), Money::from_cents(10000));
        assert_eq!(rows[0].total_expenses(), Money::from_cents(4000));
        assert_eq!(rows[0].net_result(), Money::from_cents(6000));
        assert_eq!(rows[0], ReportRow::Entry(entries[0].clone()));
    }

    #[test]
    fn test_unknown_store_yields_nothing() {
        let rows = aggregate(&mixed_entries(), &StoreFilter::Store("Z".into()));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_one_row_per_distinct_period() {
        let entries = mixed_entries();
        let rows = aggregate(&entries, &StoreFilter::AllStores);

        let distinct: HashSet<Period> = entries.iter().map(|e| e.period()).collect();
        assert_eq!(rows.len(), distinct.len());

        let periods: HashSet<Period> = rows.iter().map(|r| r.period()).collect();
        assert_eq!(periods, distinct);
    }

    #[test]
    fn test_each_leaf_is_summed_over_its_period() {
        let entries = mixed_entries();
        let groups = consolidate(&entries);

        for (period, row) in &groups {
            let members: Vec<_> = entries.iter().filter(|e| e.period() == *period).collect();
            assert_eq!(row.entry_count, members.len());

            for (i, (_, amount)) in row.credits.leaves().iter().enumerate() {
                let expected: Money = members.iter().map(|e| e.credits.leaves()[i].1).sum();
                assert_eq!(*amount, expected);
            }
            for (i, (_, amount)) in row.debits.leaves().iter().enumerate() {
                let expected: Money = members.iter().map(|e| e.debits.leaves()[i].1).sum();
                assert_eq!(*amount, expected);
            }
        }
    }

    #[test]
    fn test_grouping_preserves_grand_totals() {
        let entries = mixed_entries();
        let rows = aggregate(&entries, &StoreFilter::AllStores);

        let raw_revenue: Money = entries.iter().map(|e| e.total_revenues()).sum();
        let raw_expense: Money = entries.iter().map(|e| e.total_expenses()).sum();
        let grouped_revenue: Money = rows.iter().map(|r| r.total_revenues()).sum();
        let grouped_expense: Money = rows.iter().map(|r| r.total_expenses()).sum();

        assert_eq!(grouped_revenue, raw_revenue);
        assert_eq!(grouped_expense, raw_expense);
    }

    #[test]
    fn test_aggregated_rows_keep_derived_fields_consistent() {
        for row in aggregate(&mixed_entries(), &StoreFilter::AllStores) {
            let credit_sum: Money = row.credits().leaves().iter().map(|(_, m)| *m).sum();
            let debit_sum: Money = row.debits().leaves().iter().map(|(_, m)| *m).sum();
            assert_eq!(row.total_revenues(), credit_sum);
            assert_eq!(row.total_expenses(), debit_sum);
            assert_eq!(row.net_result(), credit_sum - debit_sum);
        }
    }

    #[test]
    fn test_input_order_does_not_change_result() {
        let entries = mixed_entries();
        let mut reversed = entries.clone();
        reversed.reverse();

        assert_eq!(consolidate(&entries), consolidate(&reversed));
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], &StoreFilter::AllStores).is_empty());
    }

    #[test]
    fn test_store_filter_from_input() {
        assert_eq!(StoreFilter::from_input(None), StoreFilter::AllStores);
        assert_eq!(StoreFilter::from_input(Some("")), StoreFilter::AllStores);
        assert_eq!(StoreFilter::from_input(Some(" ALL ")), StoreFilter::AllStores);
        assert_eq!(
            StoreFilter::from_input(Some("Centro")),
            StoreFilter::Store("Centro".into())
        );
    }
}
