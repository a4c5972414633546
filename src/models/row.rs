//! Report rows
//!
//! A report row is either a stored entry passed through unchanged or a
//! consolidated row summing every store's entries for one period.

use serde::Serialize;

use super::entry::{Credits, Debits, FinancialEntry, Totals};
use super::ids::EntryId;
use super::money::Money;
use super::period::{Month, Period};

/// Store label shown on consolidated rows
pub const CONSOLIDATED_LABEL: &str = "All stores";

/// Store selection meaning "every store"; matched ignoring ASCII case
pub const ALL_STORES_KEYWORD: &str = "all";

/// Field-wise sum of all entries sharing one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedRow {
    pub period: Period,
    pub credits: Credits,
    pub debits: Debits,
    /// Number of entries folded into this row
    pub entry_count: usize,
}

impl AggregatedRow {
    /// An empty accumulator for a period
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            credits: Credits::default(),
            debits: Debits::default(),
            entry_count: 0,
        }
    }

    /// Fold one entry's leaves into this row
    pub fn absorb(&mut self, entry: &FinancialEntry) {
        debug_assert_eq!(entry.period(), self.period);
        self.credits += entry.credits;
        self.debits += entry.debits;
        self.entry_count += 1;
    }

    pub fn totals(&self) -> Totals {
        Totals::of(&self.credits, &self.debits)
    }
}

/// A row of a report
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow {
    Entry(FinancialEntry),
    Aggregated(AggregatedRow),
}

impl ReportRow {
    pub fn period(&self) -> Period {
        match self {
            Self::Entry(entry) => entry.period(),
            Self::Aggregated(row) => row.period,
        }
    }

    pub fn year(&self) -> i32 {
        self.period().year
    }

    pub fn month(&self) -> Month {
        self.period().month
    }

    /// Store name, or the consolidated label for aggregated rows
    pub fn store_label(&self) -> &str {
        match self {
            Self::Entry(entry) => &entry.store,
            Self::Aggregated(_) => CONSOLIDATED_LABEL,
        }
    }

    pub fn credits(&self) -> &Credits {
        match self {
            Self::Entry(entry) => &entry.credits,
            Self::Aggregated(row) => &row.credits,
        }
    }

    pub fn debits(&self) -> &Debits {
        match self {
            Self::Entry(entry) => &entry.debits,
            Self::Aggregated(row) => &row.debits,
        }
    }

    pub fn totals(&self) -> Totals {
        Totals::of(self.credits(), self.debits())
    }

    pub fn total_revenues(&self) -> Money {
        self.credits().total()
    }

    pub fn total_expenses(&self) -> Money {
        self.debits().total()
    }

    pub fn net_result(&self) -> Money {
        self.totals().net()
    }

    /// Identity usable for edit/delete; aggregated rows have none
    pub fn id(&self) -> Option<EntryId> {
        match self {
            Self::Entry(entry) => entry.id,
            Self::Aggregated(_) => None,
        }
    }

    pub fn is_aggregated(&self) -> bool {
        matches!(self, Self::Aggregated(_))
    }
}

impl From<FinancialEntry> for ReportRow {
    fn from(entry: FinancialEntry) -> Self {
        Self::Entry(entry)
    }
}

impl From<AggregatedRow> for ReportRow {
    fn from(row: AggregatedRow) -> Self {
        Self::Aggregated(row)
    }
}
