//! Report builder
//!
//! Filters rows by year and month, puts them in a named order and totals
//! what is left.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::models::period::PeriodParseError;
use crate::models::{FinancialEntry, Month, Period, ReportRow, Totals};

use super::aggregate::{aggregate, StoreFilter};

/// Year and month selection; `None` matches every row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodFilter {
    pub year: Option<i32>,
    pub month: Option<Month>,
}

impl PeriodFilter {
    pub fn new(year: Option<i32>, month: Option<Month>) -> Self {
        Self { year, month }
    }

    /// Build a filter from raw user input, treating blank values as "any"
    ///
    /// A year must be written the way rows display it (`2024`, not `+2024`
    /// or `02024`), so the filter matches exactly the rows whose year
    /// prints as the given text.
    pub fn from_input(year: Option<&str>, month: Option<&str>) -> Result<Self, PeriodParseError> {
        let year = match year.map(str::trim).filter(|s| !s.is_empty()) {
            Some(y) => Some(
                y.parse::<i32>()
                    .ok()
                    .filter(|parsed| parsed.to_string() == y)
                    .ok_or_else(|| PeriodParseError::InvalidYear(y.to_string()))?,
            ),
            None => None,
        };
        let month = match month.map(str::trim).filter(|s| !s.is_empty()) {
            Some(m) => Some(m.parse::<Month>()?),
            None => None,
        };
        Ok(Self { year, month })
    }

    pub fn matches(&self, row: &ReportRow) -> bool {
        self.year.map_or(true, |year| row.year() == year)
            && self.month.map_or(true, |month| row.month() == month)
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }
}

/// Row ordering of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest period first, used for listings
    #[default]
    Descending,
    /// Oldest period first, used for trends
    Ascending,
}

impl SortOrder {
    /// Compare two periods in this direction; every period ordering
    /// in the crate goes through here
    pub fn compare_periods(self, a: Period, b: Period) -> Ordering {
        match self {
            Self::Ascending => a.cmp(&b),
            Self::Descending => b.cmp(&a),
        }
    }

    /// Compare two rows by (year, month) in this direction
    pub fn compare(self, a: &ReportRow, b: &ReportRow) -> Ordering {
        self.compare_periods(a.period(), b.period())
    }

    /// Stable sort, so rows sharing a period keep their relative order
    pub fn sort(self, rows: &mut [ReportRow]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descending => write!(f, "newest first"),
            Self::Ascending => write!(f, "oldest first"),
        }
    }
}

/// Everything that selects and orders a report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub store: StoreFilter,
    pub period: PeriodFilter,
    pub order: SortOrder,
}

impl ReportQuery {
    pub fn new(store: StoreFilter, period: PeriodFilter, order: SortOrder) -> Self {
        Self {
            store,
            period,
            order,
        }
    }

    /// Same selection, different order
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}

/// Filtered, ordered rows and their grand totals
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    /// Totals over `rows` only
    pub totals: Totals,
    pub order: SortOrder,
}

impl Report {
    /// Aggregate, filter, sort and total entries for a query
    pub fn generate(entries: &[FinancialEntry], query: &ReportQuery) -> Self {
        let rows = aggregate(entries, &query.store);
        let report = build_report(rows, &query.period, query.order);
        debug!(
            store = %query.store,
            entries = entries.len(),
            rows = report.rows.len(),
            "report generated"
        );
        report
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the rows are consolidated across stores
    pub fn is_consolidated(&self) -> bool {
        self.rows.iter().any(ReportRow::is_aggregated)
    }
}

/// Filter, sort and total a set of rows
pub fn build_report(rows: Vec<ReportRow>, filter: &PeriodFilter, order: SortOrder) -> Report {
    let mut rows: Vec<ReportRow> = rows.into_iter().filter(|row| filter.matches(row)).collect();
    order.sort(&mut rows);
    let totals = rows.iter().map(ReportRow::totals).sum();
    Report {
        rows,
        totals,
        order,
    }
}
