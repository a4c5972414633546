//! Trend report
//!
//! Period-by-period revenue, expense and net figures, oldest first, for
//! charting how a store (or all stores together) evolves over time.

use serde::Serialize;

use crate::display::report::{format_bar, separator};
use crate::models::{FinancialEntry, Period, Totals};

use super::builder::{Report, ReportQuery, SortOrder};

const BAR_WIDTH: usize = 30;

/// One point of the trend series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub period: Period,
    pub totals: Totals,
}

/// Ascending series of per-period totals
#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    pub points: Vec<TrendPoint>,
    pub totals: Totals,
}

impl TrendReport {
    /// Build a trend for a query; the query's order is forced to ascending
    pub fn generate(entries: &[FinancialEntry], query: &ReportQuery) -> Self {
        let query = query.clone().with_order(SortOrder::Ascending);
        Self::from_report(&Report::generate(entries, &query))
    }

    /// Collapse a report into one point per period, oldest first
    ///
    /// Per-store reports can hold several rows for one period only when the
    /// store has duplicate entries; those are summed into a single point.
    pub fn from_report(report: &Report) -> Self {
        let mut rows: Vec<_> = report.rows.clone();
        SortOrder::Ascending.sort(&mut rows);

        let mut points: Vec<TrendPoint> = Vec::new();
        for row in &rows {
            match points.last_mut() {
                Some(last) if last.period == row.period() => last.totals += row.totals(),
                _ => points.push(TrendPoint {
                    period: row.period(),
                    totals: row.totals(),
                }),
            }
        }

        Self {
            points,
            totals: report.totals,
        }
    }

    /// Period with the highest net result
    pub fn best_period(&self) -> Option<&TrendPoint> {
        self.points.iter().max_by_key(|p| p.totals.net())
    }

    /// Period with the lowest net result
    pub fn worst_period(&self) -> Option<&TrendPoint> {
        self.points.iter().min_by_key(|p| p.totals.net())
    }

    /// Format the trend for terminal display with proportional net bars
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        if self.points.is_empty() {
            output.push_str("No entries match the selected filters.\n");
            return output;
        }

        let max_abs = self
            .points
            .iter()
            .map(|p| p.totals.net().abs().cents())
            .max()
            .unwrap_or(0) as f64;

        output.push_str(&format!(
            "{:<8} {:>14} {:>14} {:>14}  {}\n",
            "Period", "Revenue", "Expense", "Net", "Net trend"
        ));
        output.push_str(&separator(84));
        output.push('\n');

        for point in &self.points {
            let net = point.totals.net();
            let bar = format_bar(net.abs().cents() as f64, max_abs, BAR_WIDTH);
            let sign = if net.is_negative() { '-' } else { '+' };
            output.push_str(&format!(
                "{:<8} {:>14} {:>14} {:>14}  {}{}\n",
                point.period.to_string(),
                point.totals.revenue().format_with_symbol(currency_symbol),
                point.totals.expense().format_with_symbol(currency_symbol),
                net.format_with_symbol(currency_symbol),
                sign,
                bar
            ));
        }

        output.push_str(&separator(84));
        output.push('\n');
        output.push_str(&format!(
            "{:<8} {:>14} {:>14} {:>14}\n",
            "TOTAL",
            self.totals.revenue().format_with_symbol(currency_symbol),
            self.totals.expense().format_with_symbol(currency_symbol),
            self.totals.net().format_with_symbol(currency_symbol),
        ));

        if let (Some(best), Some(worst)) = (self.best_period(), self.worst_period()) {
            output.push_str(&format!(
                "\nBest month:  {} ({})\nWorst month: {} ({})\n",
                best.period,
                best.totals.net().format_with_symbol(currency_symbol),
                worst.period,
                worst.totals.net().format_with_symbol(currency_symbol),
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month};
    use crate::reports::{PeriodFilter, StoreFilter};

    fn entry(store: &str, year: i32, month: u32, credit: i64, debit: i64) -> FinancialEntry {
        let mut entry = FinancialEntry::new(store, year, Month::new(month).unwrap());
        entry.credits.caixa = Money::from_cents(credit);
        entry.debits.caixa = Money::from_cents(debit);
        entry
    }

    fn sample() -> Vec<FinancialEntry> {
        vec![
            entry("A", 2024, 2, 3000, 1000),
            entry("B", 2024, 1, 5000, 1000),
            entry("A", 2024, 1, 10000, 4000),
            entry("A", 2023, 12, 500, 900),
        ]
    }

    #[test]
    fn test_trend_is_ascending_and_consolidated() {
        let trend = TrendReport::generate(&sample(), &ReportQuery::default());

        let periods: Vec<String> = trend.points.iter().map(|p| p.period.to_string()).collect();
        assert_eq!(periods, vec!["2023-12", "2024-01", "2024-02"]);
        assert_eq!(trend.points[1].totals.net(), Money::from_cents(10000));
        let series_net: Money = trend.points.iter().map(|p| p.totals.net()).sum();
        assert_eq!(series_net, trend.totals.net());
    }

    #[test]
    fn test_trend_ignores_requested_descending_order() {
        let query = ReportQuery::new(
            StoreFilter::Store("A".into()),
            PeriodFilter::default(),
            SortOrder::Descending,
        );
        let trend = TrendReport::generate(&sample(), &query);
        assert!(trend.points.windows(2).all(|w| w[0].period < w[1].period));
    }

    #[test]
    fn test_duplicate_store_periods_merge_into_one_point() {
        let mut entries = sample();
        entries.push(entry("A", 2024, 1, 100, 0));
        let query = ReportQuery::new(
            StoreFilter::Store("A".into()),
            PeriodFilter::default(),
            SortOrder::Ascending,
        );
        let trend = TrendReport::generate(&entries, &query);

        assert_eq!(trend.points.len(), 3);
        assert_eq!(trend.points[1].totals.revenue(), Money::from_cents(10100));
    }

    #[test]
    fn test_best_and_worst() {
        let trend = TrendReport::generate(&sample(), &ReportQuery::default());
        assert_eq!(trend.best_period().unwrap().period.to_string(), "2024-01");
        assert_eq!(trend.worst_period().unwrap().period.to_string(), "2023-12");
    }

    #[test]
    fn test_format_terminal() {
        let trend = TrendReport::generate(&sample(), &ReportQuery::default());
        let output = trend.format_terminal("R$");
        assert!(output.contains("2023-12"));
        assert!(output.contains("-R$4.00"));
        assert!(output.contains("TOTAL"));

        let empty = TrendReport::generate(&[], &ReportQuery::default());
        assert!(empty.format_terminal("R$").contains("No entries"));
    }
}
