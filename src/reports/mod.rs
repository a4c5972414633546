//! Reports module for storebook
//!
//! The reporting engine: `aggregate` turns entries into rows (consolidated
//! per period, or one store's entries as-is), `build_report` filters, sorts
//! and totals them, and `TrendReport` reads the same result oldest-first.

pub mod aggregate;
pub mod builder;
pub mod trend;

pub use aggregate::{aggregate, consolidate, StoreFilter};
pub use builder::{build_report, PeriodFilter, Report, ReportQuery, SortOrder};
pub use trend::{TrendPoint, TrendReport};
