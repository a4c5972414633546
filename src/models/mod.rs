//! Core data models for storebook
//!
//! Entries, the periods they belong to, the money type they are measured in,
//! and the rows reports are made of.

pub mod entry;
pub mod ids;
pub mod money;
pub mod period;
pub mod row;

pub use entry::{Credits, Debits, EntryValidationError, FinancialEntry, Totals};
pub use ids::EntryId;
pub use money::Money;
pub use period::{Month, Period};
pub use row::{AggregatedRow, ReportRow, ALL_STORES_KEYWORD, CONSOLIDATED_LABEL};
