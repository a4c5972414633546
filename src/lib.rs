//! storebook - per-store monthly ledger with consolidated reporting
//!
//! Records each store's monthly credits and debits and turns them into
//! reports: one store's entries as recorded, or every store consolidated
//! into one row per month, filtered by year and month, sorted newest or
//! oldest first, with revenue, expense and net totals.
//!
//! # Architecture
//!
//! - `models`: entries, periods, money and report rows
//! - `reports`: the aggregator, the report builder and the trend series
//! - `config`: path resolution and user settings
//! - `storage`: JSON file storage behind the `EntryStore` trait
//! - `services`: input validation and entry lifecycle
//! - `audit`: append-only log of every change
//! - `export`: CSV, JSON and YAML output of a report
//! - `display`, `cli`: terminal rendering and command handlers
//!
//! # Example
//!
//! ```rust
//! use storebook::models::{FinancialEntry, Money, Month};
//! use storebook::reports::{Report, ReportQuery};
//!
//! let mut centro = FinancialEntry::new("Centro", 2024, Month::JANUARY);
//! centro.credits.caixa = Money::from_cents(100_00);
//! let mut norte = FinancialEntry::new("Norte", 2024, Month::JANUARY);
//! norte.credits.ifood = Money::from_cents(50_00);
//!
//! let report = Report::generate(&[centro, norte], &ReportQuery::default());
//! assert_eq!(report.rows.len(), 1);
//! assert_eq!(report.totals.revenue(), Money::from_cents(150_00));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{StorebookError, StorebookResult};
