//! Display formatting for terminal output
//!
//! Provides utilities for formatting entries and reports for terminal
//! display, including tables and bar charts.

pub mod entry;
pub mod report;

pub use entry::{format_entry_details, format_entry_list};
pub use report::{format_money_colored, format_report};
