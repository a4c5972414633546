//! Audit logging for storebook
//!
//! Records every create, update and delete of a financial entry with
//! before/after snapshots in an append-only JSONL file.
//!
//! - `AuditEntry`: one change with timestamp, entry id and snapshots
//! - `AuditLogger`: appends entries to and reads them back from the log
//! - `generate_diff`: names the fields that changed between two snapshots

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
