//! Business logic layer for storebook
//!
//! Services sit between the CLI and storage: they validate input, persist
//! changes and record them in the audit log.

pub mod entry;

pub use entry::{CreateEntryInput, EntryChanges, EntryService};
