//! Storage layer for storebook
//!
//! JSON file storage with atomic writes, plus the audit trail every
//! mutation is recorded in.

pub mod entries;
pub mod file_io;
pub mod init;

pub use entries::{EntryRepository, EntryStore};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::StorebookPaths;
use crate::error::StorebookError;

/// Main storage coordinator
pub struct Storage {
    paths: StorebookPaths,
    pub entries: EntryRepository,
    audit: AuditLogger,
    audit_enabled: bool,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: StorebookPaths) -> Result<Self, StorebookError> {
        paths.ensure_directories()?;

        Ok(Self {
            entries: EntryRepository::new(paths.entries_file()),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            paths,
        })
    }

    /// Turn audit recording on or off
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    pub fn paths(&self) -> &StorebookPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), StorebookError> {
        self.entries.load()
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entry_id: String,
        label: Option<String>,
        entry: &T,
    ) -> Result<(), StorebookError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit
            .log(&AuditEntry::create(entry_id, label, entry))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entry_id: String,
        label: Option<String>,
        before: &T,
        after: &T,
        changes: Option<String>,
    ) -> Result<(), StorebookError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.log(&AuditEntry::update(
            entry_id,
            label,
            before,
            after,
            changes,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entry_id: String,
        label: Option<String>,
        entry: &T,
    ) -> Result<(), StorebookError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit
            .log(&AuditEntry::delete(entry_id, label, entry))
    }
}
