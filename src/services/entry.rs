//! Entry service
//!
//! Input validation and the create/edit/delete lifecycle of financial
//! entries. Every mutation is flushed to disk and written to the audit log.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::audit::generate_diff;
use crate::config::Settings;
use crate::error::{StorebookError, StorebookResult};
use crate::models::{Credits, Debits, EntryId, FinancialEntry, Month};
use crate::reports::SortOrder;
use crate::storage::{EntryStore, Storage};

/// Data for a new entry
#[derive(Debug, Clone)]
pub struct CreateEntryInput {
    pub store: String,
    pub year: i32,
    pub month: Month,
    pub credits: Credits,
    pub debits: Debits,
}

/// Fields to change on an existing entry; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    pub store: Option<String>,
    pub year: Option<i32>,
    pub month: Option<Month>,
    pub credits: Option<Credits>,
    pub debits: Option<Debits>,
}

impl EntryChanges {
    pub fn is_empty(&self) -> bool {
        self.store.is_none()
            && self.year.is_none()
            && self.month.is_none()
            && self.credits.is_none()
            && self.debits.is_none()
    }
}

/// Service for entry management
pub struct EntryService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> EntryService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Validate and persist a new entry
    pub fn create(&self, input: CreateEntryInput) -> StorebookResult<FinancialEntry> {
        let store = input.store.trim().to_string();
        let mut entry =
            FinancialEntry::with_amounts(store, input.year, input.month, input.credits, input.debits);

        self.validate(&entry)?;

        if self.has_entry_for(&entry)? {
            warn!(store = %entry.store, period = %entry.period(), "store already has an entry for this period");
        }

        let id = self.storage.entries.save(entry.clone())?;
        entry.id = Some(id);

        report_audit_failure(
            id,
            self.storage
                .log_create(id.to_string(), Some(label(&entry)), &entry),
        );

        info!(id = %id, store = %entry.store, period = %entry.period(), "created entry");
        Ok(entry)
    }

    /// Apply changes to an existing entry
    pub fn update(&self, id: EntryId, changes: EntryChanges) -> StorebookResult<FinancialEntry> {
        let mut entry = self
            .get(id)?
            .ok_or_else(|| StorebookError::entry_not_found(id.to_string()))?;

        if changes.is_empty() {
            return Err(StorebookError::Validation("No changes given".into()));
        }

        let before = entry.clone();

        if let Some(store) = changes.store {
            entry.store = store.trim().to_string();
        }
        if let Some(year) = changes.year {
            entry.year = year;
        }
        if let Some(month) = changes.month {
            entry.month = month;
        }
        if let Some(credits) = changes.credits {
            entry.credits = credits;
        }
        if let Some(debits) = changes.debits {
            entry.debits = debits;
        }
        entry.touch();

        self.validate(&entry)?;
        self.storage.entries.update(&entry)?;

        let diff = match (serde_json::to_value(&before), serde_json::to_value(&entry)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };

        report_audit_failure(
            id,
            self.storage.log_update(
                id.to_string(),
                Some(label(&entry)),
                &before,
                &entry,
                diff,
            ),
        );

        info!(id = %id, "updated entry");
        Ok(entry)
    }

    /// Delete an entry, returning what was removed
    pub fn delete(&self, id: EntryId) -> StorebookResult<FinancialEntry> {
        let entry = self
            .get(id)?
            .ok_or_else(|| StorebookError::entry_not_found(id.to_string()))?;

        self.storage.entries.delete(id)?;
        report_audit_failure(
            id,
            self.storage
                .log_delete(id.to_string(), Some(label(&entry)), &entry),
        );

        info!(id = %id, "deleted entry");
        Ok(entry)
    }

    pub fn get(&self, id: EntryId) -> StorebookResult<Option<FinancialEntry>> {
        self.storage.entries.get(id)
    }

    /// Find an entry by full UUID or short `ent-xxxxxxxx` id
    ///
    /// A short id must identify exactly one entry.
    pub fn find(&self, identifier: &str) -> StorebookResult<FinancialEntry> {
        let identifier = identifier.trim();

        if let Ok(id) = EntryId::parse(identifier) {
            return self
                .get(id)?
                .ok_or_else(|| StorebookError::entry_not_found(identifier));
        }

        let mut matches: Vec<_> = self
            .list()?
            .into_iter()
            .filter(|e| e.id.is_some_and(|id| id.matches_short(identifier)))
            .collect();

        match matches.len() {
            0 => Err(StorebookError::entry_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            n => Err(StorebookError::Ambiguous {
                entity_type: "Entry",
                identifier: identifier.to_string(),
                matches: n,
            }),
        }
    }

    /// All entries, newest period first, then by store
    pub fn list(&self) -> StorebookResult<Vec<FinancialEntry>> {
        let mut entries = self.storage.entries.list()?;
        entries.sort_by(|a, b| {
            SortOrder::Descending
                .compare_periods(a.period(), b.period())
                .then_with(|| a.store.cmp(&b.store))
        });
        Ok(entries)
    }

    /// Distinct store names across stored entries, sorted
    pub fn stores(&self) -> StorebookResult<Vec<String>> {
        let names: BTreeSet<String> = self
            .storage
            .entries
            .list()?
            .into_iter()
            .map(|e| e.store)
            .collect();
        Ok(names.into_iter().collect())
    }

    fn validate(&self, entry: &FinancialEntry) -> StorebookResult<()> {
        if let Err(e) = entry.validate() {
            warn!(error = %e, "rejected entry");
            return Err(StorebookError::Validation(e.to_string()));
        }

        if !self.settings.accepts_store(&entry.store) {
            warn!(store = %entry.store, "rejected unknown store");
            return Err(StorebookError::Validation(format!(
                "Unknown store '{}'; known stores: {}",
                entry.store,
                self.settings.stores.join(", ")
            )));
        }

        Ok(())
    }

    /// Whether the entry's store already has a record for its period
    fn has_entry_for(&self, entry: &FinancialEntry) -> StorebookResult<bool> {
        let period = entry.period();
        Ok(self
            .storage
            .entries
            .list()?
            .iter()
            .any(|e| e.store == entry.store && e.period() == period))
    }
}

/// The change is already on disk when the audit append runs, so a failed
/// append is reported without failing the mutation.
fn report_audit_failure(id: EntryId, result: StorebookResult<()>) {
    if let Err(e) = result {
        warn!(id = %id, error = %e, "entry saved but audit record not written");
    }
}

fn label(entry: &FinancialEntry) -> String {
    format!("{} {}", entry.store, entry.period())
}
