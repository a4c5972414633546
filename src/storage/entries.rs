//! Entry repository for JSON storage
//!
//! Manages loading and saving financial entries to data/entries.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{StorebookError, StorebookResult};
use crate::models::{EntryId, FinancialEntry};
use crate::reports::SortOrder;

use super::file_io::{read_json, write_json_atomic};

/// Persistence seam the service layer talks to
///
/// The store owns identity: `save` assigns the id, `update` and `delete`
/// require one that exists.
pub trait EntryStore {
    /// All stored entries, in no particular order
    fn list(&self) -> StorebookResult<Vec<FinancialEntry>>;

    /// Persist a new entry and return its assigned id
    fn save(&self, entry: FinancialEntry) -> StorebookResult<EntryId>;

    /// Replace an existing entry
    fn update(&self, entry: &FinancialEntry) -> StorebookResult<()>;

    fn delete(&self, id: EntryId) -> StorebookResult<()>;
}

/// Serializable entry data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct EntryData {
    pub(crate) entries: Vec<FinancialEntry>,
}

/// Repository for entry persistence
pub struct EntryRepository {
    path: PathBuf,
    data: RwLock<HashMap<EntryId, FinancialEntry>>,
}

impl EntryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load entries from disk, replacing whatever is in memory
    pub fn load(&self) -> StorebookResult<()> {
        let file_data: EntryData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            StorebookError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for entry in file_data.entries {
            match entry.id {
                Some(id) => {
                    data.insert(id, entry);
                }
                None => {
                    return Err(StorebookError::Storage(format!(
                        "Entry without id in {}",
                        self.path.display()
                    )))
                }
            }
        }

        debug!(count = data.len(), path = %self.path.display(), "loaded entries");
        Ok(())
    }

    /// Write all entries to disk
    pub fn flush(&self) -> StorebookResult<()> {
        let data = self.data.read().map_err(|e| {
            StorebookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut entries: Vec<_> = data.values().cloned().collect();
        // Stable file contents between runs
        entries.sort_by(|a, b| {
            SortOrder::Ascending
                .compare_periods(a.period(), b.period())
                .then_with(|| a.store.cmp(&b.store))
                .then_with(|| a.created_at.cmp(&b.created_at))
        });

        write_json_atomic(&self.path, &EntryData { entries })
    }

    pub fn get(&self, id: EntryId) -> StorebookResult<Option<FinancialEntry>> {
        let data = self.data.read().map_err(|e| {
            StorebookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    pub fn get_all(&self) -> StorebookResult<Vec<FinancialEntry>> {
        let data = self.data.read().map_err(|e| {
            StorebookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().cloned().collect())
    }

    /// Insert or replace an entry that already carries an id
    pub fn upsert(&self, entry: FinancialEntry) -> StorebookResult<()> {
        let id = entry
            .id
            .ok_or_else(|| StorebookError::Storage("Cannot store an entry without id".into()))?;

        let mut data = self.data.write().map_err(|e| {
            StorebookError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(id, entry);
        Ok(())
    }

    /// Remove an entry, returning it if it existed
    pub fn remove(&self, id: EntryId) -> StorebookResult<Option<FinancialEntry>> {
        let mut data = self.data.write().map_err(|e| {
            StorebookError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id))
    }
}

impl EntryStore for EntryRepository {
    fn list(&self) -> StorebookResult<Vec<FinancialEntry>> {
        self.get_all()
    }

    fn save(&self, mut entry: FinancialEntry) -> StorebookResult<EntryId> {
        if let Some(id) = entry.id {
            return Err(StorebookError::Storage(format!(
                "Entry {} is already saved",
                id
            )));
        }

        let id = EntryId::new();
        entry.id = Some(id);
        self.upsert(entry)?;
        self.flush()?;
        Ok(id)
    }

    fn update(&self, entry: &FinancialEntry) -> StorebookResult<()> {
        let id = entry
            .id
            .ok_or_else(|| StorebookError::Storage("Cannot update an unsaved entry".into()))?;

        if self.get(id)?.is_none() {
            return Err(StorebookError::entry_not_found(id.to_string()));
        }

        self.upsert(entry.clone())?;
        self.flush()
    }

    fn delete(&self, id: EntryId) -> StorebookResult<()> {
        if self.remove(id)?.is_none() {
            return Err(StorebookError::entry_not_found(id.to_string()));
        }
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Credits, Debits, Money, Month};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, EntryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = EntryRepository::new(temp_dir.path().join("entries.json"));
        (temp_dir, repo)
    }

    fn sample(store: &str, month: u32) -> FinancialEntry {
        let credits = Credits {
            caixa: Money::from_cents(10_000),
            ..Default::default()
        };
        let debits = Debits {
            loteria: Money::from_cents(2_500),
            ..Default::default()
        };
        FinancialEntry::with_amounts(store, 2024, Month::new(month).unwrap(), credits, debits)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.list().unwrap().len(), 0);
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_assigns_id() {
        let (_temp_dir, repo) = create_test_repo();
        let id = repo.save(sample("Centro", 1)).unwrap();

        let stored = repo.get(id).unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.store, "Centro");
    }

    #[test]
    fn test_save_rejects_saved_entry() {
        let (_temp_dir, repo) = create_test_repo();
        let id = repo.save(sample("Centro", 1)).unwrap();
        let stored = repo.get(id).unwrap().unwrap();

        assert!(repo.save(stored).is_err());
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let id = repo.save(sample("Norte", 3)).unwrap();

        let repo2 = EntryRepository::new(temp_dir.path().join("entries.json"));
        repo2.load().unwrap();

        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.store, "Norte");
        assert_eq!(loaded.net_result(), Money::from_cents(7_500));
    }

    #[test]
    fn test_file_lists_oldest_period_first() {
        let (temp_dir, repo) = create_test_repo();
        repo.save(sample("Norte", 3)).unwrap();
        repo.save(sample("Norte", 1)).unwrap();
        repo.save(sample("Centro", 3)).unwrap();

        let stored: EntryData = read_json(temp_dir.path().join("entries.json")).unwrap();
        let order: Vec<String> = stored
            .entries
            .iter()
            .map(|e| format!("{} {}", e.period(), e.store))
            .collect();
        assert_eq!(order, ["2024-01 Norte", "2024-03 Centro", "2024-03 Norte"]);
    }

    #[test]
    fn test_update_existing() {
        let (_temp_dir, repo) = create_test_repo();
        let id = repo.save(sample("Centro", 1)).unwrap();

        let mut entry = repo.get(id).unwrap().unwrap();
        entry.credits.ifood = Money::from_cents(500);
        repo.update(&entry).unwrap();

        let stored = repo.get(id).unwrap().unwrap();
        assert_eq!(stored.total_revenues(), Money::from_cents(10_500));
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let (_temp_dir, repo) = create_test_repo();
        let mut entry = sample("Centro", 1);
        entry.id = Some(EntryId::new());

        let err = repo.update(&entry).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_unsaved_is_rejected() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.update(&sample("Centro", 1)).is_err());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let id = repo.save(sample("Centro", 1)).unwrap();

        repo.delete(id).unwrap();
        assert_eq!(repo.list().unwrap().len(), 0);

        let err = repo.delete(id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_rejects_entry_without_id() {
        let (temp_dir, repo) = create_test_repo();
        let data = EntryData {
            entries: vec![sample("Centro", 1)],
        };
        write_json_atomic(temp_dir.path().join("entries.json"), &data).unwrap();

        assert!(repo.load().is_err());
    }
}
