//! Persisted user preferences: currency symbol, known stores, auditing

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};

use super::paths::StorebookPaths;
use crate::error::StorebookError;
use crate::storage::write_json_atomic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Known store names; when non-empty, entries must use one of them
    #[serde(default)]
    pub stores: Vec<String>,

    /// Record creates, edits and deletes in `audit.log`
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            stores: Vec::new(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Read `config.json`, falling back to defaults when it does not exist.
    /// Nothing is written; `init` and `config` persist explicitly.
    pub fn load_or_create(paths: &StorebookPaths) -> Result<Self, StorebookError> {
        let file = paths.settings_file();
        let text = match std::fs::read_to_string(&file) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(StorebookError::Io(format!(
                    "Cannot read {}: {}",
                    file.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&text)
            .map_err(|e| StorebookError::Config(format!("Invalid {}: {}", file.display(), e)))
    }

    pub fn save(&self, paths: &StorebookPaths) -> Result<(), StorebookError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Whether a store name is acceptable under the configured store list
    pub fn accepts_store(&self, store: &str) -> bool {
        self.stores.is_empty() || self.stores.iter().any(|known| known == store)
    }

    /// Register a store name; returns false for blanks and duplicates
    pub fn add_store(&mut self, store: &str) -> bool {
        let store = store.trim();
        if store.is_empty() || self.stores.iter().any(|s| s == store) {
            return false;
        }
        self.stores.push(store.to_string());
        self.stores.sort();
        true
    }
}
