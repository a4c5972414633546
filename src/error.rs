//! Error type shared by the storebook collaborators
//!
//! Aggregation and report building are total over valid entries and never
//! fail; storage, validation, export and configuration report through
//! [`StorebookError`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorebookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected entry fields or command arguments
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A short id prefix shared by several records
    #[error("{entity_type} identifier is ambiguous: {identifier} matches {matches} records")]
    Ambiguous {
        entity_type: &'static str,
        identifier: String,
        matches: usize,
    },

    #[error("Export error: {0}")]
    Export(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl StorebookError {
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Entry",
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for StorebookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorebookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type StorebookResult<T> = Result<T, StorebookError>;
