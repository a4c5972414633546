//! Where storebook keeps its files
//!
//! The base directory is, in order of preference:
//!
//! 1. `--data-dir` or `STOREBOOK_DATA_DIR`, when non-empty
//! 2. the platform config directory for `storebook`
//!    (`~/.config/storebook` on Linux, `%APPDATA%\storebook\config` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::StorebookError;

pub const DATA_DIR_ENV: &str = "STOREBOOK_DATA_DIR";

/// Locations of everything storebook keeps on disk
///
/// ```text
/// <base>/config.json        settings
/// <base>/audit.log          JSON Lines audit trail
/// <base>/data/entries.json  financial entries
/// ```
#[derive(Debug, Clone)]
pub struct StorebookPaths {
    base_dir: PathBuf,
}

impl StorebookPaths {
    /// Resolve the base directory from the environment or the platform
    pub fn new() -> Result<Self, StorebookError> {
        let base_dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .map_or_else(resolve_default_path, Ok)?;

        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn entries_file(&self) -> PathBuf {
        self.data_dir().join("entries.json")
    }

    /// Create `<base>/data` and any missing ancestors
    pub fn ensure_directories(&self) -> Result<(), StorebookError> {
        let data_dir = self.data_dir();
        std::fs::create_dir_all(&data_dir).map_err(|e| {
            StorebookError::Io(format!("Cannot create {}: {}", data_dir.display(), e))
        })
    }

    /// True once `init` (or `config`) has written the settings file
    pub fn is_initialized(&self) -> bool {
        self.settings_file().is_file()
    }
}

fn resolve_default_path() -> Result<PathBuf, StorebookError> {
    ProjectDirs::from("", "", "storebook")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            StorebookError::Config(format!(
                "Could not determine a config directory; set {}",
                DATA_DIR_ENV
            ))
        })
}
