//! Storage initialization
//!
//! First-run setup: directories, default settings and an empty entry file.

use crate::config::{Settings, StorebookPaths};
use crate::error::StorebookError;

use super::entries::EntryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing settings and entries are left untouched.
pub fn initialize_storage(paths: &StorebookPaths) -> Result<(), StorebookError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    if !paths.entries_file().exists() {
        write_json_atomic(paths.entries_file(), &EntryData::default())?;
    }

    Ok(())
}
