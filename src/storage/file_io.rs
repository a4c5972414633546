//! JSON documents on disk
//!
//! Writes land in a sibling `.tmp` file that is synced and then renamed over
//! the target, so readers see either the old document or the new one.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorebookError;

fn storage_error(context: impl Display, cause: impl Display) -> StorebookError {
    StorebookError::Storage(format!("{}: {}", context, cause))
}

/// Deserialize `path`, or `T::default()` when there is no such file
pub fn read_json<T, P>(path: P) -> Result<T, StorebookError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error(format_args!("Cannot open {}", path.display()), e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| storage_error(format_args!("Cannot parse {}", path.display()), e))
}

/// Replace `path` with the pretty-printed JSON of `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), StorebookError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| storage_error(format_args!("Cannot create {}", parent.display()), e))?;
    }

    let staging = staging_path(path);
    let outcome = write_synced(&staging, data).and_then(|()| {
        fs::rename(&staging, path)
            .map_err(|e| storage_error(format_args!("Cannot replace {}", path.display()), e))
    });
    if outcome.is_err() {
        let _ = fs::remove_file(&staging);
    }
    outcome
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced<T: Serialize>(staging: &Path, data: &T) -> Result<(), StorebookError> {
    let context = format!("Cannot write {}", staging.display());

    let file = File::create(staging).map_err(|e| storage_error(&context, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| storage_error(&context, e))?;
    writer.flush().map_err(|e| storage_error(&context, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error(&context, e))
}
