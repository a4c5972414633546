//! Append-only JSON Lines audit log

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{StorebookError, StorebookResult};

use super::entry::AuditEntry;

fn io_failure(action: &str) -> impl FnOnce(std::io::Error) -> StorebookError + '_ {
    move |e| StorebookError::Io(format!("Could not {} audit log: {}", action, e))
}

/// Writes one [`AuditEntry`] per line; each write is flushed before returning
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn log(&self, entry: &AuditEntry) -> StorebookResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| StorebookError::Json(format!("Could not encode audit record: {}", e)))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(io_failure("open"))?;
        file.write_all(line.as_bytes()).map_err(io_failure("append to"))?;
        file.flush().map_err(io_failure("flush"))
    }

    /// Every record in the log, oldest first. A missing log is empty.
    pub fn read_all(&self) -> StorebookResult<Vec<AuditEntry>> {
        let content = match fs::read_to_string(&self.log_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_failure("read")(e)),
        };

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| {
                    StorebookError::Json(format!(
                        "Bad audit record on line {}: {}",
                        index + 1,
                        e
                    ))
                })
            })
            .collect()
    }

    /// The last `count` records, oldest first
    pub fn read_recent(&self, count: usize) -> StorebookResult<Vec<AuditEntry>> {
        let mut records = self.read_all()?;
        let keep_from = records.len().saturating_sub(count);
        Ok(records.split_off(keep_from))
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use serde_json::json;
    use tempfile::TempDir;

    fn logger_in(dir: &TempDir) -> AuditLogger {
        AuditLogger::new(dir.path().join("audit.log"))
    }

    #[test]
    fn test_appends_one_line_per_record() {
        let dir = TempDir::new().unwrap();
        let logger = logger_in(&dir);

        logger
            .log(&AuditEntry::create("ent-12345678", None, &json!({"store": "Centro"})))
            .unwrap();
        logger
            .log(&AuditEntry::delete("ent-12345678", None, &json!({"store": "Centro"})))
            .unwrap();

        let raw = std::fs::read_to_string(logger.path()).unwrap();
        assert_eq!(raw.lines().count(), 2);

        let records = logger.read_all().unwrap();
        assert_eq!(records[0].operation, Operation::Create);
        assert_eq!(records[1].operation, Operation::Delete);
        assert_eq!(records[1].entry_id, "ent-12345678");
    }

    #[test]
    fn test_recent_keeps_the_tail() {
        let dir = TempDir::new().unwrap();
        let logger = logger_in(&dir);

        for n in 0..6 {
            logger
                .log(&AuditEntry::create(format!("ent-{}", n), None, &json!(n)))
                .unwrap();
        }

        let ids: Vec<String> = logger
            .read_recent(2)
            .unwrap()
            .into_iter()
            .map(|r| r.entry_id)
            .collect();
        assert_eq!(ids, ["ent-4", "ent-5"]);
        assert_eq!(logger.read_recent(50).unwrap().len(), 6);
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let dir = TempDir::new().unwrap();
        let logger = logger_in(&dir);
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_bad_line_reports_its_number() {
        let dir = TempDir::new().unwrap();
        let logger = logger_in(&dir);
        std::fs::write(logger.path(), "\nnot json\n").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
