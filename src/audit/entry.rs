//! Audit record data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of change recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        };
        f.pad(name)
    }
}

/// One line of the audit log
///
/// `before` is present for updates and deletes, `after` for creates and
/// updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    /// Short id of the financial entry, e.g. `ent-1a2b3c4d`
    pub entry_id: String,
    /// Store and period, e.g. `Centro 2024-01`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

fn snapshot<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

impl AuditEntry {
    fn record(operation: Operation, entry_id: String, label: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entry_id,
            label,
            before: None,
            after: None,
            changes: None,
        }
    }

    pub fn create<T: Serialize>(entry_id: impl Into<String>, label: Option<String>, value: &T) -> Self {
        Self {
            after: snapshot(value),
            ..Self::record(Operation::Create, entry_id.into(), label)
        }
    }

    pub fn update<T: Serialize>(
        entry_id: impl Into<String>,
        label: Option<String>,
        before: &T,
        after: &T,
        changes: Option<String>,
    ) -> Self {
        Self {
            before: snapshot(before),
            after: snapshot(after),
            changes,
            ..Self::record(Operation::Update, entry_id.into(), label)
        }
    }

    pub fn delete<T: Serialize>(entry_id: impl Into<String>, label: Option<String>, value: &T) -> Self {
        Self {
            before: snapshot(value),
            ..Self::record(Operation::Delete, entry_id.into(), label)
        }
    }

    /// One or two lines for terminal display
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entry_id
        );
        if let Some(label) = &self.label {
            line.push_str(&format!(" ({})", label));
        }
        if let Some(changes) = &self.changes {
            line.push_str(&format!("\n  Changes: {}", changes));
        }
        line
    }
}
