//! Diff generation for audit logging
//!
//! Summarizes which fields of an entry changed between two snapshots.
//! Nested objects (credits, debits) are walked so the summary names the
//! leaf that changed, e.g. `credits.ifood: 1200 -> 1500`.

use serde_json::Value;

/// Fields that change on every write and carry no information for a reader
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Generate a human-readable diff between two JSON values
///
/// Returns `None` when nothing but ignored bookkeeping fields changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn collect_changes(before: &Value, after: &Value, prefix: &str, changes: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                if prefix.is_empty() && IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                let path = join_path(prefix, key);
                match after_obj.get(key) {
                    Some(after_val) if before_val != after_val => {
                        collect_changes(before_val, after_val, &path, changes)
                    }
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", path, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        join_path(prefix, key),
                        format_value(after_val)
                    ));
                }
            }
        }
        _ if before != after => {
            let label = if prefix.is_empty() { "value" } else { prefix };
            changes.push(format!(
                "{}: {} -> {}",
                label,
                format_value(before),
                format_value(after)
            ));
        }
        _ => {}
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_changes() {
        let value = json!({"store": "Centro", "year": 2024});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_top_level_change() {
        let before = json!({"store": "Centro", "year": 2024});
        let after = json!({"store": "Norte", "year": 2024});
        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "store: \"Centro\" -> \"Norte\""
        );
    }

    #[test]
    fn test_nested_leaf_change() {
        let before = json!({"credits": {"caixa": 100, "ifood": 1200}});
        let after = json!({"credits": {"caixa": 100, "ifood": 1500}});
        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "credits.ifood: 1200 -> 1500"
        );
    }

    #[test]
    fn test_updated_at_is_ignored() {
        let before = json!({"store": "Centro", "updated_at": "2024-01-01T00:00:00Z"});
        let after = json!({"store": "Centro", "updated_at": "2024-02-01T00:00:00Z"});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"a": 1});
        let after = json!({"b": 2});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("a: 1 -> (removed)"));
        assert!(diff.contains("b: (added) -> 2"));
    }
}
