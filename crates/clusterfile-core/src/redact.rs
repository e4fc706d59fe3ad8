//! Path-pattern redaction for values headed to persistence.
//!
//! The clusterfile itself normally carries no secrets; sensitive data
//! lives in external files the template processor reads at render time.
//! The machinery stays for deployments that do inline credentials.

use clusterfile_path::{Path, Segment};
use serde_json::Value;

/// Replacement written over redacted scalars.
pub const REDACTED_PLACEHOLDER: &str = "<redacted>";

/// Returns true when `path` falls under one of the dotted `patterns`.
///
/// A `*` pattern part matches any single key. List index segments attach
/// to their key and never consume a pattern part. Matching is prefix
/// based: the whole pattern must be consumed, the path may go deeper.
pub fn matches_redaction_path(path: &[Segment], patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| matches_pattern(path, pattern))
}

fn matches_pattern(path: &[Segment], pattern: &str) -> bool {
    let parts: Vec<&str> = pattern.split('.').collect();
    let mut idx = 0usize;
    for segment in path {
        let key = match segment {
            Segment::Key(k) => k,
            Segment::Index(_) => continue,
        };
        if idx >= parts.len() {
            break;
        }
        if parts[idx] != "*" && parts[idx] != key {
            return false;
        }
        idx += 1;
    }
    idx >= parts.len()
}

/// Deep-copy `value` with scalar leaves at matching paths replaced by
/// [`REDACTED_PLACEHOLDER`]. Nulls and container shapes pass through.
pub fn redact_secrets(value: &Value, patterns: &[&str]) -> Value {
    if patterns.is_empty() {
        return value.clone();
    }
    redact_inner(value, patterns, &mut Path::new())
}

fn redact_inner(value: &Value, patterns: &[&str], path: &mut Path) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    path.push(Segment::Index(i));
                    let out = redact_inner(item, patterns, path);
                    path.pop();
                    out
                })
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| {
                    path.push(Segment::Key(key.clone()));
                    let out = redact_inner(item, patterns, path);
                    path.pop();
                    (key.clone(), out)
                })
                .collect(),
        ),
        Value::Null => Value::Null,
        scalar => {
            if matches_redaction_path(path, patterns) {
                Value::String(REDACTED_PLACEHOLDER.to_owned())
            } else {
                scalar.clone()
            }
        }
    }
}
