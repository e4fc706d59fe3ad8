//! Baseline/current difference computation.

use clusterfile_path::{Path, Segment};
use serde_json::{Map, Value};

use crate::change::{now_millis, ChangeRecord};

/// Recursively collect every changed path between `baseline` and
/// `current`.
///
/// Mapping subtrees are diffed key by key; list and scalar values compare
/// wholesale, so any change inside a list reports the whole list at the
/// list's path. Non-mapping roots are treated as empty mappings; the
/// clusterfile root is a mapping by construction.
pub fn compute_changes(baseline: &Value, current: &Value) -> Vec<ChangeRecord> {
    let empty = Map::new();
    let base = baseline.as_object().unwrap_or(&empty);
    let curr = current.as_object().unwrap_or(&empty);
    let mut changes = Vec::new();
    diff_maps(base, curr, &mut Path::new(), &mut changes);
    changes
}

fn diff_maps(
    baseline: &Map<String, Value>,
    current: &Map<String, Value>,
    path: &mut Path,
    changes: &mut Vec<ChangeRecord>,
) {
    for key in union_keys(baseline, current) {
        let base_val = baseline.get(key);
        let curr_val = current.get(key);
        if base_val == curr_val {
            continue;
        }
        path.push(Segment::Key(key.clone()));
        match (base_val, curr_val) {
            (Some(Value::Object(b)), Some(Value::Object(c))) => diff_maps(b, c, path, changes),
            _ => changes.push(ChangeRecord {
                path: path.clone(),
                old_value: base_val.cloned(),
                new_value: curr_val.cloned(),
                timestamp_ms: now_millis(),
            }),
        }
        path.pop();
    }
}

/// Collect paths whose value differs between two snapshots of the working
/// tree, with the newer value at each. Seeds the transient recorded-change
/// list on editor syncs.
pub(crate) fn changed_paths(previous: &Value, next: &Value) -> Vec<(Path, Option<Value>)> {
    let empty = Map::new();
    let prev = previous.as_object().unwrap_or(&empty);
    let curr = next.as_object().unwrap_or(&empty);
    let mut out = Vec::new();
    walk_changed(prev, curr, &mut Path::new(), &mut out);
    out
}

fn walk_changed(
    previous: &Map<String, Value>,
    next: &Map<String, Value>,
    path: &mut Path,
    out: &mut Vec<(Path, Option<Value>)>,
) {
    for key in union_keys(previous, next) {
        let prev_val = previous.get(key);
        let next_val = next.get(key);
        if prev_val == next_val {
            continue;
        }
        path.push(Segment::Key(key.clone()));
        match (prev_val, next_val) {
            (Some(Value::Object(p)), Some(Value::Object(n))) => walk_changed(p, n, path, out),
            _ => out.push((path.clone(), next_val.cloned())),
        }
        path.pop();
    }
}

/// Keys of `a` in order, then keys only in `b` in their own order.
pub(crate) fn union_keys<'a>(
    a: &'a Map<String, Value>,
    b: &'a Map<String, Value>,
) -> Vec<&'a String> {
    let mut keys: Vec<&String> = a.keys().collect();
    for key in b.keys() {
        if !a.contains_key(key) {
            keys.push(key);
        }
    }
    keys
}
