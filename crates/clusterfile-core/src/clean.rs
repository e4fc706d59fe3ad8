//! Serialization cleanup: prune and reorder against the baseline.

use serde_json::{Map, Value};

use crate::diff::union_keys;

/// Filter `value` for serialization.
///
/// Empty values (`null`, empty string, emptied containers) are dropped
/// unless the baseline held the key as an empty string, in which case the
/// empty string is preserved. The asymmetry keeps intentionally-blanked
/// fields from the original document while keeping never-set fields out
/// of the output. Mapping keys are emitted in baseline order first, then
/// new keys in their current insertion order.
///
/// Returns `None` when nothing is left.
pub fn clean_value(value: &Value, baseline: Option<&Value>) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => clean_list(items, baseline),
        Value::Object(map) => clean_mapping(map, baseline),
        scalar => Some(scalar.clone()),
    }
}

fn clean_list(items: &[Value], baseline: Option<&Value>) -> Option<Value> {
    let base_items = match baseline {
        Some(Value::Array(b)) => Some(b),
        _ => None,
    };
    let cleaned: Vec<Value> = items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            let base = base_items.and_then(|b| b.get(idx));
            clean_value(item, base)
        })
        .filter(|item| !is_empty_scalar(item))
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(Value::Array(cleaned))
    }
}

fn clean_mapping(map: &Map<String, Value>, baseline: Option<&Value>) -> Option<Value> {
    let empty = Map::new();
    let base_map = match baseline {
        Some(Value::Object(b)) => b,
        _ => &empty,
    };

    let mut result = Map::new();
    for key in union_keys(base_map, map) {
        let value = match map.get(key) {
            Some(v) => v,
            None => continue,
        };
        let base_val = base_map.get(key);
        match clean_value(value, base_val) {
            Some(cleaned) if !is_empty_scalar(&cleaned) => {
                result.insert(key.clone(), cleaned);
            }
            _ => {
                if matches!(base_val, Some(Value::String(s)) if s.is_empty()) {
                    result.insert(key.clone(), Value::String(String::new()));
                }
            }
        }
    }

    if result.is_empty() {
        None
    } else {
        Some(Value::Object(result))
    }
}

fn is_empty_scalar(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
