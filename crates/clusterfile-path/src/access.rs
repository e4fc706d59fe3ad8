//! Nested read/write/delete on document trees.
//!
//! Every miss resolves quietly: reads yield `None`, writes and deletes
//! on unresolvable paths are no-ops. The editor relies on this to survive
//! half-typed paths and stale form state without corrupting the session.

use serde_json::{Map, Value};

use crate::types::Segment;

/// Get a reference to the value at `path`.
///
/// Returns `None` the moment any intermediate is null, missing or not
/// indexable: a key segment into a list, an out-of-range index, or a
/// scalar in the middle of the path. An index segment into a mapping
/// looks the decimal string up as a key. The empty path returns the root.
pub fn get_value<'a>(tree: &'a Value, path: &[Segment]) -> Option<&'a Value> {
    let mut current = tree;
    for segment in path {
        current = match (current, segment) {
            (Value::Array(arr), Segment::Index(i)) => arr.get(*i)?,
            (Value::Object(map), Segment::Key(k)) => map.get(k)?,
            (Value::Object(map), Segment::Index(i)) => map.get(&i.to_string())?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a mutable reference to the value at `path`.
pub fn get_value_mut<'a>(tree: &'a mut Value, path: &[Segment]) -> Option<&'a mut Value> {
    let mut current = tree;
    for segment in path {
        current = match (current, segment) {
            (Value::Array(arr), Segment::Index(i)) => arr.get_mut(*i)?,
            (Value::Object(map), Segment::Key(k)) => map.get_mut(k)?,
            (Value::Object(map), Segment::Index(i)) => map.get_mut(&i.to_string())?,
            _ => return None,
        };
    }
    Some(current)
}

/// Set the value at `path`, creating missing intermediate containers.
///
/// Each missing intermediate is created from the NEXT segment's kind: an
/// index segment creates a list, a key segment creates a mapping. A null
/// or scalar sitting where a container is needed is replaced; a list in
/// the way of a key segment stops the walk (no-op) rather than being
/// clobbered. Writing past a list's end pads with nulls.
///
/// Passing `None` deletes the terminal entry instead of storing a null;
/// list deletions shift later indices down. An empty path is a no-op.
pub fn set_value(tree: &mut Value, path: &[Segment], value: Option<Value>) {
    let (last, parents) = match path.split_last() {
        Some(v) => v,
        None => return,
    };

    let mut current = tree;
    for (i, segment) in parents.iter().enumerate() {
        current = match descend(current, segment, &path[i + 1]) {
            Some(v) => v,
            None => return,
        };
    }

    match (current, last) {
        (Value::Object(map), Segment::Key(k)) => match value {
            Some(v) => {
                map.insert(k.clone(), v);
            }
            None => {
                map.remove(k);
            }
        },
        (Value::Object(map), Segment::Index(i)) => match value {
            Some(v) => {
                map.insert(i.to_string(), v);
            }
            None => {
                map.remove(&i.to_string());
            }
        },
        (Value::Array(arr), Segment::Index(i)) => match value {
            Some(v) => {
                if *i < arr.len() {
                    arr[*i] = v;
                } else {
                    while arr.len() < *i {
                        arr.push(Value::Null);
                    }
                    arr.push(v);
                }
            }
            None => {
                if *i < arr.len() {
                    arr.remove(*i);
                }
            }
        },
        _ => {}
    }
}

/// Remove the entry at `path`.
///
/// A numeric terminal segment on a list removes the element in place, so
/// subsequent indices shift down; callers holding paths into the same
/// list must re-resolve them. Unresolvable paths are a no-op.
pub fn delete_value(tree: &mut Value, path: &[Segment]) {
    let (last, parents) = match path.split_last() {
        Some(v) => v,
        None => return,
    };
    let parent = match get_value_mut(tree, parents) {
        Some(v) => v,
        None => return,
    };
    match (parent, last) {
        (Value::Array(arr), Segment::Index(i)) => {
            if *i < arr.len() {
                arr.remove(*i);
            }
        }
        (Value::Object(map), Segment::Key(k)) => {
            map.remove(k);
        }
        (Value::Object(map), Segment::Index(i)) => {
            map.remove(&i.to_string());
        }
        _ => {}
    }
}

fn descend<'a>(current: &'a mut Value, segment: &Segment, next: &Segment) -> Option<&'a mut Value> {
    match (current, segment) {
        (Value::Object(map), Segment::Key(k)) => {
            prepare_slot(map.entry(k.clone()).or_insert(Value::Null), next)
        }
        (Value::Object(map), Segment::Index(i)) => {
            prepare_slot(map.entry(i.to_string()).or_insert(Value::Null), next)
        }
        (Value::Array(arr), Segment::Index(i)) => {
            while arr.len() <= *i {
                arr.push(Value::Null);
            }
            prepare_slot(&mut arr[*i], next)
        }
        _ => None,
    }
}

fn prepare_slot<'a>(slot: &'a mut Value, next: &Segment) -> Option<&'a mut Value> {
    let wants_list = next.is_index();
    if slot.is_object() || (slot.is_array() && wants_list) {
        return Some(slot);
    }
    if slot.is_array() {
        // A key segment cannot descend into a list; leave the list alone.
        return None;
    }
    *slot = if wants_list {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    };
    Some(slot)
}
