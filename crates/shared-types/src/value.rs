//! # Field Values
//!
//! Field values are dynamic JSON-like values. `None` plays the role of an
//! undefined value; JSON `null` and `None` are both treated as *invalid* by
//! [`is_valid`], which is the predicate every fallback decision uses.
//!
//! The tree helpers read and write nested values by [`FormPath`], creating
//! intermediate objects/arrays on write.

use crate::path::{FormPath, PathSegment};
use serde_json::{Map, Value};

/// A dynamic field value.
pub type FieldValue = Value;

/// Largest index a write may grow an array to reach.
///
/// A fresh container addressed by a larger index becomes an object keyed by
/// the index text, so numeric ids never allocate dense arrays.
pub const MAX_DENSE_INDEX: usize = 65_535;

/// Whether a value counts as present (neither undefined nor null).
#[must_use]
pub fn is_valid(value: Option<&FieldValue>) -> bool {
    matches!(value, Some(v) if !v.is_null())
}

/// Keep the value only if it is valid.
#[must_use]
pub fn valid(value: Option<FieldValue>) -> Option<FieldValue> {
    value.filter(|v| !v.is_null())
}

/// Read the value at `path`, if present.
#[must_use]
pub fn get_in<'a>(root: &'a FieldValue, path: &FormPath) -> Option<&'a FieldValue> {
    let mut current = root;
    for segment in path.segments() {
        current = match (current, segment) {
            (Value::Object(map), segment) => map.get(&segment.to_string())?,
            (Value::Array(items), PathSegment::Index(index)) => items.get(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Write (`Some`) or remove (`None`) the value at `path`.
///
/// Writes create missing intermediate containers: an object for a key segment,
/// an array for an index segment up to [`MAX_DENSE_INDEX`], an object beyond
/// it. Scalars in the way are replaced. A key segment, or an index past
/// [`MAX_DENSE_INDEX`], addressed into an existing array is ignored. Removing
/// from an array nulls the slot so sibling positions stay stable.
pub fn set_in(root: &mut FieldValue, path: &FormPath, value: Option<FieldValue>) {
    let Some((last, parents)) = path.segments().split_last() else {
        *root = value.unwrap_or(Value::Null);
        return;
    };

    let create = value.is_some();
    let mut current = root;
    for segment in parents {
        current = match child_mut(current, segment, create) {
            Some(child) => child,
            None => return,
        };
    }

    match value {
        Some(value) => {
            if let Some(slot) = child_mut(current, last, true) {
                *slot = value;
            }
        }
        None => remove_child(current, last),
    }
}

fn child_mut<'a>(
    container: &'a mut FieldValue,
    segment: &PathSegment,
    create: bool,
) -> Option<&'a mut FieldValue> {
    if create && !(container.is_object() || container.is_array()) {
        *container = match segment {
            PathSegment::Index(index) if *index <= MAX_DENSE_INDEX => Value::Array(Vec::new()),
            _ => Value::Object(Map::new()),
        };
    }

    match (container, segment) {
        (Value::Object(map), segment) => {
            let key = segment.to_string();
            if create {
                Some(map.entry(key).or_insert(Value::Null))
            } else {
                map.get_mut(&key)
            }
        }
        (Value::Array(items), PathSegment::Index(index)) => {
            if create && items.len() <= *index {
                if *index > MAX_DENSE_INDEX {
                    return None;
                }
                items.resize(*index + 1, Value::Null);
            }
            items.get_mut(*index)
        }
        _ => None,
    }
}

fn remove_child(container: &mut FieldValue, segment: &PathSegment) {
    match (container, segment) {
        (Value::Object(map), segment) => {
            map.remove(&segment.to_string());
        }
        (Value::Array(items), PathSegment::Index(index)) => {
            if let Some(slot) = items.get_mut(*index) {
                *slot = Value::Null;
            }
        }
        _ => {}
    }
}
