//! Dotted property-path resolution against a log record.
//!
//! Keys like `http.request.method` address nested objects. A `\.` sequence
//! is a literal dot inside one segment; any other character after `\` is
//! taken literally and the backslash is dropped.

use serde_json::Value;

use crate::Record;

/// Split a property key on unescaped dots.
///
/// `"a.b"` → `["a", "b"]`, `"a\.b"` → `["a.b"]`. Consecutive dots produce
/// empty segments (`"a..b"` → `["a", "", "b"]`); a trailing dot produces no
/// trailing empty segment.
pub fn split_property_key(key: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut segment = String::new();
    let mut backslash = false;

    for c in key.chars() {
        if backslash {
            backslash = false;
            segment.push(c);
            continue;
        }
        match c {
            '\\' => backslash = true,
            '.' => result.push(std::mem::take(&mut segment)),
            _ => segment.push(c),
        }
    }

    if !segment.is_empty() {
        result.push(segment);
    }

    result
}

/// Resolve pre-split path segments against a record.
///
/// Returns `None` the moment any intermediate key is missing or any
/// intermediate value is not an object.
pub fn get_segments<'a>(record: &'a Record, segments: &[String]) -> Option<&'a Value> {
    let mut current: Option<&Value> = None;

    for segment in segments {
        let map = match current {
            None => record,
            Some(Value::Object(map)) => map,
            Some(_) => return None,
        };
        current = Some(map.get(segment)?);
    }

    current
}

/// Resolve a dotted key against a record.
pub fn get_property_value<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
    get_segments(record, &split_property_key(key))
}

/// Remove the key addressed by `path` from its parent object, in place.
///
/// No-op if the path does not resolve to an owned key.
pub fn delete_property(record: &mut Record, path: &str) {
    let mut segments = split_property_key(path);
    let Some(last) = segments.pop() else {
        return;
    };

    let mut map = record;
    for segment in &segments {
        match map.get_mut(segment) {
            Some(Value::Object(nested)) => map = nested,
            _ => return,
        }
    }

    // shift_remove keeps the remaining keys in insertion order
    map.shift_remove(&last);
}
