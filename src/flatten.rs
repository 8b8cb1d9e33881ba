//! Canonical path/value form of documents, used for diffing and patching.
//!
//! Flattening walks mappings in sorted key order, so two documents with the
//! same content flatten identically whatever order their keys were inserted
//! in. Anything that is not a mapping is a leaf, lists included.

use std::collections::HashMap;

use itertools::Itertools;
use serde_json::{Map, Value};

use crate::error::ConfError;
use crate::types::PathValue;

/// Flatten `document` into its leaves, depth-first in sorted key order.
pub fn flatten(document: &Value) -> Vec<PathValue> {
    flatten_with_prefix(document, "")
}

/// Flatten `document` with every path rooted at `prefix`.
pub fn flatten_with_prefix(document: &Value, prefix: &str) -> Vec<PathValue> {
    let mut out = Vec::new();
    walk(document, prefix, &mut out);
    out
}

fn walk(value: &Value, path: &str, out: &mut Vec<PathValue>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
                walk(child, &join(path, key), out);
            }
        }
        leaf => out.push(PathValue::new(path, leaf.clone())),
    }
}

/// Apply path/value edits to `document`, creating missing mappings on the way.
///
/// The empty path replaces the whole document. A path with an empty key
/// (`"a..b"`, `".a"`) or one descending through a value that is not a
/// mapping fails with [`ConfError::StructuralAssumption`].
pub fn apply_edits(document: &mut Value, edits: &[PathValue]) -> Result<(), ConfError> {
    for edit in edits {
        let segments: Vec<&str> = edit.segments().collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(ConfError::StructuralAssumption(format!(
                "path '{}' has an empty key",
                edit.path
            )));
        }
        let Some((last, parents)) = segments.split_last() else {
            *document = edit.value.clone();
            continue;
        };

        let mut current = &mut *document;
        for segment in parents {
            let map = as_mapping(current, &edit.path)?;
            current = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        as_mapping(current, &edit.path)?.insert(last.to_string(), edit.value.clone());
    }
    Ok(())
}

/// The edits that turn `old` into `new`, sorted by path.
///
/// These are the leaves of `new` that are absent from `old` or hold a
/// different value, plus every empty mapping of `new` that `old` does not
/// already hold as an empty mapping. Leaves removed by `new` are not reported.
pub fn diff(old: &Value, new: &Value) -> Vec<PathValue> {
    let before: HashMap<String, Value> = flatten(old)
        .into_iter()
        .map(|pv| (pv.path, pv.value))
        .collect();
    let mut edits: Vec<PathValue> = flatten(new)
        .into_iter()
        .filter(|pv| before.get(&pv.path) != Some(&pv.value))
        .collect();

    let mut empty = Vec::new();
    empty_mappings(new, "", &mut empty);
    edits.extend(
        empty
            .into_iter()
            .filter(|path| !lookup(old, path).is_some_and(is_empty_mapping))
            .map(|path| PathValue::new(path, Value::Object(Map::new()))),
    );
    edits.sort_by(|a, b| a.path.cmp(&b.path));
    edits
}

fn empty_mappings(value: &Value, path: &str, out: &mut Vec<String>) {
    let Value::Object(map) = value else {
        return;
    };
    if map.is_empty() {
        out.push(path.to_string());
    }
    for (key, child) in map {
        empty_mappings(child, &join(path, key), out);
    }
}

fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(document);
    }
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}

fn is_empty_mapping(value: &Value) -> bool {
    value.as_object().is_some_and(Map::is_empty)
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn as_mapping<'a>(value: &'a mut Value, path: &str) -> Result<&'a mut Map<String, Value>, ConfError> {
    value.as_object_mut().ok_or_else(|| {
        ConfError::StructuralAssumption(format!("cannot set '{path}' through a non-mapping value"))
    })
}
