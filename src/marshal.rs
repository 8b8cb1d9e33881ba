//! Project documents through a [`Model`].
//!
//! Only declared fields are kept. A field's value is read from its
//! `attribute` when set, else from its key, and is written under its key.
//! Absent and `null` values are skipped. Marshalling with
//! [`invert_model`](crate::invert::invert_model)`(m)` undoes the renames of
//! marshalling with `m`.

use serde_json::{Map, Value};

use crate::types::{FieldKind, FieldNode, Model, WILDCARD_KEY};

/// Marshal `value` through `model`. Non-object input yields `null`.
pub fn marshal(value: &Value, model: &Model) -> Value {
    match value {
        Value::Object(source) => Value::Object(marshal_object(source, model)),
        _ => Value::Null,
    }
}

fn marshal_object(source: &Map<String, Value>, model: &Model) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, field) in &model.fields {
        if key == WILDCARD_KEY {
            continue;
        }
        let from = field.attribute.as_deref().unwrap_or(key);
        if let Some(marshalled) = source.get(from).and_then(|v| marshal_field(v, field)) {
            out.insert(key.clone(), marshalled);
        }
    }

    if let Some(catch_all) = model.get(WILDCARD_KEY) {
        let inner = match &catch_all.kind {
            FieldKind::Wildcard(inner) => inner.as_ref(),
            _ => catch_all,
        };
        for (key, value) in source {
            if is_declared(model, key) {
                continue;
            }
            if let Some(marshalled) = marshal_field(value, inner) {
                out.insert(key.clone(), marshalled);
            }
        }
    }
    out
}

fn marshal_field(value: &Value, field: &FieldNode) -> Option<Value> {
    if value.is_null() {
        return None;
    }
    match &field.kind {
        FieldKind::Scalar => Some(value.clone()),
        FieldKind::Nested(model) => value
            .as_object()
            .map(|source| Value::Object(marshal_object(source, model))),
        FieldKind::List(inner) => value.as_array().map(|items| {
            Value::Array(
                items
                    .iter()
                    .map(|item| marshal_field(item, inner).unwrap_or(Value::Null))
                    .collect(),
            )
        }),
        FieldKind::Wildcard(inner) => value.as_object().map(|source| {
            Value::Object(
                source
                    .iter()
                    .filter_map(|(k, v)| marshal_field(v, inner).map(|m| (k.clone(), m)))
                    .collect(),
            )
        }),
    }
}

// A source key is declared if some field reads from it.
fn is_declared(model: &Model, source_key: &str) -> bool {
    model.fields.iter().any(|(key, field)| {
        key != WILDCARD_KEY && field.attribute.as_deref().unwrap_or(key) == source_key
    })
}
