//! Reverse the field renames declared by a [`Model`].
//!
//! A field `key` with `attribute = a` reads its value from `a` and exposes it
//! as `key`. The inverted model has a field `a` with `attribute = key`, so the
//! same declaration serves both directions.

use crate::error::ConfError;
use crate::types::{FieldKind, FieldNode, Model};

/// Swap every field's key with its `attribute`, recursing through nested
/// models, lists and wildcards.
///
/// Fails with [`ConfError::AmbiguousAttribute`] when two fields of one model
/// would end up under the same key.
pub fn invert_model(model: &Model) -> Result<Model, ConfError> {
    let mut inverted = Model::new(model.name.clone());
    for (key, field) in &model.fields {
        let mut node = invert_field(field)?;
        let new_key = match node.attribute.take() {
            Some(attribute) => {
                node.attribute = Some(key.clone());
                attribute
            }
            None => key.clone(),
        };
        if inverted.fields.contains_key(&new_key) {
            return Err(ConfError::AmbiguousAttribute {
                model: model.name.clone(),
                attribute: new_key,
            });
        }
        inverted.fields.insert(new_key, node);
    }
    Ok(inverted)
}

// Inverts what the field contains; the field's own attribute is handled by the caller.
fn invert_field(field: &FieldNode) -> Result<FieldNode, ConfError> {
    let kind = match &field.kind {
        FieldKind::Scalar => FieldKind::Scalar,
        FieldKind::Nested(model) => FieldKind::Nested(invert_model(model)?),
        FieldKind::List(inner) => FieldKind::List(Box::new(invert_field(inner)?)),
        FieldKind::Wildcard(inner) => FieldKind::Wildcard(Box::new(invert_field(inner)?)),
    };
    Ok(FieldNode {
        kind,
        attribute: field.attribute.clone(),
    })
}
