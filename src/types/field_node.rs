//! Declarative description of a document type's shape.
//!
//! A [`Model`] is a named set of fields. Each field is a [`FieldNode`] whose
//! [`FieldKind`] says how its value is shaped, and which may carry an
//! `attribute`: the name the value is read from when it differs from the
//! field's own key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "inner", rename_all = "lowercase")]
pub enum FieldKind {
    /// Any non-structured value, copied as-is.
    Scalar,
    /// An object described by another model.
    Nested(Model),
    /// An array whose items are described by the inner node.
    List(Box<FieldNode>),
    /// An object with arbitrary keys whose values are described by the inner node.
    Wildcard(Box<FieldNode>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNode {
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl FieldNode {
    pub fn scalar() -> Self {
        FieldNode {
            kind: FieldKind::Scalar,
            attribute: None,
        }
    }

    pub fn nested(model: Model) -> Self {
        FieldNode {
            kind: FieldKind::Nested(model),
            attribute: None,
        }
    }

    pub fn list(inner: FieldNode) -> Self {
        FieldNode {
            kind: FieldKind::List(Box::new(inner)),
            attribute: None,
        }
    }

    pub fn wildcard(inner: FieldNode) -> Self {
        FieldNode {
            kind: FieldKind::Wildcard(Box::new(inner)),
            attribute: None,
        }
    }

    /// Read this field's value from `attribute` instead of the field key.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

/// Key under which a wildcard field catches every undeclared key of an object.
pub const WILDCARD_KEY: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub fields: BTreeMap<String, FieldNode>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Model {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field declaration.
    pub fn field(mut self, key: impl Into<String>, node: FieldNode) -> Self {
        self.fields.insert(key.into(), node);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldNode> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
