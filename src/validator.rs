//! Per-type JSON Schema checks with readable failure reasons.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use jsonschema::Validator;
use serde_json::Value;
use tracing::debug;

use crate::error::ConfError;
use crate::loader::compile_schema;
use crate::types::{DocumentType, Validation};

/// Compiled schemas, one per document type. Immutable once built.
pub struct SchemaSet {
    validators: BTreeMap<DocumentType, Validator>,
}

impl Debug for SchemaSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SchemaSet")
            .field("document_types", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SchemaSet {
    /// Compile every schema; the first one that does not compile fails the whole set.
    pub fn compile(schemas: &BTreeMap<DocumentType, Value>) -> Result<Self, ConfError> {
        let mut validators = BTreeMap::new();
        for (doc_type, schema) in schemas {
            let validator = compile_schema(schema)
                .map_err(|e| ConfError::SchemaCompile(format!("{doc_type}: {e}")))?;
            validators.insert(*doc_type, validator);
        }
        Ok(SchemaSet { validators })
    }

    pub fn contains(&self, doc_type: DocumentType) -> bool {
        self.validators.contains_key(&doc_type)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn document_types(&self) -> impl Iterator<Item = DocumentType> + '_ {
        self.validators.keys().copied()
    }

    /// Check `instance` against the schema of `doc_type`.
    pub fn validate(&self, instance: &Value, doc_type: DocumentType) -> Validation {
        let Some(validator) = self.validators.get(&doc_type) else {
            return Validation::invalid(format!("no schema for document type: {doc_type}"));
        };
        match validator.validate(instance) {
            Ok(()) => Validation::valid(),
            Err(error) => {
                let reason = reason_for(&error.schema_path.to_string(), &error.to_string());
                debug!(
                    event = "Validate",
                    phase = "Rejected",
                    document_type = %doc_type,
                    reason = reason
                );
                Validation::invalid(reason)
            }
        }
    }
}

/// Turn a schema error into a reason a user can act on.
///
/// Errors raised under `properties/<field>` name the field; anything else
/// keeps the raw message. `schema_path` is a JSON pointer or a plain
/// `/`-separated path.
pub fn reason_for(schema_path: &str, message: &str) -> String {
    let mut segments = schema_path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some("properties"), Some(field)) => {
            let field = field.replace("~1", "/").replace("~0", "~");
            format!("{field} value: {message}")
        }
        _ => message.to_string(),
    }
}
