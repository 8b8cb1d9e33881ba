use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::info;

use crate::error::ConfError;
use crate::invert::invert_model;
use crate::loader::{RegistryConfig, resolve_schemas};
use crate::models::model_for;
use crate::translate::EpochMaps;
use crate::types::{DocumentType, Epoch, Model, Validation};
use crate::validator::SchemaSet;

/// Everything the engine needs to answer a request, built in one go.
///
/// A registry never changes after construction; reloading builds a new one.
pub struct Registry {
    schemas: SchemaSet,
    epochs: EpochMaps,
    models: BTreeMap<DocumentType, Model>,
    inverted_models: BTreeMap<DocumentType, Model>,
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Registry")
            .field("schemas", &self.schemas)
            .field("epochs", &self.epochs.epochs().collect::<Vec<_>>())
            .field("models", &self.models.len())
            .finish()
    }
}

impl Registry {
    /// Builtin schemas, epoch tables and models.
    pub fn builtin() -> Result<Self, ConfError> {
        Self::from_config(&RegistryConfig::default())
    }

    pub fn from_config(config: &RegistryConfig) -> Result<Self, ConfError> {
        let schemas = SchemaSet::compile(&resolve_schemas(config)?)?;

        let mut epochs = EpochMaps::builtin()?;
        for (epoch, names) in &config.epochs {
            epochs.extend(epoch, names.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        }

        let mut models = BTreeMap::new();
        let mut inverted_models = BTreeMap::new();
        for doc_type in DocumentType::iter() {
            let model = model_for(doc_type);
            inverted_models.insert(doc_type, invert_model(&model)?);
            models.insert(doc_type, model);
        }

        info!(
            event = "Registry",
            phase = "Build",
            schemas = schemas.len(),
            epochs = epochs.len(),
            schema_dir = ?config.schema_dir
        );

        Ok(Registry {
            schemas,
            epochs,
            models,
            inverted_models,
        })
    }

    pub fn schemas(&self) -> &SchemaSet {
        &self.schemas
    }

    pub fn epochs(&self) -> &EpochMaps {
        &self.epochs
    }

    pub fn model(&self, doc_type: DocumentType) -> Option<&Model> {
        self.models.get(&doc_type)
    }

    /// The model with every rename reversed, for inbound documents.
    pub fn inverted_model(&self, doc_type: DocumentType) -> Option<&Model> {
        self.inverted_models.get(&doc_type)
    }

    pub fn translate<'a>(&'a self, name: &'a str, epoch: &str, invert: bool) -> &'a str {
        self.epochs.translate(name, epoch, invert)
    }

    /// Resolve a name in canonical or `epoch` vocabulary to a document type.
    pub fn document_type(&self, name: &str, epoch: Epoch) -> Option<DocumentType> {
        DocumentType::from_str(self.translate(name, epoch.as_ref(), false))
            .or_else(|_| DocumentType::from_str(name))
            .ok()
    }

    /// Validate `instance` against the schema of the type called `type_name`.
    pub fn validate(&self, instance: &Value, type_name: &str) -> Validation {
        match DocumentType::from_str(type_name) {
            Ok(doc_type) => self.schemas.validate(instance, doc_type),
            Err(_) => Validation::invalid(
                ConfError::UnknownDocumentType(type_name.to_string()).to_string(),
            ),
        }
    }
}
