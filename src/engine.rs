use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::error::ConfError;
use crate::loader::RegistryConfig;
use crate::registry::Registry;
use crate::types::{Blob, Epoch, PathValue, Validation};
use crate::{codec, flatten, marshal, reshape};

/// Which way a document crosses the API boundary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Stored shape to API shape.
    Outbound,
    /// API shape to stored shape.
    Inbound,
}

/// The main engine handle. Cloneable and thread-safe.
///
/// Clones share one registry. [`ConfigEngine::reload`] builds a new registry
/// and swaps it in whole, so a call always sees either the old or the new
/// registry and never a mix.
#[derive(Clone, Debug)]
pub struct ConfigEngine {
    inner: Arc<RwLock<Arc<Registry>>>,
}

impl ConfigEngine {
    /// Engine over the builtin schemas, epoch tables and models.
    pub fn new() -> Result<Self, ConfError> {
        Self::from_config(&RegistryConfig::default())
    }

    pub fn from_config(config: &RegistryConfig) -> Result<Self, ConfError> {
        let registry = Registry::from_config(config)?;
        Ok(ConfigEngine {
            inner: Arc::new(RwLock::new(Arc::new(registry))),
        })
    }

    /// Rebuild the registry from `config` and swap it in.
    ///
    /// On failure the current registry stays in place and the error is returned.
    pub fn reload(&self, config: &RegistryConfig) -> Result<(), ConfError> {
        let registry = match Registry::from_config(config) {
            Ok(registry) => registry,
            Err(err) => {
                warn!(event = "Registry", phase = "Reload", error = %err);
                return Err(err);
            }
        };
        *self.inner.write()? = Arc::new(registry);
        info!(event = "Registry", phase = "Reload");
        Ok(())
    }

    /// The current registry. It is unaffected by later reloads.
    pub fn snapshot(&self) -> Result<Arc<Registry>, ConfError> {
        Ok(Arc::clone(&*self.inner.read()?))
    }

    /// Translate a type name of `epoch` to canonical, or back when `invert` is set.
    pub fn translate_type_name(
        &self,
        name: &str,
        epoch: &str,
        invert: bool,
    ) -> Result<String, ConfError> {
        let registry = self.snapshot()?;
        Ok(registry.translate(name, epoch, invert).to_string())
    }

    pub fn reshape_document(
        &self,
        type_name: &str,
        body: Value,
        from: Epoch,
        to: Epoch,
    ) -> Result<Value, ConfError> {
        let registry = self.snapshot()?;
        reshape::reshape_document(registry.epochs(), type_name, body, from, to)
    }

    pub fn encode_blob(&self, bytes: &[u8], format_hint: Option<&str>) -> Result<Blob, ConfError> {
        codec::encode_blob(bytes, format_hint)
    }

    pub fn decode_blob(&self, blob: &Blob) -> Result<Vec<u8>, ConfError> {
        codec::decode_blob(blob)
    }

    /// Validate a canonical document against the schema of `type_name`.
    pub fn validate(&self, instance: &Value, type_name: &str) -> Result<Validation, ConfError> {
        Ok(self.snapshot()?.validate(instance, type_name))
    }

    /// Validate a document named and shaped in `epoch` vocabulary.
    ///
    /// The body is reshaped to canonical form before the schema check.
    pub fn validate_in_epoch(
        &self,
        instance: &Value,
        type_name: &str,
        epoch: Epoch,
    ) -> Result<Validation, ConfError> {
        let registry = self.snapshot()?;
        let Some(doc_type) = registry.document_type(type_name, epoch) else {
            return Ok(Validation::invalid(
                ConfError::UnknownDocumentType(type_name.to_string()).to_string(),
            ));
        };
        let canonical = match reshape::reshape(doc_type, instance.clone(), epoch, Epoch::Backend) {
            Ok(canonical) => canonical,
            Err(err) => return Ok(Validation::invalid(err.to_string())),
        };
        Ok(registry.schemas().validate(&canonical, doc_type))
    }

    pub fn flatten(&self, document: &Value) -> Vec<PathValue> {
        flatten::flatten(document)
    }

    pub fn apply_edits(&self, document: &mut Value, edits: &[PathValue]) -> Result<(), ConfError> {
        flatten::apply_edits(document, edits)
    }

    pub fn diff(&self, old: &Value, new: &Value) -> Vec<PathValue> {
        flatten::diff(old, new)
    }

    /// Project a document of canonical type `type_name` through its builtin model.
    ///
    /// Outbound uses the model as declared, inbound uses its inverse.
    pub fn marshal_document(
        &self,
        type_name: &str,
        body: &Value,
        direction: Direction,
    ) -> Result<Value, ConfError> {
        let registry = self.snapshot()?;
        let doc_type = registry
            .document_type(type_name, Epoch::Backend)
            .ok_or_else(|| ConfError::UnknownDocumentType(type_name.to_string()))?;
        let model = match direction {
            Direction::Outbound => registry.model(doc_type),
            Direction::Inbound => registry.inverted_model(doc_type),
        }
        .ok_or_else(|| ConfError::UnknownDocumentType(type_name.to_string()))?;
        Ok(marshal::marshal(body, model))
    }
}

#[cfg(test)]
mod tests;
