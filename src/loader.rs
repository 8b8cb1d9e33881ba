use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::error::ConfError;
use crate::types::DocumentType;

/// File extension of schema files in a schema directory.
pub const SCHEMA_EXTENSION: &str = "schema";

/// How to build a [`Registry`](crate::Registry).
///
/// The default uses the builtin schemas and epoch tables only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Directory holding `<documenttype>.schema` files that replace the builtin ones.
    pub schema_dir: Option<PathBuf>,
    /// Extra type names per epoch, merged over the builtin tables.
    pub epochs: BTreeMap<String, BTreeMap<String, String>>,
}

impl RegistryConfig {
    pub fn with_schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = Some(dir.into());
        self
    }

    pub fn with_epoch_names<K, V>(
        mut self,
        epoch: impl Into<String>,
        names: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.epochs
            .entry(epoch.into())
            .or_default()
            .extend(names.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Parse schema text into JSON.
pub fn parse_schema(text: &str) -> Result<Value, ConfError> {
    serde_json::from_str(text).map_err(|e| ConfError::SchemaParse(e.to_string()))
}

/// Compile a JSON Schema.
///
/// Example:
/// ```rust
/// use confbridge_core::compile_schema;
/// let schema = serde_json::json!({"type": "object", "required": ["id"]});
/// let validator = compile_schema(&schema).unwrap();
/// assert!(validator.is_valid(&serde_json::json!({"id": "a"})));
/// ```
pub fn compile_schema(schema: &Value) -> Result<Validator, ConfError> {
    jsonschema::validator_for(schema).map_err(|e| ConfError::SchemaCompile(e.to_string()))
}

fn builtin_schema_text(doc_type: DocumentType) -> &'static str {
    match doc_type {
        DocumentType::RateLimits => include_str!("../schemas/ratelimits.schema"),
        DocumentType::SecurityPolicies => include_str!("../schemas/securitypolicies.schema"),
        DocumentType::ContentFilterRules => include_str!("../schemas/contentfilterrules.schema"),
        DocumentType::ContentFilterGroups => {
            include_str!("../schemas/contentfiltergroups.schema")
        }
        DocumentType::ContentFilterProfiles => {
            include_str!("../schemas/contentfilterprofiles.schema")
        }
        DocumentType::AclProfiles => include_str!("../schemas/aclprofiles.schema"),
        DocumentType::GlobalFilters => include_str!("../schemas/globalfilters.schema"),
        DocumentType::FlowControl => include_str!("../schemas/flowcontrol.schema"),
    }
}

/// The schemas shipped with the crate, one per document type.
pub fn builtin_schemas() -> Result<BTreeMap<DocumentType, Value>, ConfError> {
    DocumentType::iter()
        .map(|doc_type| parse_schema(builtin_schema_text(doc_type)).map(|schema| (doc_type, schema)))
        .collect()
}

/// Read `<documenttype>.schema` files from `dir`.
///
/// Document types without a file are left out; files for unknown types are ignored.
pub fn load_schema_dir(dir: &Path) -> Result<BTreeMap<DocumentType, Value>, ConfError> {
    let mut schemas = BTreeMap::new();
    for doc_type in DocumentType::iter() {
        let path = dir.join(format!("{doc_type}.{SCHEMA_EXTENSION}"));
        if !path.is_file() {
            continue;
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| ConfError::Io(format!("{}: {e}", path.display())))?;
        let schema: Value = serde_json::from_str(&text)
            .map_err(|e| ConfError::SchemaParse(format!("{}: {e}", path.display())))?;
        debug!(event = "Schema", phase = "Load", document_type = %doc_type, path = %path.display());
        schemas.insert(doc_type, schema);
    }
    Ok(schemas)
}

/// Builtin schemas with those found under `config.schema_dir` taking precedence.
pub fn resolve_schemas(config: &RegistryConfig) -> Result<BTreeMap<DocumentType, Value>, ConfError> {
    let mut schemas = builtin_schemas()?;
    if let Some(dir) = &config.schema_dir {
        if !dir.is_dir() {
            return Err(ConfError::Io(format!(
                "schema directory {} does not exist",
                dir.display()
            )));
        }
        schemas.extend(load_schema_dir(dir)?);
    }
    Ok(schemas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_schemas_cover_every_type() {
        let schemas = builtin_schemas().unwrap();
        assert_eq!(schemas.len(), DocumentType::iter().count());
        for (doc_type, schema) in &schemas {
            compile_schema(schema)
                .unwrap_or_else(|e| panic!("builtin schema for {doc_type} does not compile: {e}"));
        }
    }

    #[test]
    fn test_compile_schema_rejects_invalid_schema() {
        let result = compile_schema(&json!({"type": 12}));
        assert!(matches!(result, Err(ConfError::SchemaCompile(_))));
    }

    #[test]
    fn test_parse_schema_rejects_bad_json() {
        assert!(matches!(
            parse_schema("{not json"),
            Err(ConfError::SchemaParse(_))
        ));
    }

    #[test]
    fn test_load_schema_dir_overrides_builtin() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("aclprofiles.schema"),
            r#"{"type": "object", "required": ["only"]}"#,
        )
        .unwrap();
        fs::write(dir.path().join("unrelated.schema"), "{}").unwrap();

        let loaded = load_schema_dir(dir.path()).unwrap();
        assert_eq!(loaded.len(), 1);

        let config = RegistryConfig::default().with_schema_dir(dir.path());
        let schemas = resolve_schemas(&config).unwrap();
        assert_eq!(
            schemas[&DocumentType::AclProfiles],
            json!({"type": "object", "required": ["only"]})
        );
        assert_eq!(
            schemas[&DocumentType::RateLimits],
            builtin_schemas().unwrap()[&DocumentType::RateLimits]
        );
    }

    #[test]
    fn test_load_schema_dir_reports_bad_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ratelimits.schema"), "{").unwrap();
        let err = load_schema_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ConfError::SchemaParse(msg) if msg.contains("ratelimits.schema")));
    }

    #[test]
    fn test_missing_schema_dir_is_an_error() {
        let config = RegistryConfig::default().with_schema_dir("/nonexistent/confbridge/schemas");
        assert!(matches!(resolve_schemas(&config), Err(ConfError::Io(_))));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"epochs": {"v1": {"limits": "ratelimits"}}}"#).unwrap();
        assert_eq!(config.schema_dir, None);
        assert_eq!(config.epochs["v1"]["limits"], "ratelimits");

        let empty: RegistryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, RegistryConfig::default());
    }
}
