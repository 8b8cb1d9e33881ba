use super::*;
use std::fs;
use tempfile::TempDir;

struct SchemaDir {
    dir: TempDir,
}

impl SchemaDir {
    fn with(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        for (name, text) in files {
            fs::write(dir.path().join(name), text).unwrap();
        }
        SchemaDir { dir }
    }

    fn config(&self) -> RegistryConfig {
        RegistryConfig::default().with_schema_dir(self.dir.path())
    }
}

const STRICT_ACL_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {"owner": {"type": "string"}},
  "required": ["owner"]
}"#;

#[test]
fn test_schema_dir_overrides_builtin() {
    let dir = SchemaDir::with(&[("aclprofiles.schema", STRICT_ACL_SCHEMA)]);
    let engine = ConfigEngine::from_config(&dir.config()).unwrap();

    let result = engine
        .validate(&acl_profile(json!("acl")), "aclprofiles")
        .unwrap();
    assert!(!result.ok);
    assert!(result.reason.unwrap().contains("owner"));

    let result = engine
        .validate(&json!({"owner": 7}), "aclprofiles")
        .unwrap();
    assert!(result.reason.unwrap().starts_with("owner value: "));

    let rate_limit = engine
        .reshape_document("ratelimits", v1_rate_limit(), Epoch::V1, Epoch::Backend)
        .unwrap();
    assert!(engine.validate(&rate_limit, "ratelimits").unwrap().ok);
}

#[test]
fn test_reload_picks_up_schema_dir() {
    let dir = SchemaDir::with(&[("aclprofiles.schema", STRICT_ACL_SCHEMA)]);
    let engine = engine();
    assert!(
        engine
            .validate(&acl_profile(json!("acl")), "aclprofiles")
            .unwrap()
            .ok
    );

    engine.reload(&dir.config()).unwrap();
    assert!(
        !engine
            .validate(&acl_profile(json!("acl")), "aclprofiles")
            .unwrap()
            .ok
    );
}

#[parameterized(
    unparsable = { "{ not json" },
    uncompilable = { r#"{"type": "no-such-type"}"# },
)]
fn test_broken_schema_rejected_at_load(text: &str) {
    let dir = SchemaDir::with(&[("flowcontrol.schema", text)]);
    let result = ConfigEngine::from_config(&dir.config());
    assert!(matches!(
        result,
        Err(ConfError::SchemaParse(_)) | Err(ConfError::SchemaCompile(_))
    ));

    let engine = engine();
    assert!(engine.reload(&dir.config()).is_err());
    assert_eq!(engine.snapshot().unwrap().schemas().len(), 8);
}
