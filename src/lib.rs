// src/lib.rs
pub use codec::{decode_blob, encode_blob, try_parse_json};
pub use engine::{ConfigEngine, Direction};
pub use error::ConfError;
pub use flatten::{apply_edits, diff, flatten, flatten_with_prefix};
pub use invert::invert_model;
pub use loader::{
    RegistryConfig, SCHEMA_EXTENSION, builtin_schemas, compile_schema, load_schema_dir,
    parse_schema, resolve_schemas,
};
pub use marshal::marshal;
pub use models::{model_for, security_profile_map};
pub use registry::Registry;
pub use reshape::{
    cfp_to_canonical, cfp_to_legacy, ratelimit_to_canonical, ratelimit_to_legacy, reshape,
    reshape_document, resolve_document_type,
};
pub use translate::{EpochMap, EpochMaps, V1_TYPE_NAMES, translate_type_name};
pub use validator::{SchemaSet, reason_for};

pub mod types;

mod codec;
mod engine;
mod error;
mod flatten;
mod invert;
mod loader;
mod marshal;
mod models;
mod registry;
mod reshape;
mod translate;
mod validator;
