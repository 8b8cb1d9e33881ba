//! Data model shared by the engine components.
//!
//! All of these are transient values built per call, except the
//! [`Model`] trees and epoch names held by the registry.

mod blob;
mod document_type;
mod field_node;
mod path_value;
mod validation;

pub use blob::{Blob, BlobFormat, Compression};
pub use document_type::{DocumentType, Epoch};
pub use field_node::{FieldKind, FieldNode, Model, WILDCARD_KEY};
pub use path_value::PathValue;
pub use validation::Validation;
