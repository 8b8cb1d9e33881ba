use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ConfError {
    #[error("unknown blob format: [{0}]")]
    UnknownBlobFormat(String),

    #[error("invalid blob payload: {0}")]
    InvalidBlobPayload(String),

    #[error("structural assumption violated: {0}")]
    StructuralAssumption(String),

    #[error("epoch map '{epoch}' is not injective: several names map to '{canonical}'")]
    NonInjectiveMap { epoch: String, canonical: String },

    #[error("model '{model}' maps more than one field to '{attribute}'")]
    AmbiguousAttribute { model: String, attribute: String },

    #[error("failed to parse schema: {0}")]
    SchemaParse(String),

    #[error("failed to compile schema: {0}")]
    SchemaCompile(String),

    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("failed to lock registry for read/write: {0}")]
    LockError(String),
}

impl From<serde_json::Error> for ConfError {
    fn from(err: serde_json::Error) -> Self {
        ConfError::InvalidBlobPayload(err.to_string())
    }
}

impl From<base64::DecodeError> for ConfError {
    fn from(err: base64::DecodeError) -> Self {
        ConfError::InvalidBlobPayload(err.to_string())
    }
}

impl From<std::io::Error> for ConfError {
    fn from(err: std::io::Error) -> Self {
        ConfError::Io(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ConfError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        ConfError::LockError(err.to_string())
    }
}
