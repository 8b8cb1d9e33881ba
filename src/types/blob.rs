//! JSON-safe envelope for binary resources.
//!
//! Format tags:
//! - `json`: payload is a JSON value, stored as-is
//! - `string`: payload is UTF-8 text
//! - `base64`: payload is the base64 text of the raw bytes
//! - `<algo>+base64`: payload is the base64 text of the bytes compressed
//!   with `<algo>`, one of `zip` (zlib stream) or `bz2`

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

use crate::error::ConfError;

/// A stored blob: a format tag and its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Blob {
    pub format: String,
    #[serde(alias = "blob")]
    pub payload: Value,
}

impl Blob {
    pub fn new(format: BlobFormat, payload: Value) -> Self {
        Blob {
            format: format.to_string(),
            payload,
        }
    }

    /// Parse the format tag.
    pub fn parsed_format(&self) -> Result<BlobFormat, ConfError> {
        self.format.parse()
    }
}

/// Compression algorithms that may qualify a `base64` payload.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, StrumDisplay, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Compression {
    Zip,
    Bz2,
}

/// Parsed form of [`Blob::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobFormat {
    Json,
    String,
    Base64 { compression: Option<Compression> },
}

impl Display for BlobFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BlobFormat::Json => write!(f, "json"),
            BlobFormat::String => write!(f, "string"),
            BlobFormat::Base64 { compression: None } => write!(f, "base64"),
            BlobFormat::Base64 {
                compression: Some(algo),
            } => write!(f, "{algo}+base64"),
        }
    }
}

impl FromStr for BlobFormat {
    type Err = ConfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(BlobFormat::Json),
            "string" => Ok(BlobFormat::String),
            "base64" => Ok(BlobFormat::Base64 { compression: None }),
            _ => match s.rsplit_once('+') {
                Some((algo, "base64")) => algo
                    .parse::<Compression>()
                    .map(|c| BlobFormat::Base64 {
                        compression: Some(c),
                    })
                    .map_err(|_| ConfError::UnknownBlobFormat(s.to_string())),
                _ => Err(ConfError::UnknownBlobFormat(s.to_string())),
            },
        }
    }
}
