//! Outcome of checking a document against its schema.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of a schema check. A failed check is a value, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Validation {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Validation {
    pub fn valid() -> Self {
        Validation {
            ok: true,
            reason: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Validation {
            ok: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.ok
    }

    /// The `(ok, reason)` pair handed to the API layer; `reason` is empty when valid.
    pub fn into_pair(self) -> (bool, String) {
        (self.ok, self.reason.unwrap_or_default())
    }
}
