//! Leaf locations of a flattened document.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A leaf of a document: the `.`-joined key path from the root and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PathValue {
    pub path: String,
    pub value: Value,
}

impl PathValue {
    pub fn new(path: impl Into<String>, value: Value) -> Self {
        PathValue {
            path: path.into(),
            value,
        }
    }

    /// The key segments of the path. The root path (`""`) has none; any
    /// other path keeps its empty segments, e.g. `"a..b"` has three.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        (!self.path.is_empty())
            .then(|| self.path.split('.'))
            .into_iter()
            .flatten()
    }
}

impl Display for PathValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}={}", self.path, self.value)
    }
}
