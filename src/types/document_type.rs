//! Configuration document types and API epochs.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use utoipa::ToSchema;

/// A configuration document type, named in the canonical (backend) vocabulary.
///
/// The string form is the lowercase name used on the wire and in schema file
/// names, e.g. `ratelimits` or `contentfilterprofiles`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocumentType {
    RateLimits,
    SecurityPolicies,
    ContentFilterRules,
    ContentFilterGroups,
    ContentFilterProfiles,
    AclProfiles,
    GlobalFilters,
    FlowControl,
}

/// A named API schema generation.
///
/// `Backend` is the canonical shape. Every other epoch is derived from it by
/// renaming types and, for a few types, reshaping their bodies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Epoch {
    V1,
    Backend,
}

impl Epoch {
    pub fn is_canonical(&self) -> bool {
        matches!(self, Epoch::Backend)
    }
}
