//! Document type names across API epochs.
//!
//! Each epoch other than the canonical one has a table mapping its type names
//! onto canonical names. Names missing from a table are the same in both
//! vocabularies, so lookups never fail: an unknown name translates to itself.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::ConfError;

/// Type names of the `v1` API, keyed by their v1 spelling.
pub const V1_TYPE_NAMES: &[(&str, &str)] = &[
    ("urlmaps", "securitypolicies"),
    ("wafrules", "contentfilterrules"),
    ("wafgroups", "contentfiltergroups"),
    ("wafpolicies", "contentfilterprofiles"),
    ("aclpolicies", "aclprofiles"),
    ("tagrules", "globalfilters"),
    ("flowcontrol", "flowcontrolpolicies"),
];

static BUILTIN: Lazy<Result<EpochMaps, ConfError>> = Lazy::new(|| {
    let mut maps = EpochMaps::default();
    maps.insert(EpochMap::new("v1", V1_TYPE_NAMES.iter().copied())?);
    Ok(maps)
});

/// The name table of one epoch, with its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochMap {
    epoch: String,
    forward: BTreeMap<String, String>,
    inverse: BTreeMap<String, String>,
}

impl EpochMap {
    /// Build a map from `(epoch name, canonical name)` pairs.
    ///
    /// Fails with [`ConfError::NonInjectiveMap`] when two epoch names share a
    /// canonical name, as the inverse lookup would then be ambiguous.
    pub fn new<K, V>(
        epoch: impl Into<String>,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ConfError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let epoch = epoch.into();
        let forward: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut inverse = BTreeMap::new();
        for (name, canonical) in &forward {
            if inverse.insert(canonical.clone(), name.clone()).is_some() {
                return Err(ConfError::NonInjectiveMap {
                    epoch,
                    canonical: canonical.clone(),
                });
            }
        }

        Ok(EpochMap {
            epoch,
            forward,
            inverse,
        })
    }

    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    /// Translate `name` into canonical vocabulary, or back when `invert` is set.
    pub fn translate<'a>(&'a self, name: &'a str, invert: bool) -> &'a str {
        let table = if invert { &self.inverse } else { &self.forward };
        table.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// All known epoch tables, keyed by epoch name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpochMaps {
    maps: BTreeMap<String, EpochMap>,
}

impl EpochMaps {
    /// The builtin tables (currently `v1`).
    pub fn builtin() -> Result<Self, ConfError> {
        (*BUILTIN).clone()
    }

    /// Add or replace the table for an epoch.
    pub fn insert(&mut self, map: EpochMap) {
        self.maps.insert(map.epoch.clone(), map);
    }

    /// Merge extra names into an epoch's table, creating it if needed.
    ///
    /// The merged table is checked for injectivity again.
    pub fn extend<K, V>(
        &mut self,
        epoch: &str,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), ConfError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged: Vec<(String, String)> = self
            .maps
            .get(epoch)
            .map(|m| {
                m.entries()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        merged.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self.insert(EpochMap::new(epoch, merged)?);
        Ok(())
    }

    pub fn get(&self, epoch: &str) -> Option<&EpochMap> {
        self.maps.get(epoch)
    }

    pub fn epochs(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Translate a type name from `epoch` to canonical, or back when `invert`
    /// is set. Unknown epochs and unknown names translate to themselves.
    pub fn translate<'a>(&'a self, name: &'a str, epoch: &str, invert: bool) -> &'a str {
        let translated = match self.maps.get(epoch) {
            Some(map) => map.translate(name, invert),
            None => name,
        };
        debug!(
            event = "Translate",
            epoch = epoch,
            invert = invert,
            from = name,
            to = translated
        );
        translated
    }
}

/// Translate with the builtin tables.
pub fn translate_type_name(name: &str, epoch: &str, invert: bool) -> Result<String, ConfError> {
    match &*BUILTIN {
        Ok(maps) => Ok(maps.translate(name, epoch, invert).to_string()),
        Err(err) => Err(err.clone()),
    }
}
