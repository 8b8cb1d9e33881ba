//! Structural conversion of document bodies between epochs.
//!
//! Only two document types changed shape between `v1` and the canonical
//! backend epoch. Both conversions to `v1` are lossy on purpose: `v1`
//! clients cannot express what is dropped, and writing their documents
//! back must keep working.
//!
//! - Rate limits: the canonical body carries a list of `thresholds`, each a
//!   `{limit, action}` tier. `v1` carries a single top-level `limit` and
//!   `action`. Only the first tier survives the trip to `v1`.
//! - Content filter profiles: canonical exclusions map a rule or group id
//!   to `"rule"` or `"group"`. `v1` only knows rule exclusions, marked `1`.
//!   Group exclusions do not survive the trip to `v1`.
//!
//! Every other type has the same shape in all epochs.

use std::str::FromStr;

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::ConfError;
use crate::translate::EpochMaps;
use crate::types::{DocumentType, Epoch};

const RULE_EXCLUSION: &str = "rule";
const LEGACY_RULE_EXCLUSION: u64 = 1;
const EXCLUSION_SECTIONS: [&str; 3] = ["args", "headers", "cookies"];
const EXCLUSION_ENTRY_LISTS: [&str; 2] = ["names", "regex"];

/// Convert `body` of a type named `type_name` from one epoch's shape to another's.
///
/// `type_name` may be spelled in either epoch's vocabulary. Types that
/// cannot be resolved, and types whose shape did not change, come back
/// untouched.
pub fn reshape_document(
    epochs: &EpochMaps,
    type_name: &str,
    body: Value,
    from: Epoch,
    to: Epoch,
) -> Result<Value, ConfError> {
    match resolve_document_type(epochs, type_name, from, to) {
        Some(doc_type) => reshape(doc_type, body, from, to),
        None => Ok(body),
    }
}

/// Convert a body of a known type between epochs.
pub fn reshape(
    doc_type: DocumentType,
    body: Value,
    from: Epoch,
    to: Epoch,
) -> Result<Value, ConfError> {
    let converted = match (doc_type, from, to) {
        (DocumentType::RateLimits, Epoch::Backend, Epoch::V1) => ratelimit_to_legacy(body)?,
        (DocumentType::RateLimits, Epoch::V1, Epoch::Backend) => ratelimit_to_canonical(body)?,
        (DocumentType::ContentFilterProfiles, Epoch::Backend, Epoch::V1) => cfp_to_legacy(body)?,
        (DocumentType::ContentFilterProfiles, Epoch::V1, Epoch::Backend) => {
            cfp_to_canonical(body)?
        }
        _ => return Ok(body),
    };
    debug!(
        event = "Reshape",
        document_type = %doc_type,
        from = %from,
        to = %to
    );
    Ok(converted)
}

/// Resolve a type name given in the vocabulary of `from` or `to`.
pub fn resolve_document_type(
    epochs: &EpochMaps,
    type_name: &str,
    from: Epoch,
    to: Epoch,
) -> Option<DocumentType> {
    if let Ok(doc_type) = DocumentType::from_str(type_name) {
        return Some(doc_type);
    }
    [from, to]
        .into_iter()
        .filter(|epoch| !epoch.is_canonical())
        .find_map(|epoch| {
            DocumentType::from_str(epochs.translate(type_name, epoch.as_ref(), false)).ok()
        })
}

/// Project a canonical rate limit onto the single-tier `v1` shape.
///
/// Tiers after the first are dropped. An empty `thresholds` list yields an
/// empty `limit` and a `default` action; a missing one is a contract violation.
pub fn ratelimit_to_legacy(mut doc: Value) -> Result<Value, ConfError> {
    let obj = as_object(&mut doc, "rate limit")?;
    let thresholds = obj
        .remove("thresholds")
        .ok_or_else(|| missing("rate limit", "thresholds"))?;
    let first = thresholds.get(0);

    let limit = first
        .and_then(|t| t.get("limit"))
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()));
    let action = first
        .and_then(|t| t.get("action"))
        .cloned()
        .unwrap_or_else(|| json!({"type": "default"}));

    obj.insert("limit".to_string(), limit);
    obj.insert("action".to_string(), action);
    Ok(doc)
}

/// Lift a `v1` rate limit into the first tier of the canonical `thresholds`.
pub fn ratelimit_to_canonical(mut doc: Value) -> Result<Value, ConfError> {
    let obj = as_object(&mut doc, "rate limit")?;
    let limit = obj
        .remove("limit")
        .ok_or_else(|| missing("rate limit", "limit"))?;
    let action = obj
        .remove("action")
        .ok_or_else(|| missing("rate limit", "action"))?;
    let tier = json!({"limit": limit, "action": action});

    match obj.get_mut("thresholds") {
        None => {
            obj.insert("thresholds".to_string(), Value::Array(vec![tier]));
        }
        Some(Value::Array(tiers)) if tiers.is_empty() => tiers.push(tier),
        Some(Value::Array(tiers)) => tiers[0] = tier,
        Some(_) => {
            return Err(ConfError::StructuralAssumption(
                "rate limit 'thresholds' is not a list".to_string(),
            ));
        }
    }
    Ok(doc)
}

/// Keep only rule exclusions, marked with the `v1` sentinel `1`.
pub fn cfp_to_legacy(doc: Value) -> Result<Value, ConfError> {
    rewrite_exclusions(doc, |value| {
        (value.as_str() == Some(RULE_EXCLUSION)).then(|| Value::from(LEGACY_RULE_EXCLUSION))
    })
}

/// Turn `v1` rule exclusions back into canonical `"rule"` exclusions.
pub fn cfp_to_canonical(doc: Value) -> Result<Value, ConfError> {
    rewrite_exclusions(doc, |value| {
        is_legacy_rule(value).then(|| Value::String(RULE_EXCLUSION.to_string()))
    })
}

// `1` in any numeric spelling, or `true`, marks a rule exclusion.
fn is_legacy_rule(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64() == Some(LEGACY_RULE_EXCLUSION as f64),
        _ => false,
    }
}

// Sections, entry lists and exclusion maps that are absent or empty are left alone.
fn rewrite_exclusions<F>(mut doc: Value, rewrite: F) -> Result<Value, ConfError>
where
    F: Fn(&Value) -> Option<Value>,
{
    let profile = as_object(&mut doc, "content filter profile")?;
    for section_name in EXCLUSION_SECTIONS {
        let Some(section) = profile.get_mut(section_name).filter(|v| is_truthy(v)) else {
            continue;
        };
        let section = as_object(section, section_name)?;
        for list_name in EXCLUSION_ENTRY_LISTS {
            let Some(entries) = section.get_mut(list_name).filter(|v| is_truthy(v)) else {
                continue;
            };
            let Value::Array(entries) = entries else {
                return Err(ConfError::StructuralAssumption(format!(
                    "'{section_name}.{list_name}' is not a list"
                )));
            };
            for entry in entries.iter_mut() {
                let entry = as_object(entry, list_name)?;
                let Some(exclusions) = entry.get_mut("exclusions").filter(|v| is_truthy(v))
                else {
                    continue;
                };
                let Value::Object(current) = exclusions else {
                    return Err(ConfError::StructuralAssumption(format!(
                        "exclusions in '{section_name}.{list_name}' are not a mapping"
                    )));
                };
                let rewritten: Map<String, Value> = current
                    .iter()
                    .filter_map(|(id, value)| rewrite(value).map(|v| (id.clone(), v)))
                    .collect();
                *current = rewritten;
            }
        }
    }
    Ok(doc)
}

fn as_object<'a>(value: &'a mut Value, what: &str) -> Result<&'a mut Map<String, Value>, ConfError> {
    value
        .as_object_mut()
        .ok_or_else(|| ConfError::StructuralAssumption(format!("{what} is not a mapping")))
}

fn missing(what: &str, key: &str) -> ConfError {
    ConfError::StructuralAssumption(format!("{what} has no '{key}'"))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}
