//! The shape of each document type as the REST layer exposes it.

use crate::types::{DocumentType, FieldNode, Model};

fn scalars(model: Model, keys: &[&str]) -> Model {
    keys.iter()
        .fold(model, |model, key| model.field(*key, FieldNode::scalar()))
}

fn string_lists(model: Model, keys: &[&str]) -> Model {
    keys.iter().fold(model, |model, key| {
        model.field(*key, FieldNode::list(FieldNode::scalar()))
    })
}

fn rate_limit() -> Model {
    let threshold = scalars(Model::new("Rate Limit Threshold"), &["limit", "action"]);
    scalars(
        Model::new("Rate Limit"),
        &[
            "id",
            "name",
            "description",
            "timeframe",
            "include",
            "exclude",
            "key",
            "pairwith",
        ],
    )
    .field("thresholds", FieldNode::list(FieldNode::nested(threshold)))
}

/// One entry of a security policy's `map`.
pub fn security_profile_map() -> Model {
    scalars(
        Model::new("Security Profile Map"),
        &[
            "name",
            "match",
            "acl_profile",
            "acl_active",
            "content_filter_profile",
            "content_filter_active",
        ],
    )
    .field("limit_ids", FieldNode::list(FieldNode::scalar()))
}

fn security_policy() -> Model {
    scalars(Model::new("Security Policy"), &["id", "name", "match"]).field(
        "map",
        FieldNode::list(FieldNode::nested(security_profile_map())),
    )
}

fn content_filter_rule() -> Model {
    scalars(
        Model::new("Content Filter Rule"),
        &[
            "id",
            "name",
            "msg",
            "operand",
            "severity",
            "certainity",
            "category",
            "subcategory",
        ],
    )
}

fn content_filter_group() -> Model {
    let model = scalars(
        Model::new("Content Filter Group"),
        &["id", "name", "description"],
    );
    string_lists(model, &["content_filter_rule_ids"])
}

fn content_filter_profile() -> Model {
    let model = scalars(
        Model::new("Content Filter Profile"),
        &[
            "id",
            "name",
            "ignore_alphanum",
            "args",
            "headers",
            "cookies",
            "path",
            "decoding",
            "masking_seed",
        ],
    );
    string_lists(model, &["active", "report", "ignore"])
}

fn acl_profile() -> Model {
    let model = scalars(Model::new("ACL Profile"), &["id", "name"]);
    string_lists(
        model,
        &[
            "allow",
            "allow_bot",
            "deny_bot",
            "passthrough",
            "deny",
            "force_deny",
        ],
    )
}

fn global_filter() -> Model {
    let model = scalars(
        Model::new("Global Filter"),
        &[
            "id",
            "name",
            "source",
            "mdate",
            "description",
            "active",
            "action",
            "rule",
        ],
    );
    string_lists(model, &["tags"])
}

fn flow_control() -> Model {
    let model = scalars(
        Model::new("Flow Control"),
        &[
            "id",
            "name",
            "timeframe",
            "action",
            "description",
            "active",
        ],
    );
    string_lists(model, &["key", "sequence", "include", "exclude"])
}

/// The builtin model for `doc_type`.
pub fn model_for(doc_type: DocumentType) -> Model {
    match doc_type {
        DocumentType::RateLimits => rate_limit(),
        DocumentType::SecurityPolicies => security_policy(),
        DocumentType::ContentFilterRules => content_filter_rule(),
        DocumentType::ContentFilterGroups => content_filter_group(),
        DocumentType::ContentFilterProfiles => content_filter_profile(),
        DocumentType::AclProfiles => acl_profile(),
        DocumentType::GlobalFilters => global_filter(),
        DocumentType::FlowControl => flow_control(),
    }
}
