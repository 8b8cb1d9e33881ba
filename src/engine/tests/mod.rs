use super::*;
use crate::types::DocumentType;
use insta::assert_json_snapshot;
use serde_json::json;
use yare::parameterized;

mod schema;

fn engine() -> ConfigEngine {
    ConfigEngine::new().expect("builtin registry should load")
}

fn v1_rate_limit() -> Value {
    json!({
        "id": "rl1",
        "name": "login limit",
        "description": "",
        "timeframe": "60",
        "limit": "5",
        "action": {"type": "ban", "params": {"duration": "3600"}},
        "include": {"headers": {}, "cookies": {}, "args": {}, "attrs": {}},
        "exclude": {"headers": {}, "cookies": {}, "args": {}, "attrs": {}},
        "key": [{"attrs": "ip"}],
        "pairwith": {"self": "self"},
    })
}

fn acl_profile(id: Value) -> Value {
    json!({
        "id": id,
        "name": "default",
        "allow": [],
        "allow_bot": [],
        "deny_bot": [],
        "passthrough": [],
        "deny": [],
        "force_deny": [],
    })
}

include!("core.rs");
