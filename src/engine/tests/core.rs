#[parameterized(
    forward = { "wafrules", "v1", false, "contentfilterrules" },
    inverse = { "contentfilterrules", "v1", true, "wafrules" },
    groups = { "wafgroups", "v1", false, "contentfiltergroups" },
    unmapped = { "ratelimits", "v1", false, "ratelimits" },
    unknown_epoch = { "wafrules", "v9", false, "wafrules" },
)]
fn test_translate_type_name(name: &str, epoch: &str, invert: bool, expected: &str) {
    assert_eq!(
        engine().translate_type_name(name, epoch, invert).unwrap(),
        expected
    );
}

#[test]
fn test_reshape_rate_limit_to_backend() {
    let canonical = engine()
        .reshape_document("ratelimits", v1_rate_limit(), Epoch::V1, Epoch::Backend)
        .unwrap();
    assert!(canonical.get("limit").is_none());
    assert!(canonical.get("action").is_none());
    assert_json_snapshot!(canonical["thresholds"], @r#"
    [
      {
        "action": {
          "params": {
            "duration": "3600"
          },
          "type": "ban"
        },
        "limit": "5"
      }
    ]
    "#);
}

#[test]
fn test_reshape_by_legacy_name() {
    let profile = json!({
        "id": "cfp",
        "args": {"names": [{"key": "a", "reg": "x", "exclusions": {"100001": 1}}]},
    });
    let canonical = engine()
        .reshape_document("wafpolicies", profile, Epoch::V1, Epoch::Backend)
        .unwrap();
    assert_eq!(
        canonical["args"]["names"][0]["exclusions"],
        json!({"100001": "rule"})
    );
}

#[test]
fn test_reshape_unlisted_type_is_identity() {
    let body = acl_profile(json!("acl"));
    let out = engine()
        .reshape_document("aclpolicies", body.clone(), Epoch::V1, Epoch::Backend)
        .unwrap();
    assert_eq!(out, body);
}

#[test]
fn test_blob_round_trip() {
    let engine = engine();
    let bytes = vec![0x41u8; 10000];
    let blob = engine.encode_blob(&bytes, None).unwrap();
    assert_eq!(blob.format, "bz2+base64");
    assert_eq!(engine.decode_blob(&blob).unwrap(), bytes);
}

#[test]
fn test_decode_unknown_format() {
    let blob = Blob {
        format: "rot13".into(),
        payload: json!("uryyb"),
    };
    assert_eq!(
        engine().decode_blob(&blob).unwrap_err(),
        ConfError::UnknownBlobFormat("rot13".into())
    );
}

#[test]
fn test_validate_pair() {
    let engine = engine();
    let (ok, reason) = engine
        .validate(&acl_profile(json!("acl")), "aclprofiles")
        .unwrap()
        .into_pair();
    assert!(ok);
    assert_eq!(reason, "");

    let (ok, reason) = engine
        .validate(&json!({"id": 5}), "aclprofiles")
        .unwrap()
        .into_pair();
    assert!(!ok);
    assert!(reason.starts_with("id value: "), "{reason}");
}

#[test]
fn test_validate_unknown_type() {
    let result = engine().validate(&json!({}), "wafpolicies").unwrap();
    assert_eq!(result, Validation::invalid("unknown document type: wafpolicies"));
}

#[test]
fn test_validate_in_epoch_reshapes_first() {
    let engine = engine();
    let result = engine
        .validate_in_epoch(&v1_rate_limit(), "ratelimits", Epoch::V1)
        .unwrap();
    assert_eq!(result, Validation::valid());

    let mut broken = v1_rate_limit();
    broken.as_object_mut().unwrap().remove("limit");
    let result = engine
        .validate_in_epoch(&broken, "ratelimits", Epoch::V1)
        .unwrap();
    assert!(!result.ok);
    assert!(result.reason.unwrap().starts_with("structural assumption violated"));
}

#[test]
fn test_validate_in_epoch_unknown_type() {
    let result = engine()
        .validate_in_epoch(&json!({}), "teapots", Epoch::V1)
        .unwrap();
    assert_eq!(result, Validation::invalid("unknown document type: teapots"));
}

#[test]
fn test_flatten_example() {
    let flat = engine().flatten(&json!({"b": 1, "a": {"y": 2, "x": 3}}));
    assert_json_snapshot!(flat, @r#"
    [
      {
        "path": "a.x",
        "value": 3
      },
      {
        "path": "a.y",
        "value": 2
      },
      {
        "path": "b",
        "value": 1
      }
    ]
    "#);
}

#[test]
fn test_edits_from_diff() {
    let engine = engine();
    let old = acl_profile(json!("acl"));
    let mut new = old.clone();
    new["deny"] = json!(["bad-bots"]);
    new["name"] = json!("renamed");

    let edits = engine.diff(&old, &new);
    assert_eq!(edits.len(), 2);

    let mut patched = old.clone();
    engine.apply_edits(&mut patched, &edits).unwrap();
    assert_eq!(patched, new);
}

#[test]
fn test_marshal_document_both_directions() {
    let engine = engine();
    let mut stored = acl_profile(json!("acl"));
    stored["internal"] = json!("dropped");

    let outbound = engine
        .marshal_document("aclprofiles", &stored, Direction::Outbound)
        .unwrap();
    assert!(outbound.get("internal").is_none());

    let inbound = engine
        .marshal_document("aclprofiles", &outbound, Direction::Inbound)
        .unwrap();
    assert_eq!(inbound, acl_profile(json!("acl")));
}

#[test]
fn test_marshal_document_unknown_type() {
    let err = engine()
        .marshal_document("urlmaps", &json!({}), Direction::Outbound)
        .unwrap_err();
    assert_eq!(err, ConfError::UnknownDocumentType("urlmaps".into()));
}

#[test]
fn test_direction_names() {
    assert_eq!(Direction::Inbound.to_string(), "inbound");
    assert_eq!("outbound".parse::<Direction>().unwrap(), Direction::Outbound);
}

#[test]
fn test_concurrent_calls() {
    use std::thread;

    let engine = engine();
    let mut handles = vec![];

    for i in 0..8 {
        let engine = engine.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                let name = engine.translate_type_name("wafrules", "v1", false).unwrap();
                assert_eq!(name, "contentfilterrules");
                let id = if i % 2 == 0 { json!("acl") } else { json!(5) };
                let result = engine.validate(&acl_profile(id), "aclprofiles").unwrap();
                assert_eq!(result.ok, i % 2 == 0);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
