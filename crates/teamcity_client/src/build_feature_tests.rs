//! Tests for the shared build feature envelope.

use super::*;
use crate::Property;
use serde_json::{from_str, json, to_value};

/// Verify the envelope wire shape produced for a scoped feature.
#[test]
fn test_encode_envelope_with_vcs_root() {
    let props = Properties::new(vec![Property::new("teamcitySshKey", "deploy")]);

    let envelope = encode_envelope(
        "BUILD_EXT_2",
        false,
        &props,
        Some("vcs1"),
        "ssh-agent-build-feature",
    );
    let value = to_value(&envelope).expect("Failed to serialize");

    assert_eq!(
        value,
        json!({
            "id": "BUILD_EXT_2",
            "disabled": false,
            "properties": {
                "count": 2,
                "property": [
                    { "name": "teamcitySshKey", "value": "deploy" },
                    { "name": "vcsRootId", "value": "vcs1" }
                ]
            },
            "inherited": false,
            "type": "ssh-agent-build-feature"
        })
    );

    // The source bag is not modified by encoding
    assert_eq!(props.len(), 1);
}

/// Verify that an empty id is omitted so the envelope can be used for creation.
#[test]
fn test_encode_envelope_without_id() {
    let envelope = encode_envelope("", true, &Properties::empty(), None, "pullRequests");
    let value = to_value(&envelope).expect("Failed to serialize");

    assert!(value.get("id").is_none());
    assert_eq!(value["disabled"], json!(true));
    assert_eq!(value["inherited"], json!(false));
    assert_eq!(value["type"], json!("pullRequests"));
}

/// Verify that a scope already present in the bag is replaced, not duplicated.
#[test]
fn test_encode_envelope_replaces_existing_scope() {
    let props = Properties::new(vec![Property::new(VCS_ROOT_ID_KEY, "old")]);

    let envelope = encode_envelope("", false, &props, Some("new"), "pullRequests");

    assert_eq!(envelope.properties.len(), 1);
    assert_eq!(envelope.properties.get(VCS_ROOT_ID_KEY), Some("new"));
}

/// Verify envelope decoding with null and missing optional fields.
#[test]
fn test_envelope_deserialization_defaults() {
    let envelope: BuildFeatureJson =
        from_str(r#"{"id": "BUILD_EXT_3", "disabled": null, "type": "pullRequests"}"#)
            .expect("Failed to deserialize");

    assert_eq!(envelope.id, "BUILD_EXT_3");
    assert_eq!(envelope.disabled, None);
    assert!(envelope.properties.is_empty());
    assert!(!envelope.inherited);
    assert_eq!(envelope.feature_type, "pullRequests");
}

/// Verify that null envelope fields decode like absent fields.
#[test]
fn test_envelope_deserialization_null_fields() {
    let envelope: BuildFeatureJson = from_str(
        r#"{"id": null, "disabled": null, "inherited": null, "type": null, "properties": null}"#,
    )
    .expect("Failed to deserialize");

    assert!(envelope.id.is_empty());
    assert_eq!(envelope.disabled, None);
    assert!(envelope.properties.is_empty());
    assert!(!envelope.inherited);
    assert!(envelope.feature_type.is_empty());
}

/// Verify that a wrongly typed inherited flag is still rejected.
#[test]
fn test_envelope_deserialization_rejects_wrong_type() {
    assert!(from_str::<BuildFeatureJson>(r#"{"inherited": "no"}"#).is_err());
}

/// Verify that empty scopes mean "all VCS roots".
#[test]
fn test_vcs_root_scope() {
    assert_eq!(vcs_root_scope(""), None);
    assert_eq!(vcs_root_scope("vcs1"), Some("vcs1".to_string()));
}
