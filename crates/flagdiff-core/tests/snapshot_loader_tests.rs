//! Snapshot and catalog decoding, digests and invariant checks.

use flagdiff_core::errors::ExErrorKind;
use flagdiff_core::snapshot::{check_snapshot_invariants, load_project_flags, load_segments};
use flagdiff_core::Snapshot;

#[test]
fn test_snapshot_from_array_root() {
    let bytes = br#"[
        {"feature": 1, "enabled": true, "feature_state_value": "on"},
        {"feature": 2, "enabled": false,
         "feature_segment": {"segment": 5, "priority": 0}}
    ]"#;

    let snapshot = Snapshot::from_json_bytes(bytes).unwrap();

    assert_eq!(snapshot.feature_states.len(), 2);
    assert_eq!(snapshot.feature_ids(), vec![1, 2]);
    assert_eq!(snapshot.feature_states[1].segment_id(), Some(5));
}

#[test]
fn test_snapshot_from_object_root() {
    let bytes = br#"{"feature_states": [{"feature": 7}]}"#;

    let snapshot = Snapshot::from_json_bytes(bytes).unwrap();

    assert_eq!(snapshot.feature_states.len(), 1);
    assert!(!snapshot.feature_states[0].enabled);
}

#[test]
fn test_missing_field_error() {
    let err = Snapshot::from_named_json_bytes("old.json", br#"{"states": []}"#).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::MissingField);
    assert_eq!(err.code(), "ERR_MISSING_FIELD");
    assert_eq!(err.op(), Some("load_snapshot"));
    assert_eq!(err.entity_id(), Some("old.json"));
}

#[test]
fn test_invalid_json_error() {
    let err = Snapshot::from_json_bytes(b"{not json").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
}

#[test]
fn test_not_utf8_error() {
    let err = Snapshot::from_json_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
}

#[test]
fn test_scalar_root_rejected() {
    let err = Snapshot::from_json_bytes(b"42").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
    assert_eq!(err.code(), "ERR_INVALID_SNAPSHOT");
}

#[test]
fn test_invalid_record_names_index() {
    let bytes = br#"[{"feature": 1}, {"feature": "not-an-id"}]"#;

    let err = Snapshot::from_named_json_bytes("new.json", bytes).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
    assert!(err.message().contains("element 1"));
}

#[test]
fn test_load_project_flags_and_segments() {
    let flags = br#"{"project_flags": [
        {"id": 1, "name": "checkout",
         "multivariate_options": [
            {"id": 10, "type": "unicode", "string_value": "A"},
            {"id": 20, "integer_value": 3}
         ]}
    ]}"#;
    let segments = br#"[{"id": 5, "name": "beta"}]"#;

    let flags = load_project_flags("flags.json", flags).unwrap();
    let segments = load_segments("segments.json", segments).unwrap();

    assert_eq!(flags[0].multivariate_options.len(), 2);
    assert!(flags[0].option(20).is_some());
    assert_eq!(segments[0].name, "beta");
}

#[test]
fn test_catalog_errors_carry_op() {
    let err = load_segments("segments.json", br#"{"segments": 3}"#).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
    assert_eq!(err.op(), Some("load_segments"));
}

#[test]
fn test_digest_ignores_input_order() {
    let a = Snapshot::from_json_bytes(
        br#"[{"feature": 1, "enabled": true}, {"feature": 2, "enabled": false}]"#,
    )
    .unwrap();
    let b = Snapshot::from_json_bytes(
        br#"[{"feature": 2, "enabled": false}, {"feature": 1, "enabled": true}]"#,
    )
    .unwrap();
    let c = Snapshot::from_json_bytes(br#"[{"feature": 1, "enabled": false}]"#).unwrap();

    let digest = a.digest().unwrap();
    assert_eq!(digest.len(), 64);
    assert_eq!(digest, b.digest().unwrap());
    assert_ne!(digest, c.digest().unwrap());
}

#[test]
fn test_duplicate_states_reported() {
    let snapshot = Snapshot::from_json_bytes(
        br#"[
            {"feature": 1, "environment": 3, "enabled": true},
            {"feature": 1, "environment": 3, "enabled": false},
            {"feature": 1, "environment": 3, "feature_segment": {"segment": 9, "priority": 0}},
            {"feature": 1, "environment": 3, "feature_segment": {"segment": 9, "priority": 1}}
        ]"#,
    )
    .unwrap();

    let violations = check_snapshot_invariants("old", &snapshot.feature_states);

    assert_eq!(violations.len(), 2);
}
