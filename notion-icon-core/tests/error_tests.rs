use notion_icon_core::{IconError, RemoteFailure, Stage, TransportError};

#[test]
fn remote_failure_display() {
    assert_eq!(RemoteFailure::http(500, "").to_string(), "HTTP 500");
    assert_eq!(RemoteFailure::http(400, "bad").to_string(), "HTTP 400: bad");
    assert_eq!(RemoteFailure::other("timed out").to_string(), "timed out");
}

#[test]
fn remote_failure_from_transport_error() {
    let failure: RemoteFailure = TransportError("dns error".into()).into();
    assert_eq!(failure, RemoteFailure::other("dns error"));
}

#[test]
fn error_display_names_offending_input() {
    let err = IconError::InvalidIdentifier {
        input: "not-a-valid-id".into(),
    };
    assert_eq!(err.to_string(), "invalid page ID: not-a-valid-id");
}

#[test]
fn error_display_missing_binary() {
    let err = IconError::MissingBinaryInput {
        property: "data".into(),
    };
    assert!(err.to_string().contains("'data'"));
}

#[test]
fn error_display_stage_prefixes() {
    let failure = RemoteFailure::http(502, "gateway");
    assert_eq!(
        IconError::UploadSlot(failure.clone()).to_string(),
        "failed to get upload URL: HTTP 502: gateway"
    );
    assert!(IconError::StorageUpload(failure.clone())
        .to_string()
        .starts_with("failed to upload file to storage"));
    assert!(IconError::Commit(failure.clone())
        .to_string()
        .starts_with("failed to update page icon"));
    assert!(IconError::VerifyCredentials(failure)
        .to_string()
        .starts_with("credential check failed"));
}

#[test]
fn stages_and_locality() {
    let remote = RemoteFailure::other("x");
    let cases = [
        (IconError::InvalidIdentifier { input: "x".into() }, Stage::Normalize, true),
        (IconError::MissingIconUrl, Stage::Resolve, true),
        (IconError::MissingBinaryInput { property: "data".into() }, Stage::Resolve, true),
        (IconError::UploadSlot(remote.clone()), Stage::UploadSlot, false),
        (IconError::StorageUpload(remote.clone()), Stage::StorageUpload, false),
        (IconError::Commit(remote.clone()), Stage::Commit, false),
        (IconError::VerifyCredentials(remote), Stage::VerifyCredentials, false),
    ];
    for (err, stage, local) in cases {
        assert_eq!(err.stage(), stage, "{err}");
        assert_eq!(err.is_local(), local, "{err}");
    }
}

#[test]
fn stage_names() {
    assert_eq!(Stage::UploadSlot.to_string(), "upload-slot");
    assert_eq!(Stage::StorageUpload.to_string(), "upload-to-storage");
    assert_eq!(
        serde_json::to_value(Stage::StorageUpload).unwrap(),
        serde_json::json!("upload-to-storage")
    );
    assert_eq!(
        serde_json::to_value(Stage::UploadSlot).unwrap(),
        serde_json::json!("upload-slot")
    );
}

#[test]
fn status_only_for_remote_errors() {
    assert_eq!(IconError::Commit(RemoteFailure::http(409, "")).status(), Some(409));
    assert_eq!(IconError::MissingIconUrl.status(), None);
}
