//! Integration tests for face removal.

use std::sync::Arc;

use serde_json::json;

use biometric_login::LoginError;
use biometric_login::skybiometry::{RemoveTagsResponse, SkyBiometryError};
use biometric_login_core::PersistentTagId;
use biometric_login_integration_tests::{Call, Endpoint, ScriptedFaceApi, login_with};

#[tokio::test]
async fn test_remove_returns_vendor_response_unmodified() {
    let body = json!({
        "status": "success",
        "removed_tags": [{
            "removed_tid": "b1dcbe53_59ec9bb2ad15f",
            "tid": "b1dcbe53_59ec9bb2ad15f"
        }],
        "message": "Tag removed"
    });
    let expected: RemoveTagsResponse = serde_json::from_value(body.clone()).expect("fixture");
    let api = Arc::new(ScriptedFaceApi::new().reply(Endpoint::RemoveTags, body));

    let response = login_with(&api)
        .remove_face_for_user(&PersistentTagId::new("b1dcbe53_59ec9bb2ad15f"))
        .await
        .expect("removal succeeds");

    assert_eq!(response, expected);
    assert_eq!(response.status, "success");

    let calls = api.calls();
    let Some(Call::RemoveTags(request)) = calls.first() else {
        panic!("expected a remove call, got {calls:?}");
    };
    assert_eq!(request.tids, [PersistentTagId::new("b1dcbe53_59ec9bb2ad15f")]);
}

#[tokio::test]
async fn test_remove_keeps_fields_it_does_not_model() {
    let body = json!({
        "status": "success",
        "removed_tags": [{
            "removed_tid": "b1dcbe53_59ec9bb2ad15f",
            "tid": "b1dcbe53_59ec9bb2ad15f",
            "label": "front"
        }],
        "message": "Tag removed",
        "usage": { "used": 3, "remaining": 97 }
    });
    let api = Arc::new(ScriptedFaceApi::new().reply(Endpoint::RemoveTags, body.clone()));

    let response = login_with(&api)
        .remove_face_for_user(&PersistentTagId::new("b1dcbe53_59ec9bb2ad15f"))
        .await
        .expect("removal succeeds");

    assert_eq!(response.extra.get("usage"), Some(&json!({ "used": 3, "remaining": 97 })));
    assert_eq!(serde_json::to_value(&response).expect("serialize"), body);
}

#[tokio::test]
async fn test_remove_without_message_serializes_without_it() {
    let body = json!({
        "status": "success",
        "removed_tags": [{ "removed_tid": "b1dcbe53_59ec9bb2ad15f" }]
    });
    let api = Arc::new(ScriptedFaceApi::new().reply(Endpoint::RemoveTags, body.clone()));

    let response = login_with(&api)
        .remove_face_for_user(&PersistentTagId::new("b1dcbe53_59ec9bb2ad15f"))
        .await
        .expect("removal succeeds");

    assert_eq!(serde_json::to_value(&response).expect("serialize"), body);
}

#[tokio::test]
async fn test_remove_propagates_vendor_error() {
    let api = Arc::new(ScriptedFaceApi::new().fail(
        Endpoint::RemoveTags,
        SkyBiometryError::Api {
            code: 303,
            message: "TAG_NOT_FOUND".to_owned(),
        },
    ));

    let result = login_with(&api)
        .remove_face_for_user(&PersistentTagId::new("missing"))
        .await;

    assert!(matches!(
        result,
        Err(LoginError::Vendor(SkyBiometryError::Api { code: 303, .. }))
    ));
}
