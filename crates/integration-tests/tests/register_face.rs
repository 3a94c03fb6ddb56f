//! Integration tests for face registration.
//!
//! These tests drive the detect -> save -> train pipeline against scripted
//! SkyBiometry responses.

use std::sync::Arc;

use serde_json::json;

use biometric_login::LoginError;
use biometric_login::skybiometry::SkyBiometryError;
use biometric_login_core::{PersistentTagId, TemporaryTagId, UserId, VendorOptions};
use biometric_login_integration_tests::{Call, Endpoint, ScriptedFaceApi, login_with};

const PHOTO_URL: &str = "http://placehold.it/400x400";

fn saved_tags_body() -> serde_json::Value {
    json!({
        "status": "success",
        "saved_tags": [{
            "detected_tid": "TEMP_F@0c95576847e9cd7123f1e304b1dcbe53_59ec9bb2ad15f_56.53_40.83_0_1",
            "tid": "b1dcbe53_59ec9bb2ad15f"
        }],
        "message": "Tag saved with uid: myUserId@my-namespace, label: "
    })
}

// =============================================================================
// Empty Detection Results
// =============================================================================

#[tokio::test]
async fn test_register_rejects_when_no_pictures_returned() {
    let api = Arc::new(
        ScriptedFaceApi::new()
            .reply(Endpoint::Detect, json!({"photos": []}))
            .reply(Endpoint::SaveTags, saved_tags_body())
            .reply(Endpoint::Train, json!({"status": "success"})),
    );

    let result = login_with(&api)
        .register_face_for_user(&UserId::new("myUserId"), PHOTO_URL, &VendorOptions::new())
        .await;

    assert!(matches!(result, Err(LoginError::NoPictureFound)));
    assert_eq!(api.endpoints(), [Endpoint::Detect]);
}

#[tokio::test]
async fn test_register_rejects_when_no_tags_returned() {
    let api = Arc::new(
        ScriptedFaceApi::new()
            .reply(Endpoint::Detect, json!({"photos": [{"tags": []}]}))
            .reply(Endpoint::SaveTags, saved_tags_body())
            .reply(Endpoint::Train, json!({"status": "success"})),
    );

    let result = login_with(&api)
        .register_face_for_user(&UserId::new("myUserId"), PHOTO_URL, &VendorOptions::new())
        .await;

    assert!(matches!(result, Err(LoginError::NoFacesDetected)));
    assert_eq!(api.endpoints(), [Endpoint::Detect]);
}

// =============================================================================
// Successful Registration
// =============================================================================

#[tokio::test]
async fn test_register_resolves_with_status_and_persistent_tag() {
    let api = Arc::new(
        ScriptedFaceApi::new()
            .reply(
                Endpoint::Detect,
                json!({"photos": [{"tags": [{"tid": "myTagId"}]}]}),
            )
            .reply(Endpoint::SaveTags, saved_tags_body())
            .reply(Endpoint::Train, json!({"status": "success"})),
    );

    let registration = login_with(&api)
        .register_face_for_user(&UserId::new("myUserId"), PHOTO_URL, &VendorOptions::new())
        .await
        .expect("registration succeeds");

    assert_eq!(registration.status, "success");
    assert_eq!(
        registration.tag_id,
        PersistentTagId::new("b1dcbe53_59ec9bb2ad15f")
    );
}

#[tokio::test]
async fn test_register_threads_ids_between_stages() {
    let api = Arc::new(
        ScriptedFaceApi::new()
            .reply(
                Endpoint::Detect,
                json!({"photos": [
                    {"tags": [{"tid": "first"}, {"tid": "second"}]},
                    {"tags": [{"tid": "other-photo"}]}
                ]}),
            )
            .reply(Endpoint::SaveTags, saved_tags_body())
            .reply(Endpoint::Train, json!({"status": "success"})),
    );

    login_with(&api)
        .register_face_for_user(
            &UserId::new("myUserId"),
            PHOTO_URL,
            &VendorOptions::new().with("detector", "normal"),
        )
        .await
        .expect("registration succeeds");

    let calls = api.calls();
    assert_eq!(calls.len(), 3);

    let Some(Call::Detect(detect)) = calls.first() else {
        panic!("first call should be detect, got {calls:?}");
    };
    assert_eq!(detect.urls, [PHOTO_URL]);
    assert_eq!(detect.options.get("detector"), Some("normal"));
    assert_eq!(detect.options.get("attributes"), Some("none"));

    let Some(Call::SaveTags(save)) = calls.get(1) else {
        panic!("second call should be save, got {calls:?}");
    };
    assert_eq!(save.uid.as_str(), "myUserId@my-namespace");
    assert_eq!(save.tids, [TemporaryTagId::new("first")]);

    let Some(Call::Train(train)) = calls.get(2) else {
        panic!("third call should be train, got {calls:?}");
    };
    assert_eq!(train.uids.as_str(), "myUserId@my-namespace");
}

// =============================================================================
// Vendor Failures
// =============================================================================

#[tokio::test]
async fn test_register_propagates_vendor_error_from_save() {
    let api = Arc::new(
        ScriptedFaceApi::new()
            .reply(
                Endpoint::Detect,
                json!({"photos": [{"tags": [{"tid": "myTagId"}]}]}),
            )
            .fail(
                Endpoint::SaveTags,
                SkyBiometryError::Api {
                    code: 302,
                    message: "TAG_NOT_FOUND".to_owned(),
                },
            )
            .reply(Endpoint::Train, json!({"status": "success"})),
    );

    let result = login_with(&api)
        .register_face_for_user(&UserId::new("myUserId"), PHOTO_URL, &VendorOptions::new())
        .await;

    assert!(matches!(
        result,
        Err(LoginError::Vendor(SkyBiometryError::Api { code: 302, .. }))
    ));
    assert_eq!(api.endpoints(), [Endpoint::Detect, Endpoint::SaveTags]);
}

#[tokio::test]
async fn test_register_propagates_vendor_error_from_train() {
    let api = Arc::new(
        ScriptedFaceApi::new()
            .reply(
                Endpoint::Detect,
                json!({"photos": [{"tags": [{"tid": "myTagId"}]}]}),
            )
            .reply(Endpoint::SaveTags, saved_tags_body())
            .fail(Endpoint::Train, SkyBiometryError::RateLimited(30)),
    );

    let result = login_with(&api)
        .register_face_for_user(&UserId::new("myUserId"), PHOTO_URL, &VendorOptions::new())
        .await;

    assert!(matches!(
        result,
        Err(LoginError::Vendor(SkyBiometryError::RateLimited(30)))
    ));
}
