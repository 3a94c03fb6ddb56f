//! Integration tests for user id namespacing through the adapter.

use std::sync::Arc;

use biometric_login::LoginError;
use biometric_login_core::{NAMESPACE_SEPARATOR, UserId};
use biometric_login_integration_tests::{ScriptedFaceApi, login_with};

#[test]
fn test_namespaced_identifier_for_user() {
    let login = login_with(&Arc::new(ScriptedFaceApi::new()));

    assert_eq!(
        login.namespaced_identifier_for(&UserId::new("test")).as_str(),
        "test@my-namespace"
    );
}

#[test]
fn test_round_trip_for_many_ids() {
    let login = login_with(&Arc::new(ScriptedFaceApi::new()));

    for raw in ["test", "myUserId", "42", "user.name+tag", ""] {
        let uid = UserId::new(raw);
        let namespaced = login.namespaced_identifier_for(&uid);

        assert_eq!(
            namespaced.as_str().find(NAMESPACE_SEPARATOR),
            Some(raw.len()),
            "separator must directly follow the uid"
        );
        assert_eq!(
            login
                .user_identifier_from_namespaced(namespaced.as_str())
                .expect("round trip"),
            uid
        );
    }
}

#[test]
fn test_missing_separator_is_malformed() {
    let login = login_with(&Arc::new(ScriptedFaceApi::new()));

    let result = login.user_identifier_from_namespaced("testmy-namespace");

    assert!(matches!(
        result,
        Err(LoginError::MalformedNamespacedIdentifier(ref s)) if s == "testmy-namespace"
    ));
}

#[test]
fn test_namespaced_list() {
    let login = login_with(&Arc::new(ScriptedFaceApi::new()));
    let uids: Vec<UserId> = ["rafa", "pedro", "joao"]
        .into_iter()
        .map(UserId::new)
        .collect();

    assert_eq!(
        login.namespaced_list_for(&uids),
        "rafa@my-namespace,pedro@my-namespace,joao@my-namespace"
    );
    assert_eq!(login.namespaced_list_for(&[]), "");
    assert_eq!(login.namespace().as_str(), "my-namespace");
}
