use crate::{
    api::ClientError,
    session::SessionError,
    store::StorageError,
};

use std::path::PathBuf;

#[test]
fn given_4xx_with_message_when_classified_then_authentication_with_server_text() {
    let err = SessionError::from_client(
        ClientError::api_error(400, Some("Incorrect password.".into())),
        "Login failed",
    );

    assert!(matches!(err, SessionError::Authentication { status: 400, .. }));
    assert_eq!(err.user_message(), "Incorrect password.");
    assert_eq!(err.status(), Some(400));
}

#[test]
fn given_4xx_without_message_when_classified_then_uses_fallback() {
    let err = SessionError::from_client(ClientError::api_error(401, None), "Login failed");

    assert!(matches!(err, SessionError::Authentication { .. }));
    assert_eq!(err.user_message(), "Login failed");
}

#[test]
fn given_5xx_when_classified_then_server_error() {
    let err = SessionError::from_client(ClientError::api_error(503, None), "Invalid OTP");

    assert!(matches!(err, SessionError::Server { status: Some(503), .. }));
    assert_eq!(err.user_message(), "Invalid OTP");
}

#[test]
fn given_malformed_body_when_classified_then_server_error_without_status() {
    let json_err = serde_json::from_str::<u8>("{").unwrap_err();
    let err = SessionError::from_client(ClientError::from(json_err), "Failed to update profile");

    assert!(matches!(err, SessionError::Server { status: None, .. }));
    assert_eq!(err.status(), None);
    assert_eq!(err.user_message(), "Failed to update profile");
}

#[test]
fn given_not_authenticated_then_user_message_asks_to_log_in() {
    let err = SessionError::not_authenticated();
    assert_eq!(err.user_message(), "Please log in first");
}

#[test]
fn given_storage_error_then_user_message_is_recovery_hint() {
    let storage = StorageError::file_write(
        PathBuf::from("/test"),
        std::io::Error::other("disk full"),
    );
    let hint = storage.recovery_hint();
    let err = SessionError::from(storage);

    assert_eq!(err.user_message(), hint);
}
