//! Authorized marketplace calls pick up whatever token is attached when the
//! request is built.

mod common;

use common::{Harness, auth_body};

use tr_session::{BookingStatus, NewBooking, SessionError};

use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

fn authorization_of(request: &wiremock::Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

#[tokio::test]
async fn given_authenticated_when_list_professionals_then_bearer_attached() {
    let h = Harness::authenticated(7).await;

    Mock::given(method("GET"))
        .and(path("/profiles/professionals/"))
        .and(header("authorization", "Bearer A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 3 }])))
        .expect(1)
        .mount(&h.server)
        .await;

    let body = h.session.list_professionals().await.unwrap();

    assert_eq!(body[0]["id"], 3);
}

#[tokio::test]
async fn given_anonymous_when_list_products_then_no_authorization_header() {
    let h = Harness::new().await;
    h.session.initialize().await;

    Mock::given(method("GET"))
        .and(path("/marketplace/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;

    h.session.list_products().await.unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(authorization_of(&requests[0]), None);
}

#[tokio::test]
async fn given_token_changes_then_next_request_uses_current_token() {
    let h = Harness::new().await;

    Mock::given(method("POST"))
        .and(path("/profiles/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("first", "R1", 7)))
        .up_to_n_times(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/profiles/otp-verify/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("second", "R2", 7)))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/marketplace/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;

    h.session.list_services().await.unwrap();
    h.session.login("a@b.com", "x").await.unwrap();
    h.session.list_services().await.unwrap();
    h.session.verify_otp("080", "123456").await.unwrap();
    h.session.list_services().await.unwrap();
    h.session.logout().await;
    h.session.list_services().await.unwrap();

    let seen: Vec<Option<String>> = h
        .server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/marketplace/services/")
        .map(authorization_of)
        .collect();

    assert_eq!(
        seen,
        vec![
            None,
            Some("Bearer first".to_string()),
            Some("Bearer second".to_string()),
            None,
        ]
    );
}

#[tokio::test]
async fn given_booking_when_create_then_posted_with_bearer() {
    let h = Harness::authenticated(7).await;

    Mock::given(method("POST"))
        .and(path("/bookings/"))
        .and(header("authorization", "Bearer A"))
        .and(body_json(json!({
            "professional": 3,
            "service_type": "Tailoring",
            "date": "2026-11-02T10:00:00Z",
            "notes": "Agbada, blue"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 42 })))
        .expect(1)
        .mount(&h.server)
        .await;

    let booking = NewBooking {
        professional: 3,
        service_type: "Tailoring".into(),
        date: "2026-11-02T10:00:00Z".into(),
        location: None,
        notes: Some("Agbada, blue".into()),
    };
    let body = h.session.create_booking(&booking).await.unwrap();

    assert_eq!(body["id"], 42);
}

#[tokio::test]
async fn given_booking_when_update_status_then_patched_lowercase() {
    let h = Harness::authenticated(7).await;

    Mock::given(method("PATCH"))
        .and(path("/bookings/42/update-status/"))
        .and(body_json(json!({ "status": "accepted" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "accepted" })))
        .expect(1)
        .mount(&h.server)
        .await;

    h.session
        .update_booking_status(42, BookingStatus::Accepted)
        .await
        .unwrap();
}

#[tokio::test]
async fn given_booking_when_cancel_then_empty_body_is_null() {
    let h = Harness::authenticated(7).await;

    Mock::given(method("DELETE"))
        .and(path("/bookings/42/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    let body = h.session.cancel_booking(42).await.unwrap();

    assert!(body.is_null());
}

#[tokio::test]
async fn given_professional_when_booking_summary_then_professional_dashboard() {
    let h = Harness::authenticated(7).await;

    Mock::given(method("GET"))
        .and(path("/bookings/dashboard/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pending": 2 })))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bookings/customer/dashboard/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 1 })))
        .expect(1)
        .mount(&h.server)
        .await;

    assert_eq!(h.session.booking_summary(true).await.unwrap()["pending"], 2);
    assert_eq!(h.session.booking_summary(false).await.unwrap()["total"], 1);
}

#[tokio::test]
async fn given_unauthorized_when_list_bookings_then_session_not_changed() {
    let h = Harness::authenticated(7).await;

    Mock::given(method("GET"))
        .and(path("/bookings/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .mount(&h.server)
        .await;

    let err = h.session.list_bookings().await.unwrap_err();

    assert!(matches!(err, SessionError::Authentication { status: 401, .. }));
    assert_eq!(err.user_message(), "Given token not valid for any token type");
    assert!(h.session.state().is_authenticated());
    // Domain calls do not notify
    assert!(h.messages().is_empty());
}
