//! End-to-end tests of the accounts middleware mounted through `router`

use axum::{
    body::Body,
    http::{
        header::{ACCEPT, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Request, StatusCode,
    },
};
use kitbag_auth::{router, AccountsMiddleware};
use std::sync::{Arc, Mutex};

use crate::common::{bearer, body_json, body_text, send, test_app, Applications, USER};

mod common;

#[tokio::test]
async fn test_whoami_with_token() {
    let request = Request::builder()
        .uri("/api/v1/whoami")
        .header(AUTHORIZATION, bearer(USER))
        .body(Body::empty())
        .unwrap();

    let response = send(test_app(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let body = body_json(response).await;
    assert_eq!(body["upn"], USER);
    assert_eq!(body["impersonating"], false);
}

#[tokio::test]
async fn test_whoami_impersonated() {
    let request = Request::builder()
        .uri("/api/v1/whoami")
        .header(AUTHORIZATION, bearer(USER))
        .header("Impersonate-User", "john@example.com")
        .header("Impersonate-Group", "auditors, platform-admins")
        .body(Body::empty())
        .unwrap();

    let response = send(test_app(), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["upn"], "john@example.com");
    assert_eq!(body["impersonating"], true);
    assert_eq!(body["groups"], serde_json::json!(["auditors", "platform-admins"]));
}

#[tokio::test]
async fn test_missing_bearer_is_rejected_as_json() {
    let request = Request::builder()
        .uri("/api/v1/whoami")
        .header(ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = send(test_app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        response.headers()[CONTENT_TYPE],
        "application/json; charset=utf-8"
    );

    let body = body_json(response).await;
    assert_eq!(body["type"], "user");
    assert_eq!(body["message"], "Error: Authentication header is invalid: ");
}

#[tokio::test]
async fn test_malformed_bearer_without_accept_is_plain_text() {
    let request = Request::builder()
        .uri("/api/v1/whoami")
        .header(AUTHORIZATION, "Bearer")
        .body(Body::empty())
        .unwrap();

    let response = send(test_app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Authentication header is invalid: Bearer"
    );
}

#[tokio::test]
async fn test_half_set_impersonation_is_server_error() {
    let request = Request::builder()
        .uri("/api/v1/whoami")
        .header(AUTHORIZATION, bearer(USER))
        .header("Impersonate-Group", "auditors")
        .header(ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = send(test_app(), request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["type"], "server");
    assert_eq!(body["message"], "Problems impersonating");
    assert_eq!(
        body["error"],
        "Impersonation cannot be done without both user and group being set"
    );
}

#[tokio::test]
async fn test_token_without_upn_is_user_error() {
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &serde_json::json!({ "sub": "1234" }),
        &jsonwebtoken::EncodingKey::from_secret(b"cluster-signing-key"),
    )
    .unwrap();

    let request = Request::builder()
        .uri("/api/v1/whoami")
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .header(ACCEPT, "text/plain")
        .body(Body::empty())
        .unwrap();

    let response = send(test_app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Error: token has no 'upn' claim");
}

#[tokio::test]
async fn test_configured_origin_and_handled_hook() {
    let handled: Arc<Mutex<Vec<(String, u16)>>> = Arc::default();
    let recorder = Arc::clone(&handled);

    let middleware = AccountsMiddleware::default()
        .with_allow_origin(HeaderValue::from_static("https://console.example.com"))
        .on_handled(move |request| {
            recorder
                .lock()
                .unwrap()
                .push((request.path.clone(), request.status.as_u16()));
        });
    let app = router(&[&Applications], middleware).unwrap();

    let ok = Request::builder()
        .uri("/api/v1/whoami")
        .header(AUTHORIZATION, bearer(USER))
        .body(Body::empty())
        .unwrap();
    let response = send(app.clone(), ok).await;
    assert_eq!(
        response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://console.example.com"
    );

    let rejected = Request::builder()
        .uri("/api/v1/applications/demo")
        .body(Body::empty())
        .unwrap();
    let response = send(app, rejected).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://console.example.com"
    );

    assert_eq!(
        *handled.lock().unwrap(),
        vec![
            ("/api/v1/whoami".to_string(), 200),
            ("/api/v1/applications/demo".to_string(), 400),
        ]
    );
}

#[tokio::test]
async fn test_missing_application_is_not_found() {
    let request = Request::builder()
        .uri("/api/v1/applications/demo")
        .header(AUTHORIZATION, bearer(USER))
        .header(ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = send(test_app(), request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["type"], "missing");
    assert_eq!(body["message"], "Unable to get application demo");
    assert_eq!(body["error"], "applications \"demo\" not found");
}
