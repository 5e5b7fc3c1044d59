//! Common test utilities and fixtures for integration tests
//!
//! - A small application controller mounted through `kitbag_auth::router`
//! - Token helpers
//! - Request and body helpers

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::Path,
    http::{HeaderMap, Method, Request},
    response::{IntoResponse, Response},
    Router,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use kitbag_auth::{router, Accounts, AccountsMiddleware, Controller, Route};
use kitbag_http::{
    bytes_response, error_response, json_response, select_content_type, AcceptHeader, ApiError,
};
use serde_json::json;
use tower::ServiceExt;

pub const USER: &str = "jane@example.com";

/// Signed token carrying `upn`; the signature is never checked by the services
pub fn token_for(upn: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        &json!({ "upn": upn, "sub": "1234" }),
        &EncodingKey::from_secret(b"cluster-signing-key"),
    )
    .unwrap()
}

pub fn bearer(upn: &str) -> String {
    format!("Bearer {}", token_for(upn))
}

/// Controller exposing a handful of application endpoints
pub struct Applications;

impl Controller for Applications {
    fn routes(&self) -> Vec<Route> {
        vec![
            Route::new("/api/v1/whoami", Method::GET, whoami).unwrap(),
            Route::new("/api/v1/applications/{name}", Method::GET, get_application).unwrap(),
            Route::new("/api/v1/applications/{name}/manifest", Method::GET, manifest).unwrap(),
            Route::new("/api/v1/logs/format", Method::GET, log_format).unwrap(),
        ]
    }
}

async fn whoami(headers: HeaderMap, accounts: Accounts) -> Response {
    match accounts.user_principal_name() {
        Ok(upn) => json_response(
            &headers,
            &json!({
                "upn": upn,
                "impersonating": accounts.impersonation().perform_impersonation(),
                "groups": accounts.impersonation().groups,
            }),
        ),
        Err(err) => error_response(&headers, ApiError::from(err)),
    }
}

async fn get_application(headers: HeaderMap, Path(name): Path<String>) -> Response {
    error_response(
        &headers,
        ApiError::application_not_found(
            format!("Unable to get application {}", name),
            format!("applications \"{}\" not found", name),
        ),
    )
}

/// Renders in whichever of YAML or JSON the client prefers
async fn manifest(headers: HeaderMap) -> Response {
    match select_content_type(&headers, &["application/yaml", "application/json"]) {
        Ok("application/yaml") => bytes_response("application/yaml", "name: demo\n"),
        Ok(_) => json_response(&headers, &json!({ "name": "demo" })),
        Err(not_acceptable) => not_acceptable.into_response(),
    }
}

/// Echoes the negotiated log format, `""` when none fits
async fn log_format(accept: AcceptHeader) -> String {
    accept.negotiate(&["text/plain", "application/x-ndjson"]).to_string()
}

pub fn test_app() -> Router {
    router(&[&Applications], AccountsMiddleware::default()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
