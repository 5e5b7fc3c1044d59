//! Content negotiation through a mounted router

use axum::{
    body::Body,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    },
};
use kitbag_http::{negotiate_content_type, parse_accept};

use crate::common::{bearer, body_json, body_text, send, test_app, USER};

mod common;

fn manifest_request(accept: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri("/api/v1/applications/demo/manifest")
        .header(AUTHORIZATION, bearer(USER));
    if let Some(accept) = accept {
        builder = builder.header(ACCEPT, accept);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_manifest_defaults_to_first_preference() {
    let response = send(test_app(), manifest_request(None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/yaml");
    assert_eq!(body_text(response).await, "name: demo\n");
}

#[tokio::test]
async fn test_manifest_follows_quality() {
    let response = send(
        test_app(),
        manifest_request(Some("application/yaml;q=0.2, application/json;q=0.8")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "demo");
}

#[tokio::test]
async fn test_manifest_not_acceptable() {
    let response = send(test_app(), manifest_request(Some("text/html"))).await;

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    assert_eq!(
        body_text(response).await,
        "none of the supported content types is acceptable: application/yaml, application/json"
    );
}

#[tokio::test]
async fn test_malformed_accept_falls_back_to_first_preference() {
    let response = send(test_app(), manifest_request(Some("text/plain q=t.f"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/yaml");
}

#[tokio::test]
async fn test_accept_header_extractor() {
    let request = Request::builder()
        .uri("/api/v1/logs/format")
        .header(AUTHORIZATION, bearer(USER))
        .header(ACCEPT, "text/plain;q=0.3")
        .header(ACCEPT, "application/x-ndjson;q=0.7")
        .body(Body::empty())
        .unwrap();

    let response = send(test_app(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "application/x-ndjson");
}

#[test]
fn test_parse_and_negotiate_agree() {
    let header = ["text/html;q=0.9, application/json"];

    let specs = parse_accept(header).unwrap();
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].value, "text/html");
    assert_eq!(specs[0].quality, 0.9);
    assert_eq!(specs[1].value, "application/json");
    assert_eq!(specs[1].quality, 1.0);

    let prefs = ["application/json", "text/plain"];
    assert_eq!(negotiate_content_type(header, &prefs), "application/json");
    assert_eq!(negotiate_content_type(["application/xml"], &prefs), "");
}
