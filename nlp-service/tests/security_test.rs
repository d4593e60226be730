mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{app_with, app_with_config, get, post_json, send, test_config};
use nlp_service::services::providers::mock::MockTextProvider;
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn business_requests(api_key: Option<&str>) -> Vec<Request<Body>> {
    vec![
        post_json(
            "/classify_ticket",
            api_key,
            json!({ "text": "My order hasn't arrived" }),
        ),
        post_json("/analyze", api_key, json!({ "text": "Great service" })),
        post_json("/summarize", api_key, json!({ "text": "Long text." })),
        post_json("/generate", api_key, json!({ "prompt": "Say hi" })),
    ]
}

#[tokio::test]
async fn wrong_api_key_is_forbidden_without_upstream_call() {
    let (app, mock) = app_with(MockTextProvider::new(true));

    for request in business_requests(Some("wrong")) {
        let uri = request.uri().to_string();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(body["error"], "Could not validate API key");
    }

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn missing_api_key_is_forbidden_without_upstream_call() {
    let (app, mock) = app_with(MockTextProvider::new(true));

    for request in business_requests(None) {
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn invalid_body_with_wrong_key_is_still_forbidden() {
    let (app, mock) = app_with(MockTextProvider::new(true));

    let (status, _) = send(
        &app,
        post_json("/classify_ticket", Some("wrong"), json!({ "text": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn responses_carry_request_id_timing_and_security_headers() {
    let (app, _) = app_with(MockTextProvider::new(true));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-request-id"], "req-42");
    assert!(headers.contains_key("x-process-time"));
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
}

#[tokio::test]
async fn forbidden_responses_also_get_request_id() {
    let (app, _) = app_with(MockTextProvider::new(true));

    let response = app
        .oneshot(post_json(
            "/generate",
            Some("wrong"),
            json!({ "prompt": "hi" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn cors_allows_configured_origin_only() {
    let mut config = test_config();
    config.security.allowed_origins = vec!["http://allowed.com".to_string()];
    let (app, _) = app_with_config(config, MockTextProvider::new(true));

    let preflight = |origin: &str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/classify_ticket")
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(preflight("http://allowed.com")).await.unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://allowed.com"
    );

    let response = app.oneshot(preflight("http://evil.com")).await.unwrap();
    assert!(!response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn wildcard_cors_allows_any_origin() {
    let (app, _) = app_with(MockTextProvider::new(true));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("Origin", "http://anywhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn openapi_document_is_public_and_declares_api_key_scheme() {
    let (app, _) = app_with(MockTextProvider::new(true));

    let (status, body) = send(&app, get("/.well-known/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/classify_ticket"].is_object());
    let scheme: &Value = &body["components"]["securitySchemes"]["api_key"];
    assert_eq!(scheme["in"], "header");
    assert_eq!(scheme["name"], "x-api-key");
}
