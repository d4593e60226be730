//! Shared setup for nlp-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use nlp_service::{
    build_router,
    config::{NlpConfig, OpenAiConfig, SecurityConfig},
    services::providers::mock::MockTextProvider,
    AppState,
};
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub const TEST_API_KEY: &str = "secret123";

pub const ORDER_TICKET_JSON: &str = r#"{
    "category": "order_issue",
    "urgency": "medium",
    "sentiment": "frustrated",
    "confidence": 0.88,
    "key_information": ["order not delivered"],
    "suggested_action": "Look up the shipment status and update the customer"
}"#;

pub fn test_config() -> NlpConfig {
    NlpConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "error".to_string(),
            otlp_endpoint: None,
        },
        openai: OpenAiConfig {
            api_key: Secret::new("sk-test".to_string()),
            model: "gpt-4o-mini".to_string(),
            base_url: "http://127.0.0.1:9/v1".to_string(),
            timeout: Duration::from_secs(5),
        },
        security: SecurityConfig {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            allowed_origins: vec!["*".to_string()],
        },
    }
}

/// Router backed by the given mock; the mock handle stays with the caller.
pub fn app_with(provider: MockTextProvider) -> (Router, Arc<MockTextProvider>) {
    app_with_config(test_config(), provider)
}

pub fn app_with_config(
    config: NlpConfig,
    provider: MockTextProvider,
) -> (Router, Arc<MockTextProvider>) {
    let provider = Arc::new(provider);
    let state = AppState::new(config, provider.clone());
    (build_router(state), provider)
}

pub fn post_json(uri: &str, api_key: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
