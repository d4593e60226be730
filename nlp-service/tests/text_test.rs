mod common;

use axum::http::StatusCode;
use common::{app_with, post_json, send, TEST_API_KEY};
use nlp_service::services::providers::mock::{MockTextProvider, MOCK_MODEL};
use serde_json::json;

#[tokio::test]
async fn generate_returns_text_and_usage() {
    let (app, mock) = app_with(MockTextProvider::new(true).with_text("Hello there!"));

    let (status, body) = send(
        &app,
        post_json(
            "/generate",
            Some(TEST_API_KEY),
            json!({ "prompt": "Say hello", "max_tokens": 32, "temperature": 0.7 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Hello there!");
    assert_eq!(body["model"], MOCK_MODEL);
    assert_eq!(body["finish_reason"], "complete");
    assert!(body["usage"]["input_tokens"].is_u64());

    let call = &mock.calls()[0];
    assert_eq!(call.system, None);
    assert_eq!(call.params.max_tokens, Some(32));
    assert_eq!(call.params.temperature, Some(0.7));
    assert!(call.params.output_schema.is_none());
}

#[tokio::test]
async fn generate_rejects_out_of_range_temperature() {
    let (app, mock) = app_with(MockTextProvider::new(true));

    let (status, _) = send(
        &app,
        post_json(
            "/generate",
            Some(TEST_API_KEY),
            json!({ "prompt": "Say hello", "temperature": 3.0 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn empty_generation_is_bad_gateway() {
    let (app, _) = app_with(MockTextProvider::new(true).with_text("   "));

    let (status, _) = send(
        &app,
        post_json("/generate", Some(TEST_API_KEY), json!({ "prompt": "Say hello" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn analyze_returns_structured_analysis() {
    let (app, mock) = app_with(MockTextProvider::new(true).with_text(
        r#"{"sentiment":"frustrated","topics":["delivery"],"language":"en","summary":"Upset about a late parcel."}"#,
    ));

    let (status, body) = send(
        &app,
        post_json(
            "/analyze",
            Some(TEST_API_KEY),
            json!({ "text": "The package is a week late and nobody answers." }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "frustrated");
    assert_eq!(body["topics"], json!(["delivery"]));
    assert_eq!(body["language"], "en");

    let call = &mock.calls()[0];
    let schema = call.params.output_schema.as_ref().unwrap();
    assert_eq!(schema.name, "text_analysis");
    assert_eq!(
        schema.schema["properties"]["sentiment"]["enum"],
        json!(["angry", "frustrated", "neutral", "satisfied"])
    );
}

#[tokio::test]
async fn summarize_passes_sentence_limit_to_the_model() {
    let (app, mock) = app_with(MockTextProvider::new(true).with_text("Short summary."));

    let (status, body) = send(
        &app,
        post_json(
            "/summarize",
            Some(TEST_API_KEY),
            json!({ "text": "A long article about shipping delays.", "max_sentences": 2 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Short summary.");
    assert_eq!(body["model"], MOCK_MODEL);

    let call = &mock.calls()[0];
    assert!(call.system.as_deref().unwrap().contains("at most 2 sentence"));
    assert_eq!(call.prompt, "A long article about shipping delays.");
}

#[tokio::test]
async fn summarize_defaults_to_three_sentences() {
    let (app, mock) = app_with(MockTextProvider::new(true).with_text("Summary."));

    let (status, _) = send(
        &app,
        post_json("/summarize", Some(TEST_API_KEY), json!({ "text": "Some text." })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(mock.calls()[0]
        .system
        .as_deref()
        .unwrap()
        .contains("at most 3 sentence"));
}
